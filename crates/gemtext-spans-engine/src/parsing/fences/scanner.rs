use std::ops::Range;

use log::trace;
use xi_rope::Rope;

use crate::parsing::fences::CodeFence;
use crate::parsing::rope::lines_in;
use crate::store::{SpanKind, SpanStore};

/// Is a fence opened before `pos` still unclosed at `pos`?
///
/// Looks back for the nearest FenceBegin, then for a FenceEnd between it
/// and `pos`. Only spans before `pos` are consulted, so this is valid
/// after the region starting at `pos` has been cleared.
pub fn carried_in(store: &SpanStore, pos: usize) -> bool {
    if pos == 0 {
        return false;
    }
    let Some(begin) = store.find_previous_open(SpanKind::FenceBegin, pos - 1, 0) else {
        return false;
    };
    store
        .find_previous_open(SpanKind::FenceEnd, pos - 1, begin)
        .is_none()
}

/// Scans a line-aligned, already-cleared region for fenced blocks and
/// writes FenceBegin, PreText and FenceEnd spans. Returns whether a fence
/// is still open at the region end.
pub fn scan(rope: &Rope, store: &mut SpanStore, region: Range<usize>) -> bool {
    // Start of the current block's content, while a fence is open.
    let mut open = carried_in(store, region.start).then_some(region.start);
    if open.is_some() {
        trace!("fence carried into {region:?}");
    }

    for line in lines_in(rope, region.clone()) {
        match open {
            Some(content_start) => {
                if let Some(end) = CodeFence::end(&line) {
                    trace!("fence closed at {}", line.range.start);
                    store.set(SpanKind::PreText, content_start..line.range.start, vec![]);
                    store.set(SpanKind::FenceEnd, end.range, end.groups);
                    open = None;
                }
            }
            None => {
                if let Some(begin) = CodeFence::begin(&line) {
                    trace!("fence opened at {}", line.range.start);
                    store.set(SpanKind::FenceBegin, begin.range, begin.groups);
                    open = Some(line.range.end);
                }
            }
        }
    }

    match open {
        Some(content_start) => {
            store.set(SpanKind::PreText, content_start..region.end, vec![]);
            true
        }
        None => false,
    }
}
