//! # Region Extender
//!
//! Grows an edited range to a self-consistent rescan boundary. Boundaries
//! are the starts of empty lines (paragraph breaks). A boundary that lands
//! inside a preformatted block is pulled to the block's edge so a fenced
//! block is always rescanned whole.

use std::ops::Range;

use log::debug;
use xi_rope::Rope;

use crate::parsing::rope::{line_at, last_line};
use crate::store::{SpanKind, SpanStore};

/// Largest paragraph boundary at or before `pos`, or 0.
fn boundary_before(rope: &Rope, pos: usize) -> usize {
    let first = rope.line_of_offset(pos);
    (0..=first)
        .rev()
        .map(|n| line_at(rope, n))
        .find(|line| line.is_blank())
        .map_or(0, |line| line.range.start)
}

/// Smallest paragraph boundary at or after `pos`, or the buffer end.
fn boundary_after(rope: &Rope, pos: usize) -> usize {
    let first = rope.line_of_offset(pos);
    (first..=last_line(rope))
        .map(|n| line_at(rope, n))
        .find(|line| line.range.start >= pos && line.is_blank())
        .map_or(rope.len(), |line| line.range.start)
}

/// One extension step. Returns `None` once `region` is already a fixed
/// point, otherwise the grown range.
pub fn extend_region(rope: &Rope, store: &SpanStore, region: Range<usize>) -> Option<Range<usize>> {
    let len = rope.len();
    let start = region.start.min(len);
    let end = region.end.clamp(start, len);

    let mut new_start = boundary_before(rope, start);
    let mut new_end = boundary_after(rope, end);

    if let Some(pre) = store.at(SpanKind::PreText, new_start)
        && pre.start() < new_start
    {
        new_start = pre.start();
    }
    if let Some(pre) = store.at(SpanKind::PreText, new_end)
        && pre.start() < new_end
    {
        new_end = pre.end().min(len);
    }

    let extended = new_start..new_end;
    (extended != region).then_some(extended)
}

/// Re-applies [`extend_region`] until it reports a fixed point.
pub fn extend_to_fixed_point(rope: &Rope, store: &SpanStore, region: Range<usize>) -> Range<usize> {
    let requested = region.clone();
    let mut region = region;
    let mut steps = 0;
    while let Some(next) = extend_region(rope, store, region.clone()) {
        region = next;
        steps += 1;
    }
    debug!("extended {requested:?} to {region:?} in {steps} steps");
    region
}
