//! # Propertizer
//!
//! Classification entry point. [`propertize`] clears a region of the span
//! store and rebuilds it: the block scanner runs first, then each line
//! matcher with lines covered by PreText suppressed. It is the only writer
//! of spans; everything else reads the store.
//!
//! ## Modules
//!
//! - **`rope`**: line iteration and slicing over the xi-rope buffer
//! - **`fences`**: block scanner for fenced preformatted blocks
//! - **`lines`**: single-line matchers (heading, list item, quote, link)
//! - **`region`**: region extension to paragraph and block boundaries
//! - **`snapshot`**: stable text rendering and invariant checks for tests

pub mod fences;
pub mod lines;
pub mod region;
pub mod rope;
pub mod snapshot;

use std::ops::Range;

use log::debug;
use xi_rope::Rope;

use crate::store::{Span, SpanKind, SpanStore};
use lines::LINE_MATCHERS;
use rope::{line_aligned, lines_in};

pub use region::{extend_region, extend_to_fixed_point};

/// Outcome of one propertize pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propertized {
    /// The line-aligned range that was rebuilt.
    pub range: Range<usize>,
    /// Whether the spans after the region showed an open fence before the pass.
    pub was_open_at_end: bool,
    /// Whether a fence is open at the region end after the pass.
    pub open_at_end: bool,
}

impl Propertized {
    /// True when text after the region was classified under a different
    /// fence state and needs rescanning.
    pub fn fence_state_changed(&self) -> bool {
        self.was_open_at_end != self.open_at_end
    }
}

/// Fence state at a line start, as recorded by the spans from that line on.
///
/// The first fence span reaching past `pos` decides: PreText or a FenceEnd
/// means a block was open, a FenceBegin (or nothing) means none was. Text
/// inserted after a fence line can leave unclassified lines between `pos`
/// and the block content, so this looks ahead rather than only at `pos`.
pub fn fence_open_observed(store: &SpanStore, pos: usize) -> bool {
    let first = |kind: SpanKind| store.query(pos..usize::MAX, kind).next().map(Span::start);
    let inside = [SpanKind::PreText, SpanKind::FenceEnd]
        .into_iter()
        .filter_map(first)
        .min();
    match (inside, first(SpanKind::FenceBegin)) {
        (Some(inside), Some(begin)) => inside < begin,
        (inside, _) => inside.is_some(),
    }
}

/// Rebuilds every span in `range`, widened to whole lines.
pub fn propertize(rope: &Rope, store: &mut SpanStore, range: Range<usize>) -> Propertized {
    let range = line_aligned(rope, range);
    let was_open_at_end = fence_open_observed(store, range.end);
    if range.is_empty() {
        return Propertized {
            range,
            was_open_at_end,
            open_at_end: was_open_at_end,
        };
    }

    store.clear(range.clone(), &SpanKind::ALL);
    let open_at_end = fences::scan(rope, store, range.clone());

    let lines: Vec<_> = lines_in(rope, range.clone()).collect();
    let suppressed = |pos: usize| store.at(SpanKind::PreText, pos).is_some();
    let mut found: Vec<Span> = Vec::new();
    for matcher in LINE_MATCHERS {
        found.extend(lines::matches(matcher, &lines, &suppressed));
    }
    let line_spans = found.len();
    for span in found {
        store.set(span.kind, span.range, span.groups);
    }

    debug!(
        "propertized {range:?}: {line_spans} line spans, fence open at end {was_open_at_end} -> {open_at_end}"
    );
    Propertized {
        range,
        was_open_at_end,
        open_at_end,
    }
}

/// Classifies a whole buffer from scratch.
pub fn propertize_all(rope: &Rope, store: &mut SpanStore) -> Propertized {
    store.clear_all();
    propertize(rope, store, 0..rope.len())
}
