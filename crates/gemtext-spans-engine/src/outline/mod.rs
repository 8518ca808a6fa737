//! # Outline Index
//!
//! Heading depth derived from spans on demand. Positions inside
//! preformatted text report a depth deeper than any heading, so a fenced
//! line starting with `#` never becomes an outline node.

pub mod fold;

use std::ops::Range;

use crate::parsing::lines::Heading;
use crate::store::{SpanKind, SpanStore};

pub use fold::{FoldNode, FoldTree};

/// Outline depth of a position. Orders `Level(1) < Level(2) < Level(3) <
/// Preformatted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutlineDepth {
    Level(u8),
    Preformatted,
}

/// A heading as seen by the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    /// The heading line, terminator excluded.
    pub range: Range<usize>,
    pub level: u8,
}

/// Depth at `pos`, or `None` when `pos` is not on a heading.
pub fn depth(store: &SpanStore, pos: usize) -> Option<OutlineDepth> {
    if store.at(SpanKind::PreText, pos).is_some() {
        return Some(OutlineDepth::Preformatted);
    }
    store
        .at(SpanKind::Heading, pos)
        .and_then(Heading::level)
        .map(OutlineDepth::Level)
}

/// Headings intersecting `range`, in buffer order.
pub fn headings(store: &SpanStore, range: Range<usize>) -> Vec<OutlineEntry> {
    store
        .query(range, SpanKind::Heading)
        .filter_map(|span| match depth(store, span.start()) {
            Some(OutlineDepth::Level(level)) => Some(OutlineEntry {
                range: span.range.clone(),
                level,
            }),
            _ => None,
        })
        .collect()
}
