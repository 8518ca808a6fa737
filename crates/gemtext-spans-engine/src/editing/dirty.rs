//! Dirty-region queue.
//!
//! Edits enqueue the ranges they touched. [`DirtyQueue::drain`] grows each
//! range to a region fixed point, merges overlapping regions, and
//! propertizes each merged region once. When a pass changes the fence
//! state at its region end, the text after it was classified under the
//! wrong state, so the next region is queued too. Each cascaded pass ends
//! past the previous region end, so the chain ends at the buffer end at the
//! latest.
//!
//! Seeds always reach the end of the line holding the edit end. The text
//! after a region is then old text starting at an old line start, and the
//! rebased spans there are still a valid classification of it.

use std::ops::Range;

use log::debug;
use xi_rope::Rope;

use crate::parsing::rope::line_end;
use crate::parsing::{extend_to_fixed_point, propertize};
use crate::store::SpanStore;

#[derive(Debug, Default, Clone)]
pub struct DirtyQueue {
    pending: Vec<Range<usize>>,
}

impl DirtyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, range: Range<usize>) {
        self.pending.push(range);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Propertizes everything queued, cascading across fence state
    /// changes. Returns the rebuilt regions, sorted and merged.
    pub fn drain(&mut self, rope: &Rope, store: &mut SpanStore) -> Vec<Range<usize>> {
        let mut done = Vec::new();
        while !self.pending.is_empty() {
            let regions: Vec<Range<usize>> = self
                .pending
                .drain(..)
                .map(|range| extend_to_fixed_point(rope, store, seed(rope, range)))
                .collect();
            for region in merge(regions) {
                let result = propertize(rope, store, region);
                let end = result.range.end;
                if result.fence_state_changed() && end < rope.len() {
                    debug!("fence state changed at {end}, rescanning what follows");
                    self.pending.push(end..end);
                }
                done.push(result.range);
            }
        }
        merge(done)
    }
}

/// Widens a changed range to the end of the line holding its end, so a
/// deletion still rescans the line it joined and a split line is rescanned
/// in both halves.
fn seed(rope: &Rope, range: Range<usize>) -> Range<usize> {
    let len = rope.len();
    let start = range.start.min(len);
    let end = range.end.clamp(start, len);
    start..line_end(rope, end)
}

/// Sorts ranges and merges the ones that overlap or touch.
fn merge(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.retain(|r| !r.is_empty());
    ranges.sort_by_key(|r| r.start);
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}
