use std::ops::Range;

/// A single text change as reported by the host buffer.
///
/// `[start, end_before)` in the old text was replaced by `[start, end_after)`
/// in the new text. Pure insertions have `end_before == start`, pure
/// deletions have `end_after == start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditNotification {
    pub start: usize,
    pub end_before: usize,
    pub end_after: usize,
}

impl EditNotification {
    pub fn new(start: usize, end_before: usize, end_after: usize) -> Self {
        Self {
            start,
            end_before,
            end_after,
        }
    }

    pub fn insertion(at: usize, len: usize) -> Self {
        Self::new(at, at, at + len)
    }

    pub fn deletion(range: Range<usize>) -> Self {
        Self::new(range.start, range.end, range.start)
    }

    /// The edited range in new-text coordinates.
    pub fn changed(&self) -> Range<usize> {
        self.start..self.end_after
    }

    /// Length of the text after the edit, given the length before it.
    pub fn new_len(&self, old_len: usize) -> usize {
        old_len - (self.end_before - self.start) + (self.end_after - self.start)
    }

    /// Maps a span start through the edit. Starts at the insertion point
    /// follow the inserted text; starts inside deleted text land after
    /// the replacement.
    pub fn map_start(&self, pos: usize) -> usize {
        if pos < self.start {
            pos
        } else if pos >= self.end_before {
            pos - self.end_before + self.end_after
        } else {
            self.end_after
        }
    }

    /// Maps a span end through the edit. Ends at the insertion point stay
    /// put; ends inside deleted text collapse to the edit start.
    pub fn map_end(&self, pos: usize) -> usize {
        if pos <= self.start {
            pos
        } else if pos >= self.end_before {
            pos - self.end_before + self.end_after
        } else {
            self.start
        }
    }
}
