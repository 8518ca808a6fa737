use std::ops::Range;

use xi_rope::Rope;

/// A reference to a single line in the rope with its byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// Byte range of this line in the rope (includes the line terminator if present).
    pub range: Range<usize>,
    /// The raw line text, terminator included.
    pub text: String,
}

impl LineRef {
    /// Line text with `\n` / `\r\n` stripped. Line matchers run against this.
    pub fn content(&self) -> &str {
        self.text.trim_end_matches(['\r', '\n'])
    }

    /// Byte range of [`LineRef::content`] in the rope.
    pub fn content_range(&self) -> Range<usize> {
        self.range.start..self.range.start + self.content().len()
    }

    /// True for a line with no content at all (a paragraph separator).
    pub fn is_blank(&self) -> bool {
        self.content().is_empty()
    }
}

/// Returns the lines starting inside `range`, with their byte ranges.
///
/// `range.start` must be a line start. Uses `lines_raw` to preserve line
/// terminators so ranges stay contiguous.
pub fn lines_in(rope: &Rope, range: Range<usize>) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = range.start;
    rope.lines_raw(range).map(move |line| {
        let start = offset;
        offset += line.len();
        LineRef {
            range: start..offset,
            text: line.into_owned(),
        }
    })
}

/// Byte offset of the start of the line containing `pos`.
pub fn line_start(rope: &Rope, pos: usize) -> usize {
    let pos = pos.min(rope.len());
    rope.offset_of_line(rope.line_of_offset(pos))
}

/// Byte offset just past the line containing `pos`, terminator included.
///
/// A `pos` that is already a line start other than the buffer start is
/// treated as belonging to that line, not the previous one.
pub fn line_end(rope: &Rope, pos: usize) -> usize {
    let pos = pos.min(rope.len());
    rope.offset_of_line(rope.line_of_offset(pos) + 1)
}

/// Widens `range` to whole lines: start snaps back to its line start, end
/// snaps forward to the next line start (or buffer end).
pub fn line_aligned(rope: &Rope, range: Range<usize>) -> Range<usize> {
    let len = rope.len();
    let start = line_start(rope, range.start.min(len));
    let end = range.end.clamp(start, len);
    let end = if end == line_start(rope, end) {
        end
    } else {
        line_end(rope, end)
    };
    start..end
}

/// Returns the line with the given index.
pub fn line_at(rope: &Rope, line: usize) -> LineRef {
    let start = rope.offset_of_line(line);
    let end = rope.offset_of_line(line + 1);
    LineRef {
        range: start..end,
        text: rope.slice_to_cow(start..end).into_owned(),
    }
}

/// Index of the last line in the rope (the line holding `rope.len()`).
pub fn last_line(rope: &Rope) -> usize {
    rope.line_of_offset(rope.len())
}
