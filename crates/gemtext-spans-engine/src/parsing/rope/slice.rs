use std::ops::Range;

use xi_rope::Rope;

/// Owned copy of the text in `range`.
pub fn slice_to_string(rope: &Rope, range: Range<usize>) -> String {
    rope.slice_to_cow(range).into_owned()
}

/// Text in `range` cut to at most `max` bytes plus a `...` marker. The cut
/// never splits a character. Snapshot lines use this for span previews.
pub fn preview(rope: &Rope, range: Range<usize>, max: usize) -> String {
    let mut s = slice_to_string(rope, range);
    if s.len() > max {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("...");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_text_unchanged() {
        let rope = Rope::from("hello");
        assert_eq!(preview(&rope, 0..5, 10), "hello");
    }

    #[test]
    fn preview_exact_length_unchanged() {
        let rope = Rope::from("hello");
        assert_eq!(preview(&rope, 0..5, 5), "hello");
    }

    #[test]
    fn preview_truncates_long_text() {
        let rope = Rope::from("hello world");
        assert_eq!(preview(&rope, 0..11, 5), "hello...");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let rope = Rope::from("héllo");
        assert_eq!(preview(&rope, 0..6, 2), "h...");
    }

    #[test]
    fn slice_to_string_partial_range() {
        let rope = Rope::from("hello world");
        assert_eq!(slice_to_string(&rope, 6..11), "world");
    }
}
