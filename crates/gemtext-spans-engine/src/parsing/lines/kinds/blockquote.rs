use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::lines::LineMatcher;
use crate::store::{GroupKind, SpanKind};

/// Blockquote line: `>`, optional whitespace, then content (possibly empty).
pub struct Blockquote;

impl Blockquote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';
}

impl LineMatcher for Blockquote {
    fn kind(&self) -> SpanKind {
        SpanKind::Blockquote
    }

    fn pattern(&self) -> &'static Regex {
        static QUOTE_REGEX: OnceLock<Regex> = OnceLock::new();
        QUOTE_REGEX.get_or_init(|| Regex::new(r"^(>)[ \t]*(.*)$").expect("Invalid quote regex"))
    }

    fn groups(&self) -> &'static [GroupKind] {
        &[GroupKind::Markup, GroupKind::Content]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::rope::LineRef;
    use rstest::rstest;

    fn line(text: &str) -> LineRef {
        LineRef {
            range: 0..text.len(),
            text: text.to_string(),
        }
    }

    #[rstest]
    #[case("> hello", Some(Some(2..7)))]
    #[case(">hello", Some(Some(1..6)))]
    #[case(">", Some(None))]
    #[case(">   ", Some(None))]
    #[case("a > b", None)]
    fn quote_lines(#[case] text: &str, #[case] content: Option<Option<std::ops::Range<usize>>>) {
        let found = Blockquote
            .match_line(&line(text))
            .map(|span| span.group(GroupKind::Content));
        assert_eq!(found, content);
    }

    #[test]
    fn empty_quote_keeps_markup() {
        let span = Blockquote.match_line(&line(">")).unwrap();
        assert_eq!(span.group(GroupKind::Markup), Some(0..1));
        assert_eq!(span.range, 0..1);
    }
}
