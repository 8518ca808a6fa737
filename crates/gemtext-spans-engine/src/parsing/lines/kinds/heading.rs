use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::lines::LineMatcher;
use crate::store::{GroupKind, Span, SpanKind};

/// Heading line: `#`, `##` or `###`, whitespace, then the title.
///
/// All heading syntax knowledge lives here; the outline index asks
/// [`Heading::level`] instead of re-counting markers.
pub struct Heading;

impl Heading {
    /// The heading marker character.
    pub const MARKER: char = '#';
    /// Deepest heading level Gemtext defines.
    pub const MAX_LEVEL: u8 = 3;

    /// Level of a heading span: the length of its markup group.
    pub fn level(span: &Span) -> Option<u8> {
        if span.kind != SpanKind::Heading {
            return None;
        }
        span.group(GroupKind::Markup)
            .and_then(|markup| u8::try_from(markup.len()).ok())
    }
}

impl LineMatcher for Heading {
    fn kind(&self) -> SpanKind {
        SpanKind::Heading
    }

    fn pattern(&self) -> &'static Regex {
        static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
        HEADING_REGEX
            .get_or_init(|| Regex::new(r"^(#{1,3})[ \t]+(\S.*)$").expect("Invalid heading regex"))
    }

    fn groups(&self) -> &'static [GroupKind] {
        &[GroupKind::Markup, GroupKind::Title]
    }
}
