use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::lines::LineMatcher;
use crate::store::{GroupKind, SpanKind};

/// Unordered list item: `*`, whitespace, then the item text.
pub struct UlistItem;

impl UlistItem {
    pub const MARKER: char = '*';
}

impl LineMatcher for UlistItem {
    fn kind(&self) -> SpanKind {
        SpanKind::UlistItem
    }

    fn pattern(&self) -> &'static Regex {
        static ULIST_REGEX: OnceLock<Regex> = OnceLock::new();
        ULIST_REGEX.get_or_init(|| Regex::new(r"^(\*)[ \t]+(\S.*)$").expect("Invalid list regex"))
    }

    fn groups(&self) -> &'static [GroupKind] {
        &[GroupKind::Markup, GroupKind::Content]
    }
}
