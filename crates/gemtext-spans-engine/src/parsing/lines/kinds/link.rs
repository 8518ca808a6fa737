use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::lines::LineMatcher;
use crate::store::{GroupKind, SpanKind};

/// Link line: `=>`, at most one whitespace character, a URL token, then an
/// optional whitespace-led label.
///
/// The label group keeps its leading whitespace so the label range always
/// starts right after the URL.
pub struct Link;

impl Link {
    pub const MARKER: &'static str = "=>";
}

impl LineMatcher for Link {
    fn kind(&self) -> SpanKind {
        SpanKind::Link
    }

    fn pattern(&self) -> &'static Regex {
        static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
        LINK_REGEX
            .get_or_init(|| Regex::new(r"^(=>)[ \t]?(\S+)([ \t].*)?$").expect("Invalid link regex"))
    }

    fn groups(&self) -> &'static [GroupKind] {
        &[GroupKind::Markup, GroupKind::Url, GroupKind::Label]
    }
}
