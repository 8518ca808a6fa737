use std::sync::OnceLock;

use regex::Regex;
use xi_rope::Rope;

use crate::store::{GroupKind, SpanKind, SpanStore};

/// A parsed link line, ready for the host to activate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    pub url: String,
    /// Label text with surrounding whitespace trimmed.
    pub label: Option<String>,
}

impl LinkTarget {
    /// True when the URL carries a scheme (`gemini:`, `https:`, `mailto:`).
    /// Hosts open these externally and treat the rest as local resources.
    pub fn is_absolute(&self) -> bool {
        static SCHEME_REGEX: OnceLock<Regex> = OnceLock::new();
        SCHEME_REGEX
            .get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("Invalid scheme regex"))
            .is_match(&self.url)
    }

    /// Link text to show: the label, or the URL when there is none.
    pub fn display_text(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.url)
    }
}

/// The link whose line holds `pos`.
pub fn locate(rope: &Rope, store: &SpanStore, pos: usize) -> Option<LinkTarget> {
    let span = store.at(SpanKind::Link, pos)?;
    let url = rope.slice_to_cow(span.group(GroupKind::Url)?).into_owned();
    let label = span
        .group(GroupKind::Label)
        .map(|range| rope.slice_to_cow(range).trim().to_string())
        .filter(|label| !label.is_empty());
    Some(LinkTarget { url, label })
}
