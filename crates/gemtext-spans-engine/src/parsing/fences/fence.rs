use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::rope::LineRef;
use crate::store::{Group, GroupKind, Span, SpanKind};

/// Fence line recognizer. Fences are whole-line constructs: only blanks
/// may surround the backticks, apart from the info text on an opening line.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";

    fn begin_regex() -> &'static Regex {
        static FENCE_BEGIN_REGEX: OnceLock<Regex> = OnceLock::new();
        FENCE_BEGIN_REGEX.get_or_init(|| {
            Regex::new(r"^[ \t]*(```)[ \t]*(.*)$").expect("Invalid fence begin regex")
        })
    }

    fn end_regex() -> &'static Regex {
        static FENCE_END_REGEX: OnceLock<Regex> = OnceLock::new();
        FENCE_END_REGEX
            .get_or_init(|| Regex::new(r"^[ \t]*(```)[ \t]*$").expect("Invalid fence end regex"))
    }

    /// Matches an opening fence. The info group is present only when the
    /// line carries text after the backticks.
    pub fn begin(line: &LineRef) -> Option<Span> {
        let caps = Self::begin_regex().captures(line.content())?;
        let base = line.range.start;
        let mut groups = Vec::with_capacity(2);
        if let Some(m) = caps.get(1) {
            groups.push(Group::new(GroupKind::Markup, base + m.start()..base + m.end()));
        }
        if let Some(m) = caps.get(2).filter(|m| !m.as_str().trim().is_empty()) {
            groups.push(Group::new(GroupKind::Info, base + m.start()..base + m.end()));
        }
        Some(Span::new(SpanKind::FenceBegin, line.content_range(), groups))
    }

    /// Matches a closing fence: backticks and blanks only.
    pub fn end(line: &LineRef) -> Option<Span> {
        let caps = Self::end_regex().captures(line.content())?;
        let base = line.range.start;
        let groups = caps
            .get(1)
            .map(|m| Group::new(GroupKind::Markup, base + m.start()..base + m.end()))
            .into_iter()
            .collect();
        Some(Span::new(SpanKind::FenceEnd, line.content_range(), groups))
    }
}
