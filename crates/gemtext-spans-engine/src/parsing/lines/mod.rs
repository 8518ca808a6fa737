//! # Line Matchers
//!
//! Stateless single-line recognizers. Each kind owns its pattern (see
//! `kinds`) and describes which capture becomes which named group; the
//! shared [`LineMatcher::match_line`] turns a capture into a [`Span`].
//!
//! Matchers never look at neighbouring lines. Anything that needs
//! multi-line state (fenced blocks) belongs to the block scanner, which
//! runs first so the suppression predicate sees final PreText coverage.

pub mod kinds;

use regex::Regex;

use crate::parsing::rope::LineRef;
use crate::store::{Group, GroupKind, Span, SpanKind};

pub use kinds::{Blockquote, Heading, Link, UlistItem};

/// A single-line pattern recognizer.
pub trait LineMatcher {
    /// Kind of span written for a match.
    fn kind(&self) -> SpanKind;

    /// Pattern run against the line content (terminator stripped).
    fn pattern(&self) -> &'static Regex;

    /// Group kind for each capture, in capture order starting at 1.
    fn groups(&self) -> &'static [GroupKind];

    /// Matches one line. Captures that did not participate or matched
    /// nothing produce no group.
    fn match_line(&self, line: &LineRef) -> Option<Span> {
        let caps = self.pattern().captures(line.content())?;
        let base = line.range.start;
        let groups = self
            .groups()
            .iter()
            .enumerate()
            .filter_map(|(i, &kind)| {
                caps.get(i + 1)
                    .filter(|m| !m.is_empty())
                    .map(|m| Group::new(kind, base + m.start()..base + m.end()))
            })
            .collect();
        Some(Span::new(self.kind(), line.content_range(), groups))
    }
}

/// Every line matcher, in the order the propertizer runs them.
pub const LINE_MATCHERS: [&dyn LineMatcher; 4] = [&Heading, &UlistItem, &Blockquote, &Link];

/// Runs `matcher` over `lines`, skipping lines whose start is suppressed.
pub fn matches<'a>(
    matcher: &'a dyn LineMatcher,
    lines: &'a [LineRef],
    suppressed: impl Fn(usize) -> bool + 'a,
) -> impl Iterator<Item = Span> + 'a {
    lines
        .iter()
        .filter(move |line| !suppressed(line.range.start))
        .filter_map(move |line| matcher.match_line(line))
}
