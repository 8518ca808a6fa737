use std::ops::Range;

use crate::editing::EditNotification;

/// What a classified span represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpanKind {
    /// `#`, `##` or `###` line.
    Heading,
    /// `* item` line.
    UlistItem,
    /// `> quote` line.
    Blockquote,
    /// `=> url label` line.
    Link,
    /// Opening ```` ``` ```` line of a preformatted block.
    FenceBegin,
    /// Closing ```` ``` ```` line of a preformatted block.
    FenceEnd,
    /// Content lines between a FenceBegin and its FenceEnd.
    PreText,
}

impl SpanKind {
    pub const ALL: [SpanKind; 7] = [
        SpanKind::Heading,
        SpanKind::UlistItem,
        SpanKind::Blockquote,
        SpanKind::Link,
        SpanKind::FenceBegin,
        SpanKind::FenceEnd,
        SpanKind::PreText,
    ];

    /// Kinds produced by the single-line matchers.
    pub const LINE_KINDS: [SpanKind; 4] = [
        SpanKind::Heading,
        SpanKind::UlistItem,
        SpanKind::Blockquote,
        SpanKind::Link,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            SpanKind::Heading => 0,
            SpanKind::UlistItem => 1,
            SpanKind::Blockquote => 2,
            SpanKind::Link => 3,
            SpanKind::FenceBegin => 4,
            SpanKind::FenceEnd => 5,
            SpanKind::PreText => 6,
        }
    }

    /// PreText is the only kind that spans several lines. It is trimmed
    /// rather than dropped on partial clears and merges with abutting
    /// PreText on writes.
    pub fn is_multiline(self) -> bool {
        matches!(self, SpanKind::PreText)
    }

    pub fn name(self) -> &'static str {
        match self {
            SpanKind::Heading => "Heading",
            SpanKind::UlistItem => "UlistItem",
            SpanKind::Blockquote => "Blockquote",
            SpanKind::Link => "Link",
            SpanKind::FenceBegin => "FenceBegin",
            SpanKind::FenceEnd => "FenceEnd",
            SpanKind::PreText => "PreText",
        }
    }
}

/// Name of a sub-range inside a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKind {
    /// Syntax characters: `#`, `*`, `>`, `=>`, ```` ``` ````.
    Markup,
    /// Heading text.
    Title,
    /// List item or blockquote text.
    Content,
    /// Link target.
    Url,
    /// Link label, leading whitespace included.
    Label,
    /// Info string (alt text) after an opening fence.
    Info,
    /// Preformatted content.
    PreContent,
}

impl GroupKind {
    pub fn name(self) -> &'static str {
        match self {
            GroupKind::Markup => "markup",
            GroupKind::Title => "title",
            GroupKind::Content => "content",
            GroupKind::Url => "url",
            GroupKind::Label => "label",
            GroupKind::Info => "info",
            GroupKind::PreContent => "pre",
        }
    }
}

/// A named sub-range within a span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub kind: GroupKind,
    pub range: Range<usize>,
}

impl Group {
    pub fn new(kind: GroupKind, range: Range<usize>) -> Self {
        Self { kind, range }
    }
}

/// A typed, offset-anchored classification of a text range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    /// Byte range `[start, end)` in the buffer.
    pub range: Range<usize>,
    /// Named sub-ranges, ordered by start.
    pub groups: Vec<Group>,
}

impl Span {
    pub fn new(kind: SpanKind, range: Range<usize>, groups: Vec<Group>) -> Self {
        Self {
            kind,
            range,
            groups,
        }
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    pub fn contains(&self, pos: usize) -> bool {
        self.range.contains(&pos)
    }

    /// Range of the first group of the given kind.
    pub fn group(&self, kind: GroupKind) -> Option<Range<usize>> {
        self.groups
            .iter()
            .find(|g| g.kind == kind)
            .map(|g| g.range.clone())
    }

    /// The part of this span inside `keep`, with groups clipped to match.
    /// Returns `None` when nothing non-empty remains.
    pub(crate) fn clipped(&self, keep: Range<usize>) -> Option<Span> {
        let range = clip(&self.range, &keep)?;
        let groups = self
            .groups
            .iter()
            .filter_map(|g| clip(&g.range, &keep).map(|r| Group::new(g.kind, r)))
            .collect();
        Some(Span::new(self.kind, range, groups))
    }

    /// Moves the span through an edit. Returns `None` if the edit deleted it.
    pub(crate) fn rebased(&self, edit: &EditNotification) -> Option<Span> {
        let range = edit.map_start(self.range.start)..edit.map_end(self.range.end);
        if range.is_empty() {
            return None;
        }
        let groups = self
            .groups
            .iter()
            .filter_map(|g| {
                let r = edit.map_start(g.range.start)..edit.map_end(g.range.end);
                (!r.is_empty()).then(|| Group::new(g.kind, r))
            })
            .collect();
        Some(Span::new(self.kind, range, groups))
    }
}

fn clip(range: &Range<usize>, keep: &Range<usize>) -> Option<Range<usize>> {
    let start = range.start.max(keep.start);
    let end = range.end.min(keep.end);
    (start < end).then_some(start..end)
}
