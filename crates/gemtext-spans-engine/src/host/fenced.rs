use std::ops::Range;

use xi_rope::Rope;

use crate::parsing::rope::line_end;
use crate::store::{GroupKind, Span, SpanKind, SpanStore};

/// Parsed fence info string: `language-tag | display-name`, both optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceInfo {
    pub language: Option<String>,
    pub name: Option<String>,
}

impl FenceInfo {
    /// Splits on the first `|`. Later pipes stay in the display name.
    pub fn parse(info: &str) -> Self {
        let (language, name) = match info.split_once('|') {
            Some((language, name)) => (language, Some(name)),
            None => (info, None),
        };
        Self {
            language: non_empty(language),
            name: name.and_then(non_empty),
        }
    }
}

fn non_empty(part: &str) -> Option<String> {
    let part = part.trim();
    (!part.is_empty()).then(|| part.to_string())
}

/// A fenced block as seen by a sub-editing host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedBlock {
    /// The opening fence line, terminator excluded.
    pub begin: Range<usize>,
    /// Content lines; `None` for a block with no content.
    pub content: Option<Range<usize>>,
    /// The closing fence line; `None` while the block is open.
    pub end: Option<Range<usize>>,
    pub info: FenceInfo,
}

impl FencedBlock {
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

/// Finds the block whose opening line, content, or closing line holds `pos`.
pub fn locate(rope: &Rope, store: &SpanStore, pos: usize) -> Option<FencedBlock> {
    let begin = match store.at(SpanKind::FenceBegin, pos) {
        Some(begin) => begin,
        None => opening_fence_before(store, pos)?,
    };

    let content_start = line_end(rope, begin.start());
    let content = store
        .starting_at(SpanKind::PreText, content_start)
        .map(|pre| pre.range.clone());
    let end_line = content.as_ref().map_or(content_start, |c| c.end);
    let end = store
        .starting_at(SpanKind::FenceEnd, end_line)
        .map(|end| end.range.clone());
    let info = begin
        .group(GroupKind::Info)
        .map(|range| FenceInfo::parse(&rope.slice_to_cow(range)))
        .unwrap_or_default();

    Some(FencedBlock {
        begin: begin.range.clone(),
        content,
        end,
        info,
    })
}

fn opening_fence_before(store: &SpanStore, pos: usize) -> Option<&Span> {
    let inner = store
        .at(SpanKind::PreText, pos)
        .or_else(|| store.at(SpanKind::FenceEnd, pos))?;
    let found = store.find_previous_open(SpanKind::FenceBegin, inner.start().checked_sub(1)?, 0)?;
    store.at(SpanKind::FenceBegin, found)
}
