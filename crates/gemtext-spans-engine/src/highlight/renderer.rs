use std::ops::Range;

use crate::highlight::{Face, FaceStyle, Theme};
use crate::parsing::lines::Heading;
use crate::store::{GroupKind, Span, SpanKind, SpanStore};

/// A face applied to a range of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight<'a> {
    pub range: Range<usize>,
    pub face: Face,
    pub style: &'a FaceStyle,
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Highlights intersecting `viewport`, clipped to it, ordered by span
    /// start. Nothing is computed until the iterator is walked, and a clone
    /// walks the viewport again.
    pub fn render<'a>(
        &'a self,
        store: &'a SpanStore,
        viewport: Range<usize>,
    ) -> impl Iterator<Item = Highlight<'a>> + Clone + 'a {
        let clip = viewport.clone();
        store
            .query_all(viewport)
            .flat_map(faces)
            .filter_map(move |(range, face)| {
                let start = range.start.max(clip.start);
                let end = range.end.min(clip.end);
                (start < end).then(|| Highlight {
                    range: start..end,
                    face,
                    style: self.theme.style(face),
                })
            })
    }
}

/// Faces for one span, before clipping.
fn faces(span: &Span) -> Vec<(Range<usize>, Face)> {
    if span.kind == SpanKind::PreText {
        return vec![(span.range.clone(), Face::Preformatted)];
    }
    let mut faces = Vec::with_capacity(span.groups.len() + 1);
    if span.kind == SpanKind::Link {
        faces.push((span.range.clone(), Face::LinkAffordance));
    }
    for group in &span.groups {
        let face = match (span.kind, group.kind) {
            (_, GroupKind::Markup) => Face::Markup,
            (SpanKind::Heading, GroupKind::Title) => Face::heading(Heading::level(span).unwrap_or(1)),
            (SpanKind::UlistItem, GroupKind::Content) => Face::ListItem,
            (SpanKind::Blockquote, GroupKind::Content) => Face::Quote,
            (SpanKind::Link, GroupKind::Url) => Face::LinkUrl,
            (SpanKind::Link, GroupKind::Label) => Face::LinkLabel,
            (SpanKind::FenceBegin, GroupKind::Info) => Face::FenceInfo,
            _ => continue,
        };
        faces.push((group.range.clone(), face));
    }
    faces
}
