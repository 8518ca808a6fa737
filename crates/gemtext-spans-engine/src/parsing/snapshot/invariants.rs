use std::ops::Range;

use xi_rope::Rope;

use crate::parsing::rope::line_end;
use crate::store::{Span, SpanKind, SpanStore};

/// Asserts the structural invariants of a fully classified buffer.
pub fn check(rope: &Rope, store: &SpanStore) {
    let n = rope.len();
    for kind in SpanKind::ALL {
        let spans: Vec<&Span> = store.iter(kind).collect();
        for span in &spans {
            assert!(
                span.start() < span.end() && span.end() <= n,
                "span out of bounds: {span:?} (rope len: {n})"
            );
            for group in &span.groups {
                assert!(
                    group.range.start >= span.start() && group.range.end <= span.end(),
                    "group not contained in span: {group:?} in {span:?}"
                );
            }
        }
        for pair in spans.windows(2) {
            assert!(
                pair[0].end() <= pair[1].start(),
                "overlapping {} spans: {:?} and {:?}",
                kind.name(),
                pair[0].range,
                pair[1].range
            );
        }
    }

    for kind in SpanKind::LINE_KINDS {
        for span in store.iter(kind) {
            assert!(
                store.at(SpanKind::PreText, span.start()).is_none(),
                "{} span starts inside preformatted text: {:?}",
                kind.name(),
                span.range
            );
        }
    }

    check_fence_pairing(rope, store);
}

/// Every FenceBegin pairs with the nearest following FenceEnd, and the gap
/// between them is exactly one PreText span (none when the gap is empty).
/// A trailing unpaired FenceBegin fills to the buffer end.
fn check_fence_pairing(rope: &Rope, store: &SpanStore) {
    let mut fences: Vec<&Span> = store
        .iter(SpanKind::FenceBegin)
        .chain(store.iter(SpanKind::FenceEnd))
        .collect();
    fences.sort_by_key(|span| span.start());

    let mut gaps: Vec<Range<usize>> = Vec::new();
    let mut open: Option<usize> = None;
    for fence in fences {
        match (fence.kind, open) {
            (SpanKind::FenceBegin, None) => open = Some(line_end(rope, fence.start())),
            (SpanKind::FenceEnd, Some(content_start)) => {
                gaps.push(content_start..fence.start());
                open = None;
            }
            _ => panic!("unpaired {} at {:?}", fence.kind.name(), fence.range),
        }
    }
    if let Some(content_start) = open {
        gaps.push(content_start..rope.len());
    }

    let expected: Vec<Range<usize>> = gaps.into_iter().filter(|gap| !gap.is_empty()).collect();
    let actual: Vec<Range<usize>> = store
        .iter(SpanKind::PreText)
        .map(|span| span.range.clone())
        .collect();
    assert_eq!(actual, expected, "PreText does not fill the fence gaps");
}
