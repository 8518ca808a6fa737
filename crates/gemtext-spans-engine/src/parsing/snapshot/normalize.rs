use std::fmt::Write;

use xi_rope::Rope;

use crate::parsing::rope::preview;
use crate::store::{Span, SpanStore};

/// One span per line: kind, range, groups, and a text preview.
///
/// ```text
/// Heading 0..3 markup=0..1 title=2..3 "# A"
/// ```
pub fn normalize(rope: &Rope, store: &SpanStore) -> String {
    let mut out = String::new();
    for span in store.query_all(0..rope.len()) {
        out.push_str(&span_line(rope, span));
        out.push('\n');
    }
    out
}

fn span_line(rope: &Rope, span: &Span) -> String {
    let mut line = format!("{} {}..{}", span.kind.name(), span.start(), span.end());
    for group in &span.groups {
        let _ = write!(
            line,
            " {}={}..{}",
            group.kind.name(),
            group.range.start,
            group.range.end
        );
    }
    let _ = write!(line, " {:?}", preview(rope, span.range.clone(), 60));
    line
}
