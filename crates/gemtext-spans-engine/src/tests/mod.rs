//! Incremental classification tests.
//!
//! Every edit path must leave the span store exactly as a from-scratch
//! classification of the resulting text would. Fixtures are shared with the
//! snapshot tests in `tests/fixtures`.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rstest::rstest;

use crate::editing::{Cmd, Document};
use crate::parsing::snapshot::{invariants, normalize};
use crate::store::SpanKind;

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}.gmi", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(path).unwrap()
}

fn assert_matches_fresh(doc: &Document, context: &str) {
    invariants(doc.rope(), doc.store());
    let fresh = Document::from_text(&doc.text());
    pretty_assertions::assert_eq!(
        normalize(doc.rope(), doc.store()),
        normalize(fresh.rope(), fresh.store()),
        "{context}"
    );
}

/// Char boundaries of `text`, so edits never split a character.
fn boundaries(text: &str) -> Vec<usize> {
    (0..=text.len()).filter(|&i| text.is_char_boundary(i)).collect()
}

#[rstest]
#[case("basic_lines")]
#[case("links")]
#[case("fenced_blocks")]
#[case("unterminated_fence")]
#[case("mixed_line_endings")]
fn typing_a_fixture_forwards(#[case] name: &str) {
    let text = fixture(name);
    let mut doc = Document::from_text("");
    for (i, ch) in text.char_indices() {
        doc.apply(Cmd::InsertText {
            at: i,
            text: ch.to_string(),
        })
        .unwrap();
        assert_matches_fresh(&doc, &format!("{name} after typing {i}"));
    }
    assert_eq!(doc.text(), text);
}

#[rstest]
#[case("fenced_blocks")]
#[case("unterminated_fence")]
fn typing_a_fixture_backwards(#[case] name: &str) {
    let text = fixture(name);
    let mut doc = Document::from_text("");
    for (i, ch) in text.char_indices().rev() {
        doc.apply(Cmd::InsertText {
            at: 0,
            text: ch.to_string(),
        })
        .unwrap();
        assert_matches_fresh(&doc, &format!("{name} after prepending {i}"));
    }
    assert_eq!(doc.text(), text);
}

#[rstest]
#[case("basic_lines")]
#[case("fenced_blocks")]
#[case("mixed_line_endings")]
fn deleting_each_line(#[case] name: &str) {
    let text = fixture(name);
    let mut start = 0;
    for line in text.split_inclusive('\n') {
        let mut doc = Document::from_text(&text);
        let end = start + line.len();
        doc.apply(Cmd::DeleteRange { range: start..end }).unwrap();
        assert_matches_fresh(&doc, &format!("{name} without {start}..{end}"));
        start = end;
    }
}

#[test]
fn toggling_fences_everywhere() {
    let text = fixture("fenced_blocks");
    for at in boundaries(&text) {
        let mut doc = Document::from_text(&text);
        doc.apply(Cmd::InsertText {
            at,
            text: "```\n".into(),
        })
        .unwrap();
        assert_matches_fresh(&doc, &format!("fence inserted at {at}"));
        doc.apply(Cmd::DeleteRange { range: at..at + 4 }).unwrap();
        assert_matches_fresh(&doc, &format!("fence removed at {at}"));
    }
}

#[test]
fn replacing_spans_of_text() {
    let text = fixture("fenced_blocks");
    let points = boundaries(&text);
    for (n, &start) in points.iter().enumerate().step_by(3) {
        let end = points[(n + 5).min(points.len() - 1)];
        let mut doc = Document::from_text(&text);
        doc.apply(Cmd::ReplaceRange {
            range: start..end,
            text: "\n```\n".into(),
        })
        .unwrap();
        assert_matches_fresh(&doc, &format!("replaced {start}..{end}"));
    }
}

#[test]
fn new_lines_between_a_fence_and_its_content() {
    // The fence line is replaced by blank lines, leaving the old content
    // further down than the region that was rescanned.
    let mut doc = Document::from_text("```\nl\n* i\n");
    doc.apply(Cmd::ReplaceRange {
        range: 0..3,
        text: "\n\n".into(),
    })
    .unwrap();
    assert_matches_fresh(&doc, "fence replaced by blank lines");
    assert_eq!(doc.store().iter(SpanKind::PreText).count(), 0);
    assert_eq!(doc.store().iter(SpanKind::UlistItem).count(), 1);

    // A blank line typed at the end of an opening fence belongs to the block.
    let mut doc = Document::from_text("```\nl\n");
    doc.apply(Cmd::InsertText {
        at: 3,
        text: "\n".into(),
    })
    .unwrap();
    assert_matches_fresh(&doc, "blank line after opening fence");
    let pre: Vec<_> = doc.store().iter(SpanKind::PreText).map(|s| s.range.clone()).collect();
    assert_eq!(pre, vec![4..7]);
}

#[test]
fn deleting_before_a_multibyte_character() {
    let mut doc = Document::from_text("aé\n");
    doc.apply(Cmd::DeleteRange { range: 0..1 }).unwrap();
    assert_matches_fresh(&doc, "deleted before é");
    assert_eq!(doc.text(), "é\n");

    let mut doc = Document::from_text("```\n\né\n* é\n");
    doc.apply(Cmd::DeleteRange { range: 0..3 }).unwrap();
    assert_matches_fresh(&doc, "fence removed above é");
    assert_eq!(doc.store().iter(SpanKind::UlistItem).count(), 1);
}

const PIECES: &[&str] = &[
    "```", "```\n", "```rust\n", "\n", "\n\n", "é", "\r\n", "# h", "* i", "> q", "=> u l", "x",
    " ", "\t",
];

/// Random inserts, deletes and replacements of short Gemtext pieces.
fn random_edit(rng: &mut StdRng, text: &str) -> Cmd {
    let points = boundaries(text);
    let at = points[rng.random_range(0..points.len())];
    let piece = |rng: &mut StdRng| PIECES.choose(rng).map_or("x", |p| *p).to_string();
    let later: Vec<usize> = points.iter().copied().filter(|&p| p >= at).take(6).collect();
    let end = later[rng.random_range(0..later.len())];
    match rng.random_range(0..3) {
        0 => Cmd::InsertText {
            at,
            text: piece(rng),
        },
        1 => Cmd::DeleteRange { range: at..end },
        _ => Cmd::ReplaceRange {
            range: at..end,
            text: piece(rng),
        },
    }
}

#[test]
fn random_edit_sessions() {
    for session in 0..100 {
        let mut rng = StdRng::seed_from_u64(session);
        let mut doc = Document::from_text("");
        for step in 0..60 {
            let cmd = random_edit(&mut rng, &doc.text());
            let context = format!("session {session} step {step}: {cmd:?}");
            doc.apply(cmd).unwrap();
            assert_matches_fresh(&doc, &context);
        }
    }
}

#[test]
fn version_counts_applied_edits() {
    let mut doc = Document::from_text("# a\n");
    for i in 0..3 {
        let patch = doc
            .apply(Cmd::InsertText {
                at: 0,
                text: "x".into(),
            })
            .unwrap();
        assert_eq!(patch.version, i + 1);
    }
    assert!(doc.apply(Cmd::DeleteRange { range: 0..99 }).is_err());
    assert_eq!(doc.version(), 3);
}
