use std::ops::Range;

use log::warn;
use xi_rope::Rope;

use crate::editing::commands::{compile_command, validate_range};
use crate::editing::{Cmd, DirtyQueue, EditError, EditNotification, Patch};
use crate::host::{FencedBlock, LinkTarget, fenced, link};
use crate::parsing::{Propertized, propertize, propertize_all};
use crate::store::SpanStore;

/// A Gemtext buffer together with its span classification.
///
/// The rope is the single source of truth; the span store is derived from
/// it and kept current on every edit:
///
/// 1. the edit is validated and applied to the rope
/// 2. spans are rebased through the edit so offsets follow the text
/// 3. the edited range is queued and the dirty queue drained, which
///    extends, propertizes and cascades as needed
/// 4. the version is bumped
///
/// ```rust
/// # use gemtext_spans_engine::editing::{Cmd, Document};
/// # use gemtext_spans_engine::store::SpanKind;
/// let mut doc = Document::from_text("# Hello\n");
/// doc.apply(Cmd::InsertText { at: 0, text: "```\n".to_string() }).unwrap();
/// assert_eq!(doc.store().iter(SpanKind::Heading).count(), 0);
/// assert_eq!(doc.store().iter(SpanKind::PreText).count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) buffer: Rope,
    pub(crate) spans: SpanStore,
    pub(crate) dirty: DirtyQueue,
    /// Incremented on each edit
    pub(crate) version: u64,
}

impl Document {
    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_text(text))
    }

    pub fn from_text(text: &str) -> Self {
        let buffer = Rope::from(text);
        let mut spans = SpanStore::new();
        propertize_all(&buffer, &mut spans);
        Self {
            buffer,
            spans,
            dirty: DirtyQueue::new(),
            version: 0,
        }
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    /// Apply a command to the document.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        let delta = compile_command(&self.buffer, &cmd)?;
        let buffer = delta.apply(&self.buffer);
        Ok(self.commit(buffer, cmd.notification()))
    }

    /// Adopt text edited by the host. `rope` is the buffer after the edit
    /// described by `edit`.
    pub fn sync(&mut self, rope: Rope, edit: EditNotification) -> Result<Patch, EditError> {
        if let Err(err) = self.check_notification(&rope, &edit) {
            warn!("ignoring edit notification {edit:?}: {err}");
            return Err(err);
        }
        Ok(self.commit(rope, edit))
    }

    fn check_notification(&self, rope: &Rope, edit: &EditNotification) -> Result<(), EditError> {
        validate_range(&self.buffer, &(edit.start..edit.end_before))?;
        if edit.end_after < edit.start {
            return Err(EditError::InvertedRange {
                start: edit.start,
                end: edit.end_after,
            });
        }
        let expected = edit.new_len(self.buffer.len());
        if rope.len() != expected {
            return Err(EditError::LengthMismatch {
                expected,
                actual: rope.len(),
            });
        }
        Ok(())
    }

    fn commit(&mut self, buffer: Rope, edit: EditNotification) -> Patch {
        self.buffer = buffer;
        self.spans.rebase(&edit);
        self.dirty.enqueue(edit.changed());
        let propertized = self.dirty.drain(&self.buffer, &mut self.spans);
        self.version += 1;
        Patch {
            changed: vec![edit.changed()],
            propertized,
            version: self.version,
        }
    }

    /// Rebuild the spans of `range` directly, without region extension.
    pub fn propertize(&mut self, range: Range<usize>) -> Propertized {
        propertize(&self.buffer, &mut self.spans, range)
    }

    /// The fenced block whose opening line, content, or closing line holds `pos`.
    pub fn fenced_block_at(&self, pos: usize) -> Option<FencedBlock> {
        fenced::locate(&self.buffer, &self.spans, pos)
    }

    /// The link on the line holding `pos`.
    pub fn link_at(&self, pos: usize) -> Option<LinkTarget> {
        link::locate(&self.buffer, &self.spans, pos)
    }

    pub fn store(&self) -> &SpanStore {
        &self.spans
    }

    pub fn rope(&self) -> &Rope {
        &self.buffer
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::snapshot::{invariants, normalize};
    use crate::store::{GroupKind, SpanKind};
    use pretty_assertions::assert_eq;

    fn fresh(text: &str) -> String {
        let doc = Document::from_text(text);
        normalize(doc.rope(), doc.store())
    }

    fn assert_matches_fresh(doc: &Document) {
        invariants(doc.rope(), doc.store());
        assert_eq!(normalize(doc.rope(), doc.store()), fresh(&doc.text()));
    }

    #[test]
    fn from_bytes_rejects_invalid_utf8() {
        assert!(Document::from_bytes(&[0xff, 0xfe]).is_err());
        let doc = Document::from_bytes(b"# ok\n").unwrap();
        assert_eq!(doc.store().iter(SpanKind::Heading).count(), 1);
    }

    #[test]
    fn round_trips_bytes() {
        let text = "# T\r\n\r\n=> a b\r\n```\r\nx\r\n";
        assert_eq!(Document::from_text(text).to_bytes(), text.as_bytes());
    }

    #[test]
    fn insert_heading_marker() {
        let mut doc = Document::from_text("para\n\nTitle\n");
        let patch = doc
            .apply(Cmd::InsertText {
                at: 6,
                text: "# ".into(),
            })
            .unwrap();
        assert_eq!(patch.version, 1);
        assert_eq!(patch.changed, vec![6..8]);
        assert_eq!(patch.propertized, vec![5..14]);
        assert_matches_fresh(&doc);
        let heading = doc.store().iter(SpanKind::Heading).next().unwrap();
        assert_eq!(heading.group(GroupKind::Title), Some(8..13));
    }

    #[test]
    fn closing_an_open_fence() {
        let mut doc = Document::from_text("```\nstill inside\n");
        assert_eq!(doc.store().iter(SpanKind::FenceEnd).count(), 0);
        doc.apply(Cmd::InsertText {
            at: 17,
            text: "```\n# after\n".into(),
        })
        .unwrap();
        assert_matches_fresh(&doc);
        assert_eq!(doc.store().iter(SpanKind::FenceEnd).count(), 1);
        assert_eq!(doc.store().iter(SpanKind::Heading).count(), 1);
    }

    #[test]
    fn deleting_a_closing_fence_reopens_the_block() {
        let mut doc = Document::from_text("```\na\n```\n\n# b\n\n* c\n");
        doc.apply(Cmd::DeleteRange { range: 6..10 }).unwrap();
        assert_matches_fresh(&doc);
        assert_eq!(doc.store().iter(SpanKind::Heading).count(), 0);
        assert_eq!(doc.store().iter(SpanKind::UlistItem).count(), 0);
    }

    #[test]
    fn opening_fence_far_above_content() {
        let mut doc = Document::from_text("intro\n\n# a\n\n* b\n\n> c\n\n=> d e\n");
        doc.apply(Cmd::ReplaceRange {
            range: 0..5,
            text: "```".into(),
        })
        .unwrap();
        assert_matches_fresh(&doc);
        assert_eq!(doc.store().len(), 2);

        doc.apply(Cmd::ReplaceRange {
            range: 0..3,
            text: "intro".into(),
        })
        .unwrap();
        assert_matches_fresh(&doc);
        assert_eq!(doc.store().len(), 4);
    }

    #[test]
    fn edits_inside_a_block_stay_preformatted() {
        let mut doc = Document::from_text("```\none\n\ntwo\n```\n# h\n");
        doc.apply(Cmd::InsertText {
            at: 9,
            text: "# fake\n".into(),
        })
        .unwrap();
        assert_matches_fresh(&doc);
        assert_eq!(doc.store().iter(SpanKind::Heading).count(), 1);
    }

    #[test]
    fn rejected_edit_leaves_document_untouched() {
        let mut doc = Document::from_text("# a\n");
        let before = doc.store().clone();
        let err = doc.apply(Cmd::DeleteRange { range: 2..9 }).unwrap_err();
        assert_eq!(err, EditError::OutOfBounds { pos: 9, len: 4 });
        assert_eq!(doc.version(), 0);
        assert_eq!(doc.store(), &before);
    }

    #[test]
    fn sync_adopts_host_edits() {
        let mut doc = Document::from_text("> q\n");
        let rope = Rope::from("=> q\n");
        doc.sync(rope, EditNotification::new(0, 1, 2)).unwrap();
        assert_matches_fresh(&doc);
        assert_eq!(doc.store().iter(SpanKind::Link).count(), 1);
    }

    #[test]
    fn sync_rejects_inconsistent_notification() {
        let mut doc = Document::from_text("> q\n");
        let err = doc
            .sync(Rope::from("=> q\n"), EditNotification::insertion(0, 5))
            .unwrap_err();
        assert_eq!(
            err,
            EditError::LengthMismatch {
                expected: 9,
                actual: 5
            }
        );
    }

    #[test]
    fn fenced_block_and_link_lookup() {
        let doc = Document::from_text("```rust | demo\nfn main() {}\n```\n=> /about About\n");
        let block = doc.fenced_block_at(20).unwrap();
        assert_eq!(block.info.language.as_deref(), Some("rust"));
        assert_eq!(block.content, Some(15..28));
        let link = doc.link_at(33).unwrap();
        assert_eq!(link.url, "/about");
        assert!(!link.is_absolute());
    }
}
