use std::ops::Range;

use xi_rope::delta::Builder;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::editing::{EditError, EditNotification};

/// Commands that can be applied to the document
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    InsertText { at: usize, text: String },
    DeleteRange { range: Range<usize> },
    ReplaceRange { range: Range<usize>, text: String },
}

impl Cmd {
    /// The range of existing text the command replaces.
    pub fn target(&self) -> Range<usize> {
        match self {
            Cmd::InsertText { at, .. } => *at..*at,
            Cmd::DeleteRange { range } | Cmd::ReplaceRange { range, .. } => range.clone(),
        }
    }

    fn text(&self) -> &str {
        match self {
            Cmd::InsertText { text, .. } | Cmd::ReplaceRange { text, .. } => text,
            Cmd::DeleteRange { .. } => "",
        }
    }

    /// The notification a host buffer would send for this command.
    pub fn notification(&self) -> EditNotification {
        let target = self.target();
        EditNotification::new(target.start, target.end, target.start + self.text().len())
    }
}

/// Checks that `range` lies inside the buffer on character boundaries.
pub(crate) fn validate_range(rope: &Rope, range: &Range<usize>) -> Result<(), EditError> {
    if range.start > range.end {
        return Err(EditError::InvertedRange {
            start: range.start,
            end: range.end,
        });
    }
    for pos in [range.start, range.end] {
        if pos > rope.len() {
            return Err(EditError::OutOfBounds {
                pos,
                len: rope.len(),
            });
        }
        if pos < rope.len() && is_continuation_byte(rope.byte_at(pos)) {
            return Err(EditError::NotCharBoundary(pos));
        }
    }
    Ok(())
}

fn is_continuation_byte(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

/// Compile a command into a delta
pub(crate) fn compile_command(rope: &Rope, cmd: &Cmd) -> Result<Delta<RopeInfo>, EditError> {
    let target = cmd.target();
    validate_range(rope, &target)?;
    let mut builder = Builder::new(rope.len());
    match cmd {
        Cmd::DeleteRange { range } => builder.delete(range.clone()),
        Cmd::InsertText { text, .. } | Cmd::ReplaceRange { text, .. } => {
            builder.replace(target, Rope::from(text.as_str()))
        }
    }
    Ok(builder.build())
}
