use thiserror::Error;

/// Why an edit was rejected. Rejected edits leave the document untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Edit position {pos} is beyond the end of the buffer ({len} bytes)")]
    OutOfBounds { pos: usize, len: usize },

    #[error("Edit position {0} is not on a character boundary")]
    NotCharBoundary(usize),

    #[error("Edit range {start}..{end} is inverted")]
    InvertedRange { start: usize, end: usize },

    #[error("Edit notification implies {expected} bytes but the new text has {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
