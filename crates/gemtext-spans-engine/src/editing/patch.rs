use std::ops::Range;

/// Result of applying an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Byte ranges of the new text that the edit wrote.
    pub changed: Vec<Range<usize>>,
    /// Regions whose spans were rebuilt, sorted and disjoint.
    pub propertized: Vec<Range<usize>>,
    pub version: u64,
}
