//! # Block Scanner
//!
//! Recognizes fenced preformatted blocks: a FenceBegin line, PreText over
//! the content lines, and a FenceEnd line. A fence without a closing line
//! stays open; its PreText runs to the end of whatever region was scanned
//! and a later pass picks the block up again through the carry-in check.

pub mod fence;
pub mod scanner;

pub use fence::CodeFence;
pub use scanner::{carried_in, scan};
