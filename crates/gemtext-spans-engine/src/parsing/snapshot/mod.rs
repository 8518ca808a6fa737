//! # Snapshot Testing Support
//!
//! Utilities for testing classification via snapshot assertions and
//! invariant checks.
//!
//! - **`normalize`**: renders the span store as stable, line-per-span text
//!   for `insta` snapshots
//! - **`invariants`**: runtime checks for classifier correctness (spans in
//!   bounds, no same-kind overlap, no line span inside preformatted text,
//!   every fence pair filled by exactly one PreText)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::normalize;
