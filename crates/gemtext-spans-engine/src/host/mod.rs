//! # Host Collaborators
//!
//! Read-only views the engine hands to host features it does not
//! implement itself: the fenced-block sub-editor and link activation.
//! The engine resolves spans and parses their text; acting on them is the
//! host's business.

pub mod fenced;
pub mod link;
pub mod registry;

pub use fenced::{FenceInfo, FencedBlock};
pub use link::LinkTarget;
pub use registry::HandlerRegistry;
