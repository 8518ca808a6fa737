pub mod editing;
pub mod highlight;
pub mod host;
pub mod io;
pub mod outline;
pub mod parsing;
pub mod store;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{Cmd, Document, EditError, EditNotification, Patch};
pub use highlight::{Face, FaceStyle, Highlight, Renderer, Theme};
pub use host::{FenceInfo, FencedBlock, HandlerRegistry, LinkTarget};
pub use io::*;
pub use outline::{FoldNode, FoldTree, OutlineDepth, OutlineEntry};
pub use parsing::{Propertized, propertize};
pub use store::{Group, GroupKind, Span, SpanKind, SpanStore};
