/*!
 * # Editing
 *
 * The document edit loop. A [`Document`] owns the xi-rope buffer and the
 * span store derived from it; every change flows through one path:
 *
 * 1. **Command compilation**: a [`Cmd`] compiles to an xi-rope `Delta`, or
 *    a host that owns the text hands over the new rope together with an
 *    [`EditNotification`]
 * 2. **Validation**: positions must lie in the buffer on character
 *    boundaries, otherwise an [`EditError`] is returned and nothing changes
 * 3. **Rebase**: spans shift with the text, so untouched regions stay valid
 * 4. **Dirty-region drain**: the edited range is extended to a consistent
 *    boundary and propertized; fence state changes cascade forward
 *
 * ## Module Structure
 *
 * - **`document`**: `Document` with the buffer, span store and version
 * - **`commands`**: `Cmd` enum and delta compilation
 * - **`notification`**: `EditNotification`, the host-facing edit record
 * - **`dirty`**: `DirtyQueue`, extension and cascade scheduling
 * - **`patch`**: edit result metadata
 * - **`error`**: `EditError`
 */

pub mod commands;
pub mod dirty;
pub mod document;
pub mod error;
pub mod notification;
pub mod patch;

pub use commands::Cmd;
pub use dirty::DirtyQueue;
pub use document::Document;
pub use error::EditError;
pub use notification::EditNotification;
pub use patch::Patch;
