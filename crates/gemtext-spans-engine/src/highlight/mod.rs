//! # Highlight Renderer
//!
//! Maps spans to faces for a viewport. Markup groups always get the
//! markup face; the other groups get a face per kind. Faces are additive,
//! so a link carries its url/label faces plus the link affordance over the
//! whole line. Preformatted content is exclusive: one face, nothing
//! layered on top.
//!
//! Output is recomputed per call from the span store and never cached.

pub mod renderer;
pub mod theme;

pub use renderer::{Highlight, Renderer};
pub use theme::{Face, FaceStyle, Theme};
