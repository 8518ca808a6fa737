pub mod lines;
pub mod slice;

pub use lines::{LineRef, last_line, line_aligned, line_at, line_end, line_start, lines_in};
pub use slice::{preview, slice_to_string};
