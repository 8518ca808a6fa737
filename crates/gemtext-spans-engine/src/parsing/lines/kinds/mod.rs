pub mod blockquote;
pub mod heading;
pub mod link;
pub mod ulist_item;

pub use blockquote::Blockquote;
pub use heading::Heading;
pub use link::Link;
pub use ulist_item::UlistItem;
