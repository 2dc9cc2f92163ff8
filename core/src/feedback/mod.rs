//! Feedback items and the XML message the host launcher reads from stdout.

mod item;
mod xml;

pub use item::{FeedbackItem, Icon, IconKind, DEFAULT_ICON};
pub use xml::{escape_xml, item_to_xml, to_xml, write_feedback};
