//! Checks run over a document after it has been expanded.
pub mod broken_links;

pub use broken_links::{LinkReport, broken_links, check_links, is_checkable_href};
