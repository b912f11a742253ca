//! Vocabulary shared by the processing crates: document metadata and the
//! author-facing message sink.
pub mod messages;
pub mod metadata;

pub use messages::{Message, Messages, Severity};
pub use metadata::{
    ComplainAbout, InvalidWptDisplay, LinkCheckOptions, Metadata, MetadataError, WptDisplay,
};
