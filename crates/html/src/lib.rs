#[cfg(any(test, feature = "dom-snapshot"))]
pub mod dom_snapshot;
pub mod serialize;
pub mod traverse;

mod dom_builder;
mod entities;
mod tokenizer;
mod types;

pub use crate::dom_builder::{build_dom, parse_document, parse_fragment};
pub use crate::serialize::{inner_html, outer_html, to_html};
pub use crate::tokenizer::tokenize;
pub use crate::traverse::{
    NodePath, find_all, find_all_by, find_first, find_first_mut, node_at, node_at_mut,
};
pub use crate::types::{AtomId, AtomTable, Node, Token, TokenStream};
