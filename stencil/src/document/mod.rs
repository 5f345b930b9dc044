//! The owned document tree consumed by the merge, sort, and bind passes.

mod node;
mod parser;
mod writer;

pub use node::{DocumentNode, ID_ATTRIBUTE, NodeId, TEMPLATE_ATTRIBUTE, TYPE_ATTRIBUTE};
pub use parser::{parse_document, parse_str};
pub use writer::write_document;

#[cfg(test)]
mod tests;
