//! Template resolution, child sorting, and identifier propagation.
//!
//! The passes in this module turn an authored document into its fully-merged
//! form: `Template` references are spliced in recursively, each merged node's
//! children are reordered to match the declared member order of the bound
//! type, and identifier attributes are composed into dotted paths from the
//! root down.

mod identity;
mod sort;
mod templates;

pub use identity::{ID_SEPARATOR, propagate_identifiers, propagate_identifiers_with};
pub use sort::{Provenance, sort_children};
pub use templates::{TemplateContext, resolve_templates, resolve_templates_from};

#[cfg(test)]
mod tests;
