//! Tagged, attribute-bearing nodes in an ordered tree.

use indexmap::IndexMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Attribute key carrying a template reference.
pub const TEMPLATE_ATTRIBUTE: &str = "Template";

/// Attribute key naming the bound type of a document root.
pub const TYPE_ATTRIBUTE: &str = "Type";

/// Default attribute key composed by the identifier propagation pass.
pub const ID_ATTRIBUTE: &str = "Id";

/// Process-unique identity of a document node.
///
/// Identity survives reordering; the merge pass uses it to mark
/// template-spliced children for the sort tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// One element of a hierarchical asset document.
///
/// A node owns its children; parentage is recomputed by walking from the
/// root rather than stored, so splicing never has to repair back-references.
/// Attribute keys are unique and preserve author order. Child order is
/// semantically meaningful: repeated same-tag children represent the
/// elements of a collection member.
#[derive(Debug)]
pub struct DocumentNode {
    id: NodeId,
    tag: String,
    attributes: IndexMap<String, String>,
    children: Vec<DocumentNode>,
}

impl DocumentNode {
    /// Create an empty node with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: NodeId::next(),
            tag: tag.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute insertion, mostly useful in tests.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style child insertion, mostly useful in tests.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// This node's process-unique identity.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The element tag. For child nodes this doubles as the target member
    /// name on the parent's bound type.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Look up an attribute value by key.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute, replacing any existing value for the key.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Iterate attributes in author order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The node's children, in document order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Mutable access to the node's children.
    pub fn children_mut(&mut self) -> &mut [Self] {
        &mut self.children
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// First child with the given tag, if any.
    #[must_use]
    pub fn child(&self, tag: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Every child with the given tag, in document order.
    #[must_use]
    pub fn children_tagged(&self, tag: &str) -> Vec<&Self> {
        self.children.iter().filter(|c| c.tag == tag).collect()
    }

    /// Remove all children, leaving the node a leaf. The sorter uses this to
    /// reorder out of place without cloning subtrees.
    pub(crate) fn take_children(&mut self) -> Vec<Self> {
        std::mem::take(&mut self.children)
    }

    /// Replace the node's children wholesale.
    pub(crate) fn set_children(&mut self, children: Vec<Self>) {
        self.children = children;
    }

    /// Deep-copy this subtree, assigning fresh node identities throughout.
    ///
    /// Splicing a template child into another document must not reuse the
    /// template's identities, or provenance marks could alias across trees.
    #[must_use]
    pub fn deep_import(&self) -> Self {
        Self {
            id: NodeId::next(),
            tag: self.tag.clone(),
            attributes: self.attributes.clone(),
            children: self.children.iter().map(Self::deep_import).collect(),
        }
    }
}
