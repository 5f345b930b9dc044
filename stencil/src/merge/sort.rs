//! Stable reordering of a merged node's children.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::document::{DocumentNode, NodeId};
use crate::error::StencilResult;
use crate::schema::{SchemaRegistry, TypeSchema};

/// Transient marker distinguishing template-spliced children from originally
/// authored ones.
///
/// Scoped to a single node's merge and sort; it must not leak across
/// documents or across merge passes.
#[derive(Debug, Default)]
pub struct Provenance(HashSet<NodeId>);

impl Provenance {
    /// Create an empty marker set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a node as newly spliced from a template.
    pub fn mark(&mut self, id: NodeId) {
        self.0.insert(id);
    }

    /// Whether the node was spliced in by the current merge pass.
    #[must_use]
    pub fn is_new(&self, id: NodeId) -> bool {
        self.0.contains(&id)
    }
}

#[derive(Debug)]
struct SortKey {
    declaring_depth: usize,
    order: Option<u32>,
    tag: String,
    spliced: bool,
}

/// Stable-sort `node`'s children to match the declared member order of the
/// bound type.
///
/// Comparison of two children: members declared on a supertype come before
/// members declared further down the inheritance chain, regardless of
/// explicit order; otherwise explicit order ranks are compared when both
/// members carry one, falling back to lexicographic tag comparison when they
/// do not; on an exact tie a template-spliced child sorts before an
/// originally-present one. Construction order is preserved among remaining
/// ties.
///
/// # Errors
///
/// Returns [`crate::StencilError::UnresolvedMember`] if any child tag has no
/// corresponding member on `bound_type`; the node is left untouched.
pub fn sort_children(
    node: &mut DocumentNode,
    bound_type: &TypeSchema,
    registry: &SchemaRegistry,
    provenance: &Provenance,
) -> StencilResult<()> {
    let qualified = bound_type.qualified_name();

    let mut keys = Vec::with_capacity(node.children().len());
    for child in node.children() {
        let member = registry.resolve_member(&qualified, child.tag())?;
        keys.push(SortKey {
            declaring_depth: member.declaring_depth(),
            order: member.member().order(),
            tag: child.tag().to_owned(),
            spliced: provenance.is_new(child.id()),
        });
    }

    let mut keyed: Vec<(DocumentNode, SortKey)> =
        node.take_children().into_iter().zip(keys).collect();
    insertion_sort(&mut keyed);
    node.set_children(keyed.into_iter().map(|(child, _)| child).collect());
    Ok(())
}

/// Stable insertion sort. The comparator mixes rank and tag comparisons
/// across members and is not a total order, which `sort_by` rejects.
fn insertion_sort(items: &mut [(DocumentNode, SortKey)]) {
    for sorted_end in 1..items.len() {
        let mut position = sorted_end;
        while position > 0
            && compare_keys(&items[position].1, &items[position - 1].1) == Ordering::Less
        {
            items.swap(position, position - 1);
            position -= 1;
        }
    }
}

fn compare_keys(a: &SortKey, b: &SortKey) -> Ordering {
    // Members declared further up the inheritance chain are emitted first.
    let by_depth = b.declaring_depth.cmp(&a.declaring_depth);
    if by_depth != Ordering::Equal {
        return by_depth;
    }

    let by_rank = match (a.order, b.order) {
        (Some(left), Some(right)) => left.cmp(&right),
        _ => a.tag.cmp(&b.tag),
    };
    if by_rank != Ordering::Equal {
        return by_rank;
    }

    // Templated content lands before local content on exact ties.
    match (a.spliced, b.spliced) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}
