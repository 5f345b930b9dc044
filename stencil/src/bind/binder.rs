//! Lock-step binding of document nodes onto the object graph.

use tracing::{debug, warn};

use crate::document::{DocumentNode, TEMPLATE_ATTRIBUTE, TYPE_ATTRIBUTE};
use crate::error::{StencilError, StencilResult};
use crate::schema::{MemberKind, SchemaRegistry};

use super::object::{BoundObject, BoundValue};

/// Bind a merged document subtree onto an already-shaped object instance.
///
/// Every attribute except the reserved `Type` and `Template` keys is
/// assigned to the matching scalar member. Child elements recurse into
/// sub-object members; repeated same-tag children are consumed positionally
/// against collection members. The position counter tracks contiguous runs
/// of one tag and resets when the tag changes, so repeated tags must be
/// contiguous in the document for positional binding to line up. A child
/// whose collection has no element left is skipped, as is a sub-object slot
/// that is absent: both model optional structure, not errors.
///
/// # Errors
///
/// Returns [`StencilError::UnresolvedMember`] for attribute or tag names
/// with no member on the object's type, [`StencilError::ReadOnlyMember`]
/// for assignment to a non-writable member, and
/// [`StencilError::InvalidMemberKind`] when the target member cannot hold
/// the value (function members, or attribute text aimed at a structured
/// member).
pub fn bind(
    node: &DocumentNode,
    object: &mut BoundObject,
    registry: &SchemaRegistry,
) -> StencilResult<()> {
    assign_attributes(node, object, registry)?;

    let mut run_tag: Option<&str> = None;
    let mut run_index = 0usize;
    for child in node.children() {
        if run_tag != Some(child.tag()) {
            run_tag = Some(child.tag());
            run_index = 0;
        }

        let resolved = registry.resolve_member(object.type_name(), child.tag())?;
        let member_name = resolved.member().name().to_owned();
        let type_name = object.type_name().to_owned();
        match object.value_mut(&member_name) {
            Some(BoundValue::List(items)) => {
                let position = run_index;
                run_index += 1;
                if let Some(item) = items.get_mut(position) {
                    bind(child, item, registry)?;
                } else {
                    warn!(
                        tag = child.tag(),
                        position, "no collection element left for positional binding; skipped"
                    );
                }
            }
            Some(BoundValue::Object(Some(inner))) => bind(child, inner, registry)?,
            // Absent optional sub-structure: nothing to bind into.
            Some(BoundValue::Object(None)) => {}
            Some(BoundValue::Scalar(_)) => {
                debug!(tag = child.tag(), "child element addresses a scalar member; skipped");
            }
            None => {
                return Err(StencilError::invalid_member_kind(child.tag(), type_name));
            }
        }
    }
    Ok(())
}

/// Assign every non-reserved attribute to the matching scalar member.
fn assign_attributes(
    node: &DocumentNode,
    object: &mut BoundObject,
    registry: &SchemaRegistry,
) -> StencilResult<()> {
    let type_name = object.type_name().to_owned();
    for (name, value) in node.attributes() {
        if name == TYPE_ATTRIBUTE || name == TEMPLATE_ATTRIBUTE {
            continue;
        }
        let resolved = registry.resolve_member(&type_name, name)?;
        let member = resolved.member();
        if !member.is_writable() {
            return Err(StencilError::read_only_member(name, &type_name));
        }
        match member.kind() {
            MemberKind::Scalar => {
                object.set_value(member.name(), BoundValue::Scalar(Some(value.to_owned())));
            }
            _ => return Err(StencilError::invalid_member_kind(name, &type_name)),
        }
    }
    Ok(())
}
