//! Shaping of attribute-empty object graphs from merged documents.
//!
//! This pass plays the role of the host pipeline's object deserializer: it
//! produces the instance the binder mutates, with every data member present
//! as an empty slot and every collection sized to the document's same-tag
//! children. Keeping it inside the crate makes the binder's precondition
//! (correctly shaped collections) hold for the exposed entry point.

use crate::document::DocumentNode;
use crate::error::{StencilError, StencilResult};
use crate::schema::{MemberKind, SchemaRegistry, TypeSchema};

use super::object::{BoundObject, BoundValue};

/// Build the attribute-empty object graph for a merged document subtree.
///
/// Scalar slots start unassigned, sub-object slots absent unless the
/// document has a corresponding child, and collection slots hold one
/// recursively constructed element per same-tag child.
///
/// # Errors
///
/// Returns [`StencilError::UnresolvedMember`] if a child tag has no member
/// on `bound_type`, [`StencilError::InvalidMemberKind`] if a child addresses
/// a function member, and [`StencilError::UnknownType`] if a member's value
/// type is not registered.
pub fn construct_object(
    node: &DocumentNode,
    bound_type: &TypeSchema,
    registry: &SchemaRegistry,
) -> StencilResult<BoundObject> {
    let qualified = bound_type.qualified_name();
    let mut object = BoundObject::new(&qualified);

    // Empty slots for every data member visible on the type.
    for resolved in registry.members_of(&qualified)? {
        let member = resolved.member();
        let empty = match member.kind() {
            MemberKind::Scalar => BoundValue::Scalar(None),
            MemberKind::Object(_) => BoundValue::Object(None),
            MemberKind::List(_) => BoundValue::List(Vec::new()),
            MemberKind::Function => continue,
        };
        object.set_value(member.name(), empty);
    }

    for child in node.children() {
        let resolved = registry.resolve_member(&qualified, child.tag())?;
        let member = resolved.member();
        match member.kind() {
            MemberKind::Object(type_name) => {
                let child_schema = lookup(registry, type_name)?;
                let inner = construct_object(child, child_schema, registry)?;
                object.set_value(member.name(), BoundValue::Object(Some(Box::new(inner))));
            }
            MemberKind::List(item_type) => {
                let item_schema = lookup(registry, item_type)?;
                let element = construct_object(child, item_schema, registry)?;
                if let Some(BoundValue::List(items)) = object.value_mut(member.name()) {
                    items.push(element);
                }
            }
            // Scalar members are filled from attributes; a child element
            // addressing one carries nothing bindable.
            MemberKind::Scalar => {}
            MemberKind::Function => {
                return Err(StencilError::invalid_member_kind(child.tag(), &qualified));
            }
        }
    }
    Ok(object)
}

fn lookup<'r>(registry: &'r SchemaRegistry, qualified: &str) -> StencilResult<&'r TypeSchema> {
    registry
        .schema(qualified)
        .ok_or_else(|| StencilError::unknown_type(qualified))
}
