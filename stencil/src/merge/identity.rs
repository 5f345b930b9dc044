//! Composition of dotted identifier paths from ancestor attributes.

use crate::document::{DocumentNode, ID_ATTRIBUTE};

/// Default separator between identifier segments.
pub const ID_SEPARATOR: &str = ".";

/// Compose each node's `Id` attribute with the identifiers of its ancestors.
///
/// Runs after merge and sort. A node whose ancestors carry `Id="A"` and
/// `Id="B"` and which itself carries `Id="C"` ends up with `Id="A.B.C"`.
/// Ancestors without the attribute contribute nothing and do not break the
/// chain above them; nodes without the attribute are left untouched.
pub fn propagate_identifiers(node: &mut DocumentNode) {
    propagate_identifiers_with(node, ID_ATTRIBUTE, ID_SEPARATOR);
}

/// [`propagate_identifiers`] with a custom attribute key and separator.
pub fn propagate_identifiers_with(node: &mut DocumentNode, attribute: &str, separator: &str) {
    let mut ancestors = Vec::new();
    visit(node, attribute, separator, &mut ancestors);
}

fn visit(
    node: &mut DocumentNode,
    attribute: &str,
    separator: &str,
    ancestors: &mut Vec<String>,
) {
    let own = node.attribute(attribute).map(str::to_owned);
    if let Some(own) = &own {
        if !ancestors.is_empty() {
            let composed = format!("{}{}{}", ancestors.join(separator), separator, own);
            node.set_attribute(attribute, composed);
        }
        // Descendants compose with the raw segment, not the composed path.
        ancestors.push(own.clone());
    }

    for child in node.children_mut() {
        visit(child, attribute, separator, ancestors);
    }

    if own.is_some() {
        ancestors.pop();
    }
}
