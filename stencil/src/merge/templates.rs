//! Recursive resolution of `Template` references.
//!
//! A node carrying a `Template` attribute is merged with the root element of
//! the referenced document: attributes absent on the node are copied over,
//! and template children are spliced in wherever the node has no same-tag
//! child or the corresponding member is collection-valued. Local content
//! always wins over templated content. Template documents resolve their own
//! `Template` attributes while loading, so inheritance chains compose
//! transitively; a visited set guards against reference cycles.

use tracing::{debug, trace};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::document::{DocumentNode, TEMPLATE_ATTRIBUTE, TYPE_ATTRIBUTE, parse_document};
use crate::error::{StencilError, StencilResult};
use crate::schema::{SchemaRegistry, TypeSchema};

use super::sort::{Provenance, sort_children};

/// Default file extension of template documents.
pub(crate) const TEMPLATE_EXTENSION: &str = "stencil";

/// Everything the merge pass needs besides the document itself.
///
/// Constructed per import; holds no state between documents.
#[derive(Debug)]
pub struct TemplateContext<'a> {
    registry: &'a SchemaRegistry,
    base_path: &'a Path,
    scopes: &'a [String],
    extension: &'a str,
}

impl<'a> TemplateContext<'a> {
    /// Create a context resolving template paths against `base_path` and
    /// type names against `registry` within `scopes`.
    #[must_use]
    pub fn new(registry: &'a SchemaRegistry, base_path: &'a Path, scopes: &'a [String]) -> Self {
        Self {
            registry,
            base_path,
            scopes,
            extension: TEMPLATE_EXTENSION,
        }
    }

    /// Override the template file extension (without the leading dot).
    #[must_use]
    pub fn with_extension(mut self, extension: &'a str) -> Self {
        self.extension = extension;
        self
    }

    fn template_path(&self, reference: &str) -> PathBuf {
        self.base_path
            .join(format!("{reference}.{}", self.extension))
    }
}

/// Resolve every `Template` reference in `node`'s subtree, in place.
///
/// Each merged node's children are sorted against the template's declared
/// type before the pass descends further.
///
/// # Errors
///
/// Returns [`StencilError::TemplateNotFound`] for dangling references,
/// [`StencilError::TemplateCycle`] when a reference chain revisits a
/// document still being resolved, [`StencilError::UnknownType`] /
/// [`StencilError::AmbiguousType`] for unresolvable `Type` declarations, and
/// [`StencilError::InvalidMemberKind`] when a template child addresses a
/// function member.
pub fn resolve_templates(node: &mut DocumentNode, ctx: &TemplateContext<'_>) -> StencilResult<()> {
    let mut visited = HashSet::new();
    let mut stack = Vec::new();
    resolve_node(node, ctx, &mut visited, &mut stack)
}

/// [`resolve_templates`] for a document loaded from `origin`.
///
/// Seeds the cycle guard with the document's own path, so a template chain
/// leading back to the originating file is reported as a cycle rather than
/// recursing forever.
///
/// # Errors
///
/// As [`resolve_templates`], plus [`StencilError::Io`] if `origin` cannot be
/// canonicalised.
pub fn resolve_templates_from(
    node: &mut DocumentNode,
    origin: &Path,
    ctx: &TemplateContext<'_>,
) -> StencilResult<()> {
    let canonical = std::fs::canonicalize(origin).map_err(|e| StencilError::io(origin, e))?;
    let mut visited = HashSet::new();
    visited.insert(canonical.clone());
    let mut stack = vec![canonical];
    resolve_node(node, ctx, &mut visited, &mut stack)
}

fn resolve_node(
    node: &mut DocumentNode,
    ctx: &TemplateContext<'_>,
    visited: &mut HashSet<PathBuf>,
    stack: &mut Vec<PathBuf>,
) -> StencilResult<()> {
    let mut provenance = Provenance::new();

    if let Some(reference) = node.attribute(TEMPLATE_ATTRIBUTE).map(str::to_owned) {
        let template_root = load_template(&reference, ctx, visited, stack)?;
        merge_attributes(node, &template_root);
        let bound_type = template_type(&template_root, ctx, stack)?;
        splice_children(node, &template_root, bound_type, ctx, &mut provenance)?;
        sort_children(node, bound_type, ctx.registry, &provenance)?;
    }

    // Spliced children came out of a fully resolved template document, so
    // only the remaining children need the descent.
    for child in node.children_mut() {
        if !provenance.is_new(child.id()) {
            resolve_node(child, ctx, visited, stack)?;
        }
    }
    Ok(())
}

/// Load and fully resolve the referenced template document, guarding the
/// reference chain against cycles.
fn load_template(
    reference: &str,
    ctx: &TemplateContext<'_>,
    visited: &mut HashSet<PathBuf>,
    stack: &mut Vec<PathBuf>,
) -> StencilResult<DocumentNode> {
    let path = ctx.template_path(reference);
    if !path.is_file() {
        let referenced_from = stack
            .last()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("<document>"));
        return Err(StencilError::template_not_found(&path, &referenced_from));
    }
    let canonical = std::fs::canonicalize(&path).map_err(|e| StencilError::io(&path, e))?;
    if !visited.insert(canonical.clone()) {
        return Err(StencilError::template_cycle(stack, &canonical));
    }
    debug!(template = %canonical.display(), "loading template document");

    stack.push(canonical.clone());
    let result = parse_document(&canonical)
        .and_then(|mut root| resolve_node(&mut root, ctx, visited, stack).map(|()| root));
    stack.pop();
    visited.remove(&canonical);
    result
}

/// Copy template attributes the node does not already carry.
/// First writer wins: a value already on the node is never overwritten.
fn merge_attributes(node: &mut DocumentNode, template_root: &DocumentNode) {
    for (key, value) in template_root.attributes() {
        if node.attribute(key).is_none() {
            node.set_attribute(key, value);
        }
    }
}

/// Resolve the template root's declared `Type` to a registered schema.
fn template_type<'r>(
    template_root: &DocumentNode,
    ctx: &TemplateContext<'r>,
    stack: &[PathBuf],
) -> StencilResult<&'r TypeSchema> {
    let Some(type_name) = template_root.attribute(TYPE_ATTRIBUTE) else {
        let origin = stack
            .last()
            .map_or_else(|| PathBuf::from("<document>"), Clone::clone);
        return Err(StencilError::parse(
            &origin,
            "template root is missing a Type attribute",
        ));
    };
    ctx.registry.resolve_type(type_name, ctx.scopes)
}

/// Splice template children the node lacks, marking them in `provenance`.
///
/// Children addressing a collection member are always spliced; a scalar or
/// sub-object member already represented by a local child keeps the local
/// one. Template children whose tag is not a member of the bound type are
/// skipped: the tag may be meaningful to a different layer.
fn splice_children(
    node: &mut DocumentNode,
    template_root: &DocumentNode,
    bound_type: &TypeSchema,
    ctx: &TemplateContext<'_>,
    provenance: &mut Provenance,
) -> StencilResult<()> {
    let qualified = bound_type.qualified_name();
    for template_child in template_root.children() {
        let tag = template_child.tag();
        let member = match ctx.registry.resolve_member(&qualified, tag) {
            Ok(member) => member,
            Err(StencilError::UnresolvedMember { .. }) => {
                debug!(tag, type_name = %qualified, "template child is not a member; skipped");
                continue;
            }
            Err(other) => return Err(other),
        };
        if !member.member().is_data() {
            return Err(StencilError::invalid_member_kind(tag, &qualified));
        }

        if node.child(tag).is_none() || member.member().is_list() {
            let copy = template_child.deep_import();
            provenance.mark(copy.id());
            debug!(tag, "spliced template child");
            node.push_child(copy);
        } else {
            trace!(tag, "local child shadows template child");
        }
    }
    Ok(())
}
