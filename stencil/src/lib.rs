//! Build-time importer for hierarchical, attribute-bearing asset documents.
//!
//! An asset document is an XML tree whose root declares a bound `Type` and
//! optionally a `Template` reference to another document supplying defaults.
//! The importer turns such a document into two things: the fully-merged
//! document (templates resolved, children reordered to the bound type's
//! declared member order, identifier attributes composed into dotted paths)
//! and a populated object graph bound from that document through registered
//! type metadata.
//!
//! # Pipeline
//!
//! ```text
//! authored document
//!        │
//!        ▼
//! template resolution   merge::resolve_templates   (splice defaults, guard cycles)
//!        │
//!        ▼
//! child sorting         merge::sort_children       (declared member order)
//!        │
//!        ▼
//! identifier paths      merge::propagate_identifiers   (Id="A.B.C")
//!        │
//!        ▼
//! graph shaping         bind::construct_object     (attribute-empty instance)
//!        │
//!        ▼
//! binding               bind::bind                 (attributes + positional lists)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use stencil::{Importer, Member, SchemaRegistry, TypeSchema};
//!
//! let mut registry = SchemaRegistry::new();
//! registry.register(
//!     TypeSchema::new("ui", "Widget")
//!         .with_member(Member::scalar("Color"))
//!         .with_member(Member::list("Parts", "ui.Part").with_item_alias("Part")),
//! );
//! registry.register(TypeSchema::new("ui", "Part").with_member(Member::scalar("Name")));
//!
//! let importer = Importer::new(&registry, Path::new("content")).with_scope("ui");
//! let widget = importer.import(Path::new("content/menu.stencil"))?;
//! assert_eq!(widget.type_name(), "ui.Widget");
//! # Ok::<(), stencil::StencilError>(())
//! ```

mod bind;
mod document;
mod error;
mod merge;
mod schema;

pub use bind::{BoundObject, BoundValue, bind, construct_object};
pub use document::{
    DocumentNode, ID_ATTRIBUTE, NodeId, TEMPLATE_ATTRIBUTE, TYPE_ATTRIBUTE, parse_document,
    parse_str, write_document,
};
pub use error::{StencilError, StencilResult};
pub use merge::{
    ID_SEPARATOR, Provenance, TemplateContext, propagate_identifiers,
    propagate_identifiers_with, resolve_templates, resolve_templates_from, sort_children,
};
pub use schema::{Member, MemberKind, ResolvedMember, SchemaRegistry, TypeSchema};

use std::path::{Path, PathBuf};

use tracing::debug;

/// One-stop entry point composing the whole import pipeline.
///
/// Holds the explicit state a single build run needs: the schema registry,
/// the content root that template references resolve against, and the module
/// scopes unqualified type names may come from. Nothing is cached across
/// importers; each test or build constructs its own.
#[derive(Debug)]
pub struct Importer<'a> {
    registry: &'a SchemaRegistry,
    base_path: PathBuf,
    scopes: Vec<String>,
    template_extension: Option<String>,
}

impl<'a> Importer<'a> {
    /// Create an importer resolving template references against `base_path`.
    #[must_use]
    pub fn new(registry: &'a SchemaRegistry, base_path: &Path) -> Self {
        Self {
            registry,
            base_path: base_path.to_path_buf(),
            scopes: Vec::new(),
            template_extension: None,
        }
    }

    /// Allow unqualified type names from the given module scope.
    ///
    /// May be called repeatedly. With no scopes configured, unqualified
    /// names are searched across every registered module.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.push(scope.into());
        self
    }

    /// Override the template file extension (without the leading dot).
    #[must_use]
    pub fn with_template_extension(mut self, extension: impl Into<String>) -> Self {
        self.template_extension = Some(extension.into());
        self
    }

    /// Load a document and produce its fully-merged form: templates
    /// resolved, children sorted, identifiers composed.
    ///
    /// # Errors
    ///
    /// Any [`StencilError`] raised by loading, template resolution, or
    /// sorting; the document either fully merges or the import fails.
    pub fn import_document(&self, path: &Path) -> StencilResult<DocumentNode> {
        debug!(document = %path.display(), "importing document");
        let mut root = parse_document(path)?;
        let ctx = self.template_context();
        resolve_templates_from(&mut root, path, &ctx)?;
        propagate_identifiers(&mut root);
        Ok(root)
    }

    /// Load, merge, and bind a document into a populated object graph.
    ///
    /// # Errors
    ///
    /// As [`Importer::import_document`], plus the type-resolution and
    /// binding errors of the construct and bind passes.
    pub fn import(&self, path: &Path) -> StencilResult<BoundObject> {
        let root = self.import_document(path)?;
        let Some(type_name) = root.attribute(TYPE_ATTRIBUTE) else {
            return Err(StencilError::parse(
                path,
                "root element is missing a Type attribute",
            ));
        };
        let schema = self.registry.resolve_type(type_name, &self.scopes)?;
        let mut object = construct_object(&root, schema, self.registry)?;
        bind(&root, &mut object, self.registry)?;
        Ok(object)
    }

    /// Persist a merged document as indented XML.
    ///
    /// # Errors
    ///
    /// Returns [`StencilError::Io`] if the file cannot be written.
    pub fn write_merged(&self, document: &DocumentNode, path: &Path) -> StencilResult<()> {
        let rendered = write_document(document)?;
        std::fs::write(path, rendered).map_err(|e| StencilError::io(path, e))
    }

    fn template_context(&self) -> TemplateContext<'_> {
        let ctx = TemplateContext::new(self.registry, &self.base_path, &self.scopes);
        match &self.template_extension {
            Some(extension) => ctx.with_extension(extension),
            None => ctx,
        }
    }
}
