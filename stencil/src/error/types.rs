//! Primary error enum for the import pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while merging, sorting, or binding a document.
///
/// Every variant is fatal to the enclosing document's import: a document
/// either fully merges, sorts, and binds, or the whole operation fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StencilError {
    /// Failure reading a document from disk.
    #[error("failed to read document '{path}': {source}")]
    Io {
        /// Path that triggered the I/O failure.
        path: PathBuf,
        /// Underlying error reported by the filesystem.
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed.
    #[error("malformed document '{path}': {message}")]
    Parse {
        /// Path (or origin marker) of the offending document.
        path: PathBuf,
        /// Human-readable description of the parse failure.
        message: String,
    },

    /// A referenced template file does not exist.
    #[error("template '{path}' does not exist (referenced from '{referenced_from}')")]
    TemplateNotFound {
        /// Resolved path of the missing template file.
        path: PathBuf,
        /// Document that carried the dangling `Template` reference.
        referenced_from: PathBuf,
    },

    /// A template reference chain revisits a document still being resolved.
    #[error("cyclic template reference: {cycle}")]
    TemplateCycle {
        /// Chain of template documents participating in the cycle.
        cycle: String,
    },

    /// A type name matched no registered schema.
    #[error("unknown type '{name}'")]
    UnknownType {
        /// The unresolvable type name.
        name: String,
    },

    /// A type name matched more than one registered schema.
    #[error("ambiguous type '{name}': candidates are {candidates}")]
    AmbiguousType {
        /// The ambiguous unqualified type name.
        name: String,
        /// Every qualified name that matched, comma separated.
        candidates: String,
    },

    /// A tag or attribute name has no corresponding member on the bound type.
    #[error("no member '{name}' on type '{type_name}'")]
    UnresolvedMember {
        /// The tag or attribute name that failed to resolve.
        name: String,
        /// Qualified name of the type that was searched.
        type_name: String,
    },

    /// The resolved member is not a data-holding slot.
    #[error("member '{name}' on type '{type_name}' cannot hold this value")]
    InvalidMemberKind {
        /// Name of the offending member.
        name: String,
        /// Qualified name of the declaring type.
        type_name: String,
    },

    /// Attempted to assign an attribute to a non-writable member.
    #[error("member '{name}' on type '{type_name}' is read-only")]
    ReadOnlyMember {
        /// Name of the read-only member.
        name: String,
        /// Qualified name of the declaring type.
        type_name: String,
    },
}
