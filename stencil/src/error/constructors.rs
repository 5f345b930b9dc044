//! Constructor helpers for `StencilError`.

use std::path::{Path, PathBuf};

use super::StencilError;

impl StencilError {
    /// Construct an [`StencilError::Io`] for a document path.
    #[must_use]
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Construct a [`StencilError::Parse`] for a document path.
    #[must_use]
    pub fn parse(path: &Path, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Construct a [`StencilError::TemplateNotFound`].
    #[must_use]
    pub fn template_not_found(path: &Path, referenced_from: &Path) -> Self {
        Self::TemplateNotFound {
            path: path.to_path_buf(),
            referenced_from: referenced_from.to_path_buf(),
        }
    }

    /// Construct a [`StencilError::TemplateCycle`] from the resolution stack.
    ///
    /// `stack` holds the documents currently being resolved, outermost first;
    /// `revisited` is the document that closed the cycle.
    #[must_use]
    pub fn template_cycle(stack: &[PathBuf], revisited: &Path) -> Self {
        let mut chain: Vec<String> = stack.iter().map(|p| p.display().to_string()).collect();
        chain.push(revisited.display().to_string());
        Self::TemplateCycle {
            cycle: chain.join(" -> "),
        }
    }

    /// Construct an [`StencilError::UnknownType`].
    #[must_use]
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    /// Construct an [`StencilError::AmbiguousType`] from candidate names.
    #[must_use]
    pub fn ambiguous_type<I, S>(name: impl Into<String>, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let candidates: Vec<String> = candidates
            .into_iter()
            .map(|c| c.as_ref().to_owned())
            .collect();
        Self::AmbiguousType {
            name: name.into(),
            candidates: candidates.join(", "),
        }
    }

    /// Construct an [`StencilError::UnresolvedMember`].
    #[must_use]
    pub fn unresolved_member(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::UnresolvedMember {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Construct an [`StencilError::InvalidMemberKind`].
    #[must_use]
    pub fn invalid_member_kind(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::InvalidMemberKind {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Construct a [`StencilError::ReadOnlyMember`].
    #[must_use]
    pub fn read_only_member(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::ReadOnlyMember {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}
