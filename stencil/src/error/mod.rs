//! Error types produced by the import pipeline.

mod constructors;
mod types;

pub use types::StencilError;

/// Convenience alias for results carrying a [`StencilError`].
pub type StencilResult<T> = Result<T, StencilError>;
