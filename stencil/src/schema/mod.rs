//! Static type metadata: member descriptors, schemas, and the registry.
//!
//! The registry is the crate's stand-in for runtime reflection. Target types
//! are registered once per build run; every externally visible name (alias,
//! collection-item alias, identifier) then resolves to a member descriptor
//! carrying the kind, writability, declaring-type rank, and explicit order
//! that the merge, sort, and bind passes key off.

mod member;
mod registry;

pub use member::{Member, MemberKind};
pub use registry::{ResolvedMember, SchemaRegistry, TypeSchema};

#[cfg(test)]
mod tests;
