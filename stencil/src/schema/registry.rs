//! The schema registry: type registration, scoped type-name resolution, and
//! cached member lookup.

use indexmap::IndexMap;
use tracing::trace;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::error::{StencilError, StencilResult};

use super::member::Member;

/// The declared shape of one bound type.
#[derive(Debug, Clone)]
pub struct TypeSchema {
    module: String,
    name: String,
    parent: Option<String>,
    members: Vec<Member>,
}

impl TypeSchema {
    /// Declare a type `name` living in `module`.
    #[must_use]
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            parent: None,
            members: Vec::new(),
        }
    }

    /// Declare the qualified name of the supertype, if any.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Declare a member on this type.
    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// The unqualified type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The module the type lives in.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// The `module.name` form used as the registry key.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.module, self.name)
    }

    /// Qualified name of the supertype, if declared.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Members declared directly on this type.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }
}

/// A member resolved on a concrete bound type, together with the inheritance
/// metadata the child sorter keys off.
#[derive(Debug, Clone)]
pub struct ResolvedMember {
    member: Member,
    declaring_type: String,
    declaring_depth: usize,
}

impl ResolvedMember {
    /// The member descriptor.
    #[must_use]
    pub fn member(&self) -> &Member {
        &self.member
    }

    /// Qualified name of the type that declared the member.
    #[must_use]
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// Distance from the bound type's own declaration: `0` when declared on
    /// the type itself, growing towards the root of the inheritance chain.
    /// Members with a larger depth (declared on a supertype) sort first.
    #[must_use]
    pub fn declaring_depth(&self) -> usize {
        self.declaring_depth
    }
}

/// Registry of every bound type visible to one build run.
///
/// Built explicitly and passed into the passes that need it; nothing in the
/// crate keeps global type state. Lookups are cached per `(type, name)` pair,
/// misses included, so repeated scans of an inheritance chain happen once.
/// The cache uses interior mutability and is single-threaded by design; a
/// parallel build would need a concurrent map with idempotent fill-on-miss.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    types: IndexMap<String, TypeSchema>,
    cache: RefCell<HashMap<(String, String), Option<ResolvedMember>>>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type schema, replacing any earlier registration of the
    /// same qualified name.
    pub fn register(&mut self, schema: TypeSchema) {
        self.cache.borrow_mut().clear();
        self.types.insert(schema.qualified_name(), schema);
    }

    /// Look up a schema by qualified name.
    #[must_use]
    pub fn schema(&self, qualified_name: &str) -> Option<&TypeSchema> {
        self.types.get(qualified_name)
    }

    /// Resolve a type name against the allow-listed module scopes.
    ///
    /// A name containing a `.` is treated as fully qualified. An unqualified
    /// name is searched across `scopes`; an empty scope list searches every
    /// registered module.
    ///
    /// # Errors
    ///
    /// Returns [`StencilError::UnknownType`] when nothing matches and
    /// [`StencilError::AmbiguousType`] when more than one type does.
    pub fn resolve_type(&self, name: &str, scopes: &[String]) -> StencilResult<&TypeSchema> {
        if name.contains('.') {
            return self
                .types
                .get(name)
                .ok_or_else(|| StencilError::unknown_type(name));
        }

        let mut candidates: Vec<&TypeSchema> = self
            .types
            .values()
            .filter(|schema| schema.name() == name)
            .collect();
        if !scopes.is_empty() {
            candidates.retain(|schema| scopes.iter().any(|s| s == schema.module()));
        }

        match candidates.as_slice() {
            [] => Err(StencilError::unknown_type(name)),
            [single] => Ok(*single),
            many => Err(StencilError::ambiguous_type(
                name,
                many.iter().map(|s| s.qualified_name()),
            )),
        }
    }

    /// Resolve a document tag or attribute name to a member of the given
    /// (qualified) bound type.
    ///
    /// Search order across the full inheritance chain, derived overrides
    /// preferred: first a member whose alias or collection-item alias equals
    /// `name`, then a member whose identifier equals `name`. Both hits and
    /// misses are cached.
    ///
    /// # Errors
    ///
    /// Returns [`StencilError::UnknownType`] if `type_name` (or a declared
    /// supertype) is not registered, and [`StencilError::UnresolvedMember`]
    /// when no member answers to `name`.
    pub fn resolve_member(&self, type_name: &str, name: &str) -> StencilResult<ResolvedMember> {
        let key = (type_name.to_owned(), name.to_owned());
        if let Some(cached) = self.cache.borrow().get(&key) {
            return cached
                .clone()
                .ok_or_else(|| StencilError::unresolved_member(name, type_name));
        }

        let resolved = self.scan_chain(type_name, name)?;
        trace!(type_name, name, found = resolved.is_some(), "member lookup");
        self.cache.borrow_mut().insert(key, resolved.clone());
        resolved.ok_or_else(|| StencilError::unresolved_member(name, type_name))
    }

    /// Every data member visible on the given type, deduplicated across the
    /// inheritance chain by identifier (derived overrides win).
    ///
    /// # Errors
    ///
    /// Returns [`StencilError::UnknownType`] if the type or one of its
    /// declared supertypes is not registered.
    pub fn members_of(&self, type_name: &str) -> StencilResult<Vec<ResolvedMember>> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut members = Vec::new();
        for (depth, schema) in self.inheritance_chain(type_name)?.iter().enumerate() {
            for member in schema.members() {
                if seen.insert(member.name()) {
                    members.push(ResolvedMember {
                        member: member.clone(),
                        declaring_type: schema.qualified_name(),
                        declaring_depth: depth,
                    });
                }
            }
        }
        Ok(members)
    }

    fn scan_chain(&self, type_name: &str, name: &str) -> StencilResult<Option<ResolvedMember>> {
        let members = self.members_of(type_name)?;
        let by_alias = members.iter().find(|m| m.member().matches_alias(name));
        let resolved = by_alias.or_else(|| members.iter().find(|m| m.member().name() == name));
        Ok(resolved.cloned())
    }

    /// The type's schemas from itself up to the root of its inheritance
    /// chain. A malformed chain that revisits a type is cut at the revisit.
    fn inheritance_chain(&self, type_name: &str) -> StencilResult<Vec<&TypeSchema>> {
        let mut chain = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut current = Some(type_name.to_owned());
        while let Some(qualified) = current {
            let schema = self
                .types
                .get(&qualified)
                .ok_or_else(|| StencilError::unknown_type(&qualified))?;
            if !visited.insert(schema.qualified_name()) {
                break;
            }
            current = schema.parent().map(str::to_owned);
            chain.push(schema);
        }
        Ok(chain)
    }
}
