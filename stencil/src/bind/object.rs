//! Dynamic object graph filled in by the binder.

use indexmap::IndexMap;

/// The value held by one member slot of a [`BoundObject`].
///
/// Scalars stay strings: coercion into primitive or enumeration values is
/// the external deserializer's concern, modelled here as assignment of the
/// raw attribute text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    /// A leaf value; `None` until an attribute is assigned.
    Scalar(Option<String>),
    /// A nested object; `None` models an absent optional sub-structure.
    Object(Option<Box<BoundObject>>),
    /// An ordered collection of nested objects.
    List(Vec<BoundObject>),
}

/// An instance of a bound type: a mapping from member identifiers to values.
///
/// Instances are produced attribute-empty (but with correctly shaped
/// collections) by the shaping constructor and mutated in place by the
/// binder. The binder never resizes collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundObject {
    type_name: String,
    values: IndexMap<String, BoundValue>,
}

impl BoundObject {
    /// Create an instance of the given qualified type with no member slots.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            values: IndexMap::new(),
        }
    }

    /// Qualified name of the instance's bound type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The value slot for a member identifier, if the member is data-holding.
    #[must_use]
    pub fn value(&self, member: &str) -> Option<&BoundValue> {
        self.values.get(member)
    }

    /// Mutable access to a member's value slot.
    pub fn value_mut(&mut self, member: &str) -> Option<&mut BoundValue> {
        self.values.get_mut(member)
    }

    /// Iterate member slots in declaration order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &BoundValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Create or replace a member's value slot.
    pub fn set_value(&mut self, member: impl Into<String>, value: BoundValue) {
        self.values.insert(member.into(), value);
    }

    /// Convenience accessor for an assigned scalar member.
    #[must_use]
    pub fn scalar(&self, member: &str) -> Option<&str> {
        match self.values.get(member) {
            Some(BoundValue::Scalar(Some(value))) => Some(value),
            _ => None,
        }
    }

    /// Convenience accessor for a present sub-object member.
    #[must_use]
    pub fn object(&self, member: &str) -> Option<&Self> {
        match self.values.get(member) {
            Some(BoundValue::Object(Some(inner))) => Some(inner),
            _ => None,
        }
    }

    /// Convenience accessor for a collection member's elements.
    #[must_use]
    pub fn list(&self, member: &str) -> &[Self] {
        match self.values.get(member) {
            Some(BoundValue::List(items)) => items,
            _ => &[],
        }
    }
}
