//! Member descriptors for bound types.

/// The shape of data a member can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    /// A leaf value assigned from a document attribute.
    Scalar,
    /// A nested bound object of the named (qualified) schema type.
    Object(String),
    /// An ordered collection of bound objects of the named schema type.
    List(String),
    /// A callable slot; never a valid merge or binding target.
    Function,
}

/// An addressable, named slot on a bound type.
///
/// Document tags and attribute names resolve to members first through the
/// alias or collection-item alias, then through the declared identifier.
#[derive(Debug, Clone)]
pub struct Member {
    name: String,
    alias: Option<String>,
    item_alias: Option<String>,
    kind: MemberKind,
    order: Option<u32>,
    writable: bool,
}

impl Member {
    fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            alias: None,
            item_alias: None,
            kind,
            order: None,
            writable: true,
        }
    }

    /// A scalar member assigned from a document attribute.
    #[must_use]
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Scalar)
    }

    /// A sub-object member of the given qualified schema type.
    #[must_use]
    pub fn object(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Object(type_name.into()))
    }

    /// An ordered collection member whose items are of the given qualified
    /// schema type.
    #[must_use]
    pub fn list(name: impl Into<String>, item_type: impl Into<String>) -> Self {
        Self::new(name, MemberKind::List(item_type.into()))
    }

    /// A function member. Declared so that documents addressing it fail with
    /// a precise error instead of an unresolved-name one.
    #[must_use]
    pub fn function(name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Function)
    }

    /// Externally visible short name, distinct from the identifier.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Name used by document children addressing this collection's items.
    #[must_use]
    pub fn with_item_alias(mut self, item_alias: impl Into<String>) -> Self {
        self.item_alias = Some(item_alias.into());
        self
    }

    /// Explicit ordering rank used by the child sorter.
    #[must_use]
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    /// Mark the member as non-writable; attribute assignment to it fails.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// The declared identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The explicit alias, if any.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The collection-item alias, if any.
    #[must_use]
    pub fn item_alias(&self) -> Option<&str> {
        self.item_alias.as_deref()
    }

    /// The member's data shape.
    #[must_use]
    pub fn kind(&self) -> &MemberKind {
        &self.kind
    }

    /// Explicit ordering rank, if declared.
    #[must_use]
    pub fn order(&self) -> Option<u32> {
        self.order
    }

    /// Whether attribute assignment may write to this member.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Whether the member holds an ordered collection.
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self.kind, MemberKind::List(_))
    }

    /// Whether the member is a data-holding slot at all.
    #[must_use]
    pub fn is_data(&self) -> bool {
        !matches!(self.kind, MemberKind::Function)
    }

    pub(crate) fn matches_alias(&self, name: &str) -> bool {
        self.alias.as_deref() == Some(name) || self.item_alias.as_deref() == Some(name)
    }
}
