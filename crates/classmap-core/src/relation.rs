//! Directed relations between diagram objects.
//!
//! A relation endpoint starts out as a bare name ([`Endpoint::Unresolved`])
//! while parsers walk source trees, and becomes an [`ObjectRef`] into the
//! diagram's object tables once every object is known. Resolution is the
//! only way from the former to the latter; it is never reversed.

use std::{collections::BTreeMap, fmt};

/// Handle to an object owned by a [`Diagram`](crate::diagram::Diagram).
///
/// Registered objects live in the diagram's object table; stubs are the
/// permanent placeholders created for names that could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectRef {
    Registered(usize),
    Stub(usize),
}

impl ObjectRef {
    /// Returns `true` for stub objects.
    pub fn is_stub(self) -> bool {
        matches!(self, Self::Stub(_))
    }
}

/// One end of a relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// A name that has not been looked up yet.
    Unresolved(String),
    /// A resolved reference.
    Resolved(ObjectRef),
}

impl Endpoint {
    /// Create an unresolved endpoint.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Unresolved(name.into())
    }

    /// The resolved reference, if resolution already happened.
    pub fn object_ref(&self) -> Option<ObjectRef> {
        match self {
            Self::Resolved(object_ref) => Some(*object_ref),
            Self::Unresolved(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl From<ObjectRef> for Endpoint {
    fn from(object_ref: ObjectRef) -> Self {
        Self::Resolved(object_ref)
    }
}

impl From<&str> for Endpoint {
    fn from(name: &str) -> Self {
        Self::name(name)
    }
}

/// Arrow head drawn at one end of an association.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowHead {
    #[default]
    None,
    /// Navigable end, written `>` or `<`.
    Directed,
    /// Hollow diamond, written `o`.
    Aggregation,
    /// Filled diamond, written `*`.
    Composition,
}

impl ArrowHead {
    /// Map an annotation character to an arrow head.
    ///
    /// Unknown characters mean no head.
    pub fn from_char(c: char) -> Self {
        match c {
            '>' | '<' => Self::Directed,
            'o' => Self::Aggregation,
            '*' => Self::Composition,
            _ => Self::None,
        }
    }
}

/// Labels and decorations of an association.
///
/// Multiplicities are free-form strings such as `"1"`, `"0..*"` or `"*"`.
/// `options` holds boolean layout hints such as `flat`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Association {
    pub name: String,
    pub role_a: String,
    pub role_b: String,
    pub multiplicity_a: String,
    pub multiplicity_b: String,
    pub head_a: ArrowHead,
    pub head_b: ArrowHead,
    pub options: BTreeMap<String, bool>,
}

impl Association {
    /// An association labelled only with the role at the B end.
    pub fn with_role_b(role_b: impl Into<String>) -> Self {
        Self {
            role_b: role_b.into(),
            ..Self::default()
        }
    }

    /// Value of a boolean visual option; unset options are `false`.
    pub fn option(&self, key: &str) -> bool {
        self.options.get(key).copied().unwrap_or(false)
    }
}

/// What a relation means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationKind {
    Inheritance,
    Implements,
    Associative(Association),
}

impl RelationKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Inheritance => "inheritance",
            Self::Implements => "implements",
            Self::Associative(_) => "association",
        }
    }
}

/// A directed edge from endpoint `a` to endpoint `b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    a: Endpoint,
    b: Endpoint,
    kind: RelationKind,
}

impl Relation {
    pub fn new(a: impl Into<Endpoint>, b: impl Into<Endpoint>, kind: RelationKind) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            kind,
        }
    }

    /// `a` extends `b`.
    pub fn inheritance(a: impl Into<Endpoint>, b: impl Into<Endpoint>) -> Self {
        Self::new(a, b, RelationKind::Inheritance)
    }

    /// `a` implements `b`.
    pub fn implements(a: impl Into<Endpoint>, b: impl Into<Endpoint>) -> Self {
        Self::new(a, b, RelationKind::Implements)
    }

    /// `a` is associated with `b`.
    pub fn associative(
        a: impl Into<Endpoint>,
        b: impl Into<Endpoint>,
        association: Association,
    ) -> Self {
        Self::new(a, b, RelationKind::Associative(association))
    }

    pub fn a(&self) -> &Endpoint {
        &self.a
    }

    pub fn b(&self) -> &Endpoint {
        &self.b
    }

    pub fn kind(&self) -> &RelationKind {
        &self.kind
    }

    /// The association payload of an associative relation.
    pub fn association(&self) -> Option<&Association> {
        match &self.kind {
            RelationKind::Associative(association) => Some(association),
            RelationKind::Inheritance | RelationKind::Implements => None,
        }
    }

    /// Both endpoints, `a` first. Used by the resolution pass.
    pub fn endpoints_mut(&mut self) -> [&mut Endpoint; 2] {
        [&mut self.a, &mut self.b]
    }
}

impl fmt::Display for ArrowHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Directed => "directed",
            Self::Aggregation => "aggregation",
            Self::Composition => "composition",
        };
        write!(f, "{s}")
    }
}
