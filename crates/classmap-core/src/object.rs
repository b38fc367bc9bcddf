//! Diagram objects: classes, enums, interfaces and unresolved placeholders.

use std::{fmt, mem};

use crate::{
    doc::DocComment,
    error::ModelError,
    member::{ClassMember, MemberKind},
    types::Type,
};

/// Members of a class-like object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassBody {
    is_abstract: bool,
    attributes: Vec<ClassMember>,
    constructors: Vec<ClassMember>,
    methods: Vec<ClassMember>,
}

impl ClassBody {
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn attributes(&self) -> &[ClassMember] {
        &self.attributes
    }

    pub fn constructors(&self) -> &[ClassMember] {
        &self.constructors
    }

    pub fn methods(&self) -> &[ClassMember] {
        &self.methods
    }

    fn absorb(&mut self, other: ClassBody) {
        self.is_abstract |= other.is_abstract;
        append_missing(&mut self.attributes, other.attributes);
        append_missing(&mut self.constructors, other.constructors);
        append_missing(&mut self.methods, other.methods);
    }
}

/// Kind-specific payload of a [`DiagramObject`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKind {
    Class(ClassBody),
    Enum {
        body: ClassBody,
        constants: Vec<ClassMember>,
    },
    Interface {
        methods: Vec<ClassMember>,
    },
    /// A bare placeholder for a name that has not been declared.
    Unresolved,
}

impl ObjectKind {
    /// Human readable kind name, used in error messages and by emitters.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Class(_) => "class",
            Self::Enum { .. } => "enum",
            Self::Interface { .. } => "interface",
            Self::Unresolved => "unresolved",
        }
    }
}

/// A named entity of the diagram.
///
/// Every object carries its package path, documentation, custom
/// stereotypes and generic parameters in addition to the kind-specific
/// members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramObject {
    name: String,
    package: Vec<String>,
    doc: DocComment,
    stereotypes: Vec<String>,
    generics: Vec<Type>,
    important: bool,
    kind: ObjectKind,
}

impl DiagramObject {
    fn new(name: impl Into<String>, package: Vec<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            package,
            doc: DocComment::default(),
            stereotypes: Vec::new(),
            generics: Vec::new(),
            important: false,
            kind,
        }
    }

    /// Create an empty class.
    ///
    /// # Examples
    ///
    /// ```
    /// use classmap_core::{member::{ClassMember, Visibility}, object::DiagramObject, types::Type};
    ///
    /// let mut order = DiagramObject::class("Order", vec!["shop".to_string()]);
    /// order
    ///     .add_member(ClassMember::attribute("lines", Visibility::Private, Type::named("Line")))
    ///     .expect("classes hold attributes");
    /// assert_eq!(order.qualified_name(), "shop.Order");
    /// ```
    pub fn class(name: impl Into<String>, package: Vec<String>) -> Self {
        Self::new(name, package, ObjectKind::Class(ClassBody::default()))
    }

    /// Create an empty enum.
    pub fn enumeration(name: impl Into<String>, package: Vec<String>) -> Self {
        Self::new(
            name,
            package,
            ObjectKind::Enum {
                body: ClassBody::default(),
                constants: Vec::new(),
            },
        )
    }

    /// Create an empty interface.
    pub fn interface(name: impl Into<String>, package: Vec<String>) -> Self {
        Self::new(
            name,
            package,
            ObjectKind::Interface {
                methods: Vec::new(),
            },
        )
    }

    /// Create a placeholder for a name that is referenced but not declared.
    pub fn unresolved(name: impl Into<String>, package: Vec<String>) -> Self {
        Self::new(name, package, ObjectKind::Unresolved)
    }

    pub fn with_doc(mut self, doc: DocComment) -> Self {
        self.doc = doc;
        self
    }

    pub fn with_stereotype(mut self, stereotype: impl Into<String>) -> Self {
        self.stereotypes.push(stereotype.into());
        self
    }

    pub fn with_generic(mut self, generic: Type) -> Self {
        self.generics.push(generic);
        self
    }

    /// Mark a class or enum as abstract. Has no effect on other kinds.
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        if let Some(body) = self.body_mut() {
            body.is_abstract = is_abstract;
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Package path segments, outermost first.
    pub fn package(&self) -> &[String] {
        &self.package
    }

    /// Package and name joined with dots.
    pub fn qualified_name(&self) -> String {
        self.package
            .iter()
            .map(String::as_str)
            .chain([self.name.as_str()])
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn doc(&self) -> &DocComment {
        &self.doc
    }

    pub fn stereotypes(&self) -> &[String] {
        &self.stereotypes
    }

    pub fn generics(&self) -> &[Type] {
        &self.generics
    }

    pub fn is_important(&self) -> bool {
        self.important
    }

    pub fn set_important(&mut self, important: bool) {
        self.important = important;
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// Returns `true` for the placeholder kind.
    pub fn is_unresolved(&self) -> bool {
        matches!(self.kind, ObjectKind::Unresolved)
    }

    /// Class body of a class or enum.
    pub fn body(&self) -> Option<&ClassBody> {
        match &self.kind {
            ObjectKind::Class(body) | ObjectKind::Enum { body, .. } => Some(body),
            ObjectKind::Interface { .. } | ObjectKind::Unresolved => None,
        }
    }

    fn body_mut(&mut self) -> Option<&mut ClassBody> {
        match &mut self.kind {
            ObjectKind::Class(body) | ObjectKind::Enum { body, .. } => Some(body),
            ObjectKind::Interface { .. } | ObjectKind::Unresolved => None,
        }
    }

    /// Attributes of a class or enum; empty for other kinds.
    pub fn attributes(&self) -> &[ClassMember] {
        self.body().map(ClassBody::attributes).unwrap_or_default()
    }

    /// Constructors of a class or enum; empty for other kinds.
    pub fn constructors(&self) -> &[ClassMember] {
        self.body().map(ClassBody::constructors).unwrap_or_default()
    }

    /// Methods of a class, enum or interface.
    pub fn methods(&self) -> &[ClassMember] {
        match &self.kind {
            ObjectKind::Class(body) | ObjectKind::Enum { body, .. } => body.methods(),
            ObjectKind::Interface { methods } => methods,
            ObjectKind::Unresolved => &[],
        }
    }

    /// Enum constants in declaration order; empty for other kinds.
    pub fn constants(&self) -> &[ClassMember] {
        match &self.kind {
            ObjectKind::Enum { constants, .. } => constants,
            _ => &[],
        }
    }

    /// Mutable access to every member, for passes that set flags.
    pub fn members_mut(&mut self) -> impl Iterator<Item = &mut ClassMember> {
        let (constants, body, interface_methods) = match &mut self.kind {
            ObjectKind::Class(body) => (None, Some(body), None),
            ObjectKind::Enum { body, constants } => (Some(constants), Some(body), None),
            ObjectKind::Interface { methods } => (None, None, Some(methods)),
            ObjectKind::Unresolved => (None, None, None),
        };
        let body_members = body.into_iter().flat_map(|body| {
            body.attributes
                .iter_mut()
                .chain(body.constructors.iter_mut())
                .chain(body.methods.iter_mut())
        });
        constants
            .into_iter()
            .flatten()
            .chain(body_members)
            .chain(interface_methods.into_iter().flatten())
    }

    /// Returns `true` if a method with this name exists.
    pub fn has_method(&self, name: &str) -> bool {
        self.methods().iter().any(|method| method.name() == name)
    }

    /// Append a member to the list matching its kind.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MemberNotAllowed`] when this kind of object
    /// cannot hold the member: attributes and constructors need a class or
    /// enum, constants need an enum and placeholders hold nothing.
    pub fn add_member(&mut self, member: ClassMember) -> Result<(), ModelError> {
        let member_kind = match member.kind() {
            MemberKind::Attribute { .. } => "attribute",
            MemberKind::Method { .. } => "method",
            MemberKind::Constructor { .. } => "constructor",
            MemberKind::Constant => "constant",
        };

        let target = match (&mut self.kind, member.kind()) {
            (ObjectKind::Class(body), MemberKind::Attribute { .. })
            | (ObjectKind::Enum { body, .. }, MemberKind::Attribute { .. }) => {
                Some(&mut body.attributes)
            }
            (ObjectKind::Class(body), MemberKind::Constructor { .. })
            | (ObjectKind::Enum { body, .. }, MemberKind::Constructor { .. }) => {
                Some(&mut body.constructors)
            }
            (ObjectKind::Class(body), MemberKind::Method { .. })
            | (ObjectKind::Enum { body, .. }, MemberKind::Method { .. }) => Some(&mut body.methods),
            (ObjectKind::Interface { methods }, MemberKind::Method { .. }) => Some(methods),
            (ObjectKind::Enum { constants, .. }, MemberKind::Constant) => Some(constants),
            _ => None,
        };

        match target {
            Some(members) => {
                members.push(member);
                Ok(())
            }
            None => Err(ModelError::MemberNotAllowed {
                object: self.name.clone(),
                member: member.name().to_string(),
                member_kind,
            }),
        }
    }

    /// Merge another definition of the same name into this one.
    ///
    /// A placeholder never overrides a concrete object and is replaced by
    /// one. Two definitions of the same kind are unioned: stereotypes and
    /// members not yet present are appended, and empty documentation,
    /// package and generics are taken from `other`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::KindConflict`] when both definitions are
    /// concrete but of different kinds.
    pub fn merge(&mut self, other: DiagramObject) -> Result<(), ModelError> {
        if other.is_unresolved() {
            if self.package.is_empty() {
                self.package = other.package;
            }
            return Ok(());
        }

        if self.is_unresolved() {
            let stereotypes = mem::take(&mut self.stereotypes);
            *self = other;
            for stereotype in stereotypes {
                if !self.stereotypes.contains(&stereotype) {
                    self.stereotypes.push(stereotype);
                }
            }
            return Ok(());
        }

        let DiagramObject {
            name,
            package,
            doc,
            stereotypes,
            generics,
            important,
            kind,
        } = other;

        match (&mut self.kind, kind) {
            (ObjectKind::Class(body), ObjectKind::Class(other_body)) => body.absorb(other_body),
            (
                ObjectKind::Enum { body, constants },
                ObjectKind::Enum {
                    body: other_body,
                    constants: other_constants,
                },
            ) => {
                body.absorb(other_body);
                append_missing(constants, other_constants);
            }
            (
                ObjectKind::Interface { methods },
                ObjectKind::Interface {
                    methods: other_methods,
                },
            ) => append_missing(methods, other_methods),
            (existing, incoming) => {
                return Err(ModelError::KindConflict {
                    name,
                    existing: existing.name(),
                    incoming: incoming.name(),
                });
            }
        }

        if self.package.is_empty() {
            self.package = package;
        }
        if self.doc.is_empty() {
            self.doc = doc;
        }
        if self.generics.is_empty() {
            self.generics = generics;
        }
        for stereotype in stereotypes {
            if !self.stereotypes.contains(&stereotype) {
                self.stereotypes.push(stereotype);
            }
        }
        self.important |= important;

        Ok(())
    }
}

impl fmt::Display for DiagramObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Append members whose signature is not in `target` yet.
fn append_missing(target: &mut Vec<ClassMember>, incoming: Vec<ClassMember>) {
    for member in incoming {
        let signature = member.signature();
        if !target.iter().any(|existing| existing.signature() == signature) {
            target.push(member);
        }
    }
}
