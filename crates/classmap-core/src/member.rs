//! Class members: attributes, methods, constructors and enum constants.

use std::{fmt, str::FromStr};

use crate::{doc::DocComment, types::Type};

/// Member or object visibility.
///
/// Each visibility is drawn in class diagrams with a single-character tag,
/// see [`Visibility::tag`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
    Protected,
    /// No modifier in the source.
    #[default]
    PackagePrivate,
}

impl Visibility {
    /// Returns the diagram tag: `+`, `-`, `#` or `~`.
    pub fn tag(self) -> char {
        match self {
            Self::Public => '+',
            Self::Private => '-',
            Self::Protected => '#',
            Self::PackagePrivate => '~',
        }
    }

    /// Pick the visibility from a list of source modifiers.
    ///
    /// Modifiers that are not access modifiers are ignored; no access
    /// modifier means package-private.
    ///
    /// # Examples
    ///
    /// ```
    /// use classmap_core::member::Visibility;
    ///
    /// assert_eq!(Visibility::from_modifiers(["static", "private"]), Visibility::Private);
    /// assert_eq!(Visibility::from_modifiers(["final"]), Visibility::PackagePrivate);
    /// ```
    pub fn from_modifiers<'a>(modifiers: impl IntoIterator<Item = &'a str>) -> Self {
        modifiers
            .into_iter()
            .find_map(|modifier| modifier.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for Visibility {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "protected" => Ok(Self::Protected),
            _ => Err("Not an access modifier"),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A named method or constructor argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    name: String,
    ty: Type,
}

impl Argument {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }
}

/// What kind of member this is, with its kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    Attribute {
        ty: Type,
    },
    Method {
        args: Vec<Argument>,
        result: Type,
        is_abstract: bool,
    },
    Constructor {
        args: Vec<Argument>,
    },
    /// An enum value.
    Constant,
}

/// A member owned by exactly one diagram object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMember {
    name: String,
    visibility: Visibility,
    is_static: bool,
    important: bool,
    stereotypes: Vec<String>,
    doc: DocComment,
    kind: MemberKind,
}

impl ClassMember {
    fn new(name: impl Into<String>, visibility: Visibility, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            visibility,
            is_static: false,
            important: false,
            stereotypes: Vec::new(),
            doc: DocComment::default(),
            kind,
        }
    }

    /// Create an attribute of the given type.
    pub fn attribute(name: impl Into<String>, visibility: Visibility, ty: Type) -> Self {
        Self::new(name, visibility, MemberKind::Attribute { ty })
    }

    /// Create a method.
    pub fn method(
        name: impl Into<String>,
        visibility: Visibility,
        args: Vec<Argument>,
        result: Type,
    ) -> Self {
        Self::new(
            name,
            visibility,
            MemberKind::Method {
                args,
                result,
                is_abstract: false,
            },
        )
    }

    /// Create a constructor.
    pub fn constructor(name: impl Into<String>, visibility: Visibility, args: Vec<Argument>) -> Self {
        Self::new(name, visibility, MemberKind::Constructor { args })
    }

    /// Create an enum constant. Constants are always public and static.
    pub fn constant(name: impl Into<String>) -> Self {
        Self::new(name, Visibility::Public, MemberKind::Constant).with_static(true)
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Mark a method as abstract. Has no effect on other member kinds.
    pub fn with_abstract(mut self, abstract_flag: bool) -> Self {
        if let MemberKind::Method { is_abstract, .. } = &mut self.kind {
            *is_abstract = abstract_flag;
        }
        self
    }

    pub fn with_doc(mut self, doc: DocComment) -> Self {
        self.doc = doc;
        self
    }

    pub fn with_stereotype(mut self, stereotype: impl Into<String>) -> Self {
        self.stereotypes.push(stereotype.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_important(&self) -> bool {
        self.important
    }

    pub fn set_important(&mut self, important: bool) {
        self.important = important;
    }

    pub fn stereotypes(&self) -> &[String] {
        &self.stereotypes
    }

    pub fn doc(&self) -> &DocComment {
        &self.doc
    }

    pub fn kind(&self) -> &MemberKind {
        &self.kind
    }

    /// The declared type of an attribute, `None` for other kinds.
    pub fn attribute_type(&self) -> Option<&Type> {
        match &self.kind {
            MemberKind::Attribute { ty } => Some(ty),
            _ => None,
        }
    }

    /// Identity used to detect duplicate members when fusing objects.
    ///
    /// Methods and constructors include their argument types so overloads
    /// stay distinct.
    pub fn signature(&self) -> String {
        match &self.kind {
            MemberKind::Attribute { .. } | MemberKind::Constant => self.name.clone(),
            MemberKind::Method { args, .. } | MemberKind::Constructor { args } => {
                let args = args
                    .iter()
                    .map(|arg| arg.ty().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}({args})", self.name)
            }
        }
    }
}
