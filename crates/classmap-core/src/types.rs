//! Declared type representation.
//!
//! [`Type`] is a small closed hierarchy covering what source parsers can
//! tell us about the type of an attribute, argument or method result:
//! primitives, nominal references, `void`, single-item collections and raw
//! source text that was not structurally parsed.

use std::{collections::HashMap, fmt};

use indexmap::IndexSet;

/// Characters that separate nominal names inside raw source text.
const SOURCE_TEXT_DELIMITERS: &[char] = &['<', '>', '(', ')', '[', ']', '{', '}', ',', '|', '.'];

/// A declared type.
///
/// Collection-like variants (`List`, `Set`, `Optional`) own exactly one
/// inner type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A language primitive such as `int` or `boolean`.
    Primitive(String),
    /// A nominal reference to another type, possibly not yet known.
    Named(String),
    /// The absence of a value (method results only).
    Void,
    /// An ordered collection of the inner type.
    List(Box<Type>),
    /// An unordered collection of the inner type.
    Set(Box<Type>),
    /// An optional value of the inner type.
    Optional(Box<Type>),
    /// Opaque source text.
    SourceText(String),
}

impl Type {
    /// Create a primitive type.
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive(name.into())
    }

    /// Create a nominal type reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Wrap `item` in a list.
    pub fn list(item: Type) -> Self {
        Self::List(Box::new(item))
    }

    /// Wrap `item` in a set.
    pub fn set(item: Type) -> Self {
        Self::Set(Box::new(item))
    }

    /// Wrap `item` in an optional.
    pub fn optional(item: Type) -> Self {
        Self::Optional(Box::new(item))
    }

    /// Create an opaque source-text type.
    pub fn source_text(raw: impl Into<String>) -> Self {
        Self::SourceText(raw.into())
    }

    /// Returns the inner type of a collection-like variant.
    pub fn item(&self) -> Option<&Type> {
        match self {
            Self::List(item) | Self::Set(item) | Self::Optional(item) => Some(item),
            Self::Primitive(_) | Self::Named(_) | Self::Void | Self::SourceText(_) => None,
        }
    }

    /// Returns `true` for the primitive `boolean` type.
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Primitive(name) if name == "boolean")
    }

    /// Collect the nominal type names textually contained in this type.
    ///
    /// Names are returned in first-occurrence order. For
    /// [`Type::SourceText`] the raw text is split on angle brackets,
    /// parentheses, square brackets, braces, commas, pipes, dots and
    /// whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use classmap_core::types::Type;
    ///
    /// let ty = Type::list(Type::named("Order"));
    /// assert!(ty.collect_names().contains("Order"));
    ///
    /// let raw = Type::source_text("Map<String, List<Order>>");
    /// let names: Vec<_> = raw.collect_names().into_iter().collect();
    /// assert_eq!(names, ["Map", "String", "List", "Order"]);
    /// ```
    pub fn collect_names(&self) -> IndexSet<String> {
        let mut names = IndexSet::new();
        self.collect_names_into(&mut names);
        names
    }

    fn collect_names_into(&self, names: &mut IndexSet<String>) {
        match self {
            Self::Named(name) => {
                names.insert(name.clone());
            }
            Self::List(item) | Self::Set(item) | Self::Optional(item) => {
                item.collect_names_into(names);
            }
            Self::SourceText(raw) => {
                names.extend(
                    raw.split(|c: char| SOURCE_TEXT_DELIMITERS.contains(&c) || c.is_whitespace())
                        .filter(|token| !token.is_empty())
                        .map(str::to_string),
                );
            }
            Self::Primitive(_) | Self::Void => {}
        }
    }

    /// Rename nominal references found in `mapping`, in place.
    ///
    /// Every other part of the type is left untouched.
    pub fn substitute(&mut self, mapping: &HashMap<String, String>) {
        match self {
            Self::Named(name) => {
                if let Some(renamed) = mapping.get(name.as_str()) {
                    *name = renamed.clone();
                }
            }
            Self::List(item) | Self::Set(item) | Self::Optional(item) => item.substitute(mapping),
            Self::Primitive(_) | Self::Void | Self::SourceText(_) => {}
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(name) | Self::Named(name) => write!(f, "{name}"),
            Self::Void => write!(f, "void"),
            Self::List(item) => write!(f, "List<{item}>"),
            Self::Set(item) => write!(f, "Set<{item}>"),
            Self::Optional(item) => write!(f, "Optional<{item}>"),
            Self::SourceText(raw) => write!(f, "{raw}"),
        }
    }
}
