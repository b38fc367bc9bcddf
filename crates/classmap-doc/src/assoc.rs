//! The `@assoc` annotation grammar.
//!
//! An annotation value is a whitespace-separated token sequence whose last
//! token names the target object:
//!
//! ```text
//! @assoc 1 roleA relName *-> 0..* roleB $flat Target
//! ```
//!
//! The single token containing `-` is the arrow. Tokens before it describe
//! the A end, tokens after it the B end. The characters around the dash
//! select the arrow heads (`>`/`<` directed, `o` aggregation, `*`
//! composition). Multiplicities match `*`, `N`, `N..M` or `N..*`. Tokens
//! starting with `$` switch on a visual option. The remaining tokens are
//! labels: role A then relation name on the A side, role B on the B side.

use log::trace;
use thiserror::Error;
use winnow::{
    Parser as _,
    ascii::digit1,
    combinator::{alt, opt, preceded},
    error::ModalResult,
};

use classmap_core::relation::{ArrowHead, Association};

type Input<'a> = &'a str;

/// A parsed `@assoc` annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssocSpec {
    target: String,
    association: Association,
}

impl AssocSpec {
    /// Name of the object at the B end.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn association(&self) -> &Association {
        &self.association
    }

    /// Split into target name and association payload.
    pub fn into_parts(self) -> (String, Association) {
        (self.target, self.association)
    }
}

/// Why an `@assoc` value could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssocError {
    #[error("empty association annotation")]
    Empty,

    #[error("missing arrow token, expected a token containing `-`")]
    MissingArrow,

    #[error("more than one arrow token: `{first}` and `{second}`")]
    MultipleArrows { first: String, second: String },

    #[error("missing target object after `{0}`")]
    MissingTarget(String),

    #[error("unexpected token `{token}` on the {side} side")]
    UnexpectedToken { token: String, side: Side },
}

/// End of the association a token describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// One bound of a multiplicity: `*` or a number.
fn bound<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    alt(("*", digit1)).parse_next(input)
}

/// `bound` optionally followed by `..bound`.
fn multiplicity<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    (bound, opt(preceded("..", bound)))
        .take()
        .parse_next(input)
}

/// Returns `true` if the whole token is a multiplicity such as `0..*`.
pub fn is_multiplicity(token: &str) -> bool {
    multiplicity.parse(token).is_ok()
}

fn is_option(token: &str) -> bool {
    token.starts_with('$')
}

fn is_arrow(token: &str) -> bool {
    !is_option(token) && token.contains('-')
}

/// Arrow heads encoded around the dashes of an arrow token.
fn arrow_heads(token: &str) -> (ArrowHead, ArrowHead) {
    let left = token.split('-').next().and_then(|s| s.chars().next_back());
    let right = token.rsplit('-').next().and_then(|s| s.chars().next());
    (
        left.map_or(ArrowHead::None, ArrowHead::from_char),
        right.map_or(ArrowHead::None, ArrowHead::from_char),
    )
}

/// Read an `@assoc` annotation value.
///
/// # Errors
///
/// Returns an [`AssocError`] when the value is empty, has no arrow token
/// or more than one, has no target after the arrow, or carries more
/// labels than the grammar allows (two on the A side, one on the B side).
///
/// # Examples
///
/// ```
/// use classmap_core::relation::ArrowHead;
/// use classmap_doc::parse_assoc;
///
/// let spec = parse_assoc("1 owner o-> 0..* items Item").unwrap();
/// assert_eq!(spec.target(), "Item");
///
/// let association = spec.association();
/// assert_eq!(association.role_a, "owner");
/// assert_eq!(association.multiplicity_b, "0..*");
/// assert_eq!(association.head_a, ArrowHead::Aggregation);
/// assert_eq!(association.head_b, ArrowHead::Directed);
/// ```
pub fn parse_assoc(value: &str) -> Result<AssocSpec, AssocError> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let Some((&target, body)) = tokens.split_last() else {
        return Err(AssocError::Empty);
    };
    if is_arrow(target) {
        return Err(AssocError::MissingTarget(target.to_string()));
    }

    let mut association = Association::default();
    let mut arrow: Option<&str> = None;
    let mut labels_a = 0usize;
    let mut labels_b = 0usize;

    for &token in body {
        let side = if arrow.is_some() { Side::B } else { Side::A };
        let unexpected = || AssocError::UnexpectedToken {
            token: token.to_string(),
            side,
        };

        if is_arrow(token) {
            if let Some(first) = arrow {
                return Err(AssocError::MultipleArrows {
                    first: first.to_string(),
                    second: token.to_string(),
                });
            }
            let (head_a, head_b) = arrow_heads(token);
            association.head_a = head_a;
            association.head_b = head_b;
            arrow = Some(token);
        } else if is_multiplicity(token) {
            let slot = match side {
                Side::A => &mut association.multiplicity_a,
                Side::B => &mut association.multiplicity_b,
            };
            if !slot.is_empty() {
                return Err(unexpected());
            }
            *slot = token.to_string();
        } else if let Some(key) = token.strip_prefix('$') {
            if key.is_empty() {
                return Err(unexpected());
            }
            association.options.insert(key.to_string(), true);
        } else {
            match (side, labels_a, labels_b) {
                (Side::A, 0, _) => association.role_a = token.to_string(),
                (Side::A, 1, _) => association.name = token.to_string(),
                (Side::B, _, 0) => association.role_b = token.to_string(),
                _ => return Err(unexpected()),
            }
            match side {
                Side::A => labels_a += 1,
                Side::B => labels_b += 1,
            }
        }
    }

    if arrow.is_none() {
        return Err(AssocError::MissingArrow);
    }

    trace!(object = target, association:?; "Parsed association annotation");
    Ok(AssocSpec {
        target: target.to_string(),
        association,
    })
}
