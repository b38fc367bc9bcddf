//! Errors returned by model operations that cannot proceed.

use thiserror::Error;

/// Structural conflicts that abort the current build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("duplicate object `{0}`")]
    DuplicateObject(String),

    #[error("object `{object}` cannot hold {member_kind} `{member}`")]
    MemberNotAllowed {
        object: String,
        member: String,
        member_kind: &'static str,
    },

    #[error("object `{name}` is defined as {existing} and as {incoming}")]
    KindConflict {
        name: String,
        existing: &'static str,
        incoming: &'static str,
    },
}
