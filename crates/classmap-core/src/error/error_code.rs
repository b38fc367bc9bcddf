//! Error codes for the classmap diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Resolution errors
//! - `E2xx` - Association inference errors
//! - `E3xx` - Documentation comment errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Resolution Errors (E1xx)
    // =========================================================================
    /// Unresolved object.
    ///
    /// A relation refers to a name no registered object carries. The
    /// endpoint is replaced by a stub object.
    E100,

    // =========================================================================
    // Association Errors (E2xx)
    // =========================================================================
    /// Malformed `@assoc` annotation.
    ///
    /// The annotation value does not follow the association grammar.
    E200,

    /// Unknown association target.
    ///
    /// The last token of an `@assoc` value names no registered object.
    E201,

    // =========================================================================
    // Documentation Errors (E3xx)
    // =========================================================================
    /// Malformed documentation line.
    ///
    /// A continuation line of a documentation block does not start with `*`.
    E300,

    /// Unterminated documentation block.
    ///
    /// A block opened with `/**` has no closing `*/`.
    E301,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unresolved object",
            ErrorCode::E200 => "malformed association annotation",
            ErrorCode::E201 => "unknown association target",
            ErrorCode::E300 => "malformed documentation line",
            ErrorCode::E301 => "unterminated documentation block",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
