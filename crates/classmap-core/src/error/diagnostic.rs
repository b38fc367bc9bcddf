//! The diagnostic type shared by every classmap phase.

use std::fmt;

use crate::error::{ErrorCode, Severity};

/// A recoverable problem found while building or refining a diagram.
///
/// Diagnostics carry:
/// - A severity level
/// - An optional error code for documentation and searchability
/// - A primary message describing the issue
/// - The name of the object the problem was found on, if any
/// - Optional help text with suggestions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    object: Option<String>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use classmap_core::error::{Diagnostic, ErrorCode};
    ///
    /// let diag = Diagnostic::warning("unknown association target `Ghost`")
    ///     .with_code(ErrorCode::E201)
    ///     .with_object("Order");
    /// assert_eq!(diag.object(), Some("Order"));
    /// ```
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Name of the object the problem was found on, if any.
    pub fn object(&self) -> Option<&str> {
        self.object.as_deref()
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach the name of the object the problem was found on.
    pub fn with_object(mut self, object: impl Into<String>) -> Self {
        self.object = Some(object.into());
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            object: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[E100]: message" or "warning: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Error, "test error");

        assert!(diag.severity().is_error());
        assert!(!diag.severity().is_warning());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.object().is_none());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::warning("unable to resolve object `Foo`").with_code(ErrorCode::E100);

        assert_eq!(
            diag.to_string(),
            "warning[E100]: unable to resolve object `Foo`"
        );
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::error("broken");

        assert_eq!(diag.to_string(), "error: broken");
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::warning("malformed `@assoc` value")
            .with_code(ErrorCode::E200)
            .with_object("Order")
            .with_help("write exactly one arrow token such as `1 - * Target`");

        assert!(diag.severity().is_warning());
        assert_eq!(diag.code(), Some(ErrorCode::E200));
        assert_eq!(diag.object(), Some("Order"));
        assert_eq!(
            diag.help(),
            Some("write exactly one arrow token such as `1 - * Target`")
        );
    }
}
