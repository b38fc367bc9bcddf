//! Errors produced while reading documentation comments.

use std::fmt;

use classmap_core::error::Diagnostic;

/// A documentation comment that could not be read in strict mode.
///
/// Wraps every diagnostic found in the comment, so all malformed lines are
/// reported at once.
#[derive(Debug)]
pub struct DocError {
    diagnostics: Vec<Diagnostic>,
}

impl DocError {
    /// Create a new error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for DocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for DocError {}

impl From<Diagnostic> for DocError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

/// A collector for accumulating diagnostics while reading one comment.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub(crate) fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection.
    ///
    /// - If there are errors, returns `Err(DocError)` with all diagnostics.
    /// - If there are no errors, returns `Ok(())`.
    pub(crate) fn finish(self) -> Result<(), DocError> {
        if self.has_errors {
            Err(DocError::new(self.diagnostics))
        } else {
            Ok(())
        }
    }
}
