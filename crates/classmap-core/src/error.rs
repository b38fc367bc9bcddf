//! Errors and diagnostics for the classmap model.
//!
//! Two kinds of problems exist:
//! - [`ModelError`] is returned by operations that cannot proceed, such as
//!   registering the same object name twice.
//! - [`Diagnostic`] records a recoverable data-quality problem (an
//!   unresolved reference, a malformed annotation). Passes collect them on
//!   the [`Diagram`](crate::diagram::Diagram) instead of failing.
//!
//! # Example
//!
//! ```
//! # use classmap_core::error::{Diagnostic, ErrorCode};
//!
//! let diag = Diagnostic::warning("unable to resolve object `Missing`")
//!     .with_code(ErrorCode::E100)
//!     .with_help("declare `Missing` or include the file that defines it");
//!
//! assert_eq!(diag.to_string(), "warning[E100]: unable to resolve object `Missing`");
//! ```

mod diagnostic;
mod error_code;
mod model_error;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use model_error::ModelError;
pub use severity::Severity;
