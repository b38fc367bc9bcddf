//! # Classmap Doc
//!
//! Reader for the documentation attached to classes and members. Source
//! parsers hand the raw comment text over and get a
//! [`DocComment`](classmap_core::doc::DocComment) back:
//!
//! - [`parse_doc_block`] reads Java-style `/** ... */` blocks, strictly or
//!   leniently depending on [`DocPolicy`]
//! - [`parse_description`] reads bare descriptions such as GraphQL `"""`
//!   strings
//! - [`parse_assoc`] reads the value of an `@assoc` tag
//!
//! ## Usage
//!
//! ```
//! # use classmap_doc::{parse_doc_block, DocPolicy, DocError};
//!
//! fn main() -> Result<(), DocError> {
//!     let raw = r#"
//!         /**
//!          * An order placed by a customer.
//!          * @assoc 1 placedBy - 0..* Customer
//!          */
//!     "#;
//!
//!     let doc = parse_doc_block(raw, DocPolicy::Strict)?.expect("documentation block");
//!     assert_eq!(doc.text(), "An order placed by a customer.");
//!     Ok(())
//! }
//! ```

mod assoc;
mod comment;
mod error;

pub use assoc::{AssocError, AssocSpec, Side, is_multiplicity, parse_assoc};
pub use comment::{DocPolicy, parse_description, parse_doc_block};
pub use error::DocError;
