//! Classmap Core Types and Definitions
//!
//! This crate provides the object model that classmap builds from parsed
//! source trees. It includes:
//!
//! - **Types**: Declared type representation ([`types::Type`])
//! - **Documentation**: Doc comments and their tags ([`doc`] module)
//! - **Members**: Attributes, methods, constructors and constants ([`member`] module)
//! - **Objects**: Classes, enums, interfaces and placeholders ([`object`] module)
//! - **Relations**: Inheritance, implementation and association edges ([`relation`] module)
//! - **Diagram**: Object tables and relation list ([`diagram::Diagram`])
//! - **Errors**: Model errors and diagnostics ([`error`] module)

pub mod diagram;
pub mod doc;
pub mod error;
pub mod member;
pub mod object;
pub mod relation;
pub mod types;
