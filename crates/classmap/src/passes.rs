//! Passes run over a populated diagram, in this order:
//!
//! 1. [`resolve`] links relation endpoints to objects
//! 2. [`associate`] adds explicit and inferred associations
//! 3. [`synthesize_getters`] adds accessors for private attributes
//! 4. [`mark_important`] flags elements tagged `@important`
//!
//! [`Pipeline`](crate::Pipeline) runs them according to the configuration.

mod associate;
mod getters;
mod importance;
mod resolve;

pub use associate::associate;
pub use getters::{GENERATED_STEREOTYPE, synthesize_getters};
pub use importance::mark_important;
pub use resolve::{is_resolved, resolve};
