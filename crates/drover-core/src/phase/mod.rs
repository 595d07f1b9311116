//! # Phase Module
//!
//! Bootstrap phase names, ordinals and the append-only symbol table that
//! extensions use to introduce phases of their own.

mod registry;
mod symbols;

pub use registry::*;
pub use symbols::*;
