//! # Inflect Module
//!
//! Capability-based service injection.
//!
//! Consumer objects are often built by code the host does not control, so
//! their dependencies cannot be passed to a constructor. Instead each object
//! declares which consumer traits it implements, and the [`Inflector`] hands
//! it the matching services after construction.

mod capability;
mod consumer;
mod injector;

pub use capability::*;
pub use consumer::*;
pub use injector::*;
