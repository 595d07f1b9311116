//! # drover-core
//!
//! The bootstrap core for Drover - THE LOGIC.
//!
//! This crate holds the two leaf components the host sequencer composes:
//!
//! - **PhaseRegistry** (`phase`) maps symbolic phase names to ordinals and
//!   exposes the canonical bootstrap sequence. Extensions add phases through
//!   an append-only symbol table.
//! - **Inflector** (`inflect`) populates a consumer object's dependencies by
//!   testing which consumer traits it exposes and feeding each one the
//!   matching service from a locator.
//!
//! The two never call each other. The host resolves a target phase with the
//! registry, advances through the sequence, and inflects every consumer it
//! builds along the way.
//!
//! ## Architectural Constraints
//!
//! - Synchronous, no async, no network
//! - No panics; every failure is a typed error
//! - Unresolved phase names and unmatched capabilities are not errors

// =============================================================================
// MODULES
// =============================================================================

pub mod boot;
pub mod command;
pub mod inflect;
pub mod phase;
pub mod services;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{CommandError, DroverError, Phase, ServiceError, Verbosity};

// =============================================================================
// RE-EXPORTS: Components
// =============================================================================

pub use boot::{BaseBoot, Boot};
pub use command::{CommandInfo, CommandLookup, CommandTable, has_registered_command};
pub use inflect::{Capability, CapabilitySet, Inflectable, Inflector};
pub use phase::{PhaseRegistry, RESERVED_PREFIX, SymbolTable};
pub use services::{Container, ContainerBuilder, ServiceLocator};
