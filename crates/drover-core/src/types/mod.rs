//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the Drover bootstrap core:
//! - Phase ordinals (`Phase`)
//! - Output verbosity levels (`Verbosity`)
//! - Error types (`DroverError`, `ServiceError`, `CommandError`)
//!
//! ## Ordering Guarantees
//!
//! `Phase` and `Verbosity` implement `Ord`, so they can key `BTreeMap`s and
//! be compared directly. A later phase always has a larger ordinal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// PHASE
// =============================================================================

/// An ordinal marking a stage of bootstrap progress.
///
/// Ordinals increase with bootstrap depth: the preconditions of a later phase
/// are a superset of those of an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phase(pub i32);

impl Phase {
    /// Value of `DRUSH_BOOTSTRAP_NONE`: below every reachable phase. The
    /// static name `none` resolves to [`Phase::DRUSH`] instead.
    pub const NONE: Phase = Phase(-1);
    /// The base phase: the host itself is initialized.
    pub const DRUSH: Phase = Phase(0);
    /// A site root has been located.
    pub const ROOT: Phase = Phase(1);
    /// A site within the root has been selected.
    pub const SITE: Phase = Phase(2);
    /// Site configuration has been loaded.
    pub const CONFIGURATION: Phase = Phase(3);
    /// The site database is connected.
    pub const DATABASE: Phase = Phase(4);
    /// The site is fully bootstrapped.
    pub const FULL: Phase = Phase(5);
    /// A user session has been established. Only reachable by symbol.
    pub const LOGIN: Phase = Phase(6);
    /// Sentinel: the highest phase the current process will ever reach.
    pub const MAX: Phase = Phase(i32::MAX);

    /// Create a phase from a raw ordinal.
    #[must_use]
    pub const fn new(ordinal: i32) -> Self {
        Self(ordinal)
    }

    /// Get the raw ordinal.
    #[must_use]
    pub const fn ordinal(self) -> i32 {
        self.0
    }

    /// Check whether this is the `max` sentinel.
    #[must_use]
    pub const fn is_max(self) -> bool {
        self.0 == i32::MAX
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_max() {
            f.pad("max")
        } else {
            f.pad(&self.0.to_string())
        }
    }
}

// =============================================================================
// VERBOSITY
// =============================================================================

/// Output verbosity, from silent to everything.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    VeryVerbose,
    Debug,
}

impl Verbosity {
    /// Map CLI flags onto a verbosity level. `quiet` wins over `verbose`.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Failures reported by a service locator.
///
/// The injector never translates these; whatever the locator returns is what
/// the caller of `inflect` sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// No service is registered under the requested name.
    #[error("Service not registered: {0}")]
    NotRegistered(String),

    /// A service exists under the name but has a different type.
    #[error("Service '{name}' is not a {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    /// The service was registered but can no longer be produced.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Failures reported by a command registry lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The command name is well formed but nothing is registered under it.
    #[error("Command \"{0}\" is not defined")]
    NotFound(String),

    /// The command name itself is malformed.
    #[error("Invalid command name \"{name}\": {reason}")]
    InvalidName { name: String, reason: String },
}

/// Errors that can occur in the Drover core.
///
/// - No silent failures beyond the ones documented as "not an error"
/// - Use `Result<T, DroverError>` for fallible operations
/// - The core never panics
#[derive(Debug, Error)]
pub enum DroverError {
    /// A symbol name was empty or otherwise unusable.
    #[error("Invalid symbol name: {0:?}")]
    InvalidSymbol(String),

    /// A symbol was defined twice. The symbol table is append-only.
    #[error("Symbol already defined: {name} = {existing}")]
    DuplicateSymbol { name: String, existing: Phase },

    /// The host asked for a phase that does not resolve. Raised by hosts
    /// that treat an unresolved target as fatal; the registry itself never
    /// returns it.
    #[error("Unknown bootstrap phase: {0:?}")]
    UnknownPhase(String),

    /// Bootstrap stopped below the phase a command needs.
    #[error("Bootstrap reached phase {reached} but {needed} is needed")]
    PhaseNotReached { needed: Phase, reached: Phase },

    /// A service lookup failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A command lookup failed.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Configuration could not be parsed or applied.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_phases_are_ordered() {
        let ordered = [
            Phase::NONE,
            Phase::DRUSH,
            Phase::ROOT,
            Phase::SITE,
            Phase::CONFIGURATION,
            Phase::DATABASE,
            Phase::FULL,
            Phase::LOGIN,
            Phase::MAX,
        ];
        assert!(ordered.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn phase_display() {
        assert_eq!(Phase::FULL.to_string(), "5");
        assert_eq!(Phase::NONE.to_string(), "-1");
        assert_eq!(Phase::MAX.to_string(), "max");
    }

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
    }

    #[test]
    fn service_error_wraps_into_drover_error() {
        let err: DroverError = ServiceError::NotRegistered("logger".into()).into();
        assert_eq!(err.to_string(), "Service not registered: logger");
    }
}
