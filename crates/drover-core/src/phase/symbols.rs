//! # Bootstrap Symbol Table
//!
//! A process-wide, append-only table of named phase constants.
//!
//! Extension modules register additional `(name, ordinal)` pairs at startup.
//! Once registration is over the table is frozen by wrapping it in an `Arc`
//! and handing it to [`PhaseRegistry`](super::PhaseRegistry); from then on it
//! is read-only and safe to share across threads.

use crate::{DroverError, Phase};
use std::collections::BTreeMap;

/// Prefix that marks a phase name as a symbolic constant reference.
pub const RESERVED_PREFIX: &str = "DRUSH_BOOTSTRAP_";

/// Canonical constants every table starts with.
const CANONICAL_SYMBOLS: [(&str, Phase); 9] = [
    ("DRUSH_BOOTSTRAP_NONE", Phase::NONE),
    ("DRUSH_BOOTSTRAP_DRUSH", Phase::DRUSH),
    ("DRUSH_BOOTSTRAP_DRUPAL_ROOT", Phase::ROOT),
    ("DRUSH_BOOTSTRAP_DRUPAL_SITE", Phase::SITE),
    ("DRUSH_BOOTSTRAP_DRUPAL_CONFIGURATION", Phase::CONFIGURATION),
    ("DRUSH_BOOTSTRAP_DRUPAL_DATABASE", Phase::DATABASE),
    ("DRUSH_BOOTSTRAP_DRUPAL_FULL", Phase::FULL),
    ("DRUSH_BOOTSTRAP_DRUPAL_LOGIN", Phase::LOGIN),
    ("DRUSH_BOOTSTRAP_MAX", Phase::MAX),
];

/// Append-only table of named integer constants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: BTreeMap<String, Phase>,
}

impl SymbolTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding the canonical `DRUSH_BOOTSTRAP_*` constants.
    #[must_use]
    pub fn canonical() -> Self {
        let symbols = CANONICAL_SYMBOLS
            .iter()
            .map(|&(name, phase)| (name.to_string(), phase))
            .collect();
        Self { symbols }
    }

    /// Define a new constant.
    ///
    /// Names must be non-empty and free of whitespace. A name can be defined
    /// once; redefining it, even with the same value, is rejected.
    pub fn register(&mut self, name: impl Into<String>, phase: Phase) -> Result<(), DroverError> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(DroverError::InvalidSymbol(name));
        }
        if let Some(&existing) = self.symbols.get(&name) {
            return Err(DroverError::DuplicateSymbol { name, existing });
        }

        tracing::debug!(symbol = %name, ordinal = phase.ordinal(), "Registered bootstrap symbol");
        self.symbols.insert(name, phase);
        Ok(())
    }

    /// Look up a constant by its exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Phase> {
        self.symbols.get(name).copied()
    }

    /// Check whether a constant is defined.
    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Iterate over all constants in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Phase)> {
        self.symbols.iter().map(|(name, &phase)| (name.as_str(), phase))
    }

    /// Constants that are not part of the canonical set, ordered by ordinal.
    #[must_use]
    pub fn extensions(&self) -> Vec<(&str, Phase)> {
        let mut extra: Vec<(&str, Phase)> = self
            .iter()
            .filter(|(name, _)| !CANONICAL_SYMBOLS.iter().any(|(c, _)| c == name))
            .collect();
        extra.sort_by_key(|&(name, phase)| (phase, name));
        extra
    }

    /// Number of defined constants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_table_has_every_constant() {
        let table = SymbolTable::canonical();
        assert_eq!(table.len(), CANONICAL_SYMBOLS.len());
        assert_eq!(table.get("DRUSH_BOOTSTRAP_DRUPAL_FULL"), Some(Phase::FULL));
        assert_eq!(table.get("DRUSH_BOOTSTRAP_MAX"), Some(Phase::MAX));
        assert!(table.extensions().is_empty());
    }

    #[test]
    fn register_rejects_redefinition() {
        let mut table = SymbolTable::canonical();
        let result = table.register("DRUSH_BOOTSTRAP_DRUPAL_FULL", Phase::new(42));
        assert!(matches!(
            result,
            Err(DroverError::DuplicateSymbol { existing, .. }) if existing == Phase::FULL
        ));
        assert_eq!(table.get("DRUSH_BOOTSTRAP_DRUPAL_FULL"), Some(Phase::FULL));
    }

    #[test]
    fn register_rejects_blank_names() {
        let mut table = SymbolTable::new();
        assert!(matches!(
            table.register("", Phase::new(1)),
            Err(DroverError::InvalidSymbol(_))
        ));
        assert!(matches!(
            table.register("DRUSH_BOOTSTRAP_ BAD", Phase::new(1)),
            Err(DroverError::InvalidSymbol(_))
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn extensions_are_ordered_by_ordinal() {
        let mut table = SymbolTable::canonical();
        table
            .register("DRUSH_BOOTSTRAP_LATE", Phase::new(20))
            .expect("register");
        table
            .register("DRUSH_BOOTSTRAP_EARLY", Phase::new(10))
            .expect("register");

        let names: Vec<&str> = table.extensions().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["DRUSH_BOOTSTRAP_EARLY", "DRUSH_BOOTSTRAP_LATE"]);
    }
}
