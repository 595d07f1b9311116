//! # Phase Registry
//!
//! Maps symbolic phase names to ordinals and exposes the canonical bootstrap
//! sequence.
//!
//! ## Phase Definitions
//!
//! | Name | Ordinal | Meaning |
//! |------|---------|---------|
//! | none | 0 | Alias of `drush`: nothing beyond the base phase |
//! | drush | 0 | Base phase: the host itself |
//! | root | 1 | Site root located |
//! | site | 2 | Site selected |
//! | configuration | 3 | Site configuration loaded |
//! | database | 4 | Database connected |
//! | full | 5 | Fully bootstrapped |
//! | max | sentinel | Highest phase this process will reach |
//!
//! ## Resolution
//!
//! 1. The static name map is consulted first.
//! 2. Names carrying [`RESERVED_PREFIX`] fall back to the symbol table, which
//!    is how extensions introduce phases the static map does not know about.
//! 3. Anything else resolves to `None`. That is not an error.
//!
//! `none` and `drush` share an ordinal, so only `drush` appears in the
//! sequence. The symbolic `DRUSH_BOOTSTRAP_NONE` keeps its own value below
//! the base phase.

use super::symbols::{RESERVED_PREFIX, SymbolTable};
use crate::Phase;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Canonical bootstrap sequence, in strictly ascending ordinal order.
const PHASE_SEQUENCE: [(&str, Phase); 6] = [
    ("drush", Phase::DRUSH),
    ("root", Phase::ROOT),
    ("site", Phase::SITE),
    ("configuration", Phase::CONFIGURATION),
    ("database", Phase::DATABASE),
    ("full", Phase::FULL),
];

/// Resolves phase names and drives the canonical phase order.
///
/// Immutable after construction; `Send + Sync`.
#[derive(Debug, Clone)]
pub struct PhaseRegistry {
    phase_map: BTreeMap<&'static str, Phase>,
    symbols: Arc<SymbolTable>,
}

impl Default for PhaseRegistry {
    fn default() -> Self {
        Self::new(Arc::new(SymbolTable::canonical()))
    }
}

impl PhaseRegistry {
    /// Create a registry backed by a frozen symbol table.
    #[must_use]
    pub fn new(symbols: Arc<SymbolTable>) -> Self {
        let mut phase_map: BTreeMap<&'static str, Phase> = PHASE_SEQUENCE.into_iter().collect();
        phase_map.insert("none", Phase::DRUSH);
        phase_map.insert("max", Phase::MAX);
        Self { phase_map, symbols }
    }

    /// The static name → ordinal map.
    #[must_use]
    pub fn phase_map(&self) -> &BTreeMap<&'static str, Phase> {
        &self.phase_map
    }

    /// The symbol table used for the fallback tier.
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// The canonical bootstrap sequence, base phase included.
    #[must_use]
    pub fn phase_sequence(&self) -> &'static [(&'static str, Phase)] {
        &PHASE_SEQUENCE
    }

    /// Resolve a phase name to its ordinal.
    ///
    /// Returns `None` for unknown, empty or malformed names, and for
    /// reserved-prefix names that reference an undefined symbol.
    #[must_use]
    pub fn resolve_phase(&self, name: &str) -> Option<Phase> {
        if let Some(&phase) = self.phase_map.get(name) {
            tracing::trace!(name, ordinal = phase.ordinal(), "Resolved phase from static map");
            return Some(phase);
        }

        if !name.starts_with(RESERVED_PREFIX) {
            return None;
        }

        let phase = self.symbols.get(name);
        tracing::trace!(name, found = phase.is_some(), "Resolved phase from symbol table");
        phase
    }

    /// Reverse lookup: the canonical name of an ordinal, if it has one.
    #[must_use]
    pub fn phase_name(&self, phase: Phase) -> Option<&'static str> {
        if phase.is_max() {
            return Some("max");
        }
        PHASE_SEQUENCE
            .iter()
            .find(|&&(_, p)| p == phase)
            .map(|&(name, _)| name)
    }

    /// The prefix of the canonical sequence a host must pass through to reach
    /// `target`, in order.
    #[must_use]
    pub fn phases_through(&self, target: Phase) -> Vec<(&'static str, Phase)> {
        PHASE_SEQUENCE
            .iter()
            .copied()
            .take_while(|&(_, phase)| phase <= target)
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(extra: &[(&str, i32)]) -> PhaseRegistry {
        let mut table = SymbolTable::canonical();
        for &(name, ordinal) in extra {
            table.register(name, Phase::new(ordinal)).expect("register");
        }
        PhaseRegistry::new(Arc::new(table))
    }

    #[test]
    fn static_names_resolve() {
        let registry = PhaseRegistry::default();
        assert_eq!(registry.resolve_phase("drush"), Some(Phase::DRUSH));
        assert_eq!(registry.resolve_phase("root"), Some(Phase::ROOT));
        assert_eq!(registry.resolve_phase("full"), Some(Phase::FULL));
        assert_eq!(registry.resolve_phase("max"), Some(Phase::MAX));
    }

    #[test]
    fn none_is_an_alias_of_the_base_phase() {
        let registry = PhaseRegistry::default();
        assert_eq!(registry.resolve_phase("none"), registry.resolve_phase("drush"));
        assert_eq!(registry.resolve_phase("none"), Some(Phase::DRUSH));
        assert_eq!(
            registry.resolve_phase("DRUSH_BOOTSTRAP_NONE"),
            Some(Phase::NONE)
        );
        assert!(registry.phase_sequence().iter().all(|&(name, _)| name != "none"));
        assert_eq!(registry.phase_name(Phase::DRUSH), Some("drush"));
    }

    #[test]
    fn sequence_is_strictly_increasing() {
        let registry = PhaseRegistry::default();
        let seq = registry.phase_sequence();
        assert!(seq.iter().any(|&(name, _)| name == "drush"));
        assert!(seq.windows(2).all(|w| w[0].1 < w[1].1));
    }

    #[test]
    fn reserved_prefix_falls_back_to_symbols() {
        let registry = registry_with(&[("DRUSH_BOOTSTRAP_CUSTOM", 7)]);
        assert_eq!(
            registry.resolve_phase("DRUSH_BOOTSTRAP_CUSTOM"),
            Some(Phase::new(7))
        );
        assert_eq!(
            registry.resolve_phase("DRUSH_BOOTSTRAP_DRUPAL_LOGIN"),
            Some(Phase::LOGIN)
        );
    }

    #[test]
    fn undefined_reserved_symbol_is_none() {
        let registry = PhaseRegistry::default();
        assert_eq!(registry.resolve_phase("DRUSH_BOOTSTRAP_NOPE"), None);
        assert_eq!(registry.resolve_phase("DRUSH_BOOTSTRAP_"), None);
    }

    #[test]
    fn unprefixed_symbol_is_not_consulted() {
        let registry = registry_with(&[("CUSTOM_PHASE", 9)]);
        assert_eq!(registry.resolve_phase("CUSTOM_PHASE"), None);
    }

    #[test]
    fn empty_and_malformed_names_are_none() {
        let registry = PhaseRegistry::default();
        assert_eq!(registry.resolve_phase(""), None);
        assert_eq!(registry.resolve_phase("FULL"), None);
        assert_eq!(registry.resolve_phase(" full"), None);
        assert_eq!(registry.resolve_phase("drush_bootstrap_max"), None);
    }

    #[test]
    fn phases_through_stops_at_target() {
        let registry = PhaseRegistry::default();
        let names: Vec<&str> = registry
            .phases_through(Phase::SITE)
            .iter()
            .map(|(n, _)| *n)
            .collect();
        assert_eq!(names, vec!["drush", "root", "site"]);
        assert!(registry.phases_through(Phase::NONE).is_empty());
        assert_eq!(registry.phases_through(Phase::MAX).len(), PHASE_SEQUENCE.len());
    }

    #[test]
    fn phase_name_reverse_lookup() {
        let registry = PhaseRegistry::default();
        assert_eq!(registry.phase_name(Phase::DATABASE), Some("database"));
        assert_eq!(registry.phase_name(Phase::MAX), Some("max"));
        assert_eq!(registry.phase_name(Phase::LOGIN), None);
    }
}
