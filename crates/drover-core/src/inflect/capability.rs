//! # Capability Descriptors
//!
//! The fixed, ordered list of capabilities the injector knows about. Each
//! descriptor pairs a consumer trait with the service key it is fed from.
//!
//! | Capability | Consumer trait | Service key |
//! |------------|----------------|-------------|
//! | Config | `ConfigConsumer` | `config` |
//! | Logger | `LoggerConsumer` | `logger` |
//! | Container | `ContainerConsumer` | `container` |
//! | Input | `InputConsumer` | `input` |
//! | Output | `OutputConsumer` | `output` |
//! | ProgressIndicator | `ProgressIndicatorConsumer` | `progressIndicator` |
//! | HookManager | `HookManagerConsumer` | `hookManager` |
//! | OutputAdapter | `OutputAdapterConsumer` | `outputAdapter` |
//! | SiteAliasManager | `SiteAliasManagerConsumer` | `site.alias.manager` |

use crate::services::{
    SERVICE_CONFIG, SERVICE_CONTAINER, SERVICE_HOOK_MANAGER, SERVICE_INPUT, SERVICE_LOGGER,
    SERVICE_OUTPUT, SERVICE_OUTPUT_ADAPTER, SERVICE_PROGRESS_INDICATOR,
    SERVICE_SITE_ALIAS_MANAGER,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A checkable ability of a consumer object to accept one service.
///
/// Declaration order is injection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Capability {
    Config,
    Logger,
    Container,
    Input,
    Output,
    ProgressIndicator,
    HookManager,
    OutputAdapter,
    SiteAliasManager,
}

impl Capability {
    /// Every capability, in injection order.
    pub const ALL: [Capability; 9] = [
        Capability::Config,
        Capability::Logger,
        Capability::Container,
        Capability::Input,
        Capability::Output,
        Capability::ProgressIndicator,
        Capability::HookManager,
        Capability::OutputAdapter,
        Capability::SiteAliasManager,
    ];

    /// Key of the service this capability is fed from.
    #[must_use]
    pub fn service_name(&self) -> &'static str {
        match self {
            Capability::Config => SERVICE_CONFIG,
            Capability::Logger => SERVICE_LOGGER,
            Capability::Container => SERVICE_CONTAINER,
            Capability::Input => SERVICE_INPUT,
            Capability::Output => SERVICE_OUTPUT,
            Capability::ProgressIndicator => SERVICE_PROGRESS_INDICATOR,
            Capability::HookManager => SERVICE_HOOK_MANAGER,
            Capability::OutputAdapter => SERVICE_OUTPUT_ADAPTER,
            Capability::SiteAliasManager => SERVICE_SITE_ALIAS_MANAGER,
        }
    }

    /// Name of the consumer trait an object implements to expose this
    /// capability.
    #[must_use]
    pub fn consumer_trait(&self) -> &'static str {
        match self {
            Capability::Config => "ConfigConsumer",
            Capability::Logger => "LoggerConsumer",
            Capability::Container => "ContainerConsumer",
            Capability::Input => "InputConsumer",
            Capability::Output => "OutputConsumer",
            Capability::ProgressIndicator => "ProgressIndicatorConsumer",
            Capability::HookManager => "HookManagerConsumer",
            Capability::OutputAdapter => "OutputAdapterConsumer",
            Capability::SiteAliasManager => "SiteAliasManagerConsumer",
        }
    }

    /// Name of the setter invoked on the consumer.
    #[must_use]
    pub fn setter(&self) -> &'static str {
        match self {
            Capability::Config => "set_config",
            Capability::Logger => "set_logger",
            Capability::Container => "set_container",
            Capability::Input => "set_input",
            Capability::Output => "set_output",
            Capability::ProgressIndicator => "set_progress_indicator",
            Capability::HookManager => "set_hook_manager",
            Capability::OutputAdapter => "set_output_adapter",
            Capability::SiteAliasManager => "set_site_alias_manager",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The set of capabilities an object exposes. Iterates in injection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, capability: Capability) {
        self.0.insert(capability);
    }

    #[must_use]
    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_order_matches_all() {
        let mut sorted = Capability::ALL;
        sorted.sort();
        assert_eq!(sorted, Capability::ALL);
    }

    #[test]
    fn service_names_are_unique() {
        let names: BTreeSet<&str> = Capability::ALL.iter().map(|c| c.service_name()).collect();
        assert_eq!(names.len(), Capability::ALL.len());
        assert_eq!(Capability::SiteAliasManager.service_name(), "site.alias.manager");
    }

    #[test]
    fn set_iterates_in_injection_order() {
        let set: CapabilitySet = [Capability::Output, Capability::Config, Capability::Logger]
            .into_iter()
            .collect();
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Capability::Config, Capability::Logger, Capability::Output]
        );
    }
}
