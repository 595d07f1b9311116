//! # Consumer Traits
//!
//! One trait per capability, each with a single setter. A consumer type
//! implements the traits for the services it wants, then declares them in
//! its [`Inflectable`] impl by returning `Some(self)` from the matching
//! accessor.
//!
//! ```
//! use drover_core::inflect::{Inflectable, LoggerConsumer};
//! use drover_core::services::Logger;
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct StatusCommand {
//!     logger: Option<Arc<Logger>>,
//! }
//!
//! impl LoggerConsumer for StatusCommand {
//!     fn set_logger(&mut self, logger: Arc<Logger>) {
//!         self.logger = Some(logger);
//!     }
//! }
//!
//! impl Inflectable for StatusCommand {
//!     fn as_logger_consumer(&mut self) -> Option<&mut dyn LoggerConsumer> {
//!         Some(self)
//!     }
//! }
//!
//! let mut command = StatusCommand::default();
//! assert!(command.as_logger_consumer().is_some());
//! assert!(command.logger.is_none());
//! ```

use super::{Capability, CapabilitySet};
use crate::services::{
    Config, Container, HookManager, Input, Logger, Output, OutputAdapter, ProgressIndicator,
    SiteAliasManager,
};
use std::sync::Arc;

pub trait ConfigConsumer {
    fn set_config(&mut self, config: Arc<Config>);
}

pub trait LoggerConsumer {
    fn set_logger(&mut self, logger: Arc<Logger>);
}

pub trait ContainerConsumer {
    fn set_container(&mut self, container: Arc<Container>);
}

pub trait InputConsumer {
    fn set_input(&mut self, input: Arc<Input>);
}

pub trait OutputConsumer {
    fn set_output(&mut self, output: Arc<Output>);
}

pub trait ProgressIndicatorConsumer {
    fn set_progress_indicator(&mut self, progress: Arc<ProgressIndicator>);
}

/// Consumers that dispatch custom events through the hook manager.
pub trait HookManagerConsumer {
    fn set_hook_manager(&mut self, hooks: Arc<HookManager>);
}

/// Consumers that gate their own output on a verbosity threshold.
pub trait OutputAdapterConsumer {
    fn set_output_adapter(&mut self, adapter: Arc<OutputAdapter>);
}

pub trait SiteAliasManagerConsumer {
    fn set_site_alias_manager(&mut self, aliases: Arc<SiteAliasManager>);
}

/// The interface-set an object exposes to the injector.
///
/// Every accessor defaults to `None`; an object opts into a capability by
/// overriding the accessor to return itself.
pub trait Inflectable {
    fn as_config_consumer(&mut self) -> Option<&mut dyn ConfigConsumer> {
        None
    }

    fn as_logger_consumer(&mut self) -> Option<&mut dyn LoggerConsumer> {
        None
    }

    fn as_container_consumer(&mut self) -> Option<&mut dyn ContainerConsumer> {
        None
    }

    fn as_input_consumer(&mut self) -> Option<&mut dyn InputConsumer> {
        None
    }

    fn as_output_consumer(&mut self) -> Option<&mut dyn OutputConsumer> {
        None
    }

    fn as_progress_indicator_consumer(&mut self) -> Option<&mut dyn ProgressIndicatorConsumer> {
        None
    }

    fn as_hook_manager_consumer(&mut self) -> Option<&mut dyn HookManagerConsumer> {
        None
    }

    fn as_output_adapter_consumer(&mut self) -> Option<&mut dyn OutputAdapterConsumer> {
        None
    }

    fn as_site_alias_manager_consumer(&mut self) -> Option<&mut dyn SiteAliasManagerConsumer> {
        None
    }

    /// Check whether this object exposes `capability`.
    fn exposes(&mut self, capability: Capability) -> bool {
        match capability {
            Capability::Config => self.as_config_consumer().is_some(),
            Capability::Logger => self.as_logger_consumer().is_some(),
            Capability::Container => self.as_container_consumer().is_some(),
            Capability::Input => self.as_input_consumer().is_some(),
            Capability::Output => self.as_output_consumer().is_some(),
            Capability::ProgressIndicator => self.as_progress_indicator_consumer().is_some(),
            Capability::HookManager => self.as_hook_manager_consumer().is_some(),
            Capability::OutputAdapter => self.as_output_adapter_consumer().is_some(),
            Capability::SiteAliasManager => self.as_site_alias_manager_consumer().is_some(),
        }
    }

    /// Every capability this object exposes.
    fn capabilities(&mut self) -> CapabilitySet {
        Capability::ALL
            .into_iter()
            .filter(|&capability| self.exposes(capability))
            .collect()
    }
}
