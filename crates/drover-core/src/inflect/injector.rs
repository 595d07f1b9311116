//! # Inflector
//!
//! Populates a consumer object's dependencies from a service locator, based
//! on which capabilities the object exposes.
//!
//! - Capabilities are tested in [`Capability::ALL`] order.
//! - Matches are independent: every exposed capability is applied, and a
//!   capability that is not exposed is skipped silently.
//! - For each match the service is fetched first and the setter called
//!   second. A failed fetch returns the locator's error unchanged and the
//!   setter is never called.
//! - Setters overwrite, so inflecting the same object twice is harmless.

use super::{Capability, Inflectable};
use crate::ServiceError;
use crate::services::{ServiceLocator, fetch};

/// Stateless capability dispatcher.
pub struct Inflector;

impl Inflector {
    /// Inject every service `object` asks for.
    pub fn inflect<T: Inflectable + ?Sized>(
        object: &mut T,
        services: &dyn ServiceLocator,
    ) -> Result<(), ServiceError> {
        for capability in Capability::ALL {
            if Self::apply(capability, object, services)? {
                tracing::debug!(
                    capability = %capability,
                    service = capability.service_name(),
                    "Injected service"
                );
            }
        }
        Ok(())
    }

    /// Apply a single capability. Returns `false` when the object does not
    /// expose it.
    fn apply<T: Inflectable + ?Sized>(
        capability: Capability,
        object: &mut T,
        services: &dyn ServiceLocator,
    ) -> Result<bool, ServiceError> {
        let name = capability.service_name();

        match capability {
            Capability::Config => match object.as_config_consumer() {
                Some(consumer) => consumer.set_config(fetch(services, name)?),
                None => return Ok(false),
            },
            Capability::Logger => match object.as_logger_consumer() {
                Some(consumer) => consumer.set_logger(fetch(services, name)?),
                None => return Ok(false),
            },
            Capability::Container => match object.as_container_consumer() {
                Some(consumer) => consumer.set_container(fetch(services, name)?),
                None => return Ok(false),
            },
            Capability::Input => match object.as_input_consumer() {
                Some(consumer) => consumer.set_input(fetch(services, name)?),
                None => return Ok(false),
            },
            Capability::Output => match object.as_output_consumer() {
                Some(consumer) => consumer.set_output(fetch(services, name)?),
                None => return Ok(false),
            },
            Capability::ProgressIndicator => match object.as_progress_indicator_consumer() {
                Some(consumer) => consumer.set_progress_indicator(fetch(services, name)?),
                None => return Ok(false),
            },
            Capability::HookManager => match object.as_hook_manager_consumer() {
                Some(consumer) => consumer.set_hook_manager(fetch(services, name)?),
                None => return Ok(false),
            },
            Capability::OutputAdapter => match object.as_output_adapter_consumer() {
                Some(consumer) => consumer.set_output_adapter(fetch(services, name)?),
                None => return Ok(false),
            },
            Capability::SiteAliasManager => match object.as_site_alias_manager_consumer() {
                Some(consumer) => consumer.set_site_alias_manager(fetch(services, name)?),
                None => return Ok(false),
            },
        }

        Ok(true)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inflect::{ConfigConsumer, LoggerConsumer, OutputConsumer};
    use crate::services::{
        Config, ContainerBuilder, Logger, Output, SERVICE_CONFIG, SERVICE_LOGGER, SERVICE_OUTPUT,
    };
    use crate::Verbosity;
    use std::sync::Arc;

    #[derive(Default)]
    struct Probe {
        calls: Vec<&'static str>,
        config: Option<Arc<Config>>,
        logger: Option<Arc<Logger>>,
        output: Option<Arc<Output>>,
    }

    impl ConfigConsumer for Probe {
        fn set_config(&mut self, config: Arc<Config>) {
            self.calls.push("config");
            self.config = Some(config);
        }
    }

    impl LoggerConsumer for Probe {
        fn set_logger(&mut self, logger: Arc<Logger>) {
            self.calls.push("logger");
            self.logger = Some(logger);
        }
    }

    impl OutputConsumer for Probe {
        fn set_output(&mut self, output: Arc<Output>) {
            self.calls.push("output");
            self.output = Some(output);
        }
    }

    impl Inflectable for Probe {
        fn as_config_consumer(&mut self) -> Option<&mut dyn ConfigConsumer> {
            Some(self)
        }

        fn as_logger_consumer(&mut self) -> Option<&mut dyn LoggerConsumer> {
            Some(self)
        }

        fn as_output_consumer(&mut self) -> Option<&mut dyn OutputConsumer> {
            Some(self)
        }
    }

    struct Bare;

    impl Inflectable for Bare {}

    #[test]
    fn applies_in_declared_order() {
        let services = ContainerBuilder::new()
            .register(SERVICE_OUTPUT, Output::new(Verbosity::Normal))
            .register(SERVICE_LOGGER, Logger::new("probe"))
            .register(SERVICE_CONFIG, Config::new())
            .build();

        let mut probe = Probe::default();
        Inflector::inflect(&mut probe, services.as_ref()).expect("inflect");

        assert_eq!(probe.calls, vec!["config", "logger", "output"]);
    }

    #[test]
    fn missing_service_stops_before_setter() {
        let services = ContainerBuilder::new()
            .register(SERVICE_CONFIG, Config::new())
            .build();

        let mut probe = Probe::default();
        let result = Inflector::inflect(&mut probe, services.as_ref());

        assert_eq!(
            result,
            Err(ServiceError::NotRegistered(SERVICE_LOGGER.to_string()))
        );
        assert_eq!(probe.calls, vec!["config"]);
        assert!(probe.logger.is_none());
        assert!(probe.output.is_none());
    }

    #[test]
    fn object_without_capabilities_is_untouched() {
        let services = ContainerBuilder::new().build();
        let mut bare = Bare;
        assert!(Inflector::inflect(&mut bare, services.as_ref()).is_ok());
        assert!(bare.capabilities().is_empty());
    }

    #[test]
    fn works_through_trait_objects() {
        let services = ContainerBuilder::new()
            .register(SERVICE_CONFIG, Config::new().with("k", "v"))
            .register(SERVICE_LOGGER, Logger::new("dyn"))
            .register(SERVICE_OUTPUT, Output::new(Verbosity::Quiet))
            .build();

        let mut probe = Probe::default();
        let object: &mut dyn Inflectable = &mut probe;
        Inflector::inflect(object, services.as_ref()).expect("inflect");

        assert_eq!(
            probe.config.as_ref().and_then(|c| c.get("k").map(str::to_string)),
            Some("v".to_string())
        );
    }
}
