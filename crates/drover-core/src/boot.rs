//! # Boot
//!
//! The contract a bootstrap implementation offers the host sequencer, and the
//! base implementation every concrete boot starts from.
//!
//! Most of the [`Boot`] surface is inert in the base implementation: URI
//! discovery answers `"default"`, root validation answers `false`, and the
//! error-report and terminate hooks do nothing. Hosts that still call them
//! get a well-defined no-op.

use crate::command::{CommandLookup, has_registered_command};
use crate::inflect::{ContainerConsumer, Inflectable, Inflector, LoggerConsumer};
use crate::phase::PhaseRegistry;
use crate::services::{Container, Logger, SERVICE_CONTAINER};
use crate::{CommandError, Phase, ServiceError};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Name of the step that brings the host to the base phase.
pub const BOOTSTRAP_DRUSH_STEP: &str = "bootstrap_drush";

// =============================================================================
// BOOT TRAIT
// =============================================================================

/// A bootstrap implementation.
pub trait Boot {
    /// Pick the site URI to use for `root`. The base implementation always
    /// answers `"default"`.
    fn find_uri(&self, _root: &Path, _uri: Option<&str>) -> String {
        "default".to_string()
    }

    /// Record the URI selected for this process.
    fn set_uri(&mut self, uri: String);

    /// Check whether `path` is a site root this boot can handle.
    fn valid_root(&self, _path: &Path) -> bool {
        false
    }

    /// Version of the site found at `root`, if known.
    fn version(&self, _root: &Path) -> Option<String> {
        None
    }

    /// Option defaults this boot applies to every command.
    fn command_defaults(&self) -> Option<BTreeMap<String, String>> {
        None
    }

    /// Legacy error-report hook. Inert.
    fn report_command_error(&self, _command: &str) {}

    /// Phase → step name, for every phase this boot knows how to reach.
    fn bootstrap_phases(&self) -> BTreeMap<Phase, &'static str> {
        BTreeMap::from([(Phase::DRUSH, BOOTSTRAP_DRUSH_STEP)])
    }

    /// Resolve a phase name to its ordinal.
    fn look_up_phase_index(&self, phase: &str) -> Option<Phase>;

    /// Step for the base phase. The base implementation has nothing to do.
    fn bootstrap_drush(&mut self) {}

    /// Shutdown hook. Called when the boot is dropped.
    fn terminate(&mut self) {}
}

// =============================================================================
// BASE BOOT
// =============================================================================

/// The base bootstrap implementation.
///
/// A `BaseBoot` is itself a logger and container consumer, so the host wires
/// it the same way it wires commands.
#[derive(Debug)]
pub struct BaseBoot {
    registry: PhaseRegistry,
    uri: Option<String>,
    logger: Option<Arc<Logger>>,
    container: Option<Arc<Container>>,
}

impl BaseBoot {
    /// Create a boot over a phase registry.
    #[must_use]
    pub fn new(registry: PhaseRegistry) -> Self {
        Self {
            registry,
            uri: None,
            logger: None,
            container: None,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &PhaseRegistry {
        &self.registry
    }

    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    #[must_use]
    pub fn logger(&self) -> Option<&Arc<Logger>> {
        self.logger.as_ref()
    }

    #[must_use]
    pub fn container(&self) -> Option<&Arc<Container>> {
        self.container.as_ref()
    }

    /// Inject services from this boot's container into `object`.
    ///
    /// Fails with `Unavailable("container")` if the boot has not been given
    /// a container yet.
    pub fn inflect<T: Inflectable + ?Sized>(&self, object: &mut T) -> Result<(), ServiceError> {
        let container = self
            .container
            .as_ref()
            .ok_or_else(|| ServiceError::Unavailable(SERVICE_CONTAINER.to_string()))?;
        Inflector::inflect(object, container.as_ref())
    }

    /// Check whether a command is registered, treating "not found" as `false`.
    pub fn has_registered_command(
        &self,
        commands: &dyn CommandLookup,
        name: &str,
    ) -> Result<bool, CommandError> {
        has_registered_command(commands, name)
    }
}

impl Boot for BaseBoot {
    fn set_uri(&mut self, uri: String) {
        self.uri = Some(uri);
    }

    fn look_up_phase_index(&self, phase: &str) -> Option<Phase> {
        self.registry.resolve_phase(phase)
    }

    fn terminate(&mut self) {
        tracing::trace!("Boot terminated");
    }
}

impl Drop for BaseBoot {
    fn drop(&mut self) {
        self.terminate();
    }
}

impl LoggerConsumer for BaseBoot {
    fn set_logger(&mut self, logger: Arc<Logger>) {
        self.logger = Some(logger);
    }
}

impl ContainerConsumer for BaseBoot {
    fn set_container(&mut self, container: Arc<Container>) {
        self.container = Some(container);
    }
}

impl Inflectable for BaseBoot {
    fn as_logger_consumer(&mut self) -> Option<&mut dyn LoggerConsumer> {
        Some(self)
    }

    fn as_container_consumer(&mut self) -> Option<&mut dyn ContainerConsumer> {
        Some(self)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandInfo, CommandTable};
    use crate::inflect::Capability;
    use crate::services::{ContainerBuilder, SERVICE_LOGGER};

    #[test]
    fn legacy_surface_is_inert() {
        let mut boot = BaseBoot::new(PhaseRegistry::default());
        assert_eq!(boot.find_uri(Path::new("/srv"), Some("example.org")), "default");
        assert!(!boot.valid_root(Path::new("/srv")));
        assert!(boot.version(Path::new("/srv")).is_none());
        assert!(boot.command_defaults().is_none());
        boot.report_command_error("status");
        boot.bootstrap_drush();

        boot.set_uri("dev".to_string());
        assert_eq!(boot.uri(), Some("dev"));
    }

    #[test]
    fn base_phases_contain_only_drush() {
        let boot = BaseBoot::new(PhaseRegistry::default());
        let phases = boot.bootstrap_phases();
        assert_eq!(phases.len(), 1);
        assert_eq!(phases.get(&Phase::DRUSH), Some(&BOOTSTRAP_DRUSH_STEP));
    }

    #[test]
    fn look_up_delegates_to_registry() {
        let boot = BaseBoot::new(PhaseRegistry::default());
        assert_eq!(boot.look_up_phase_index("site"), Some(Phase::SITE));
        assert_eq!(boot.look_up_phase_index("nowhere"), None);
    }

    #[test]
    fn boot_wires_itself_then_others() {
        let container = ContainerBuilder::new()
            .register(SERVICE_LOGGER, Logger::new("boot"))
            .build();

        let mut boot = BaseBoot::new(PhaseRegistry::default());
        assert_eq!(
            boot.capabilities().iter().collect::<Vec<_>>(),
            vec![Capability::Logger, Capability::Container]
        );

        Inflector::inflect(&mut boot, container.as_ref()).expect("self inflect");
        assert!(boot.container().is_some_and(|c| Arc::ptr_eq(c, &container)));
        assert_eq!(boot.logger().map(|l| l.channel()), Some("boot"));

        let mut other = BaseBoot::new(PhaseRegistry::default());
        boot.inflect(&mut other).expect("inflect other");
        assert!(other.logger().is_some());
    }

    #[test]
    fn inflect_without_container_is_unavailable() {
        let boot = BaseBoot::new(PhaseRegistry::default());
        let mut other = BaseBoot::new(PhaseRegistry::default());
        assert_eq!(
            boot.inflect(&mut other),
            Err(ServiceError::Unavailable(SERVICE_CONTAINER.to_string()))
        );
    }

    #[test]
    fn command_probe_delegates() {
        let mut table = CommandTable::new();
        table
            .register(CommandInfo::new("status", "Show status", Phase::DRUSH))
            .expect("register");

        let boot = BaseBoot::new(PhaseRegistry::default());
        assert_eq!(boot.has_registered_command(&table, "status"), Ok(true));
        assert_eq!(boot.has_registered_command(&table, "missing"), Ok(false));
        assert!(boot.has_registered_command(&table, "").is_err());
    }
}
