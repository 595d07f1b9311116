//! # Host Sequencer
//!
//! Composes the core components into a running host:
//!
//! 1. Build the symbol table and [`PhaseRegistry`] from configuration.
//! 2. Build the service [`Container`] and wire the boot into it.
//! 3. Resolve the target phase and advance through the canonical sequence,
//!    stopping at the last phase the boot has a step for.
//! 4. Inflect every command whose phase was reached.

mod builtin;

pub use builtin::{
    BuiltinCommand, CACHE_REBUILD_EVENT, CacheRebuildCommand, SqlDumpCommand, StatusCommand,
    builtin_commands,
};

use crate::config::HostConfig;
use drover_core::boot::BOOTSTRAP_DRUSH_STEP;
use drover_core::services::{
    HookManager, Input, Logger, Output, OutputAdapter, ProgressIndicator, SERVICE_CONFIG,
    SERVICE_HOOK_MANAGER, SERVICE_INPUT, SERVICE_LOGGER, SERVICE_OUTPUT, SERVICE_OUTPUT_ADAPTER,
    SERVICE_PROGRESS_INDICATOR, SERVICE_SITE_ALIAS_MANAGER,
};
use drover_core::{
    BaseBoot, Boot, Capability, CommandError, CommandTable, Container, ContainerBuilder,
    DroverError, Inflector, Phase, PhaseRegistry, Verbosity,
};
use serde::Serialize;
use std::sync::Arc;

// =============================================================================
// REPORTS
// =============================================================================

/// One phase the sequencer visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseStep {
    pub name: &'static str,
    pub phase: Phase,
    /// The boot step that ran.
    pub step: &'static str,
}

/// Services handed to one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WiredCommand {
    pub name: String,
    pub capabilities: Vec<Capability>,
}

/// What a bootstrap run achieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    pub target: Phase,
    pub reached: Phase,
    pub steps: Vec<PhaseStep>,
    pub commands: Vec<WiredCommand>,
}

// =============================================================================
// HOST
// =============================================================================

/// A fully configured host, ready to bootstrap.
pub struct Host {
    boot: BaseBoot,
    container: Arc<Container>,
    commands: CommandTable,
    output: Arc<Output>,
    progress: Arc<ProgressIndicator>,
    target_name: String,
}

impl Host {
    /// Build a host from configuration and the invocation's input.
    pub fn new(config: &HostConfig, verbosity: Verbosity, input: Input) -> Result<Self, DroverError> {
        let symbols = config.symbol_table()?;
        let registry = PhaseRegistry::new(Arc::new(symbols));

        let output = Arc::new(Output::new(verbosity));
        let progress = Arc::new(ProgressIndicator::new(registry.phase_sequence().len()));
        let hooks = HookManager::new()
            .with_hook(CACHE_REBUILD_EVENT, "render")
            .with_hook(CACHE_REBUILD_EVENT, "routing");

        let container = ContainerBuilder::new()
            .register(SERVICE_CONFIG, config.service_config())
            .register(SERVICE_LOGGER, Logger::new("drover"))
            .register(SERVICE_INPUT, input)
            .register_shared(SERVICE_OUTPUT, Arc::clone(&output))
            .register_shared(SERVICE_PROGRESS_INDICATOR, Arc::clone(&progress))
            .register(SERVICE_HOOK_MANAGER, hooks)
            .register(SERVICE_OUTPUT_ADAPTER, OutputAdapter::new(verbosity))
            .register(SERVICE_SITE_ALIAS_MANAGER, config.alias_manager())
            .build();

        let mut boot = BaseBoot::new(registry);
        Inflector::inflect(&mut boot, container.as_ref())?;

        let mut commands = CommandTable::new();
        for command in builtin_commands() {
            commands.register(command.info())?;
        }

        Ok(Self {
            boot,
            container,
            commands,
            output,
            progress,
            target_name: config.bootstrap.target.clone(),
        })
    }

    #[must_use]
    pub fn registry(&self) -> &PhaseRegistry {
        self.boot.registry()
    }

    #[must_use]
    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    #[must_use]
    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    #[must_use]
    pub fn output(&self) -> &Arc<Output> {
        &self.output
    }

    #[must_use]
    pub fn progress(&self) -> &Arc<ProgressIndicator> {
        &self.progress
    }

    /// The configured target phase name.
    #[must_use]
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Resolve the configured target. An unresolved target is fatal here.
    pub fn resolve_target(&self) -> Result<Phase, DroverError> {
        self.boot
            .look_up_phase_index(&self.target_name)
            .ok_or_else(|| {
                tracing::warn!("Bootstrap target '{}' does not resolve", self.target_name);
                DroverError::UnknownPhase(self.target_name.clone())
            })
    }

    /// Advance through the canonical sequence up to `target`.
    ///
    /// Every phase the boot has a step for is run in order. The first phase
    /// without a step ends the advance; `reached` is the last phase before it.
    pub fn advance(&mut self, target: Phase) -> (Phase, Vec<PhaseStep>) {
        let steps_available = self.boot.bootstrap_phases();
        let mut reached = Phase::NONE;
        let mut steps = Vec::new();
        let sequence = self.registry().phases_through(target);

        for (name, phase) in sequence {
            let Some(&step) = steps_available.get(&phase) else {
                tracing::info!(
                    "No bootstrap step for phase '{}'; stopping at {}",
                    name,
                    reached
                );
                break;
            };

            if step == BOOTSTRAP_DRUSH_STEP {
                self.boot.bootstrap_drush();
            }
            tracing::info!("Reached phase '{}' ({})", name, phase);
            steps.push(PhaseStep {
                name,
                phase,
                step,
            });
            reached = phase;
            self.progress.advance(1);
        }

        (reached, steps)
    }

    /// Resolve the target, advance, and inflect every command whose phase was
    /// reached.
    pub fn bootstrap(&mut self) -> Result<BootstrapReport, DroverError> {
        let target = self.resolve_target()?;
        let (reached, steps) = self.advance(target);

        let mut commands = Vec::new();
        for mut command in builtin_commands() {
            let info = command.info();
            if info.bootstrap > reached {
                tracing::debug!("Skipping '{}': needs phase {}", info.name, info.bootstrap);
                continue;
            }
            self.boot.inflect(command.as_mut())?;
            commands.push(WiredCommand {
                name: info.name,
                capabilities: command.capabilities().iter().collect(),
            });
        }

        Ok(BootstrapReport {
            target,
            reached,
            steps,
            commands,
        })
    }

    /// Bootstrap far enough for `name`, wire it, and run it.
    pub fn run_command(&mut self, name: &str) -> Result<(), DroverError> {
        if !self.has_command(name)? {
            return Err(CommandError::NotFound(name.to_string()).into());
        }

        let Some(mut command) = builtin_commands()
            .into_iter()
            .find(|command| command.info().name == name)
        else {
            return Err(CommandError::NotFound(name.to_string()).into());
        };

        let needed = command.info().bootstrap;
        let target = self.resolve_target()?.min(needed);
        let (reached, _) = self.advance(target);
        if reached < needed {
            tracing::warn!("Command '{}' needs phase {}, stopped at {}", name, needed, reached);
            return Err(DroverError::PhaseNotReached { needed, reached });
        }

        self.boot.inflect(command.as_mut())?;
        command.run()
    }

    /// Check whether `name` is a registered command.
    pub fn has_command(&self, name: &str) -> Result<bool, CommandError> {
        self.boot.has_registered_command(&self.commands, name)
    }
}

// =============================================================================
// TESTS
// =============================================================================
