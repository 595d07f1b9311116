//! # Built-in Commands
//!
//! The commands the host ships with. Each one is an ordinary consumer
//! object: it declares the services it wants and the host inflects it before
//! running it.

use drover_core::inflect::{
    ConfigConsumer, HookManagerConsumer, InputConsumer, Inflectable, LoggerConsumer,
    OutputAdapterConsumer, OutputConsumer, ProgressIndicatorConsumer, SiteAliasManagerConsumer,
};
use drover_core::services::{
    Config, HookManager, Input, Logger, Output, OutputAdapter, ProgressIndicator, SELF_ALIAS,
    SERVICE_CONFIG, SERVICE_HOOK_MANAGER, SERVICE_INPUT, SERVICE_LOGGER, SERVICE_OUTPUT,
    SERVICE_OUTPUT_ADAPTER, SERVICE_PROGRESS_INDICATOR, SERVICE_SITE_ALIAS_MANAGER,
    SiteAliasManager,
};
use drover_core::{CommandInfo, DroverError, Phase, ServiceError, Verbosity};
use std::sync::Arc;

/// A command the host can inflect and run.
pub trait BuiltinCommand: Inflectable {
    /// Registry entry for this command.
    fn info(&self) -> CommandInfo;

    /// Run the command against its injected services.
    fn run(&mut self) -> Result<(), DroverError>;
}

/// Every built-in command, freshly constructed and not yet wired.
pub fn builtin_commands() -> Vec<Box<dyn BuiltinCommand>> {
    vec![
        Box::new(StatusCommand::default()),
        Box::new(SqlDumpCommand::default()),
        Box::new(CacheRebuildCommand::default()),
    ]
}

fn unwired<T>(slot: &Option<Arc<T>>, service: &str) -> Result<Arc<T>, DroverError> {
    slot.clone()
        .ok_or_else(|| ServiceError::Unavailable(service.to_string()).into())
}

// =============================================================================
// STATUS
// =============================================================================

/// `status`: reports the bootstrap target and the selected site.
#[derive(Default)]
pub struct StatusCommand {
    config: Option<Arc<Config>>,
    logger: Option<Arc<Logger>>,
    output: Option<Arc<Output>>,
    aliases: Option<Arc<SiteAliasManager>>,
}

impl BuiltinCommand for StatusCommand {
    fn info(&self) -> CommandInfo {
        CommandInfo::new("status", "Show bootstrap target and selected site", Phase::DRUSH)
    }

    fn run(&mut self) -> Result<(), DroverError> {
        let config = unwired(&self.config, SERVICE_CONFIG)?;
        let output = unwired(&self.output, SERVICE_OUTPUT)?;
        let aliases = unwired(&self.aliases, SERVICE_SITE_ALIAS_MANAGER)?;

        if let Some(logger) = &self.logger {
            logger.debug("Running status");
        }

        output.writeln(format!(
            "Bootstrap target: {}",
            config.get_or("bootstrap.target", "max")
        ));
        match aliases.get(SELF_ALIAS) {
            Some(alias) => {
                output.writeln(format!("Site alias:       {}", alias.name));
                if let Some(uri) = &alias.uri {
                    output.writeln(format!("Site URI:         {}", uri));
                }
                if let Some(root) = &alias.root {
                    output.writeln(format!("Site root:        {}", root.display()));
                }
            }
            None => output.writeln("Site alias:       (none)"),
        }
        Ok(())
    }
}

impl ConfigConsumer for StatusCommand {
    fn set_config(&mut self, config: Arc<Config>) {
        self.config = Some(config);
    }
}

impl LoggerConsumer for StatusCommand {
    fn set_logger(&mut self, logger: Arc<Logger>) {
        self.logger = Some(logger);
    }
}

impl OutputConsumer for StatusCommand {
    fn set_output(&mut self, output: Arc<Output>) {
        self.output = Some(output);
    }
}

impl SiteAliasManagerConsumer for StatusCommand {
    fn set_site_alias_manager(&mut self, aliases: Arc<SiteAliasManager>) {
        self.aliases = Some(aliases);
    }
}

impl Inflectable for StatusCommand {
    fn as_config_consumer(&mut self) -> Option<&mut dyn ConfigConsumer> {
        Some(self)
    }

    fn as_logger_consumer(&mut self) -> Option<&mut dyn LoggerConsumer> {
        Some(self)
    }

    fn as_output_consumer(&mut self) -> Option<&mut dyn OutputConsumer> {
        Some(self)
    }

    fn as_site_alias_manager_consumer(&mut self) -> Option<&mut dyn SiteAliasManagerConsumer> {
        Some(self)
    }
}

// =============================================================================
// SQL DUMP
// =============================================================================

/// `sql:dump`: describes the dump it would produce for the current input.
#[derive(Default)]
pub struct SqlDumpCommand {
    config: Option<Arc<Config>>,
    input: Option<Arc<Input>>,
    output: Option<Arc<Output>>,
    adapter: Option<Arc<OutputAdapter>>,
}

impl BuiltinCommand for SqlDumpCommand {
    fn info(&self) -> CommandInfo {
        CommandInfo::new("sql:dump", "Describe a database dump", Phase::DATABASE)
    }

    fn run(&mut self) -> Result<(), DroverError> {
        let config = unwired(&self.config, SERVICE_CONFIG)?;
        let input = unwired(&self.input, SERVICE_INPUT)?;
        let output = unwired(&self.output, SERVICE_OUTPUT)?;
        let adapter = unwired(&self.adapter, SERVICE_OUTPUT_ADAPTER)?;

        let file = input
            .option("result-file")
            .or_else(|| config.get("sql.result_file"))
            .unwrap_or("-");
        output.writeln(format!("Dump target: {}", file));

        if adapter.meets_threshold(Verbosity::Verbose) {
            output.writeln_at(
                Verbosity::Verbose,
                format!("Arguments:   {}", input.arguments().join(" ")),
            );
        }
        Ok(())
    }
}

impl ConfigConsumer for SqlDumpCommand {
    fn set_config(&mut self, config: Arc<Config>) {
        self.config = Some(config);
    }
}

impl InputConsumer for SqlDumpCommand {
    fn set_input(&mut self, input: Arc<Input>) {
        self.input = Some(input);
    }
}

impl OutputConsumer for SqlDumpCommand {
    fn set_output(&mut self, output: Arc<Output>) {
        self.output = Some(output);
    }
}

impl OutputAdapterConsumer for SqlDumpCommand {
    fn set_output_adapter(&mut self, adapter: Arc<OutputAdapter>) {
        self.adapter = Some(adapter);
    }
}

impl Inflectable for SqlDumpCommand {
    fn as_config_consumer(&mut self) -> Option<&mut dyn ConfigConsumer> {
        Some(self)
    }

    fn as_input_consumer(&mut self) -> Option<&mut dyn InputConsumer> {
        Some(self)
    }

    fn as_output_consumer(&mut self) -> Option<&mut dyn OutputConsumer> {
        Some(self)
    }

    fn as_output_adapter_consumer(&mut self) -> Option<&mut dyn OutputAdapterConsumer> {
        Some(self)
    }
}

// =============================================================================
// CACHE REBUILD
// =============================================================================

/// `cache:rebuild`: fires the rebuild hooks, one progress step per handler.
#[derive(Default)]
pub struct CacheRebuildCommand {
    logger: Option<Arc<Logger>>,
    progress: Option<Arc<ProgressIndicator>>,
    hooks: Option<Arc<HookManager>>,
}

/// Custom event fired by `cache:rebuild`.
pub const CACHE_REBUILD_EVENT: &str = "cache-rebuild";

impl BuiltinCommand for CacheRebuildCommand {
    fn info(&self) -> CommandInfo {
        CommandInfo::new("cache:rebuild", "Rebuild all caches", Phase::FULL)
    }

    fn run(&mut self) -> Result<(), DroverError> {
        let logger = unwired(&self.logger, SERVICE_LOGGER)?;
        let progress = unwired(&self.progress, SERVICE_PROGRESS_INDICATOR)?;
        let hooks = unwired(&self.hooks, SERVICE_HOOK_MANAGER)?;

        for handler in hooks.custom_event_handlers(CACHE_REBUILD_EVENT) {
            logger.info(&format!("Rebuilding cache via {}", handler));
            progress.advance(1);
        }
        logger.info("Cache rebuild complete");
        Ok(())
    }
}

impl LoggerConsumer for CacheRebuildCommand {
    fn set_logger(&mut self, logger: Arc<Logger>) {
        self.logger = Some(logger);
    }
}

impl ProgressIndicatorConsumer for CacheRebuildCommand {
    fn set_progress_indicator(&mut self, progress: Arc<ProgressIndicator>) {
        self.progress = Some(progress);
    }
}

impl HookManagerConsumer for CacheRebuildCommand {
    fn set_hook_manager(&mut self, hooks: Arc<HookManager>) {
        self.hooks = Some(hooks);
    }
}

impl Inflectable for CacheRebuildCommand {
    fn as_logger_consumer(&mut self) -> Option<&mut dyn LoggerConsumer> {
        Some(self)
    }

    fn as_progress_indicator_consumer(&mut self) -> Option<&mut dyn ProgressIndicatorConsumer> {
        Some(self)
    }

    fn as_hook_manager_consumer(&mut self) -> Option<&mut dyn HookManagerConsumer> {
        Some(self)
    }
}

// =============================================================================
// TESTS
// =============================================================================
