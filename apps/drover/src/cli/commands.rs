//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::Cli;
use crate::config::{HostConfig, PHASE_ENV};
use crate::host::Host;
use drover_core::services::Input;
use drover_core::{Capability, DroverError, PhaseRegistry, Verbosity};
use serde::Serialize;
use std::sync::Arc;

// =============================================================================
// CONTEXT
// =============================================================================

/// Everything a command needs from the invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: HostConfig,
    pub verbosity: Verbosity,
    pub json_mode: bool,
}

impl Context {
    /// Load configuration and apply the target overrides, reading
    /// `DROVER_PHASE` from the process environment.
    pub fn from_cli(cli: &Cli) -> Result<Self, DroverError> {
        Self::from_cli_with_env(cli, std::env::var(PHASE_ENV).ok())
    }

    /// Same as [`Context::from_cli`], with the `DROVER_PHASE` value given.
    pub fn from_cli_with_env(cli: &Cli, env_phase: Option<String>) -> Result<Self, DroverError> {
        let config =
            HostConfig::load(&cli.config)?.with_target_overrides(env_phase, cli.phase.clone());

        Ok(Self {
            config,
            verbosity: Verbosity::from_flags(cli.quiet, cli.verbose),
            json_mode: cli.json_mode,
        })
    }

    fn registry(&self) -> Result<PhaseRegistry, DroverError> {
        Ok(PhaseRegistry::new(Arc::new(self.config.symbol_table()?)))
    }

    fn host(&self, input: Input) -> Result<Host, DroverError> {
        Host::new(&self.config, self.verbosity, input)
    }
}

/// Render `value` as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, DroverError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| DroverError::Config(format!("Cannot encode JSON output: {}", e)))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), DroverError> {
    println!("{}", to_json(value)?);
    Ok(())
}

fn flush_output(host: &Host) {
    for line in host.output().drain() {
        println!("{}", line);
    }
}

// =============================================================================
// PHASES COMMAND
// =============================================================================

/// List canonical phases and extension symbols.
pub fn cmd_phases(ctx: &Context) -> Result<(), DroverError> {
    let registry = ctx.registry()?;
    let extensions = registry.symbols().extensions();

    if ctx.json_mode {
        let output = serde_json::json!({
            "target": ctx.config.bootstrap.target,
            "sequence": registry
                .phase_sequence()
                .iter()
                .map(|(name, phase)| serde_json::json!({ "name": name, "ordinal": phase.ordinal() }))
                .collect::<Vec<_>>(),
            "extensions": extensions
                .iter()
                .map(|(name, phase)| serde_json::json!({ "name": name, "ordinal": phase.ordinal() }))
                .collect::<Vec<_>>(),
        });
        return print_json(&output);
    }

    println!("Bootstrap Phases");
    println!("================");
    for (name, phase) in registry.phase_sequence() {
        println!("  {:>4}  {}", phase, name);
    }
    println!("  {:>4}  max", "");

    if !extensions.is_empty() {
        println!();
        println!("Extension Symbols:");
        for (name, phase) in extensions {
            println!("  {:>4}  {}", phase, name);
        }
    }

    println!();
    println!("Target: {}", ctx.config.bootstrap.target);
    Ok(())
}

// =============================================================================
// RESOLVE COMMAND
// =============================================================================

/// Resolve a phase name. An unresolved name is reported, not failed.
pub fn cmd_resolve(ctx: &Context, name: &str) -> Result<(), DroverError> {
    let registry = ctx.registry()?;
    let resolved = registry.resolve_phase(name);

    if ctx.json_mode {
        let output = serde_json::json!({
            "name": name,
            "found": resolved.is_some(),
            "ordinal": resolved.map(|p| p.ordinal()),
            "canonical_name": resolved.and_then(|p| registry.phase_name(p)),
        });
        return print_json(&output);
    }

    match resolved {
        Some(phase) => match registry.phase_name(phase) {
            Some(canonical) if canonical != name => {
                println!("{} = {} ({})", name, phase, canonical)
            }
            _ => println!("{} = {}", name, phase),
        },
        None => println!("{}: not found", name),
    }
    Ok(())
}

// =============================================================================
// CAPABILITIES COMMAND
// =============================================================================

/// List capability descriptors in injection order.
pub fn cmd_capabilities(ctx: &Context) -> Result<(), DroverError> {
    if ctx.json_mode {
        let output: Vec<_> = Capability::ALL
            .iter()
            .map(|c| {
                serde_json::json!({
                    "capability": c,
                    "consumer": c.consumer_trait(),
                    "service": c.service_name(),
                    "setter": c.setter(),
                })
            })
            .collect();
        return print_json(&output);
    }

    println!("Capabilities (injection order)");
    println!("==============================");
    for capability in Capability::ALL {
        println!(
            "  {:<28} {:<22} -> {}",
            capability.consumer_trait(),
            capability.service_name(),
            capability.setter()
        );
    }
    Ok(())
}

// =============================================================================
// BOOTSTRAP COMMAND
// =============================================================================

/// Advance to the target phase and report what got wired.
pub fn cmd_bootstrap(ctx: &Context) -> Result<(), DroverError> {
    let mut host = ctx.host(Input::default())?;
    let report = host.bootstrap()?;

    if ctx.json_mode {
        return print_json(&report);
    }

    println!("Drover Bootstrap");
    println!("================");
    println!(
        "Target:  {} ({})",
        host.target_name(),
        report.target
    );
    println!(
        "Reached: {}",
        host.registry().phase_name(report.reached).unwrap_or("none")
    );
    println!();
    println!("Phases:");
    for step in &report.steps {
        println!("  {:<14} {}", step.name, step.step);
    }

    println!();
    println!("Wired Commands:");
    if report.commands.is_empty() {
        println!("  (none)");
    }
    for command in &report.commands {
        let capabilities: Vec<String> = command
            .capabilities
            .iter()
            .map(|c| c.to_string())
            .collect();
        println!("  {:<14} {}", command.name, capabilities.join(", "));
    }

    flush_output(&host);
    Ok(())
}

// =============================================================================
// RUN COMMAND
// =============================================================================

/// Run a built-in command.
pub fn cmd_run(
    ctx: &Context,
    name: &str,
    args: Vec<String>,
    result_file: Option<String>,
) -> Result<(), DroverError> {
    let mut input = Input::new(args);
    if let Some(file) = result_file {
        input = input.with_option("result-file", file);
    }

    let mut host = ctx.host(input)?;
    tracing::info!("Running '{}'", name);
    host.run_command(name)?;

    let lines = host.output().drain();
    if ctx.json_mode {
        print_json(&serde_json::json!({ "command": name, "output": lines }))?;
    } else {
        for line in lines {
            println!("{}", line);
        }
    }
    Ok(())
}

// =============================================================================
// HAS-COMMAND COMMAND
// =============================================================================

/// Check whether a command is registered. A malformed name is an error.
pub fn cmd_has_command(ctx: &Context, name: &str) -> Result<(), DroverError> {
    let host = ctx.host(Input::default())?;
    let exists = host.has_command(name)?;

    if ctx.json_mode {
        print_json(&serde_json::json!({ "name": name, "registered": exists }))?;
    } else if exists {
        println!("{}: registered", name);
    } else {
        println!("{}: not registered", name);
    }
    Ok(())
}
