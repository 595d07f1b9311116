//! # Drover CLI Module
//!
//! This module implements the CLI interface for Drover.
//!
//! ## Available Commands
//!
//! - `phases` - List the canonical bootstrap phases and extension symbols
//! - `resolve` - Resolve a phase name to its ordinal
//! - `capabilities` - List the capability descriptors the injector checks
//! - `bootstrap` - Advance to the target phase and wire the built-in commands
//! - `run` - Bootstrap far enough for a built-in command and run it
//! - `has-command` - Check whether a command is registered

mod commands;

use clap::{Parser, Subcommand};
use drover_core::DroverError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Drover - CLI host with phased bootstrap
///
/// Resolves bootstrap phases and wires commands with the services they ask
/// for.
#[derive(Parser, Debug)]
#[command(name = "drover")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner and normal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the configuration file
    #[arg(short = 'c', long, global = true, default_value = crate::config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Bootstrap target phase (overrides DROVER_PHASE and the config file)
    #[arg(short = 'p', long, global = true)]
    pub phase: Option<String>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List bootstrap phases
    Phases,

    /// Resolve a phase name to its ordinal
    Resolve {
        /// Phase name, e.g. "site" or "DRUSH_BOOTSTRAP_DRUPAL_LOGIN"
        name: String,
    },

    /// List capability descriptors
    Capabilities,

    /// Bootstrap to the target phase and wire built-in commands
    Bootstrap,

    /// Run a built-in command
    Run {
        /// Command name
        name: String,

        /// Positional arguments passed to the command
        args: Vec<String>,

        /// Dump destination (sql:dump)
        #[arg(long)]
        result_file: Option<String>,
    },

    /// Check whether a command is registered
    HasCommand {
        /// Command name
        name: String,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), DroverError> {
    let ctx = Context::from_cli(&cli)?;

    match cli.command {
        Some(Commands::Phases) | None => cmd_phases(&ctx),
        Some(Commands::Resolve { name }) => cmd_resolve(&ctx, &name),
        Some(Commands::Capabilities) => cmd_capabilities(&ctx),
        Some(Commands::Bootstrap) => cmd_bootstrap(&ctx),
        Some(Commands::Run {
            name,
            args,
            result_file,
        }) => cmd_run(&ctx, &name, args, result_file),
        Some(Commands::HasCommand { name }) => cmd_has_command(&ctx, &name),
    }
}
