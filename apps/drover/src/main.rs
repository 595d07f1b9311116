//! # Drover - CLI Host
//!
//! The main binary for the Drover bootstrap core.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  apps/drover (THE BINARY)                │
//! │                                                          │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐  │
//! │  │    CLI      │    │   Config    │    │    Host     │  │
//! │  │   (clap)    │    │   (toml)    │    │ (sequencer) │  │
//! │  └──────┬──────┘    └──────┬──────┘    └──────┬──────┘  │
//! │         └──────────────────┼──────────────────┘         │
//! │                            ▼                            │
//! │                    ┌───────────────┐                    │
//! │                    │  drover-core  │                    │
//! │                    │  (THE LOGIC)  │                    │
//! │                    └───────────────┘                    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! drover phases
//! drover resolve DRUSH_BOOTSTRAP_DRUPAL_LOGIN
//! drover --phase site bootstrap
//! drover run status
//! drover has-command cache:rebuild
//! ```

use clap::Parser;
use drover::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // DROVER_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("DROVER_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if cli.verbose {
        "drover=debug,drover_core=debug"
    } else {
        "drover=info,drover_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Drover startup banner.
fn print_banner() {
    println!("drover v{} - phased bootstrap host", env!("CARGO_PKG_VERSION"));
    println!();
}
