//! bilateral - fair attendee selection for two-person project teams
//!
//! Generates synthetic project pools and picks one attendee per team,
//! favoring people who sit on many teams.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

use commands::Cli;
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error::print_error(&e);
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    // Run the command
    if let Err(e) = cli.run(config) {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(config: &Config) {
    // Prefer RUST_LOG, fall back to BILATERAL_LOG_LEVEL
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.log_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
