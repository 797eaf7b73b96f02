//! DDIC Command-Line Tool
//!
//! Validates, analyses and generates DDL for a persisted data dictionary.

mod commands;
mod config;
mod error;
mod formatter;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Args;

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ddic=info,ddic_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let (config, command) = args.into_config();

    tracing::debug!(
        catalog = %config.catalog_path.display(),
        format = %config.format,
        "configuration loaded"
    );

    match commands::run(&config, command) {
        Ok(outcome) => {
            println!("{}", outcome.output);
            outcome.exit_code()
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
