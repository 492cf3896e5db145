// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Roofline - a real-estate listing service.
//!
//! This is the binary entry point: configuration loading, tracing setup,
//! and command dispatch.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use roofline_config::RooflineConfig;
use roofline_core::RooflineError;

mod admin;
mod serve;

/// Roofline - a real-estate listing service.
#[derive(Parser, Debug)]
#[command(name = "roofline", version, about, long_about = None)]
struct Cli {
    /// Explicit config file (defaults to the standard hierarchy).
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server.
    Serve,
    /// Insert sample listings into an empty database.
    Seed,
    /// Derive missing location, type, and category fields on existing rows.
    Backfill,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            for err in &errors {
                eprintln!("roofline: config error: {err}");
            }
            std::process::exit(1);
        }
    };

    init_tracing(&config.server.log_level);

    let result = match cli.command {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Seed => admin::run_seed(&config).await,
        Commands::Backfill => admin::run_backfill(&config).await,
    };

    if let Err(err) = result {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn load(path: Option<&Path>) -> Result<RooflineConfig, Vec<RooflineError>> {
    match path {
        Some(path) => roofline_config::load_and_validate_from_path(path),
        None => roofline_config::load_and_validate(),
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,roofline={log_level},roofline_gateway={log_level},\
             roofline_storage={log_level},roofline_auth={log_level},\
             roofline_config={log_level},tower_http={log_level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn subcommands_parse() {
        assert!(matches!(
            Cli::parse_from(["roofline", "serve"]).command,
            Commands::Serve
        ));
        assert!(matches!(
            Cli::parse_from(["roofline", "seed"]).command,
            Commands::Seed
        ));
        let cli = Cli::parse_from(["roofline", "--config", "custom.toml", "backfill"]);
        assert!(matches!(cli.command, Commands::Backfill));
        assert_eq!(cli.config.as_deref(), Some(Path::new("custom.toml")));
    }
}
