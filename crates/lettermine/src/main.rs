// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lettermine - newsletter intelligence for Substack email.
//!
//! This is the binary entry point for the Lettermine pipeline.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod doctor;
mod fetch;
mod stats;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Lettermine - newsletter intelligence for Substack email.
#[derive(Parser, Debug)]
#[command(name = "lettermine", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch and persist newsletter emails from the mailbox.
    Fetch {
        /// How many days back to search.
        #[arg(long, default_value_t = 1)]
        days: i64,
        /// Run company extraction on the fetched batch.
        #[arg(long)]
        extract: bool,
    },
    /// Show mailbox ingestion statistics.
    Stats,
    /// Run diagnostic checks against the environment.
    Doctor {
        /// Run additional intensive checks.
        #[arg(long)]
        deep: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match lettermine_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            lettermine_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.app.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Some(Commands::Fetch { days, extract }) => fetch::run(&config, days, extract).await,
        Some(Commands::Stats) => stats::run(&config).await,
        Some(Commands::Doctor { deep, plain }) => doctor::run_doctor(&config, deep, plain).await,
        None => {
            println!("lettermine: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("lettermine: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config =
            lettermine_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.gmail.sender_domain, "substack.com");
    }
}
