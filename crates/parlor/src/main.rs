// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parlor - customer support chat backend.
//!
//! This is the binary entry point for the Parlor server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod doctor;
mod serve;

/// Parlor - customer support chat backend.
#[derive(Parser, Debug)]
#[command(name = "parlor", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Parlor HTTP server.
    Serve,
    /// Run diagnostic checks against the environment.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match parlor_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            parlor_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) | None => serve::run_serve(config).await,
        Some(Commands::Doctor { plain }) => doctor::run_doctor(&config, plain).await,
    };

    if let Err(e) = result {
        eprintln!("parlor: {e}");
        std::process::exit(1);
    }
}
