// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! DevSync - collaborative project management with Kanban boards and
//! realtime chat.
//!
//! This is the binary entry point.

mod seed;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// DevSync - collaborative project management server.
#[derive(Parser, Debug)]
#[command(name = "devsync", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP and WebSocket server.
    Serve,
    /// Create the demo account and project.
    Seed,
    /// Load and validate the configuration, then exit.
    CheckConfig,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => devsync_config::load_and_validate_path(path),
        None => devsync_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            devsync_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Seed) => seed::run_seed(config).await,
        Some(Commands::CheckConfig) => {
            println!(
                "devsync: configuration OK (listening on {}:{}, database {})",
                config.server.host, config.server.port, config.storage.database_path
            );
            Ok(())
        }
        None => {
            println!("devsync: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("devsync: {e}");
        std::process::exit(1);
    }
}
