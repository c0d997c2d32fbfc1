// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stocktake - a Telegram inventory ledger bot.
//!
//! This is the binary entry point for the Stocktake bot.

mod doctor;
mod serve;

use clap::{Parser, Subcommand};

/// Stocktake - a Telegram inventory ledger bot.
#[derive(Parser, Debug)]
#[command(name = "stocktake", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the bot: connect to Telegram and serve conversations.
    Serve,
    /// Run diagnostic checks against the configured adapters.
    Doctor,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match stocktake_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            stocktake_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Doctor) => doctor::run_doctor(&config).await,
        None => {
            println!("stocktake: use --help for available commands");
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
