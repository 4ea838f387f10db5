// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collectdesk - callback scheduling and due reminders for collection agents.
//!
//! This is the binary entry point. Each subcommand opens the SQLite store,
//! loads the reminder book for the requested scope, and prints the result.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod app;
mod commands;
mod render;
mod watch;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Collectdesk - callback scheduling and due reminders for collection agents.
#[derive(Parser, Debug)]
#[command(name = "collectdesk", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default search path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit JSON instead of formatted text.
    #[arg(long, global = true)]
    json: bool,

    /// Disable colors.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Schedule a new callback.
    Schedule {
        /// Agent who owns the callback.
        #[arg(long)]
        agent: String,
        /// Display name of the agent.
        #[arg(long)]
        agent_name: Option<String>,
        /// Debtor account the callback concerns.
        #[arg(long)]
        debtor: Option<String>,
        /// Number to call.
        #[arg(long)]
        phone: String,
        /// Due date and time, e.g. `2025-03-10T14:30`.
        #[arg(long)]
        at: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List reminders and their rollup counts.
    List {
        /// Only this agent's callbacks.
        #[arg(long)]
        agent: Option<String>,
    },
    /// Mark a callback completed.
    Complete { id: String },
    /// Delete a callback.
    Delete { id: String },
    /// Show open callbacks grouped by how soon they are due.
    Due {
        #[arg(long)]
        agent: Option<String>,
    },
    /// Count an agent's pending and missed callbacks.
    Badge {
        #[arg(long)]
        agent: String,
    },
    /// Keep the due board on screen, refreshing every tick, until Ctrl+C.
    Watch {
        #[arg(long)]
        agent: Option<String>,
    },
    /// Mark long-overdue pending callbacks as missed.
    Sweep,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => collectdesk_config::load_and_validate_path(path),
        None => collectdesk_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            collectdesk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    let output = render::Output::detect(cli.json, cli.plain);
    if let Err(e) = commands::run(cli.command, &config, output).await {
        output.error(&e);
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("collectdesk={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
