pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "botbi")]
#[command(about = "Terminal client for the Botbi AI news service", long_about = None)]
pub struct Cli {
    /// Base URL of the Botbi API (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Timeout for loading news and markets, in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Write logs to this file
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default)
    Tui {
        /// Initial route, e.g. "/" or "/article"
        #[arg(long, default_value = "/")]
        route: String,
    },
    /// Print the home feed
    News {
        /// Print every article instead of the home selection
        #[arg(long)]
        all: bool,
    },
    /// Print stock and crypto quotes
    Markets,
    /// Ask the server to fetch and summarise fresh news
    Sync,
    /// Send today's newsletter to an email address
    Subscribe {
        email: String,
    },
}
