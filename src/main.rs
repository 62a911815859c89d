use std::fs::File;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use botbi::app::AppContext;
use botbi::cli::{commands, Cli, Commands};
use botbi::config::Config;
use botbi::tui::router::RoutePath;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui {
        route: "/".to_string(),
    });

    // The TUI owns the terminal, so it only logs when given a file.
    let is_tui = matches!(command, Commands::Tui { .. });
    match &cli.log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
                .with(EnvFilter::from_default_env())
                .init();
        }
        None if !is_tui => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
        None => {}
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: {}", e);
        eprintln!("Using default configuration");
        Config::default()
    });
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.api.read_timeout_ms = timeout_ms;
    }

    let ctx = AppContext::new(&config.api)?;

    match command {
        Commands::Tui { route } => {
            let route: RoutePath = route.parse()?;
            botbi::tui::run(Arc::new(ctx), Arc::new(config), route).await?;
        }
        Commands::News { all } => {
            commands::show_news(&ctx, all).await?;
        }
        Commands::Markets => {
            commands::show_markets(&ctx).await?;
        }
        Commands::Sync => {
            commands::sync(&ctx).await?;
        }
        Commands::Subscribe { email } => {
            commands::subscribe(&ctx, &email).await?;
        }
    }

    Ok(())
}
