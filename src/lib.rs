//! # Botbi
//!
//! A terminal client for the Botbi AI news service.
//!
//! ## Architecture
//!
//! ```text
//! NewsApi (HTTP) → NewsClient → Runtime → TuiApp → layout
//!                                  ↑          │
//!                                  └─Command──┘
//! ```
//!
//! The UI loop owns all state. Network calls run as tokio tasks and post
//! their results back as messages; timers are deadlines checked on every
//! tick.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! botbi
//!
//! # Print today's home feed
//! botbi news
//!
//! # Ask the server for fresh news
//! botbi sync
//! ```

/// Application context and error handling.
pub mod app;

/// REST client for the four Botbi endpoints.
///
/// - [`NewsApi`](api::NewsApi): async trait over the endpoints
/// - [`HttpNewsApi`](api::HttpNewsApi): reqwest-based implementation
/// - [`NewsClient`](api::NewsClient): feed join, paced resync and subscription
pub mod api;

/// Command-line interface using clap.
///
/// - `tui [--route PATH]` - Launch the TUI (default)
/// - `news [--all]` - Print the home feed
/// - `markets` - Print quotes
/// - `sync` - Trigger a server-side resync
/// - `subscribe <email>` - Send the newsletter
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/botbi/config.toml`: API endpoint and timeout,
/// colors (named or hex) and keybindings.
pub mod config;

/// Toast, timer and resync/subscription state machines.
pub mod controller;

/// Articles, market quotes and the home-page partitioning.
pub mod domain;

/// In-memory state of the last fetched feed.
pub mod store;

/// Terminal user interface.
///
/// Home view with the news feed on the left and market tables on the
/// right, a detail view per article, a navigation menu and a newsletter
/// modal.
pub mod tui;
