use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotbiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Invalid email address: {0:?}")]
    Validation(String),

    #[error("Server rejected the request: {0}")]
    Application(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl BotbiError {
    /// Timeout or transport failure.
    pub fn is_network(&self) -> bool {
        matches!(self, BotbiError::Network(_) | BotbiError::Timeout(_))
    }
}

pub type Result<T> = std::result::Result<T, BotbiError>;
