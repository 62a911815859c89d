use std::sync::Arc;

use crate::api::{HttpNewsApi, NewsApi, NewsClient};
use crate::app::error::Result;
use crate::config::ApiConfig;

/// Shared services handed to the TUI and CLI commands.
pub struct AppContext {
    pub client: NewsClient,
}

impl AppContext {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let api = HttpNewsApi::new(&config.base_url, config.read_timeout())?;
        tracing::debug!("Using API at {}", api.base_url());
        Ok(Self::with_api(Arc::new(api)))
    }

    pub fn with_api(api: Arc<dyn NewsApi>) -> Self {
        Self {
            client: NewsClient::new(api),
        }
    }
}
