pub mod client;
pub mod http_client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::app::Result;
use crate::domain::{Article, MarketData};

pub use client::{validate_email, NewsClient, RESYNC_PACING};
pub use http_client::{HttpNewsApi, DEFAULT_BASE_URL, DEFAULT_READ_TIMEOUT};

/// Body of `POST /sincronizar-noticias`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub status: String,
    #[serde(rename = "nuevas_noticias", default)]
    pub new_articles: u32,
}

/// Body of `POST /enviar-newsletter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterResponse {
    pub status: String,
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub new_article_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionOutcome {
    /// Server confirmed the newsletter was sent.
    Sent,
    /// Server answered but reported a failure.
    Rejected(String),
}

/// The four REST calls of the Botbi news API.
#[async_trait]
pub trait NewsApi: Send + Sync {
    async fn fetch_articles(&self) -> Result<Vec<Article>>;

    async fn fetch_markets(&self) -> Result<MarketData>;

    async fn sync_news(&self) -> Result<SyncResponse>;

    async fn send_newsletter(&self, email: &str) -> Result<NewsletterResponse>;
}
