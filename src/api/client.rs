use std::sync::Arc;
use std::time::Duration;

use crate::api::{NewsApi, SubscriptionOutcome, SyncReport};
use crate::app::{BotbiError, Result};
use crate::domain::FeedSnapshot;

/// Fixed wait before the resync request is sent. Pacing, not backoff.
pub const RESYNC_PACING: Duration = Duration::from_millis(2000);

const SYNC_OK: &str = "ok";
const NEWSLETTER_SENT: &str = "enviado";

/// Accepts any non-empty address containing `@`.
pub fn validate_email(email: &str) -> Result<&str> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(BotbiError::Validation(email.to_string()));
    }
    Ok(email)
}

/// The three operations the UI and CLI drive against the API.
#[derive(Clone)]
pub struct NewsClient {
    api: Arc<dyn NewsApi>,
    resync_pacing: Duration,
}

impl NewsClient {
    pub fn new(api: Arc<dyn NewsApi>) -> Self {
        Self {
            api,
            resync_pacing: RESYNC_PACING,
        }
    }

    /// Articles and markets fetched concurrently. Both must succeed; the
    /// first failure wins and nothing is returned.
    pub async fn fetch_feed(&self) -> Result<FeedSnapshot> {
        let (articles, markets) =
            futures::future::try_join(self.api.fetch_articles(), self.api.fetch_markets()).await?;

        tracing::info!(
            "Fetched {} articles, {} equities, {} crypto",
            articles.len(),
            markets.equities.len(),
            markets.crypto.len()
        );
        Ok(FeedSnapshot::new(articles, markets))
    }

    pub async fn trigger_resync(&self) -> Result<SyncReport> {
        tokio::time::sleep(self.resync_pacing).await;

        let response = self.api.sync_news().await?;
        if response.status != SYNC_OK {
            tracing::warn!("Sync rejected with status {:?}", response.status);
            return Err(BotbiError::Application(format!(
                "sync returned status {:?}",
                response.status
            )));
        }

        tracing::info!("Sync complete: {} new articles", response.new_articles);
        Ok(SyncReport {
            new_article_count: response.new_articles,
        })
    }

    pub async fn submit_subscription(&self, email: &str) -> Result<SubscriptionOutcome> {
        let email = validate_email(email)?;

        let response = self.api.send_newsletter(email).await?;
        if response.status == NEWSLETTER_SENT {
            tracing::info!("Newsletter sent");
            Ok(SubscriptionOutcome::Sent)
        } else {
            let message = response.message.unwrap_or_default();
            tracing::warn!("Newsletter rejected: {}", message);
            Ok(SubscriptionOutcome::Rejected(message))
        }
    }
}
