use crate::app::Result;
use crate::domain::{Article, FeedSnapshot, MarketData};

/// Last successfully fetched feed plus the loading flag.
///
/// Each fetch cycle commits both lists together or not at all. Cycles are
/// numbered when they start; a result older than the last committed cycle
/// is discarded.
#[derive(Debug, Default)]
pub struct FeedStore {
    articles: Vec<Article>,
    markets: MarketData,
    in_flight: usize,
    last_started: u64,
    committed: Option<u64>,
}

impl FeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn markets(&self) -> &MarketData {
        &self.markets
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Whether any cycle has succeeded yet.
    pub fn has_data(&self) -> bool {
        self.committed.is_some()
    }

    /// Marks a cycle in flight and returns its number.
    pub fn begin_refresh(&mut self) -> u64 {
        self.in_flight += 1;
        self.last_started += 1;
        self.last_started
    }

    /// Commits a successful cycle, or keeps the previous lists and hands the
    /// error back for the caller to report. Results of cycles older than the
    /// committed one are dropped silently, errors included.
    pub fn finish_refresh(&mut self, cycle: u64, result: Result<FeedSnapshot>) -> Result<()> {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.committed.is_some_and(|committed| cycle < committed) {
            tracing::debug!("Dropping result of superseded fetch cycle {}", cycle);
            return Ok(());
        }

        let snapshot = result?;
        self.articles = snapshot.articles;
        self.markets = snapshot.markets;
        self.committed = Some(cycle);
        Ok(())
    }
}
