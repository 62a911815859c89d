use serde::{Deserialize, Serialize};

use crate::domain::{Article, MarketData};

/// Articles and quotes from one fetch cycle, committed as a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedSnapshot {
    pub articles: Vec<Article>,
    pub markets: MarketData,
}

impl FeedSnapshot {
    pub fn new(articles: Vec<Article>, markets: MarketData) -> Self {
        Self { articles, markets }
    }
}
