pub mod article;
pub mod feed;
pub mod market;
pub mod section;

pub use article::{Article, Category};
pub use feed::FeedSnapshot;
pub use market::{MarketData, MarketKind, MarketQuote};
pub use section::{CategoryGroup, HomeSections, Section, SECONDARY_LIMIT};
