pub mod feed;

pub use feed::FeedStore;
