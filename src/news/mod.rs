pub mod aggregator;
pub mod catalog;
pub mod categorizer;
pub mod client;
pub mod fallback;
pub mod insights;
pub mod parser;
pub mod types;
pub mod util;

pub use aggregator::NewsAggregator;
pub use catalog::FeedCatalog;
pub use categorizer::categorize;
pub use client::{FeedFetcher, HttpFeedFetcher};
pub use types::{NewsArticle, NewsCategory, NewsDigest, NewsInsights};
