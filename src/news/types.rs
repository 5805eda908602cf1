//! Type definitions for the news module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::time::Duration;

/// Longest summary kept for an externally sourced article, in characters.
pub const SUMMARY_MAX_CHARS: usize = 200;
/// Entries older than this are ignored.
pub const RECENCY_WINDOW_DAYS: i64 = 14;
pub const MAX_ENTRIES_PER_FEED: usize = 5;
pub const MAX_FEEDS: usize = 3;
pub const MAX_ARTICLES: usize = 8;

/// Per-attempt HTTP timeout used by the feed client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsCategory {
    Technology,
    Business,
    Politics,
    Fashion,
    Sports,
    Culture,
    #[default]
    General,
}

impl NewsCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::Technology => "Technology",
            NewsCategory::Business => "Business",
            NewsCategory::Politics => "Politics",
            NewsCategory::Fashion => "Fashion",
            NewsCategory::Sports => "Sports",
            NewsCategory::Culture => "Culture",
            NewsCategory::General => "General",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An article as it appears in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub published: DateTime<Utc>,
    pub source: String,
    #[serde(default)]
    pub category: NewsCategory,
}

/// A configured feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    /// Names a feed after its host, for feeds supplied only as URLs.
    pub fn from_url(url: &str) -> Self {
        let name = url::Url::parse(url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(|h| h.trim_start_matches("www.").to_string()))
            .unwrap_or_else(|| url.to_string());
        Self {
            name,
            url: url.to_string(),
        }
    }
}

/// One parsed feed entry before recency filtering.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub published: Option<DateTime<Utc>>,
}

/// Marketing takeaways derived from the article set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsInsights {
    pub summary: String,
    pub actionable_recommendations: Vec<String>,
    pub trending_topics: Vec<String>,
    pub campaign_timing: String,
    pub target_channels: Vec<String>,
}

/// Output of one aggregation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsDigest {
    pub articles: Vec<NewsArticle>,
    pub insights: NewsInsights,
}
