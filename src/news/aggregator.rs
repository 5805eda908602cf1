//! Multi-feed news aggregation with a static fallback.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use futures::future::join_all;
use std::sync::Arc;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use super::catalog::FeedCatalog;
use super::categorizer::categorize_all;
use super::client::FeedFetcher;
use super::fallback::fallback_articles;
use super::insights::generate_insights;
use super::parser::parse_feed;
use super::types::{
    FeedSource, NewsArticle, NewsDigest, MAX_ARTICLES, MAX_ENTRIES_PER_FEED, RECENCY_WINDOW_DAYS,
    SUMMARY_MAX_CHARS,
};
use super::util::truncate_chars;
use crate::error::{IntelError, Mode, Outcome};
use crate::TARGET_WEB_REQUEST;

pub struct NewsAggregator {
    fetcher: Arc<dyn FeedFetcher>,
    catalog: FeedCatalog,
}

impl NewsAggregator {
    pub fn new(fetcher: Arc<dyn FeedFetcher>, catalog: FeedCatalog) -> Self {
        Self { fetcher, catalog }
    }

    /// Recent categorized articles plus insights for a persona.
    ///
    /// Feed failures are logged and skipped. When nothing recent survives,
    /// the static article list is substituted and the outcome is marked as
    /// recovered from `AggregateEmpty`.
    pub async fn fetch(
        &self,
        feed_timeout: Duration,
        location: &str,
        interests: &[String],
        age_bracket: &str,
    ) -> Outcome<NewsDigest> {
        self.fetch_at(Utc::now(), feed_timeout, location, interests, age_bracket)
            .await
    }

    /// As [`NewsAggregator::fetch`], with recency measured from `now`.
    pub async fn fetch_at(
        &self,
        now: DateTime<Utc>,
        feed_timeout: Duration,
        location: &str,
        interests: &[String],
        age_bracket: &str,
    ) -> Outcome<NewsDigest> {
        let feeds = self.catalog.select(interests);
        debug!(target: TARGET_WEB_REQUEST, "Fetching {} feeds for persona in {}", feeds.len(), location);

        let cutoff = now - ChronoDuration::days(RECENCY_WINDOW_DAYS);
        let batches = join_all(
            feeds
                .iter()
                .map(|feed| self.fetch_feed(feed, feed_timeout, cutoff)),
        )
        .await;

        let mut articles: Vec<NewsArticle> = feeds
            .iter()
            .zip(batches)
            .filter_map(|(feed, batch)| match batch {
                Ok(articles) => {
                    debug!(target: TARGET_WEB_REQUEST, "{} recent articles from {}", articles.len(), feed.name);
                    Some(articles)
                }
                Err(err) => {
                    warn!(target: TARGET_WEB_REQUEST, "Skipping feed {} ({}): {}", feed.name, feed.url, err);
                    None
                }
            })
            .flatten()
            .collect();

        articles.sort_by(|a, b| b.published.cmp(&a.published));
        articles.truncate(MAX_ARTICLES);

        let recovery = if articles.is_empty() {
            warn!(target: TARGET_WEB_REQUEST, "No recent articles from {} feeds, using fallback articles", feeds.len());
            articles = fallback_articles();
            Some(IntelError::AggregateEmpty)
        } else {
            info!(target: TARGET_WEB_REQUEST, "Aggregated {} recent articles", articles.len());
            None
        };

        categorize_all(&mut articles);
        let insights = generate_insights(&articles, age_bracket, interests);
        let digest = NewsDigest { articles, insights };

        match recovery {
            Some(cause) => Outcome::recovered(digest, Mode::Mock, cause),
            None => Outcome::primary(digest, Mode::Real),
        }
    }

    async fn fetch_feed(
        &self,
        feed: &FeedSource,
        feed_timeout: Duration,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<NewsArticle>, IntelError> {
        let body = timeout(feed_timeout, self.fetcher.fetch(&feed.url))
            .await
            .map_err(|_| {
                IntelError::Fetch(format!(
                    "timed out after {}ms",
                    feed_timeout.as_millis()
                ))
            })??;

        let entries = parse_feed(&body, &feed.url)?;
        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                let published = entry.published.filter(|published| *published >= cutoff)?;
                Some(NewsArticle {
                    title: entry.title,
                    summary: truncate_chars(&entry.summary, SUMMARY_MAX_CHARS),
                    url: entry.url,
                    published,
                    source: feed.name.clone(),
                    category: Default::default(),
                })
            })
            .take(MAX_ENTRIES_PER_FEED)
            .collect())
    }
}
