//! Feed catalogue and interest-to-feed selection.

use std::collections::HashSet;
use tracing::{debug, warn};

use super::types::{FeedSource, MAX_FEEDS};
use super::util::is_valid_url;
use crate::environment::get_env_var_as_vec;
use crate::TARGET_WEB_REQUEST;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedBucket {
    Technology,
    BusinessMarketing,
    General,
}

// Checked in order; an interest containing any term lands in that bucket.
const BUCKET_RULES: &[(FeedBucket, &[&str])] = &[
    (
        FeedBucket::Technology,
        &[
            "tech", "software", "gaming", "digital", "innovation", "computing", "crypto",
            "artificial intelligence", "gadget",
        ],
    ),
    (
        FeedBucket::BusinessMarketing,
        &[
            "business", "marketing", "finance", "startup", "entrepreneur", "retail", "economy",
            "sales", "advertising", "investing",
        ],
    ),
];

/// Which feed bucket an interest belongs to.
pub fn bucket_for(interest: &str) -> FeedBucket {
    let interest = interest.trim().to_lowercase();
    if interest.is_empty() {
        return FeedBucket::General;
    }
    BUCKET_RULES
        .iter()
        .find(|(_, terms)| terms.iter().any(|term| interest.contains(term)))
        .map(|(bucket, _)| *bucket)
        .unwrap_or(FeedBucket::General)
}

#[derive(Debug, Clone)]
pub struct FeedCatalog {
    pub technology: Vec<FeedSource>,
    pub business_marketing: Vec<FeedSource>,
    pub general: Vec<FeedSource>,
}

impl Default for FeedCatalog {
    fn default() -> Self {
        Self {
            technology: vec![
                FeedSource::new("TechCrunch", "https://techcrunch.com/feed/"),
                FeedSource::new("The Verge", "https://www.theverge.com/rss/index.xml"),
                FeedSource::new("MIT Technology Review", "https://www.technologyreview.com/feed/"),
            ],
            business_marketing: vec![
                FeedSource::new("Marketing Dive", "https://www.marketingdive.com/feeds/news/"),
                FeedSource::new(
                    "CNBC Top News",
                    "https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=100003114",
                ),
                FeedSource::new("Harvard Business Review", "https://feeds.hbr.org/harvardbusiness"),
            ],
            general: vec![
                FeedSource::new("BBC News", "https://feeds.bbci.co.uk/news/rss.xml"),
                FeedSource::new("NPR News", "https://feeds.npr.org/1001/rss.xml"),
                FeedSource::new("Guardian World", "https://www.theguardian.com/world/rss"),
            ],
        }
    }
}

impl FeedCatalog {
    /// Built-in feeds, with any bucket replaced by its environment override
    /// (`TECHNOLOGY_FEEDS`, `BUSINESS_FEEDS`, `GENERAL_FEEDS`; semicolon-separated URLs).
    pub fn from_env() -> Self {
        let defaults = FeedCatalog::default();
        Self {
            technology: override_or("TECHNOLOGY_FEEDS", defaults.technology),
            business_marketing: override_or("BUSINESS_FEEDS", defaults.business_marketing),
            general: override_or("GENERAL_FEEDS", defaults.general),
        }
    }

    pub fn feeds(&self, bucket: FeedBucket) -> &[FeedSource] {
        match bucket {
            FeedBucket::Technology => &self.technology,
            FeedBucket::BusinessMarketing => &self.business_marketing,
            FeedBucket::General => &self.general,
        }
    }

    /// Feeds for a set of interests: one feed per matched bucket per pass,
    /// buckets in interest order, deduplicated and capped at three. No interests means the general bucket.
    pub fn select(&self, interests: &[String]) -> Vec<FeedSource> {
        let mut buckets: Vec<FeedBucket> = Vec::new();
        for interest in interests {
            let bucket = bucket_for(interest);
            if !buckets.contains(&bucket) {
                buckets.push(bucket);
            }
        }
        if buckets.is_empty() {
            buckets.push(FeedBucket::General);
        }

        // Round-robin over the matched buckets so every interest contributes
        // before any bucket supplies a second feed.
        let mut seen = HashSet::new();
        let mut cursors: Vec<_> = buckets.iter().map(|bucket| self.feeds(*bucket).iter()).collect();
        let mut selected: Vec<FeedSource> = Vec::with_capacity(MAX_FEEDS);
        while selected.len() < MAX_FEEDS {
            let mut progressed = false;
            for cursor in cursors.iter_mut() {
                if selected.len() == MAX_FEEDS {
                    break;
                }
                if let Some(feed) = cursor.find(|feed| !seen.contains(&feed.url)) {
                    seen.insert(feed.url.clone());
                    selected.push(feed.clone());
                    progressed = true;
                }
            }
            if !progressed {
                break;
            }
        }

        debug!(
            target: TARGET_WEB_REQUEST,
            "Selected feeds {:?} for buckets {:?}",
            selected.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            buckets
        );
        selected
    }
}

fn override_or(var: &str, defaults: Vec<FeedSource>) -> Vec<FeedSource> {
    let urls: Vec<String> = get_env_var_as_vec(var, ';')
        .into_iter()
        .filter(|url| {
            let valid = is_valid_url(url);
            if !valid {
                warn!(target: TARGET_WEB_REQUEST, "Ignoring invalid feed URL in {}: {}", var, url);
            }
            valid
        })
        .collect();
    if urls.is_empty() {
        defaults
    } else {
        urls.iter().map(|url| FeedSource::from_url(url)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interests(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bucket_for_interest() {
        assert_eq!(bucket_for("Technology"), FeedBucket::Technology);
        assert_eq!(bucket_for("content marketing"), FeedBucket::BusinessMarketing);
        assert_eq!(bucket_for("gardening"), FeedBucket::General);
        assert_eq!(bucket_for(""), FeedBucket::General);
    }

    #[test]
    fn test_select_caps_and_dedups() {
        let catalog = FeedCatalog {
            technology: vec![FeedSource::new("T1", "https://t1"), FeedSource::new("Shared", "https://shared")],
            business_marketing: vec![FeedSource::new("Shared", "https://shared"), FeedSource::new("B1", "https://b1")],
            general: vec![FeedSource::new("G1", "https://g1")],
        };

        let selected = catalog.select(&interests(&["software", "marketing", "cooking"]));
        let urls: Vec<_> = selected.iter().map(|f| f.url.as_str()).collect();
        assert_eq!(urls, vec!["https://t1", "https://shared", "https://g1"]);
    }

    #[test]
    fn test_select_interleaves_buckets() {
        let selected = FeedCatalog::default().select(&interests(&["technology", "marketing"]));
        let names: Vec<_> = selected.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["TechCrunch", "Marketing Dive", "The Verge"]);
    }

    #[test]
    fn test_select_refills_from_remaining_buckets() {
        let catalog = FeedCatalog {
            technology: vec![FeedSource::new("T1", "https://t1")],
            business_marketing: vec![
                FeedSource::new("B1", "https://b1"),
                FeedSource::new("B2", "https://b2"),
                FeedSource::new("B3", "https://b3"),
            ],
            general: vec![],
        };

        let selected = catalog.select(&interests(&["software", "finance"]));
        let urls: Vec<_> = selected.iter().map(|f| f.url.as_str()).collect();
        assert_eq!(urls, vec!["https://t1", "https://b1", "https://b2"]);
    }

    #[test]
    fn test_select_without_interests_uses_general() {
        let catalog = FeedCatalog::default();
        let selected = catalog.select(&[]);
        assert_eq!(selected, catalog.general);
    }
}
