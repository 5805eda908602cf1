//! Static articles used when no feed yields anything recent.

use chrono::{DateTime, Utc};

use super::types::{NewsArticle, NewsCategory};

struct StaticArticle {
    title: &'static str,
    summary: &'static str,
    url: &'static str,
    published: i64,
    source: &'static str,
}

const FALLBACK_ARTICLES: &[StaticArticle] = &[
    StaticArticle {
        title: "AI Revolution Transforms Marketing Landscape in 2024",
        summary: "Artificial intelligence tools are reshaping how brands connect with consumers, offering unprecedented personalization capabilities.",
        url: "https://example.com/ai-marketing-2024",
        published: 1_705_276_800, // 2024-01-15
        source: "TechMarketing Today",
    },
    StaticArticle {
        title: "Social Media Trends Drive Consumer Engagement",
        summary: "Latest social media algorithms favor authentic, user-generated content over traditional advertising approaches.",
        url: "https://example.com/social-trends",
        published: 1_705_190_400, // 2024-01-14
        source: "Digital Marketing Weekly",
    },
    StaticArticle {
        title: "Holiday Shopping Patterns Shift Toward Sustainable Brands",
        summary: "Consumers increasingly choose brands with strong environmental commitments, impacting retail strategies nationwide.",
        url: "https://example.com/sustainable-retail",
        published: 1_705_363_200, // 2024-01-16
        source: "Retail Insights",
    },
    StaticArticle {
        title: "Economic Trends Shape Consumer Spending Habits",
        summary: "Recent economic indicators suggest shifts in consumer priorities toward value-driven purchases and experiences.",
        url: "https://example.com/economic-trends",
        published: 1_705_449_600, // 2024-01-17
        source: "Market Analysis Today",
    },
];

/// The fallback list, newest first and not yet categorized.
pub fn fallback_articles() -> Vec<NewsArticle> {
    let mut articles: Vec<NewsArticle> = FALLBACK_ARTICLES
        .iter()
        .map(|article| NewsArticle {
            title: article.title.to_string(),
            summary: article.summary.to_string(),
            url: article.url.to_string(),
            published: DateTime::<Utc>::from_timestamp(article.published, 0).unwrap_or_default(),
            source: article.source.to_string(),
            category: NewsCategory::General,
        })
        .collect();
    articles.sort_by(|a, b| b.published.cmp(&a.published));
    articles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_sorted_newest_first() {
        let articles = fallback_articles();
        assert_eq!(articles.len(), 4);
        assert_eq!(articles[0].title, "Economic Trends Shape Consumer Spending Habits");
        assert_eq!(articles[0].published.format("%Y-%m-%d").to_string(), "2024-01-17");
        assert!(articles.windows(2).all(|w| w[0].published >= w[1].published));
    }
}
