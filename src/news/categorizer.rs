//! Keyword-scored news categorization.

use super::types::{NewsArticle, NewsCategory};

struct CategoryRule {
    category: NewsCategory,
    keywords: &'static [&'static str],
}

// Declaration order is the tie-break: the first category reaching the top
// score wins.
const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: NewsCategory::Technology,
        keywords: &[
            "ai", "artificial intelligence", "machine learning", "tech", "digital", "software",
            "app", "blockchain", "crypto", "automation", "robot", "innovation", "startup",
            "silicon valley", "cloud", "cybersecurity",
        ],
    },
    CategoryRule {
        category: NewsCategory::Business,
        keywords: &[
            "business", "company", "corporate", "market", "economy", "financial", "revenue",
            "profit", "investment", "stock", "trade", "commerce", "enterprise", "industry", "ceo",
            "merger", "acquisition",
        ],
    },
    CategoryRule {
        category: NewsCategory::Politics,
        keywords: &[
            "political", "government", "election", "policy", "vote", "campaign", "senator",
            "congress", "parliament", "president", "minister", "law", "legislation", "democracy",
            "republican", "democrat",
        ],
    },
    CategoryRule {
        category: NewsCategory::Fashion,
        keywords: &[
            "fashion", "style", "clothing", "designer", "runway", "model", "brand", "apparel",
            "trend", "luxury", "beauty", "cosmetics", "makeup", "skincare", "accessory", "jewelry",
        ],
    },
    CategoryRule {
        category: NewsCategory::Sports,
        keywords: &[
            "sports", "football", "basketball", "soccer", "baseball", "tennis", "olympic",
            "championship", "tournament", "athlete", "team", "game", "match", "season", "coach",
            "player", "fitness",
        ],
    },
    CategoryRule {
        category: NewsCategory::Culture,
        keywords: &[
            "culture", "art", "music", "film", "movie", "entertainment", "celebrity", "artist",
            "concert", "festival", "museum", "gallery", "book", "author", "theater", "media",
            "social media", "influencer",
        ],
    },
];

/// Score of one category: each keyword contributes its (non-overlapping,
/// substring) occurrence count times twice its word count.
fn score(text: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .map(|keyword| text.matches(keyword).count() * keyword.split_whitespace().count() * 2)
        .sum()
}

/// Classifies headline plus summary into a category; `General` when nothing scores.
pub fn categorize(headline: &str, summary: &str) -> NewsCategory {
    let text = format!("{} {}", headline, summary).to_lowercase();

    let mut best = NewsCategory::General;
    let mut best_score = 0;
    for rule in CATEGORY_RULES {
        let score = score(&text, rule.keywords);
        if score > best_score {
            best = rule.category;
            best_score = score;
        }
    }
    best
}

/// Assigns a category to every article in place.
pub fn categorize_all(articles: &mut [NewsArticle]) {
    for article in articles.iter_mut() {
        article.category = categorize(&article.title, &article.summary);
    }
}
