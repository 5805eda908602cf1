//! Marketing insights derived from article titles and the persona.

use super::types::{NewsArticle, NewsInsights};

pub const CAMPAIGN_TIMING: &str =
    "Optimal timing: Current market conditions favor immediate campaign launch";

const GENERAL_TRENDS: &str = "general_trends";

struct ThemeRule {
    theme: &'static str,
    markers: &'static [&'static str],
}

// Ties between equally frequent themes go to the earlier rule.
const THEME_RULES: &[ThemeRule] = &[
    ThemeRule {
        theme: "technology_adoption",
        markers: &["ai", "technology", "digital"],
    },
    ThemeRule {
        theme: "sustainability_focus",
        markers: &["sustainable", "environment", "green"],
    },
    ThemeRule {
        theme: "social_engagement",
        markers: &["social", "community", "engagement"],
    },
];

struct InsightTemplate {
    theme: &'static str,
    summary: &'static str,
    recommendations: [&'static str; 4],
}

const INSIGHT_TEMPLATES: &[InsightTemplate] = &[
    InsightTemplate {
        theme: "technology_adoption",
        summary: "Current tech trends show increased adoption of AI and automation tools",
        recommendations: [
            "Highlight innovative features and smart capabilities in your messaging",
            "Position your product as cutting-edge and future-ready",
            "Use data-driven language to appeal to tech-savvy consumers",
            "Emphasize efficiency and automation benefits",
        ],
    },
    InsightTemplate {
        theme: "sustainability_focus",
        summary: "Environmental consciousness is driving consumer decision-making",
        recommendations: [
            "Emphasize eco-friendly practices and sustainable materials",
            "Highlight long-term value and environmental impact",
            "Partner with environmental causes for brand alignment",
            "Use green messaging and earth-toned visual elements",
        ],
    },
    InsightTemplate {
        theme: "social_engagement",
        summary: "Social proof and community engagement are key influence factors",
        recommendations: [
            "Leverage user-generated content and testimonials",
            "Create community-driven marketing campaigns",
            "Encourage social sharing with interactive elements",
            "Build authentic brand relationships through storytelling",
        ],
    },
    InsightTemplate {
        theme: GENERAL_TRENDS,
        summary: "Market trends indicate focus on value and authentic experiences",
        recommendations: [
            "Emphasize clear value proposition and ROI",
            "Use authentic storytelling and real customer experiences",
            "Focus on practical benefits and problem-solving",
            "Build trust through transparency and social proof",
        ],
    },
];

const YOUTUBE_INTERESTS: &[&str] = &["technology", "gaming", "digital"];

/// Themes each title mentions, as whole lowercase words. A title can count
/// toward several themes.
fn theme_hits(articles: &[NewsArticle]) -> Vec<&'static str> {
    let mut hits = Vec::new();
    for article in articles {
        let title = article.title.to_lowercase();
        let words: Vec<&str> = title.split_whitespace().collect();
        for rule in THEME_RULES {
            if words.iter().any(|word| rule.markers.contains(word)) {
                hits.push(rule.theme);
            }
        }
    }
    hits
}

/// Channels suited to the age bracket, plus YouTube for digital-leaning interests.
///
/// Matches the raw label: anything outside the four younger brackets,
/// including labels that are not brackets at all, gets the traditional mix.
pub fn recommend_channels(age_bracket: &str, interests: &[String]) -> Vec<String> {
    let mut channels: Vec<&str> = match age_bracket.trim() {
        "18-24" | "25-34" => vec!["Instagram", "TikTok", "LinkedIn"],
        "35-44" | "45-54" => vec!["LinkedIn", "Facebook", "Email"],
        _ => vec!["Facebook", "Email", "Traditional Media"],
    };

    if interests
        .iter()
        .any(|interest| YOUTUBE_INTERESTS.contains(&interest.to_lowercase().as_str()))
    {
        channels.push("YouTube");
    }

    channels.into_iter().map(String::from).collect()
}

pub fn generate_insights(
    articles: &[NewsArticle],
    age_bracket: &str,
    interests: &[String],
) -> NewsInsights {
    let hits = theme_hits(articles);

    let mut primary = GENERAL_TRENDS;
    let mut best = 0;
    for rule in THEME_RULES {
        let count = hits.iter().filter(|theme| **theme == rule.theme).count();
        if count > best {
            primary = rule.theme;
            best = count;
        }
    }

    let template = INSIGHT_TEMPLATES
        .iter()
        .find(|template| template.theme == primary)
        .unwrap_or(&INSIGHT_TEMPLATES[INSIGHT_TEMPLATES.len() - 1]);

    let trending_topics = THEME_RULES
        .iter()
        .filter(|rule| hits.contains(&rule.theme))
        .map(|rule| rule.theme.to_string())
        .collect();

    NewsInsights {
        summary: template.summary.to_string(),
        actionable_recommendations: template.recommendations.iter().map(|r| r.to_string()).collect(),
        trending_topics,
        campaign_timing: CAMPAIGN_TIMING.to_string(),
        target_channels: recommend_channels(age_bracket, interests),
    }
}
