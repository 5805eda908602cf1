//! Deterministic template copy, also the per-field fallback for generated copy.

use crate::persona::analyzer::dedup_keywords;
use crate::persona::PersonaAnalysis;

use super::palette::{choose_theme, palette_for};
use super::types::{AdCopy, AdCopyVariations, Platform};

const DEFAULT_KEYWORD: &str = "innovative";
const DEFAULT_INTEREST: &str = "lifestyle";

/// Template inputs shared by all three platforms.
pub struct TemplateContext<'a> {
    pub keyword: &'a str,
    pub interest: &'a str,
    pub age_bracket: &'a str,
    pub location: &'a str,
}

impl<'a> TemplateContext<'a> {
    pub fn new(
        analysis: &'a PersonaAnalysis,
        age_bracket: &'a str,
        interests: &'a [String],
        location: &'a str,
    ) -> Self {
        Self {
            keyword: analysis.primary_keyword().unwrap_or(DEFAULT_KEYWORD),
            interest: interests
                .iter()
                .map(|i| i.trim())
                .find(|i| !i.is_empty())
                .unwrap_or(DEFAULT_INTEREST),
            age_bracket,
            location,
        }
    }
}

fn hashtag(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

fn copy_keywords(ctx: &TemplateContext<'_>, extra: [&str; 2]) -> Vec<String> {
    dedup_keywords([ctx.keyword, ctx.interest, extra[0], extra[1]])
}

/// Template copy for one platform; a pure function of its inputs.
pub fn mock_copy(ctx: &TemplateContext<'_>, palette: String, platform: Platform) -> AdCopy {
    match platform {
        Platform::Instagram => AdCopy {
            headline: format!("Discover {} {} in {}", ctx.keyword, ctx.interest, ctx.location),
            body: format!(
                "Made for the {} crowd who want more from their {}. Join thousands who've already made the switch. #{} #Transform",
                ctx.age_bracket,
                ctx.interest,
                hashtag(ctx.interest)
            ),
            keywords: copy_keywords(ctx, ["lifestyle", "trending"]),
            cta: "Shop Now".to_string(),
            color_palette: palette,
        },
        Platform::LinkedIn => AdCopy {
            headline: format!("Drive results with {} {} strategies", ctx.keyword, ctx.interest),
            body: format!(
                "Professionals aged {} in {} rely on our proven approach to deliver measurable results. See why industry leaders choose us.",
                ctx.age_bracket, ctx.location
            ),
            keywords: copy_keywords(ctx, ["growth", "results"]),
            cta: "Learn More".to_string(),
            color_palette: palette,
        },
        Platform::TikTok => AdCopy {
            headline: format!("POV: you found the most {} {} hack", ctx.keyword, ctx.interest),
            body: format!(
                "{} is already on it. Try it and thank us later #GameChanger #{}",
                ctx.location,
                hashtag(ctx.interest)
            ),
            keywords: copy_keywords(ctx, ["viral", "musttry"]),
            cta: "Try It Now".to_string(),
            color_palette: palette,
        },
    }
}

pub fn mock_variations(
    analysis: &PersonaAnalysis,
    age_bracket: &str,
    interests: &[String],
    location: &str,
) -> AdCopyVariations {
    let ctx = TemplateContext::new(analysis, age_bracket, interests, location);
    let theme = choose_theme(age_bracket, interests);
    AdCopyVariations::from_fn(|platform| mock_copy(&ctx, palette_for(theme, platform), platform))
}
