//! Persona-to-keyword mapping.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use super::tables::{age_profile, match_interest, match_location};
use super::types::AgeBracket;
use crate::TARGET_PIPELINE;

pub const MAX_ANALYSIS_KEYWORDS: usize = 15;

const AGE_KEYWORDS_TAKEN: usize = 5;
const LOCATION_KEYWORDS_TAKEN: usize = 3;
const INTEREST_KEYWORDS_TAKEN: usize = 7;
const KEYWORDS_PER_INTEREST: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingKeywordsAnalysis {
    pub summary: String,
    pub keywords: Vec<String>,
    pub primary_motivators: Vec<String>,
    pub regional_influences: Vec<String>,
    pub interest_drivers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaAnalysis {
    pub trending_keywords_analysis: TrendingKeywordsAnalysis,
    pub narrative: String,
}

impl PersonaAnalysis {
    pub fn keywords(&self) -> &[String] {
        &self.trending_keywords_analysis.keywords
    }

    /// First keyword, used as the hook in templated copy.
    pub fn primary_keyword(&self) -> Option<&str> {
        self.keywords().first().map(String::as_str)
    }
}

/// Removes duplicates (case-sensitive), keeping the first occurrence of each.
pub fn dedup_keywords<'a, I>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    keywords
        .into_iter()
        .filter(|keyword| seen.insert(*keyword))
        .map(str::to_string)
        .collect()
}

/// Maps (age bracket, location, interests) to weighted keyword sets and a narrative.
///
/// Unknown age brackets use the 25-34 table and unmatched locations use a
/// generic community entry. Each interest contributes the first three
/// keywords of every interest rule it matches.
pub fn analyze(age_bracket: &str, location: &str, interests: &[String]) -> PersonaAnalysis {
    let bracket = AgeBracket::from_label_or_default(age_bracket);
    let age = age_profile(bracket);
    let region = match_location(location);

    let interest_keywords: Vec<&'static str> = interests
        .iter()
        .flat_map(|interest| match_interest(interest).collect::<Vec<_>>())
        .flat_map(|rule| rule.keywords.iter().take(KEYWORDS_PER_INTEREST).copied())
        .collect();

    let merged = age
        .keywords
        .iter()
        .take(AGE_KEYWORDS_TAKEN)
        .chain(region.keywords.iter().take(LOCATION_KEYWORDS_TAKEN))
        .chain(interest_keywords.iter().take(INTEREST_KEYWORDS_TAKEN))
        .copied();
    let mut keywords = dedup_keywords(merged);
    keywords.truncate(MAX_ANALYSIS_KEYWORDS);

    debug!(
        target: TARGET_PIPELINE,
        "Persona {} / {} matched region '{}' and {} interest keywords",
        bracket,
        location,
        region.key,
        interest_keywords.len()
    );

    let interests_joined = interests.join(", ");
    let narrative = format!(
        "**Demographic Profile**: {behavior}\n\n\
         **Geographic Influence**: {culture}\n\n\
         **Interest-Based Motivations**: Based on their interests in {interests}, this persona is likely drawn to experiences that offer {interest_hooks} elements.\n\n\
         **Decision-Making Pattern**: This persona combines {age} generational values with {location} regional preferences, creating a decision-making framework that prioritizes both {age_lead} and {region_lead} elements in their choices.\n\n\
         **Marketing Receptivity**: Most responsive to messaging that emphasizes {age_lead}, {interest_lead}, and {region_lead} positioning.",
        behavior = age.behavior,
        culture = region.culture,
        interests = interests_joined,
        interest_hooks = interest_keywords
            .iter()
            .take(3)
            .copied()
            .collect::<Vec<_>>()
            .join(", "),
        age = age_bracket,
        location = location,
        age_lead = age.keywords[0],
        region_lead = region.keywords[0],
        interest_lead = interest_keywords.first().copied().unwrap_or("quality"),
    );

    PersonaAnalysis {
        trending_keywords_analysis: TrendingKeywordsAnalysis {
            summary: format!(
                "Analysis based on {} demographic in {} with interests in {}",
                age_bracket, location, interests_joined
            ),
            keywords,
            primary_motivators: owned(age.keywords.iter().take(3)),
            regional_influences: owned(region.keywords.iter().take(3)),
            interest_drivers: owned(interest_keywords.iter().take(5)),
        },
        narrative,
    }
}

fn owned<'a>(items: impl Iterator<Item = &'a &'static str>) -> Vec<String> {
    items.map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interests(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_gen_z_technology_in_new_york() {
        let analysis = analyze("18-24", "New York, NY", &interests(&["technology"]));
        let keywords = analysis.keywords();

        assert!(keywords.len() <= MAX_ANALYSIS_KEYWORDS);
        assert!(keywords.iter().any(|k| k == "authentic"));
        assert!(keywords.iter().any(|k| k == "AI"));
        assert!(keywords.iter().any(|k| k == "fast-paced"));
        assert_eq!(
            analysis.trending_keywords_analysis.primary_motivators,
            vec!["authentic", "trendy", "social"]
        );
        assert_eq!(
            analysis.trending_keywords_analysis.interest_drivers,
            vec!["AI", "innovation", "digital"]
        );
    }

    #[test]
    fn test_no_interests_still_yields_keywords() {
        let analysis = analyze("35-44", "Nowhere Special", &[]);
        let keywords = analysis.keywords();

        assert_eq!(
            keywords,
            &["family", "reliable", "established", "quality", "security", "local", "community", "regional"]
        );
        assert!(analysis.trending_keywords_analysis.interest_drivers.is_empty());
        assert!(analysis.narrative.contains("quality"));
    }

    #[test]
    fn test_unknown_bracket_defaults_to_25_34() {
        let analysis = analyze("99-100", "Austin, Texas", &interests(&["fitness"]));
        assert_eq!(analysis.keywords()[0], "career");
        assert!(analysis.keywords().iter().any(|k| k == "bold"));
    }

    #[test]
    fn test_keywords_are_unique_and_capped() {
        let many = interests(&["technology", "fitness", "travel", "food", "art", "music", "fashion"]);
        let analysis = analyze("25-34", "California", &many);
        let keywords = analysis.keywords();

        let unique: HashSet<_> = keywords.iter().collect();
        assert_eq!(unique.len(), keywords.len());
        assert!(keywords.len() <= MAX_ANALYSIS_KEYWORDS);
        assert_eq!(keywords.len(), MAX_ANALYSIS_KEYWORDS);
        assert_eq!(keywords.iter().filter(|k| *k == "innovative").count(), 1);
        assert!(keywords.iter().any(|k| k == "tech-forward"));
        assert!(!keywords.iter().any(|k| k == "explore"));
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let input = interests(&["music", "travel"]);
        let first = analyze("45-54", "London, UK", &input);
        let second = analyze("45-54", "London, UK", &input);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
