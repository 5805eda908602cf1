//! Keyword display weights for the word cloud.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MAX_WORD_CLOUD_TERMS: usize = 20;
pub const MIN_WEIGHT: u32 = 15;

const HIGH_IMPACT_KEYWORDS: &[&str] = &[
    "AI", "innovation", "sustainable", "premium", "authentic", "digital", "efficient", "quality",
    "exclusive", "personalized", "smart", "creative",
];
const HIGH_IMPACT_BONUS: f64 = 1.3;

const AGE_TERMS: &[&str] = &["gen", "millennial", "boomer"];
const LOCATION_TERMS: &[&str] = &["local", "regional", "urban", "metropolitan"];

const AGE_MULTIPLIER: f64 = 0.8;
const LOCATION_MULTIPLIER: f64 = 0.7;
const INTEREST_MULTIPLIER: f64 = 0.9;
const GENERAL_MULTIPLIER: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedTerm {
    pub text: String,
    pub value: u32,
}

fn is_high_impact(keyword: &str) -> bool {
    HIGH_IMPACT_KEYWORDS.contains(&keyword)
}

/// Category multiplier, checked as age term, then location term, then
/// high-impact membership, else general.
fn category_multiplier(keyword: &str) -> f64 {
    let lower = keyword.to_lowercase();
    if AGE_TERMS.iter().any(|term| lower.contains(term)) {
        AGE_MULTIPLIER
    } else if LOCATION_TERMS.iter().any(|term| lower.contains(term)) {
        LOCATION_MULTIPLIER
    } else if is_high_impact(keyword) {
        INTEREST_MULTIPLIER
    } else {
        GENERAL_MULTIPLIER
    }
}

/// Converts an ordered keyword list into display weights, heaviest first.
///
/// Earlier keywords start heavier; the jitter comes from `rng` so a seeded
/// generator reproduces the same cloud. A repeated keyword keeps the weight
/// of its first occurrence.
pub fn weight<R: Rng>(keywords: &[String], rng: &mut R) -> Vec<WeightedTerm> {
    let mut seen = HashSet::new();
    let mut terms: Vec<WeightedTerm> = Vec::with_capacity(keywords.len());

    for (i, keyword) in keywords.iter().enumerate() {
        // Jitter is drawn for every position so duplicates don't shift later draws
        let jitter: f64 = rng.random_range(0.8..=1.2);
        if !seen.insert(keyword.as_str()) {
            continue;
        }

        let mut base = (100.0 - 5.0 * i as f64).max(20.0);
        if is_high_impact(keyword) {
            base *= HIGH_IMPACT_BONUS;
        }

        let value = (base * category_multiplier(keyword) * jitter).floor() as u32;
        terms.push(WeightedTerm {
            text: keyword.clone(),
            value: value.max(MIN_WEIGHT),
        });
    }

    // Stable, so equal weights keep keyword order
    terms.sort_by(|a, b| b.value.cmp(&a.value));
    terms.truncate(MAX_WORD_CLOUD_TERMS);
    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn keywords(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_input() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(weight(&[], &mut rng).is_empty());
    }

    #[test]
    fn test_bounds_and_ordering() {
        let many: Vec<String> = (0..30).map(|i| format!("term{}", i)).collect();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let cloud = weight(&many, &mut rng);
            assert_eq!(cloud.len(), MAX_WORD_CLOUD_TERMS);
            assert!(cloud.iter().all(|t| t.value >= MIN_WEIGHT));
            assert!(cloud.windows(2).all(|w| w[0].value >= w[1].value));
        }
    }

    #[test]
    fn test_seeded_weights_are_reproducible() {
        let input = keywords(&["authentic", "trendy", "local", "Gen Z", "AI"]);
        let first = weight(&input, &mut StdRng::seed_from_u64(42));
        let second = weight(&input, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_multiplier_precedence() {
        assert_eq!(category_multiplier("Gen Z"), AGE_MULTIPLIER);
        assert_eq!(category_multiplier("regional"), LOCATION_MULTIPLIER);
        // age check runs before location check
        assert_eq!(category_multiplier("urban millennial"), AGE_MULTIPLIER);
        assert_eq!(category_multiplier("AI"), INTEREST_MULTIPLIER);
        assert_eq!(category_multiplier("ai"), GENERAL_MULTIPLIER);
        assert_eq!(category_multiplier("trendy"), GENERAL_MULTIPLIER);
    }

    #[test]
    fn test_value_ranges() {
        // First position high-impact: 100 * 1.3 * 0.9 * [0.8, 1.2] -> [93, 140]
        // Sixth position general: 75 * 0.8 * [0.8, 1.2] -> [48, 72]
        let input = keywords(&["AI", "a", "b", "c", "d", "plain"]);
        for seed in 0..50 {
            let cloud = weight(&input, &mut StdRng::seed_from_u64(seed));
            let ai = cloud.iter().find(|t| t.text == "AI").unwrap();
            assert!((92..=140).contains(&ai.value), "AI weight {}", ai.value);
            let plain = cloud.iter().find(|t| t.text == "plain").unwrap();
            assert!((47..=72).contains(&plain.value), "plain weight {}", plain.value);
        }
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let input = keywords(&["premium", "bold", "premium"]);
        let cloud = weight(&input, &mut StdRng::seed_from_u64(7));
        assert_eq!(cloud.len(), 2);
        // premium at position 0: 100 * 1.3 * 0.9 * jitter
        let premium = cloud.iter().find(|t| t.text == "premium").unwrap();
        assert!(premium.value >= 92);
    }
}
