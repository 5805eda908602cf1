//! Motivation scoring and the demographic breakdown.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::persona::tables::interest_matches;
use crate::persona::AgeBracket;

pub const MAX_MOTIVATIONS: usize = 6;
const NEW_MOTIVATION_BASE: i32 = 60;
const TOP_INTERESTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotivationScore {
    pub label: String,
    pub value: i32,
}

fn age_motivations(bracket: AgeBracket) -> &'static [(&'static str, i32)] {
    match bracket {
        AgeBracket::Age18To24 => &[
            ("Social Recognition", 85),
            ("Authenticity", 90),
            ("Innovation", 80),
            ("Affordability", 75),
            ("Convenience", 70),
        ],
        AgeBracket::Age25To34 => &[
            ("Efficiency", 85),
            ("Career Growth", 90),
            ("Quality", 80),
            ("Innovation", 75),
            ("Work-Life Balance", 85),
        ],
        AgeBracket::Age35To44 => &[
            ("Reliability", 90),
            ("Family Security", 85),
            ("Quality", 88),
            ("Time Saving", 80),
            ("Value for Money", 75),
        ],
        AgeBracket::Age45To54 => &[
            ("Expertise", 85),
            ("Premium Quality", 90),
            ("Reliability", 88),
            ("Status", 70),
            ("Tradition", 75),
        ],
        AgeBracket::Age55Plus => &[
            ("Trust", 95),
            ("Simplicity", 85),
            ("Personal Service", 90),
            ("Heritage", 80),
            ("Security", 85),
        ],
    }
}

struct InterestModifier {
    key: &'static str,
    deltas: &'static [(&'static str, i32)],
}

const INTEREST_MODIFIERS: &[InterestModifier] = &[
    InterestModifier { key: "technology", deltas: &[("Innovation", 10), ("Efficiency", 8)] },
    InterestModifier { key: "fitness", deltas: &[("Health", 15), ("Performance", 10)] },
    InterestModifier {
        key: "sustainability",
        deltas: &[("Social Responsibility", 12), ("Long-term Value", 8)],
    },
    InterestModifier { key: "art", deltas: &[("Creativity", 15), ("Uniqueness", 10)] },
    InterestModifier { key: "business", deltas: &[("Success", 10), ("Networking", 8)] },
    InterestModifier { key: "travel", deltas: &[("Adventure", 12), ("Experience", 10)] },
    InterestModifier { key: "music", deltas: &[("Expression", 10), ("Community", 8)] },
    InterestModifier { key: "fashion", deltas: &[("Style", 15), ("Trend Awareness", 10)] },
];

/// A region delta: (motivation, default when absent, increment).
struct RegionRule {
    markers: &'static [&'static str],
    deltas: &'static [(&'static str, i32, i32)],
}

const REGION_RULES: &[RegionRule] = &[
    RegionRule {
        markers: &["new york", "nyc"],
        deltas: &[("Efficiency", 70, 10), ("Status", 60, 8)],
    },
    RegionRule {
        markers: &["california", "san francisco"],
        deltas: &[("Innovation", 70, 12), ("Social Responsibility", 60, 10)],
    },
    RegionRule {
        markers: &["london", "uk"],
        deltas: &[("Quality", 70, 8), ("Heritage", 60, 10)],
    },
];

/// Insertion-ordered motivation table; ties keep the earlier entry when sorted.
struct Motivations(Vec<(String, i32)>);

impl Motivations {
    fn get(&self, label: &str) -> Option<i32> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, v)| *v)
    }

    fn set(&mut self, label: &str, value: i32) {
        let value = value.clamp(0, 100);
        match self.0.iter_mut().find(|(l, _)| l == label) {
            Some(entry) => entry.1 = value,
            None => self.0.push((label.to_string(), value)),
        }
    }
}

/// Ranks motivations for a persona, returning at most six, highest first.
pub fn score(age_bracket: &str, interests: &[String], location: Option<&str>) -> Vec<MotivationScore> {
    let bracket = AgeBracket::from_label_or_default(age_bracket);
    let mut motivations = Motivations(
        age_motivations(bracket)
            .iter()
            .map(|(label, value)| (label.to_string(), *value))
            .collect(),
    );

    for interest in interests {
        for modifier in INTEREST_MODIFIERS
            .iter()
            .filter(|m| interest_matches(interest, m.key))
        {
            for (label, delta) in modifier.deltas {
                let value = motivations.get(label).unwrap_or(NEW_MOTIVATION_BASE) + delta;
                motivations.set(label, value);
            }
        }
    }

    if let Some(location) = location {
        let location = location.to_lowercase();
        if let Some(rule) = REGION_RULES
            .iter()
            .find(|rule| rule.markers.iter().any(|m| location.contains(m)))
        {
            for (label, default, delta) in rule.deltas {
                let value = motivations.get(label).unwrap_or(*default) + delta;
                motivations.set(label, value);
            }
        }
    }

    let mut ranked: Vec<MotivationScore> = motivations
        .0
        .into_iter()
        .map(|(label, value)| MotivationScore { label, value })
        .collect();
    ranked.sort_by(|a, b| b.value.cmp(&a.value));
    ranked.truncate(MAX_MOTIVATIONS);
    ranked
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeShare {
    pub label: String,
    pub bracket: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicBreakdown {
    pub age_distribution: Vec<AgeShare>,
    pub primary_location: String,
    pub top_interests: Vec<String>,
    pub market_size_estimate: u32,
}

/// Estimated audience split: the persona's bracket takes 75-85% and the
/// remainder is shared evenly (integer division) by its neighbours.
pub fn demographic_breakdown<R: Rng>(
    age_bracket: &str,
    location: &str,
    interests: &[String],
    rng: &mut R,
) -> DemographicBreakdown {
    let primary = AgeBracket::from_label_or_default(age_bracket);
    let primary_percentage: u32 = rng.random_range(75..=85);
    let adjacent = primary.adjacent();
    let share = (100 - primary_percentage) / adjacent.len() as u32;

    let age_distribution = AgeBracket::ALL
        .iter()
        .map(|bracket| AgeShare {
            label: bracket.generation().to_string(),
            bracket: bracket.label().to_string(),
            percentage: if *bracket == primary {
                primary_percentage
            } else if adjacent.contains(bracket) {
                share
            } else {
                0
            },
        })
        .collect();

    DemographicBreakdown {
        age_distribution,
        primary_location: location.to_string(),
        top_interests: interests.iter().take(TOP_INTERESTS).cloned().collect(),
        market_size_estimate: rng.random_range(10_000..=500_000),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn interests(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn labels(scores: &[MotivationScore]) -> Vec<&str> {
        scores.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn test_scores_bounded_for_every_bracket() {
        let many = interests(&["technology", "fitness", "art", "music", "fashion", "travel"]);
        for bracket in AgeBracket::ALL {
            for location in [None, Some("New York, NY"), Some("San Francisco"), Some("Leeds, UK")] {
                let scores = score(bracket.label(), &many, location);
                assert!(scores.len() <= MAX_MOTIVATIONS);
                assert!(scores.iter().all(|s| (0..=100).contains(&s.value)));
                assert!(scores.windows(2).all(|w| w[0].value >= w[1].value));
            }
        }
    }

    #[test]
    fn test_base_table_order_breaks_ties() {
        let scores = score("55+", &[], None);
        assert_eq!(
            labels(&scores),
            vec!["Trust", "Personal Service", "Simplicity", "Security", "Heritage"]
        );
    }

    #[test]
    fn test_interest_and_location_deltas() {
        let scores = score("25-34", &interests(&["technology"]), Some("New York, NY"));
        // Efficiency 85 + 8 + 10 clamps to 100; Innovation 75 + 10; Status new at 60 + 8
        assert_eq!(scores[0], MotivationScore { label: "Efficiency".into(), value: 100 });
        assert_eq!(scores[1], MotivationScore { label: "Career Growth".into(), value: 90 });
        assert_eq!(
            labels(&scores),
            vec!["Efficiency", "Career Growth", "Innovation", "Work-Life Balance", "Quality", "Status"]
        );
        assert_eq!(scores[5].value, 68);
    }

    #[test]
    fn test_new_motivation_starts_at_base() {
        let scores = score("18-24", &interests(&["fitness"]), Some("Toronto"));
        assert!(scores.contains(&MotivationScore { label: "Health".into(), value: 75 }));
        // Performance (70) ties with Convenience, which was inserted first
        assert_eq!(scores[5].label, "Convenience");
        assert!(!labels(&scores).contains(&"Performance"));
    }

    #[test]
    fn test_only_first_matching_region_applies() {
        let scores = score("25-34", &[], Some("New York to London"));
        assert!(scores.contains(&MotivationScore { label: "Efficiency".into(), value: 95 }));
        assert!(scores.contains(&MotivationScore { label: "Status".into(), value: 68 }));
        assert!(scores.contains(&MotivationScore { label: "Quality".into(), value: 80 }));
        assert!(!labels(&scores).contains(&"Heritage"));
    }

    #[test]
    fn test_unknown_bracket_uses_default_table() {
        assert_eq!(score("unknown", &[], None), score("25-34", &[], None));
    }

    #[test]
    fn test_demographic_breakdown_edges() {
        let mut rng = StdRng::seed_from_u64(3);
        let breakdown = demographic_breakdown("18-24", "Berlin", &interests(&["a", "b", "c", "d", "e"]), &mut rng);

        let shares: Vec<u32> = breakdown.age_distribution.iter().map(|a| a.percentage).collect();
        assert!((75..=85).contains(&shares[0]));
        assert_eq!(shares[0] + shares[1], 100);
        assert_eq!(&shares[2..], &[0, 0, 0]);
        assert_eq!(breakdown.top_interests, vec!["a", "b", "c", "d"]);
        assert_eq!(breakdown.primary_location, "Berlin");
        assert!((10_000..=500_000).contains(&breakdown.market_size_estimate));
    }

    #[test]
    fn test_demographic_breakdown_middle_bracket() {
        let mut rng = StdRng::seed_from_u64(11);
        let breakdown = demographic_breakdown("35-44", "Lyon", &[], &mut rng);
        let shares: Vec<u32> = breakdown.age_distribution.iter().map(|a| a.percentage).collect();

        assert_eq!(shares[0], 0);
        assert_eq!(shares[4], 0);
        assert_eq!(shares[1], shares[3]);
        assert_eq!(shares[1], (100 - shares[2]) / 2);
        assert_eq!(breakdown.age_distribution[2].label, "Gen X Early");
    }

    #[test]
    fn test_demographic_breakdown_is_seeded() {
        let first = demographic_breakdown("45-54", "Oslo", &[], &mut StdRng::seed_from_u64(9));
        let second = demographic_breakdown("45-54", "Oslo", &[], &mut StdRng::seed_from_u64(9));
        assert_eq!(first, second);
    }
}
