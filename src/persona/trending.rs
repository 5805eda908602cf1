//! Preset personas and the location/industry trending keyword lookup.

use serde::Serialize;

use super::types::PersonaProfile;

#[derive(Debug, Clone, Serialize)]
pub struct SamplePersona {
    pub name: &'static str,
    pub age_bracket: &'static str,
    pub location: &'static str,
    pub interests: &'static [&'static str],
}

impl SamplePersona {
    pub fn profile(&self) -> PersonaProfile {
        PersonaProfile::new(self.age_bracket, self.location, self.interests)
    }
}

pub const SAMPLE_PERSONAS: &[SamplePersona] = &[
    SamplePersona {
        name: "Tech-Savvy Millennial",
        age_bracket: "25-34",
        location: "San Francisco, CA",
        interests: &["technology", "startup", "innovation", "sustainability"],
    },
    SamplePersona {
        name: "Creative Gen Z",
        age_bracket: "18-24",
        location: "New York, NY",
        interests: &["art", "music", "social media", "fashion"],
    },
    SamplePersona {
        name: "Professional Gen X",
        age_bracket: "35-44",
        location: "London, UK",
        interests: &["business", "finance", "travel", "wellness"],
    },
    SamplePersona {
        name: "Active Boomer",
        age_bracket: "55+",
        location: "Austin, TX",
        interests: &["health", "family", "community", "travel"],
    },
];

/// Case-insensitive lookup by name.
pub fn find_sample(name: &str) -> Option<&'static SamplePersona> {
    let wanted = name.trim().to_lowercase();
    SAMPLE_PERSONAS
        .iter()
        .find(|sample| sample.name.to_lowercase() == wanted)
}

struct IndustryKeywords {
    industry: &'static str,
    keywords: &'static [&'static str],
}

struct MarketKeywords {
    market: &'static str,
    industries: &'static [IndustryKeywords],
}

// The first market and the first industry of each market are the fallbacks.
const TRENDING: &[MarketKeywords] = &[
    MarketKeywords {
        market: "global",
        industries: &[
            IndustryKeywords {
                industry: "general",
                keywords: &["authentic", "sustainable", "AI-powered", "community", "personalized", "innovative"],
            },
            IndustryKeywords {
                industry: "technology",
                keywords: &["AI", "automation", "cloud", "cybersecurity", "blockchain", "quantum"],
            },
            IndustryKeywords {
                industry: "retail",
                keywords: &["omnichannel", "sustainable", "experience", "personalization", "social commerce"],
            },
        ],
    },
    MarketKeywords {
        market: "us",
        industries: &[
            IndustryKeywords {
                industry: "general",
                keywords: &["local", "made-in-usa", "community", "authentic", "premium", "fast"],
            },
            IndustryKeywords {
                industry: "technology",
                keywords: &["silicon valley", "innovation", "startup", "venture", "disruptive"],
            },
        ],
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingKeywords {
    pub location: String,
    pub industry: String,
    pub market: &'static str,
    pub trending_keywords: Vec<&'static str>,
}

/// Trending keywords for a market and industry.
///
/// Unknown markets resolve to `global`; industries the market does not list
/// resolve to `general`. The requested names are echoed back unchanged.
pub fn trending_keywords(location: &str, industry: &str) -> TrendingKeywords {
    let location_key = location.trim().to_lowercase();
    let industry_key = industry.trim().to_lowercase();

    let market = TRENDING
        .iter()
        .find(|m| m.market == location_key)
        .unwrap_or(&TRENDING[0]);
    let entry = market
        .industries
        .iter()
        .find(|i| i.industry == industry_key)
        .unwrap_or(&market.industries[0]);

    TrendingKeywords {
        location: location.to_string(),
        industry: industry.to_string(),
        market: market.market,
        trending_keywords: entry.keywords.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_sample_ignores_case() {
        let sample = find_sample("creative gen z").unwrap();
        assert_eq!(sample.age_bracket, "18-24");
        assert_eq!(sample.profile().interests.len(), 4);
        assert!(find_sample("Retired Astronaut").is_none());
    }

    #[test]
    fn test_trending_fallbacks() {
        let us_retail = trending_keywords("US", "retail");
        assert_eq!(us_retail.market, "us");
        assert_eq!(us_retail.trending_keywords[1], "made-in-usa");
        assert_eq!(us_retail.industry, "retail");

        let mars = trending_keywords("mars", "technology");
        assert_eq!(mars.market, "global");
        assert_eq!(mars.trending_keywords[0], "AI");
    }
}
