//! Static lookup tables behind persona analysis.
//!
//! Location and interest tables are ordered rule lists: lookups walk them
//! front to back and the first rule whose key matches wins.

use super::types::AgeBracket;

pub struct AgeProfile {
    pub keywords: &'static [&'static str],
    pub behavior: &'static str,
}

pub struct LocationRule {
    pub key: &'static str,
    pub keywords: &'static [&'static str],
    pub culture: &'static str,
}

pub struct InterestRule {
    pub key: &'static str,
    pub keywords: &'static [&'static str],
}

pub fn age_profile(bracket: AgeBracket) -> &'static AgeProfile {
    match bracket {
        AgeBracket::Age18To24 => &AGE_18_24,
        AgeBracket::Age25To34 => &AGE_25_34,
        AgeBracket::Age35To44 => &AGE_35_44,
        AgeBracket::Age45To54 => &AGE_45_54,
        AgeBracket::Age55Plus => &AGE_55_PLUS,
    }
}

const AGE_18_24: AgeProfile = AgeProfile {
    keywords: &[
        "authentic", "trendy", "social", "instant", "viral", "FOMO", "aesthetic",
        "sustainable", "inclusive", "digital-native",
    ],
    behavior: "Highly influenced by social media, values authenticity and peer approval, prefers visual content, early adopters of trends",
};

const AGE_25_34: AgeProfile = AgeProfile {
    keywords: &[
        "career", "ambitious", "efficient", "premium", "experience", "networking", "growth",
        "innovative", "work-life balance", "investment",
    ],
    behavior: "Career-focused, values efficiency and quality, willing to pay for convenience, influenced by professional networks",
};

const AGE_35_44: AgeProfile = AgeProfile {
    keywords: &[
        "family", "reliable", "established", "quality", "security", "practical", "trusted",
        "proven", "comprehensive", "legacy",
    ],
    behavior: "Values reliability and proven solutions, family-oriented decision making, prefers established brands with track records",
};

const AGE_45_54: AgeProfile = AgeProfile {
    keywords: &[
        "expert", "sophisticated", "premium", "exclusive", "authority", "expertise",
        "traditional", "refined", "distinguished", "prestige",
    ],
    behavior: "Values expertise and sophistication, prefers premium offerings, influenced by authority and credibility",
};

const AGE_55_PLUS: AgeProfile = AgeProfile {
    keywords: &[
        "trusted", "heritage", "classic", "dependable", "simple", "clear", "service", "personal",
        "straightforward", "established",
    ],
    behavior: "Values trust and personal service, prefers clear communication, loyal to established brands",
};

pub const LOCATION_RULES: &[LocationRule] = &[
    LocationRule {
        key: "new york",
        keywords: &["fast-paced", "competitive", "premium", "exclusive", "cutting-edge"],
        culture: "Urban, fast-paced, status-conscious",
    },
    LocationRule {
        key: "california",
        keywords: &["innovative", "sustainable", "tech-forward", "progressive", "health-conscious"],
        culture: "Tech-savvy, environmentally conscious",
    },
    LocationRule {
        key: "texas",
        keywords: &["bold", "independent", "value-driven", "practical", "authentic"],
        culture: "Independent, value-conscious, practical",
    },
    LocationRule {
        key: "florida",
        keywords: &["relaxed", "diverse", "vibrant", "lifestyle", "sunshine"],
        culture: "Lifestyle-focused, diverse, leisure-oriented",
    },
    LocationRule {
        key: "london",
        keywords: &["sophisticated", "traditional", "quality", "heritage", "refined"],
        culture: "Traditional yet modern, quality-focused",
    },
    LocationRule {
        key: "toronto",
        keywords: &["multicultural", "progressive", "inclusive", "balanced", "friendly"],
        culture: "Multicultural, progressive values",
    },
];

pub const DEFAULT_LOCATION: LocationRule = LocationRule {
    key: "general",
    keywords: &["local", "community", "regional", "accessible"],
    culture: "Community-focused, local preferences",
};

pub const INTEREST_RULES: &[InterestRule] = &[
    InterestRule {
        key: "technology",
        keywords: &["AI", "innovation", "digital", "smart", "automated", "cutting-edge", "disruptive", "next-gen"],
    },
    InterestRule {
        key: "fitness",
        keywords: &["active", "healthy", "performance", "energy", "strength", "wellness", "transformation", "motivation"],
    },
    InterestRule {
        key: "travel",
        keywords: &["adventure", "explore", "discover", "journey", "experience", "wanderlust", "authentic", "memorable"],
    },
    InterestRule {
        key: "food",
        keywords: &["gourmet", "artisanal", "fresh", "organic", "flavorful", "culinary", "farm-to-table", "indulgent"],
    },
    InterestRule {
        key: "art",
        keywords: &["creative", "expressive", "unique", "inspiring", "aesthetic", "curated", "artistic", "imaginative"],
    },
    InterestRule {
        key: "music",
        keywords: &["rhythm", "harmony", "soulful", "energetic", "melodic", "immersive", "emotional", "uplifting"],
    },
    InterestRule {
        key: "fashion",
        keywords: &["stylish", "trendy", "chic", "elegant", "bold", "sophisticated", "contemporary", "statement"],
    },
];

/// First location rule whose key occurs in the lowercased location.
pub fn match_location(location: &str) -> &'static LocationRule {
    let location = location.to_lowercase();
    LOCATION_RULES
        .iter()
        .find(|rule| location.contains(rule.key))
        .unwrap_or(&DEFAULT_LOCATION)
}

/// Bidirectional substring test used by every interest table.
///
/// Empty interests never match; an empty string is contained in every key.
pub fn interest_matches(interest: &str, key: &str) -> bool {
    let interest = interest.trim().to_lowercase();
    !interest.is_empty() && (interest.contains(key) || key.contains(interest.as_str()))
}

/// All interest rules matching one interest, in table order.
pub fn match_interest(interest: &str) -> impl Iterator<Item = &'static InterestRule> + '_ {
    INTEREST_RULES
        .iter()
        .filter(move |rule| interest_matches(interest, rule.key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_first_match_wins() {
        assert_eq!(match_location("New York, NY").key, "new york");
        assert_eq!(match_location("London, UK").key, "london");
        assert_eq!(match_location("Reykjavik").key, "general");
    }

    #[test]
    fn test_interest_matching_is_bidirectional() {
        assert!(interest_matches("Technology", "technology"));
        assert!(interest_matches("tech", "technology"));
        assert!(interest_matches("street art", "art"));
        assert!(!interest_matches("", "art"));
        assert!(!interest_matches("   ", "art"));

        let keys: Vec<_> = match_interest("fitness and music").map(|r| r.key).collect();
        assert_eq!(keys, vec!["fitness", "music"]);
    }
}
