//! Color-psychology palettes for ad copy.

use crate::persona::tables::interest_matches;
use crate::persona::AgeBracket;

use super::types::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteTheme {
    Energy,
    Luxury,
    Innovation,
    Trust,
}

enum Trigger {
    Interests(&'static [&'static str]),
    Age(AgeBracket),
}

struct PaletteRule {
    trigger: Trigger,
    theme: PaletteTheme,
}

// First matching rule wins; interest rules are checked before age rules.
const PALETTE_RULES: &[PaletteRule] = &[
    PaletteRule {
        trigger: Trigger::Interests(&["fitness", "sports", "gaming", "music", "dance", "adventure"]),
        theme: PaletteTheme::Energy,
    },
    PaletteRule {
        trigger: Trigger::Interests(&["fashion", "luxury", "beauty", "jewelry", "design", "art"]),
        theme: PaletteTheme::Luxury,
    },
    PaletteRule {
        trigger: Trigger::Interests(&["technology", "tech", "ai", "software", "science", "digital", "startup"]),
        theme: PaletteTheme::Innovation,
    },
    PaletteRule {
        trigger: Trigger::Age(AgeBracket::Age18To24),
        theme: PaletteTheme::Energy,
    },
    PaletteRule {
        trigger: Trigger::Age(AgeBracket::Age45To54),
        theme: PaletteTheme::Luxury,
    },
];

impl PaletteTheme {
    fn variants(&self) -> [[&'static str; 3]; 3] {
        match self {
            PaletteTheme::Energy => [
                ["#FF6B35", "#F7931E", "#FFD23F"],
                ["#E63946", "#F4A261", "#2A9D8F"],
                ["#FF006E", "#FB5607", "#FFBE0B"],
            ],
            PaletteTheme::Luxury => [
                ["#1A1A2E", "#C9A227", "#F5F5F5"],
                ["#2C2C54", "#B8860B", "#EAEAEA"],
                ["#000000", "#D4AF37", "#FFFFFF"],
            ],
            PaletteTheme::Innovation => [
                ["#3A86FF", "#8338EC", "#06D6A0"],
                ["#0077B6", "#00B4D8", "#90E0EF"],
                ["#7209B7", "#3A0CA3", "#4CC9F0"],
            ],
            PaletteTheme::Trust => [
                ["#1D3557", "#457B9D", "#A8DADC"],
                ["#003049", "#669BBC", "#FDF0D5"],
                ["#264653", "#2A9D8F", "#E9C46A"],
            ],
        }
    }

    fn rationale(&self) -> &'static str {
        match self {
            PaletteTheme::Energy => "warm, saturated tones create excitement and prompt action",
            PaletteTheme::Luxury => "deep neutrals with gold accents signal exclusivity",
            PaletteTheme::Innovation => "cool blues and violets read as modern and forward-looking",
            PaletteTheme::Trust => "calm blues and grounded neutrals build credibility",
        }
    }
}

pub fn choose_theme(age_bracket: &str, interests: &[String]) -> PaletteTheme {
    let bracket = AgeBracket::from_label_or_default(age_bracket);
    PALETTE_RULES
        .iter()
        .find(|rule| match &rule.trigger {
            Trigger::Interests(keys) => interests
                .iter()
                .any(|interest| keys.iter().any(|key| interest_matches(interest, key))),
            Trigger::Age(target) => *target == bracket,
        })
        .map(|rule| rule.theme)
        .unwrap_or(PaletteTheme::Trust)
}

/// The theme's hex triple for `platform` plus its rationale.
pub fn palette_for(theme: PaletteTheme, platform: Platform) -> String {
    let colors = theme.variants()[platform.index()];
    format!("{} - {}", colors.join(", "), theme.rationale())
}
