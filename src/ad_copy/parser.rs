//! Reads labeled ad copy sections out of free text.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use super::types::{AdCopy, Platform};
use crate::error::{IntelError, Mode, Outcome};
use crate::TARGET_LLM_REQUEST;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Headline,
    Body,
    Keywords,
    Cta,
    ColorPalette,
}

const SECTIONS: [(Section, &str); 5] = [
    (Section::Headline, "HEADLINE"),
    (Section::Body, "BODY"),
    (Section::Keywords, "KEYWORDS"),
    (Section::Cta, "CTA"),
    (Section::ColorPalette, "COLOR_PALETTE"),
];

/// Recognizes `LABEL:` at the start of a line, tolerating markdown emphasis
/// around the label. Returns the section and any text after the colon.
fn label_line(line: &str) -> Option<(Section, &str)> {
    let stripped = line.trim().trim_start_matches(['*', '#', '-', ' ']);
    SECTIONS.iter().find_map(|(section, label)| {
        let rest = stripped.strip_prefix(label)?;
        let rest = rest.trim_start_matches('*').strip_prefix(':')?;
        Some((*section, rest.trim_start_matches('*').trim()))
    })
}

#[derive(Default)]
struct RawSections {
    headline: Vec<String>,
    body: Vec<String>,
    keywords: Vec<String>,
    cta: Vec<String>,
    color_palette: Vec<String>,
}

impl RawSections {
    fn lines_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Headline => &mut self.headline,
            Section::Body => &mut self.body,
            Section::Keywords => &mut self.keywords,
            Section::Cta => &mut self.cta,
            Section::ColorPalette => &mut self.color_palette,
        }
    }
}

fn scan(response: &str) -> RawSections {
    let mut sections = RawSections::default();
    let mut current: Option<Section> = None;

    for line in response.lines() {
        if let Some((section, rest)) = label_line(line) {
            current = Some(section);
            if !rest.is_empty() {
                sections.lines_mut(section).push(rest.to_string());
            }
        } else if let Some(section) = current {
            let line = line.trim();
            if !line.is_empty() {
                sections.lines_mut(section).push(line.to_string());
            }
        }
    }
    sections
}

fn joined(lines: &[String]) -> Option<String> {
    let text = lines.join(" ");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

// Commas, or a hashtag that follows whitespace ("#fit #run").
static KEYWORD_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",|\s+#").expect("valid keyword separator pattern"));

fn split_keywords(lines: &[String]) -> Option<Vec<String>> {
    let keywords: Vec<String> = lines
        .iter()
        .flat_map(|line| KEYWORD_SEPARATOR.split(line))
        .map(|k| k.trim().trim_start_matches('#').trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();
    (!keywords.is_empty()).then_some(keywords)
}

/// Parses a generated response, filling any missing section from `fallback`.
///
/// Missing sections are reported as a `Parse` recovery. When nothing at all
/// could be read the result is entirely `fallback` and the mode is `Mock`.
pub fn parse_ad_copy(response: &str, platform: Platform, fallback: &AdCopy) -> Outcome<AdCopy> {
    let raw = scan(response);
    let mut missing = Vec::new();

    let mut take = |value: Option<String>, label: &'static str, default: &String| {
        value.unwrap_or_else(|| {
            missing.push(label);
            default.clone()
        })
    };
    let headline = take(joined(&raw.headline), "HEADLINE", &fallback.headline);
    let body = take(joined(&raw.body), "BODY", &fallback.body);
    let cta = take(joined(&raw.cta), "CTA", &fallback.cta);
    let color_palette = take(joined(&raw.color_palette), "COLOR_PALETTE", &fallback.color_palette);
    let keywords = split_keywords(&raw.keywords).unwrap_or_else(|| {
        missing.push("KEYWORDS");
        fallback.keywords.clone()
    });

    let copy = AdCopy {
        headline,
        body,
        keywords,
        cta,
        color_palette,
    };

    if missing.is_empty() {
        return Outcome::primary(copy, Mode::Real);
    }

    warn!(target: TARGET_LLM_REQUEST, "{} ad copy missing {}, using template values", platform, missing.join(", "));
    let mode = if missing.len() == SECTIONS.len() {
        Mode::Mock
    } else {
        Mode::Real
    };
    let cause = IntelError::Parse(format!("{} missing {}", platform, missing.join(", ")));
    Outcome::recovered(copy, mode, cause)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback() -> AdCopy {
        AdCopy {
            headline: "Fallback headline".to_string(),
            body: "Fallback body".to_string(),
            keywords: vec!["fallback".to_string()],
            cta: "Shop Now".to_string(),
            color_palette: "#1D3557, #457B9D, #A8DADC - calm".to_string(),
        }
    }

    #[test]
    fn test_parses_all_sections() {
        let response = "HEADLINE: Run further, recover faster\nBODY:\nTraining built around you.\nStart today.\nKEYWORDS: running, #recovery, , wellness\nCTA: Join Free\nCOLOR_PALETTE:\n#FF6B35, #F7931E, #FFD23F - energetic warmth\n";
        let outcome = parse_ad_copy(response, Platform::Instagram, &fallback());

        assert!(!outcome.is_recovered());
        assert_eq!(outcome.mode, Mode::Real);
        let copy = outcome.value;
        assert_eq!(copy.headline, "Run further, recover faster");
        assert_eq!(copy.body, "Training built around you. Start today.");
        assert_eq!(copy.keywords, vec!["running", "recovery", "wellness"]);
        assert_eq!(copy.cta, "Join Free");
        assert_eq!(copy.color_palette, "#FF6B35, #F7931E, #FFD23F - energetic warmth");
    }

    #[test]
    fn test_space_separated_hashtags() {
        let response = "HEADLINE: h\nBODY: b\nKEYWORDS: #fit #run\t#C# , recovery\nCTA: c\nCOLOR_PALETTE: p";
        let outcome = parse_ad_copy(response, Platform::TikTok, &fallback());
        assert!(!outcome.is_recovered());
        assert_eq!(outcome.value.keywords, vec!["fit", "run", "C#", "recovery"]);
    }

    #[test]
    fn test_markdown_labels() {
        let response = "**HEADLINE:** Bold move\n**BODY:** Text\n**KEYWORDS:** a, b\n**CTA:** Go\n**COLOR_PALETTE:** #000000, #FFFFFF, #D4AF37 - contrast";
        let outcome = parse_ad_copy(response, Platform::LinkedIn, &fallback());
        assert!(!outcome.is_recovered());
        assert_eq!(outcome.value.headline, "Bold move");
        assert_eq!(outcome.value.cta, "Go");
    }

    #[test]
    fn test_missing_section_uses_fallback_field() {
        let response = "HEADLINE: Only a headline\nBODY: And a body";
        let outcome = parse_ad_copy(response, Platform::TikTok, &fallback());

        assert_eq!(outcome.mode, Mode::Real);
        assert_eq!(outcome.value.headline, "Only a headline");
        assert_eq!(outcome.value.cta, "Shop Now");
        assert_eq!(outcome.value.keywords, vec!["fallback"]);
        assert_eq!(
            outcome.recovery,
            Some(IntelError::Parse("tiktok missing CTA, COLOR_PALETTE, KEYWORDS".into()))
        );
    }

    #[test]
    fn test_unstructured_text_is_all_fallback() {
        let outcome = parse_ad_copy("Sure! Here is a great ad for you.", Platform::Instagram, &fallback());
        assert_eq!(outcome.value, fallback());
        assert_eq!(outcome.mode, Mode::Mock);
        assert!(matches!(outcome.recovery, Some(IntelError::Parse(_))));
    }

    #[test]
    fn test_text_before_first_label_is_ignored() {
        let response = "Here you go\nHEADLINE:\nFresh start\nCTA: Try it";
        let outcome = parse_ad_copy(response, Platform::Instagram, &fallback());
        assert_eq!(outcome.value.headline, "Fresh start");
        assert_eq!(outcome.value.cta, "Try it");
    }
}
