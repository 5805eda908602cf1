use crate::persona::AgeBracket;
use crate::prompt::common::join_first;

const DEFAULT_LOCATION_STYLE: &str = "professional, neutral background";

const LOCATION_STYLES: &[(&str, &str)] = &[
    ("new york", "urban professional, metropolitan background"),
    ("california", "casual professional, modern tech environment"),
    ("london", "sophisticated European style, classic setting"),
    ("texas", "confident, approachable, modern setting"),
];

fn age_descriptor(bracket: AgeBracket) -> &'static str {
    match bracket {
        AgeBracket::Age18To24 => "young adult, energetic, modern style",
        AgeBracket::Age25To34 => "professional young adult, confident, contemporary",
        AgeBracket::Age35To44 => "mature professional, established, polished",
        AgeBracket::Age45To54 => "experienced professional, sophisticated, refined",
        AgeBracket::Age55Plus => "mature, distinguished, classic style",
    }
}

fn location_style(location: &str) -> &'static str {
    let location = location.to_lowercase();
    LOCATION_STYLES
        .iter()
        .find(|(marker, _)| location.contains(marker))
        .map(|(_, style)| *style)
        .unwrap_or(DEFAULT_LOCATION_STYLE)
}

/// Prompt for a photorealistic persona headshot.
pub fn persona_image_prompt(
    age_bracket: &str,
    location: &str,
    interests: &[String],
    keywords: &[String],
) -> String {
    let interests_desc = if interests.is_empty() {
        "to have diverse interests".to_string()
    } else {
        format!("interested in {}", join_first(interests, 3, ""))
    };
    let keywords_desc = if keywords.is_empty() {
        String::new()
    } else {
        format!(", embodying {}", join_first(keywords, 3, ""))
    };

    format!(
        r#"A realistic, professional headshot of a {age_desc} person, {location_style}.
The person appears {interests_desc}{keywords_desc}.
High quality, professional lighting, approachable expression,
suitable for marketing persona representation.
Photorealistic style, business casual attire."#,
        age_desc = age_descriptor(AgeBracket::from_label_or_default(age_bracket)),
        location_style = location_style(location),
        interests_desc = interests_desc,
        keywords_desc = keywords_desc,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_location_style_first_match() {
        assert_eq!(location_style("Brooklyn, New York"), "urban professional, metropolitan background");
        assert_eq!(location_style("Austin, TX"), DEFAULT_LOCATION_STYLE);
    }

    #[test]
    fn test_prompt_uses_first_three() {
        let prompt = persona_image_prompt(
            "18-24",
            "London",
            &strings(&["art", "music", "travel", "food"]),
            &strings(&["authentic", "bold", "local", "extra"]),
        );
        assert!(prompt.starts_with("A realistic, professional headshot of a young adult, energetic, modern style person"));
        assert!(prompt.contains("interested in art, music, travel,"));
        assert!(!prompt.contains("food"));
        assert!(prompt.contains("embodying authentic, bold, local."));
    }

    #[test]
    fn test_prompt_without_interests() {
        let prompt = persona_image_prompt("unknown", "", &[], &[]);
        assert!(prompt.contains("professional young adult, confident, contemporary"));
        assert!(prompt.contains("The person appears to have diverse interests.\n"));
        assert!(!prompt.contains(", ."));
    }
}
