use crate::ad_copy::Platform;
use crate::news::NewsInsights;
use crate::persona::PersonaAnalysis;
use crate::prompt::common::{current_date, join_first, DONT_TELL_ME, WRITE_IN_CLEAR_ENGLISH};

/// Prompt asking for one platform's ad copy in five labeled sections.
///
/// The labels are read back line by line, so the response format block must
/// stay in sync with `ad_copy::parser`.
pub fn ad_copy_prompt(
    platform: Platform,
    analysis: &PersonaAnalysis,
    insights: &NewsInsights,
    age_bracket: &str,
    interests: &[String],
    location: &str,
) -> String {
    let keywords = &analysis.trending_keywords_analysis;
    format!(
        r#"You are writing a {platform} advertisement for the audience described below.
Today's date: {date}

## AUDIENCE
* Age bracket: {age_bracket}
* Location: {location}
* Interests: {interests}
* Trending keywords: {keywords}
* Primary motivators: {motivators}

## MARKET CONTEXT
{insight_summary}
Recommendations:
{recommendations}

## PLATFORM GUIDELINES
* Style: {style}
* Tone: {tone}
* Keep the headline under 60 characters and the body under 300 characters.
* Suggest a three-color palette as hex codes followed by a one-line rationale.

## RESPONSE FORMAT
Answer with exactly these five labeled sections, each label on its own line, and nothing else:

HEADLINE:
<one line>
BODY:
<two to four sentences>
KEYWORDS:
<three to five comma-separated keywords>
CTA:
<a short call to action>
COLOR_PALETTE:
<#RRGGBB, #RRGGBB, #RRGGBB - rationale>

{dont_tell_me}
{clear_english}"#,
        platform = platform.display_name(),
        date = current_date(),
        age_bracket = age_bracket,
        location = location,
        interests = join_first(interests, interests.len(), "varied interests"),
        keywords = join_first(&keywords.keywords, 8, "none"),
        motivators = join_first(&keywords.primary_motivators, 5, "none"),
        insight_summary = insights.summary,
        recommendations = insights
            .actionable_recommendations
            .iter()
            .map(|r| format!("- {}", r))
            .collect::<Vec<_>>()
            .join("\n"),
        style = platform.style(),
        tone = platform.tone(),
        dont_tell_me = DONT_TELL_ME,
        clear_english = WRITE_IN_CLEAR_ENGLISH,
    )
}
