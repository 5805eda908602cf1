use chrono::Local;

// Common text blocks for all prompts
pub const DONT_TELL_ME: &str = r#"
Important instructions for your responses:

1. Do not narrate or describe your actions.
2. Do not summarize or restate the instructions I've given you.
3. Do not preface your responses with phrases like "Here's your ad copy..." or "I will now..."
4. Do not acknowledge or confirm that you understand these instructions.
5. Simply proceed with the task, without any meta-commentary.
6. Avoid phrases like "As an AI language model..." or similar self-referential statements.

Your responses should appear as if they're coming from an experienced copywriter who naturally follows these guidelines without needing to mention them.
"#;

pub const WRITE_IN_CLEAR_ENGLISH: &str = r#"
Language Standards for Output:
1. Write all content in clear American English, using American spelling and grammar.
2. Writing Style:
   - Use clear, accessible language suited to the platform
   - Avoid region-specific idioms unless the audience is local to that region
   - Use active voice
3. Never invent statistics, prices, awards or customer counts.
"#;

/// Utility function to get the current date in a human-readable format
pub fn current_date() -> String {
    let today = Local::now();
    format!(
        "{} {}, {}",
        today.format("%B"),
        today.format("%-d"),
        today.format("%Y")
    )
}

/// Joins the first `limit` items with ", ", or returns `fallback` when there are none.
pub fn join_first(items: &[String], limit: usize, fallback: &str) -> String {
    if items.is_empty() {
        return fallback.to_string();
    }
    items
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_first() {
        let items: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(join_first(&items, 3, "none"), "a, b, c");
        assert_eq!(join_first(&[], 3, "none"), "none");
    }
}
