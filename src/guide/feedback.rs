//! Feedback on grounding-style responses.

use std::collections::BTreeMap;

const DEFAULT_PRAISE: &str = "Great job with your exercise!";
const DEFAULT_SUGGESTION: &str = "- Try a calming activity like deep breathing.";
const MAX_SUGGESTIONS: usize = 3;

/// Builds the prompt asking for feedback on the user's step responses.
pub fn feedback_prompt(title: &str, responses: &BTreeMap<usize, String>) -> String {
    let joined = responses
        .values()
        .map(|r| r.trim())
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Analyze the user's responses in the \"{title}\" exercise: \"{joined}\". \
         Provide concise positive feedback and 2-3 psychological suggestions for anxiety relief \
         based on their input. For visualization exercises, suggest alternatives (e.g., sensory \
         anchors, daily integrations) for when the user can't access their peaceful place. \
         Return plain text with one positive feedback sentence and bullet points for suggestions."
    )
}

/// Condenses free-form model feedback into one line of praise plus at most
/// three suggestions.
///
/// Praise is the first line containing "wonderful", "great" or "fantastic".
/// Suggestions are lines starting with `*` or containing "suggest", "try" or
/// "focus". Matching is case-sensitive and a line may serve as both. Only
/// `*` items are rewritten as `- ` bullets; other lines are kept as written.
pub fn format_feedback(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| {
            !line.contains("**Positive Feedback**") && !line.contains("**Psychological Suggestions**")
        })
        .collect();

    let praise = lines
        .iter()
        .find(|line| {
            ["wonderful", "great", "fantastic"]
                .iter()
                .any(|word| line.contains(word))
        })
        .copied()
        .unwrap_or(DEFAULT_PRAISE);

    let suggestions: Vec<String> = lines
        .iter()
        .filter(|line| {
            line.starts_with('*')
                || ["suggest", "try", "focus"]
                    .iter()
                    .any(|word| line.contains(word))
        })
        .take(MAX_SUGGESTIONS)
        .map(|line| as_suggestion(line))
        .collect();

    let suggestions = if suggestions.is_empty() {
        DEFAULT_SUGGESTION.to_string()
    } else {
        suggestions.join("\n")
    };

    format!("{praise}\n\nSuggestions:\n{suggestions}")
}

fn as_suggestion(line: &str) -> String {
    let line = match line.strip_prefix('*') {
        Some(body) => format!("- {}", body.trim_start()),
        None => line.to_string(),
    };
    match line.strip_suffix(':') {
        Some(body) => body.trim_end().to_string(),
        None => line,
    }
}
