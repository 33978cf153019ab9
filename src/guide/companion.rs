//! Journal insights and affirmations.

use rand::seq::SliceRandom;
use tracing::warn;

use crate::oracle::{OracleError, TextOracle};
use crate::types::JournalEntry;

/// Affirmations used when the oracle is unavailable.
pub const FALLBACK_AFFIRMATIONS: [&str; 5] = [
    "I am stronger than I know and capable of handling whatever comes my way.",
    "I deserve peace, happiness, and all the good things life has to offer.",
    "Every breath I take fills me with calm and centers my mind.",
    "I trust myself to make choices that honor my wellbeing.",
    "I am worthy of love, respect, and compassion - especially from myself.",
];

/// Asks the oracle for insights on a journal entry.
///
/// # Errors
///
/// Propagates the oracle error unchanged.
pub async fn analyze_journal_entry<O: TextOracle>(
    oracle: &O,
    entry: &JournalEntry,
) -> Result<String, OracleError> {
    let mood = entry
        .mood
        .as_deref()
        .map(|m| format!("The writer tagged their mood as \"{m}\".\n"))
        .unwrap_or_default();
    let prompt = format!(
        "Analyze the following journal entry and provide insights:\n{mood}Title: {}\n{}",
        entry.title, entry.content
    );
    oracle.complete(&prompt).await
}

fn affirmation_prompt(mood: Option<&str>) -> String {
    let mood = mood.map(str::trim).filter(|m| !m.is_empty()).unwrap_or("neutral");
    format!(
        "Generate a personalized, uplifting affirmation for someone who might be feeling {mood}.\n\
         Make it personal, positive, and empowering.\n\n\
         Guidelines:\n\
         - Use \"I am\" or \"I\" statements\n\
         - Focus on inner strength and self-worth\n\
         - Be specific to the mood if provided\n\
         - Keep it under 25 words\n\
         - Make it feel genuine and meaningful\n\
         - Avoid clichés\n\n\
         Return only the affirmation text, no quotes or extra formatting."
    )
}

/// Generates an affirmation, falling back to a fixed list on any failure.
pub async fn generate_affirmation<O: TextOracle>(oracle: &O, mood: Option<&str>) -> String {
    match oracle.complete(&affirmation_prompt(mood)).await {
        Ok(text) => {
            let text = text.trim().trim_matches('"').trim();
            if text.is_empty() {
                fallback_affirmation().to_string()
            } else {
                text.to_string()
            }
        }
        Err(err) => {
            warn!(error = %err, "affirmation request failed, using fallback");
            fallback_affirmation().to_string()
        }
    }
}

/// Picks one of the [`FALLBACK_AFFIRMATIONS`] at random.
pub fn fallback_affirmation() -> &'static str {
    FALLBACK_AFFIRMATIONS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_AFFIRMATIONS[0])
}
