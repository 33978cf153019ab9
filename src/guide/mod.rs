//! AI-guided recommendations and feedback.
//!
//! This module sits between the text oracle and the rest of the crate:
//! - `mood`: which category to ask for
//! - `feedback`: prompts and formatting for grounding-response feedback
//! - `companion`: journal insights and affirmations
//! - `error`: [`GuideError`] with user-facing notices
//!
//! A recommendation either appends one validated exercise to the catalog
//! or fails with a [`GuideError`]; on failure the catalog is untouched.

pub mod companion;
pub mod error;
pub mod feedback;
pub mod mood;

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::exercise::{parse_suggestion, Exercise, ExerciseCategory};
use crate::oracle::TextOracle;

pub use companion::{
    analyze_journal_entry, fallback_affirmation, generate_affirmation, FALLBACK_AFFIRMATIONS,
};
pub use error::GuideError;
pub use feedback::{feedback_prompt, format_feedback};
pub use mood::preferred_category;

/// A suggestion that made it into the catalog.
#[derive(Debug, Clone)]
pub struct Recommendation {
    /// Catalog index of the appended exercise
    pub index: usize,
    /// The appended exercise
    pub exercise: Arc<Exercise>,
    /// Short tip from the oracle, if it gave one
    pub tip: Option<String>,
}

/// Builds the prompt asking for one new exercise.
pub fn recommendation_prompt<'a>(
    mood: &str,
    category: ExerciseCategory,
    reserved_titles: impl IntoIterator<Item = &'a str>,
) -> String {
    let reserved = reserved_titles
        .into_iter()
        .map(|t| format!("\"{t}\""))
        .collect::<Vec<_>>()
        .join(" and ");
    let category = category.as_str();
    format!(
        "Based on the user's feeling: \"{mood}\". Suggest a unique anxiety relief exercise of \
         type \"{category}\", different from {reserved}. For breathing, each step must include \
         label, seconds (number), instruction, scale (number like 1.3), color (hex like \
         \"#6ee7b7\"). For others, each step must include label, instruction, prompt. Include a \
         short tip (50 characters or less). Respond strictly with a JSON object: {{\"key\": \
         \"custom\", \"type\": \"{category}\", \"title\": \"Title here\", \"description\": \
         \"Description here\", \"steps\": [array of step objects], \"note\": \"Optional note\", \
         \"tips\": \"Short tip\"}}"
    )
}

/// Recommendation and feedback front end over a [`TextOracle`].
#[derive(Debug)]
pub struct Guide<O> {
    oracle: O,
    rotation: usize,
}

impl<O: TextOracle> Guide<O> {
    /// Creates a guide starting at the first category of the rotation.
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            rotation: 0,
        }
    }

    /// The underlying oracle.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Number of successful recommendations so far.
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    /// Category the next request will ask for, given `mood`.
    pub fn next_category(&self, mood: &str) -> ExerciseCategory {
        preferred_category(self.rotation, mood)
    }

    /// Asks the oracle for a new exercise and appends it to `catalog`.
    ///
    /// `category` overrides the rotation/mood choice. The rotation only
    /// advances when an exercise is actually appended.
    ///
    /// # Errors
    ///
    /// Returns a [`GuideError`] if the mood is blank, the oracle fails, or
    /// the reply is not a valid, non-reserved exercise. The catalog is
    /// unchanged on error.
    pub async fn recommend(
        &mut self,
        catalog: &mut Catalog,
        mood: &str,
        category: Option<ExerciseCategory>,
    ) -> Result<Recommendation, GuideError> {
        let mood = mood.trim();
        if mood.is_empty() {
            return Err(GuideError::EmptyMood);
        }

        let category = category.unwrap_or_else(|| self.next_category(mood));
        let prompt = recommendation_prompt(mood, category, catalog.reserved_titles());

        let reply = self.oracle.complete(&prompt).await.map_err(|err| {
            warn!(error = %err, "recommendation request failed");
            GuideError::from(err)
        })?;

        let suggestion = parse_suggestion(&reply).map_err(|err| {
            warn!(error = %err, "discarding malformed exercise suggestion");
            GuideError::from(err)
        })?;

        let index = catalog.append_suggestion(&suggestion)?;
        self.rotation += 1;

        let exercise = Arc::clone(&catalog[index]);
        info!(
            key = exercise.key(),
            requested = %category,
            "added recommended exercise"
        );

        Ok(Recommendation {
            index,
            exercise,
            tip: suggestion.tip,
        })
    }

    /// Asks for feedback on grounding responses and condenses it.
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::NothingToReview`] when every response is blank,
    /// or [`GuideError::Oracle`] if the request fails.
    pub async fn feedback(
        &self,
        exercise: &Exercise,
        responses: &BTreeMap<usize, String>,
    ) -> Result<String, GuideError> {
        if responses.values().all(|r| r.trim().is_empty()) {
            return Err(GuideError::NothingToReview);
        }
        let prompt = feedback_prompt(exercise.title(), responses);
        let raw = self.oracle.complete(&prompt).await?;
        Ok(format_feedback(&raw))
    }
}

// ============================================================================
// Tests
// ============================================================================
