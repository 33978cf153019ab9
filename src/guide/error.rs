//! Guide error types.
//!
//! None of these are fatal. Each maps to a short notice for the user and
//! the catalog and any running session stay exactly as they were.

use thiserror::Error;

use crate::exercise::ExerciseError;
use crate::oracle::OracleError;

/// Errors from the recommendation and feedback flows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuideError {
    /// The mood description was blank.
    #[error("describe how you are feeling first")]
    EmptyMood,

    /// There are no grounding responses to review.
    #[error("no responses to review yet")]
    NothingToReview,

    /// The oracle call failed.
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// The oracle answered with something that is not a usable exercise.
    #[error("rejected suggested exercise: {0}")]
    Rejected(#[from] ExerciseError),
}

impl GuideError {
    /// Returns a short message suitable for showing to the user.
    #[must_use]
    pub fn notice(&self) -> &'static str {
        match self {
            Self::EmptyMood => "Tell us how you're feeling to get a suggestion.",
            Self::NothingToReview => "Write a response first to get feedback.",
            Self::Oracle(_) => "Sorry, there was an error getting the AI response.",
            Self::Rejected(err) => err.notice(),
        }
    }
}
