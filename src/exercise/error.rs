//! Exercise validation error types.
//!
//! Every way an exercise record can be malformed has its own variant so
//! callers can report a precise reason while still treating all of them
//! the same way: the record is discarded and nothing else changes.

use thiserror::Error;

/// Errors raised while building or validating an [`Exercise`](super::Exercise).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExerciseError {
    /// The oracle response contained no JSON object at all.
    #[error("no exercise JSON found in response")]
    NoJsonFound,

    /// The JSON could not be decoded into an exercise record.
    #[error("malformed exercise JSON: {0}")]
    MalformedJson(String),

    /// A required field is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A required text field is present but blank.
    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),

    /// The category tag is not one of the known categories.
    #[error("unknown exercise category: {0}")]
    UnknownCategory(String),

    /// The steps list is empty.
    #[error("exercise must contain at least one step")]
    NoSteps,

    /// A step is missing its label.
    #[error("step {step} has no label")]
    MissingLabel {
        /// Zero-based step index
        step: usize,
    },

    /// A breathing step has no duration.
    #[error("breathing step {step} has no duration")]
    MissingDuration {
        /// Zero-based step index
        step: usize,
    },

    /// A breathing step duration is zero, negative, fractional or not a number.
    #[error("breathing step {step} has an invalid duration: {value}")]
    InvalidDuration {
        /// Zero-based step index
        step: usize,
        /// The rejected value as it appeared in the payload
        value: String,
    },

    /// The steps do not match the category (timed steps for a breathing
    /// exercise, untimed steps otherwise).
    #[error("{category} exercise cannot use these steps")]
    StepKindMismatch {
        /// Category of the rejected exercise
        category: String,
    },

    /// The title collides with one of the built-in exercises.
    #[error("title \"{0}\" is reserved by a built-in exercise")]
    ReservedTitle(String),

    /// The key is already used by an exercise in the catalog.
    #[error("exercise key \"{0}\" already exists")]
    DuplicateKey(String),
}

impl ExerciseError {
    /// Returns true if the response could not be decoded at all, as
    /// opposed to decoding into a record that failed validation.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::NoJsonFound | Self::MalformedJson(_))
    }

    /// Returns a short message suitable for showing to the user.
    #[must_use]
    pub fn notice(&self) -> &'static str {
        if self.is_parse_error() {
            "Error loading exercise. Please try again."
        } else {
            "Invalid exercise format. Try again."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExerciseError::MissingField("steps");
        assert!(err.to_string().contains("steps"));

        let err = ExerciseError::InvalidDuration {
            step: 2,
            value: "0".to_string(),
        };
        assert!(err.to_string().contains("step 2"));
        assert!(err.to_string().contains('0'));

        let err = ExerciseError::ReservedTitle("4-7-8 Breathing".to_string());
        assert!(err.to_string().contains("4-7-8 Breathing"));
    }

    #[test]
    fn test_is_parse_error() {
        assert!(ExerciseError::NoJsonFound.is_parse_error());
        assert!(ExerciseError::MalformedJson("x".into()).is_parse_error());
        assert!(!ExerciseError::NoSteps.is_parse_error());
        assert!(!ExerciseError::MissingField("key").is_parse_error());
    }

    #[test]
    fn test_notice() {
        assert!(ExerciseError::NoJsonFound.notice().contains("Error loading"));
        assert!(ExerciseError::NoSteps.notice().contains("Invalid exercise format"));
    }
}
