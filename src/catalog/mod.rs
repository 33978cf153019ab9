//! Exercise catalog.
//!
//! The catalog is an ordered list of immutable exercises shared by
//! reference. It starts with the built-in defaults and only ever grows:
//! records appended at runtime are validated first, and a rejected record
//! leaves the catalog exactly as it was.

pub mod defaults;

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::exercise::{Exercise, ExerciseError, Suggestion};

pub use defaults::{builtin_exercises, BREATHING_478_KEY, GROUNDING_54321_KEY};

/// Ordered, append-only collection of exercises.
#[derive(Debug, Clone)]
pub struct Catalog {
    exercises: Vec<Arc<Exercise>>,
    builtin_count: usize,
}

impl Catalog {
    /// Creates a catalog whose built-in entries are `exercises`.
    pub fn new(exercises: Vec<Exercise>) -> Self {
        let exercises: Vec<_> = exercises.into_iter().map(Arc::new).collect();
        Self {
            builtin_count: exercises.len(),
            exercises,
        }
    }

    /// Creates a catalog holding the built-in exercises.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in definition fails validation.
    pub fn with_defaults() -> Result<Self, ExerciseError> {
        Ok(Self::new(builtin_exercises()?))
    }

    /// Number of exercises.
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    /// Returns true if the catalog holds no exercises.
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Returns the exercise at `index`.
    pub fn get(&self, index: usize) -> Option<&Arc<Exercise>> {
        self.exercises.get(index)
    }

    /// Looks up an exercise by key.
    pub fn find(&self, key: &str) -> Option<&Arc<Exercise>> {
        self.exercises.iter().find(|e| e.key() == key)
    }

    /// Iterates over all exercises in order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Exercise>> {
        self.exercises.iter()
    }

    /// Titles of the built-in exercises, which appended records may not reuse.
    pub fn reserved_titles(&self) -> impl Iterator<Item = &str> {
        self.exercises[..self.builtin_count].iter().map(|e| e.title())
    }

    /// Appends a validated exercise and returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`ExerciseError::ReservedTitle`] if the title matches a
    /// built-in exercise, or [`ExerciseError::DuplicateKey`] if the key is
    /// already taken. The catalog is unchanged on error.
    pub fn append(&mut self, exercise: Exercise) -> Result<usize, ExerciseError> {
        let title = exercise.title().trim();
        if self
            .reserved_titles()
            .any(|reserved| reserved.eq_ignore_ascii_case(title))
        {
            debug!(title, "rejected exercise with reserved title");
            return Err(ExerciseError::ReservedTitle(title.to_string()));
        }
        if self.find(exercise.key()).is_some() {
            debug!(key = exercise.key(), "rejected exercise with duplicate key");
            return Err(ExerciseError::DuplicateKey(exercise.key().to_string()));
        }

        info!(
            key = exercise.key(),
            category = %exercise.category(),
            "appended exercise to catalog"
        );
        self.exercises.push(Arc::new(exercise));
        Ok(self.exercises.len() - 1)
    }

    /// Appends an oracle suggestion under a freshly generated unique key.
    ///
    /// # Errors
    ///
    /// Same as [`Catalog::append`].
    pub fn append_suggestion(&mut self, suggestion: &Suggestion) -> Result<usize, ExerciseError> {
        let key = format!("custom-{}", Uuid::new_v4().simple());
        self.append(suggestion.exercise.clone().with_key(key))
    }
}

impl std::ops::Index<usize> for Catalog {
    type Output = Arc<Exercise>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.exercises[index]
    }
}

// ============================================================================
// Tests
// ============================================================================
