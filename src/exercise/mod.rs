//! Exercise definitions.
//!
//! An [`Exercise`] is an immutable, validated sequence of steps. Breathing
//! exercises carry timed steps that drive the countdown; grounding,
//! visualization and mindfulness exercises carry untimed steps that only
//! move on explicit navigation.
//!
//! Exercises can only be built through [`Exercise::new`] (or the payload
//! parser in [`payload`]), so every value in circulation already satisfies
//! the invariants: non-empty key, at least one step, step kind matching the
//! category, and every duration at least one second.

pub mod error;
pub mod payload;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use error::ExerciseError;
pub use payload::{extract_json_block, parse_suggestion, Suggestion};

// ============================================================================
// ExerciseCategory
// ============================================================================

/// The kind of relaxation technique an exercise belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseCategory {
    /// Timed breathing pattern
    Breathing,
    /// Sensory grounding
    Grounding,
    /// Guided imagery
    Visualization,
    /// Mindful attention
    Mindfulness,
}

impl ExerciseCategory {
    /// All categories in recommendation rotation order.
    pub const ALL: [ExerciseCategory; 4] = [
        ExerciseCategory::Breathing,
        ExerciseCategory::Grounding,
        ExerciseCategory::Visualization,
        ExerciseCategory::Mindfulness,
    ];

    /// Returns the string representation of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseCategory::Breathing => "breathing",
            ExerciseCategory::Grounding => "grounding",
            ExerciseCategory::Visualization => "visualization",
            ExerciseCategory::Mindfulness => "mindfulness",
        }
    }

    /// Returns true if exercises of this category run on a countdown.
    pub fn is_timed(&self) -> bool {
        matches!(self, ExerciseCategory::Breathing)
    }
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseCategory {
    type Err = ExerciseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breathing" => Ok(ExerciseCategory::Breathing),
            "grounding" => Ok(ExerciseCategory::Grounding),
            "visualization" => Ok(ExerciseCategory::Visualization),
            "mindfulness" => Ok(ExerciseCategory::Mindfulness),
            _ => Err(ExerciseError::UnknownCategory(s.to_string())),
        }
    }
}

// ============================================================================
// Steps
// ============================================================================

/// One timed phase of a breathing exercise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreathingStep {
    /// Short phase name ("Inhale", "Hold", ...)
    pub label: String,
    /// Phase length in whole seconds (always >= 1)
    #[serde(rename = "seconds")]
    pub duration_secs: u32,
    /// What the user should do during the phase
    pub instruction: String,
    /// Presentation scale factor for the breathing circle
    pub scale: f64,
    /// Display color as a hex string
    pub color: String,
}

impl BreathingStep {
    /// Creates a breathing step.
    pub fn new(
        label: impl Into<String>,
        duration_secs: u32,
        instruction: impl Into<String>,
        scale: f64,
        color: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            duration_secs,
            instruction: instruction.into(),
            scale,
            color: color.into(),
        }
    }
}

/// One untimed phase of a grounding-style exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroundingStep {
    /// Short phase name ("5 Sights", ...)
    pub label: String,
    /// What the user should do during the phase
    pub instruction: String,
    /// Placeholder text for the user's response
    pub prompt: String,
}

impl GroundingStep {
    /// Creates a grounding step.
    pub fn new(
        label: impl Into<String>,
        instruction: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            instruction: instruction.into(),
            prompt: prompt.into(),
        }
    }
}

/// The ordered steps of an exercise, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExerciseSteps {
    /// Countdown-driven steps (breathing)
    Timed(Vec<BreathingStep>),
    /// Navigation-driven steps (grounding, visualization, mindfulness)
    Untimed(Vec<GroundingStep>),
}

impl ExerciseSteps {
    /// Number of steps.
    pub fn len(&self) -> usize {
        match self {
            ExerciseSteps::Timed(steps) => steps.len(),
            ExerciseSteps::Untimed(steps) => steps.len(),
        }
    }

    /// Returns true if there are no steps.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Borrowed view of a single step regardless of its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepRef<'a> {
    /// A breathing step
    Timed(&'a BreathingStep),
    /// A grounding-style step
    Untimed(&'a GroundingStep),
}

impl StepRef<'_> {
    /// The step label.
    pub fn label(&self) -> &str {
        match self {
            StepRef::Timed(step) => &step.label,
            StepRef::Untimed(step) => &step.label,
        }
    }

    /// The step instruction.
    pub fn instruction(&self) -> &str {
        match self {
            StepRef::Timed(step) => &step.instruction,
            StepRef::Untimed(step) => &step.instruction,
        }
    }

    /// The duration in seconds, for timed steps.
    pub fn duration_secs(&self) -> Option<u32> {
        match self {
            StepRef::Timed(step) => Some(step.duration_secs),
            StepRef::Untimed(_) => None,
        }
    }
}

// ============================================================================
// Exercise
// ============================================================================

/// A named, validated sequence of steps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exercise {
    key: String,
    #[serde(rename = "type")]
    category: ExerciseCategory,
    title: String,
    description: String,
    steps: ExerciseSteps,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl Exercise {
    /// Builds an exercise, checking every structural invariant.
    ///
    /// # Errors
    ///
    /// Returns an [`ExerciseError`] if the key or title is blank, there are
    /// no steps, the step kind does not match the category, or a breathing
    /// step has a zero duration.
    pub fn new(
        key: impl Into<String>,
        category: ExerciseCategory,
        title: impl Into<String>,
        description: impl Into<String>,
        steps: ExerciseSteps,
        note: Option<String>,
    ) -> Result<Self, ExerciseError> {
        let key = key.into();
        let title = title.into();

        if key.trim().is_empty() {
            return Err(ExerciseError::EmptyField("key"));
        }
        if title.trim().is_empty() {
            return Err(ExerciseError::EmptyField("title"));
        }
        if steps.is_empty() {
            return Err(ExerciseError::NoSteps);
        }

        match (&steps, category.is_timed()) {
            (ExerciseSteps::Timed(timed), true) => {
                for (index, step) in timed.iter().enumerate() {
                    if step.label.trim().is_empty() {
                        return Err(ExerciseError::MissingLabel { step: index });
                    }
                    if step.duration_secs == 0 {
                        return Err(ExerciseError::InvalidDuration {
                            step: index,
                            value: "0".to_string(),
                        });
                    }
                }
            }
            (ExerciseSteps::Untimed(untimed), false) => {
                if let Some(index) = untimed.iter().position(|s| s.label.trim().is_empty()) {
                    return Err(ExerciseError::MissingLabel { step: index });
                }
            }
            _ => {
                return Err(ExerciseError::StepKindMismatch {
                    category: category.to_string(),
                })
            }
        }

        Ok(Self {
            key,
            category,
            title,
            description: description.into(),
            steps,
            note: note.filter(|n| !n.trim().is_empty()),
        })
    }

    /// Returns a copy of this exercise under a different key.
    pub(crate) fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Unique identifier within the catalog.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Exercise category.
    pub fn category(&self) -> ExerciseCategory {
        self.category
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Short description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Optional closing note.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// The tagged step list.
    pub fn steps(&self) -> &ExerciseSteps {
        &self.steps
    }

    /// Number of steps (always >= 1).
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the steps are countdown-driven.
    pub fn is_timed(&self) -> bool {
        matches!(self.steps, ExerciseSteps::Timed(_))
    }

    /// Returns the step at `index`, if any.
    pub fn step(&self, index: usize) -> Option<StepRef<'_>> {
        match &self.steps {
            ExerciseSteps::Timed(steps) => steps.get(index).map(StepRef::Timed),
            ExerciseSteps::Untimed(steps) => steps.get(index).map(StepRef::Untimed),
        }
    }

    /// Returns the duration of the step at `index` for timed exercises.
    pub fn duration_of(&self, index: usize) -> Option<u32> {
        self.step(index).and_then(|step| step.duration_secs())
    }

    /// Total seconds of one full cycle, for timed exercises.
    ///
    /// Summed as `u64` so any number of `u32` durations fits.
    pub fn cycle_secs(&self) -> Option<u64> {
        match &self.steps {
            ExerciseSteps::Timed(steps) => Some(
                steps
                    .iter()
                    .map(|s| u64::from(s.duration_secs))
                    .sum(),
            ),
            ExerciseSteps::Untimed(_) => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
