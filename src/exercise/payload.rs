//! Parsing exercise records out of free-form oracle responses.
//!
//! Model output is untrusted text. It may wrap the JSON in a fenced code
//! block, surround it with prose, or return something that only looks like
//! an exercise. Parsing runs in two stages: locate a JSON object, then
//! decode it into loosely-typed payload structs and validate those into an
//! [`Exercise`]. Any failure yields an [`ExerciseError`] and nothing else.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::{
    BreathingStep, Exercise, ExerciseCategory, ExerciseError, ExerciseSteps, GroundingStep,
};

/// Scale used when a breathing step omits one.
const DEFAULT_STEP_SCALE: f64 = 1.0;

/// Color used when a breathing step omits one.
const DEFAULT_STEP_COLOR: &str = "#93c5fd";

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json[ \t]*\r?\n(.*?)\r?\n[ \t]*```").expect("valid fenced json regex")
});

static BARE_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid bare object regex"));

/// A validated exercise plus the short tip the oracle attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// The validated exercise
    pub exercise: Exercise,
    /// Optional short tip to show alongside it
    pub tip: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExercisePayload {
    key: Option<String>,
    #[serde(rename = "type")]
    category: Option<String>,
    title: Option<String>,
    description: Option<String>,
    steps: Option<Vec<StepPayload>>,
    note: Option<String>,
    tips: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StepPayload {
    label: Option<String>,
    seconds: Option<Value>,
    instruction: Option<String>,
    scale: Option<f64>,
    color: Option<String>,
    prompt: Option<String>,
}

/// Locates the JSON object inside a model response.
///
/// Prefers a ```` ```json ```` fenced block; falls back to the span from the
/// first `{` to the last `}`.
pub fn extract_json_block(response: &str) -> Option<&str> {
    if let Some(captures) = FENCED_JSON.captures(response) {
        return captures.get(1).map(|m| m.as_str());
    }
    BARE_OBJECT.find(response).map(|m| m.as_str())
}

/// Parses and validates an exercise suggestion from raw oracle text.
///
/// # Errors
///
/// Returns [`ExerciseError::NoJsonFound`] or [`ExerciseError::MalformedJson`]
/// when no decodable object is present, and a validation variant when the
/// object does not describe a usable exercise.
pub fn parse_suggestion(response: &str) -> Result<Suggestion, ExerciseError> {
    let json = extract_json_block(response).ok_or(ExerciseError::NoJsonFound)?;
    let payload: ExercisePayload =
        serde_json::from_str(json).map_err(|e| ExerciseError::MalformedJson(e.to_string()))?;
    payload.into_suggestion()
}

impl ExercisePayload {
    fn into_suggestion(self) -> Result<Suggestion, ExerciseError> {
        let key = required_text(self.key, "key")?;
        let category: ExerciseCategory = required_text(self.category, "type")?.parse()?;
        let title = required_text(self.title, "title")?;
        let steps = self.steps.ok_or(ExerciseError::MissingField("steps"))?;
        if steps.is_empty() {
            return Err(ExerciseError::NoSteps);
        }

        let steps = if category.is_timed() {
            ExerciseSteps::Timed(
                steps
                    .into_iter()
                    .enumerate()
                    .map(|(index, step)| step.into_breathing(index))
                    .collect::<Result<_, _>>()?,
            )
        } else {
            ExerciseSteps::Untimed(
                steps
                    .into_iter()
                    .enumerate()
                    .map(|(index, step)| step.into_grounding(index))
                    .collect::<Result<_, _>>()?,
            )
        };

        let exercise = Exercise::new(
            key,
            category,
            title,
            self.description.unwrap_or_default(),
            steps,
            self.note,
        )?;

        Ok(Suggestion {
            exercise,
            tip: self.tips.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
        })
    }
}

impl StepPayload {
    fn into_breathing(self, index: usize) -> Result<BreathingStep, ExerciseError> {
        let label = step_label(self.label, index)?;
        let seconds = self
            .seconds
            .ok_or(ExerciseError::MissingDuration { step: index })?;
        let duration_secs = parse_duration(index, &seconds)?;

        Ok(BreathingStep {
            label,
            duration_secs,
            instruction: self.instruction.unwrap_or_default(),
            scale: self
                .scale
                .filter(|s| s.is_finite() && *s > 0.0)
                .unwrap_or(DEFAULT_STEP_SCALE),
            color: self
                .color
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_STEP_COLOR.to_string()),
        })
    }

    fn into_grounding(self, index: usize) -> Result<GroundingStep, ExerciseError> {
        Ok(GroundingStep {
            label: step_label(self.label, index)?,
            instruction: self.instruction.unwrap_or_default(),
            prompt: self.prompt.unwrap_or_default(),
        })
    }
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, ExerciseError> {
    let value = value.ok_or(ExerciseError::MissingField(field))?;
    if value.trim().is_empty() {
        return Err(ExerciseError::EmptyField(field));
    }
    Ok(value.trim().to_string())
}

fn step_label(label: Option<String>, index: usize) -> Result<String, ExerciseError> {
    match label {
        Some(label) if !label.trim().is_empty() => Ok(label.trim().to_string()),
        _ => Err(ExerciseError::MissingLabel { step: index }),
    }
}

/// Accepts positive whole numbers, including integral floats like `4.0`.
fn parse_duration(index: usize, value: &Value) -> Result<u32, ExerciseError> {
    let invalid = || ExerciseError::InvalidDuration {
        step: index,
        value: value.to_string(),
    };

    let Value::Number(number) = value else {
        return Err(invalid());
    };

    let whole = match number.as_u64() {
        Some(n) => n,
        None => match number.as_f64() {
            Some(f) if f.fract() == 0.0 && f >= 1.0 && f <= f64::from(u32::MAX) => f as u64,
            _ => return Err(invalid()),
        },
    };

    match u32::try_from(whole) {
        Ok(secs) if secs >= 1 => Ok(secs),
        _ => Err(invalid()),
    }
}

// ============================================================================
// Tests
// ============================================================================
