//! Built-in exercises shipped with the app.

use crate::exercise::{
    BreathingStep, Exercise, ExerciseCategory, ExerciseError, ExerciseSteps, GroundingStep,
};

/// Key of the built-in 4-7-8 breathing exercise.
pub const BREATHING_478_KEY: &str = "breathing-478";

/// Key of the built-in 5-4-3-2-1 grounding exercise.
pub const GROUNDING_54321_KEY: &str = "grounding-54321";

/// The 4-7-8 breathing exercise.
pub fn breathing_478() -> Result<Exercise, ExerciseError> {
    Exercise::new(
        BREATHING_478_KEY,
        ExerciseCategory::Breathing,
        "4-7-8 Breathing",
        "A calming breathing technique to ease anxiety.",
        ExerciseSteps::Timed(vec![
            BreathingStep::new(
                "Inhale",
                4,
                "Breathe in deeply for 4 seconds",
                1.3,
                "#6ee7b7",
            ),
            BreathingStep::new(
                "Hold",
                7,
                "Hold your breath for 7 seconds",
                1.5,
                "#fcd34d",
            ),
            BreathingStep::new("Exhale", 8, "Exhale slowly for 8 seconds", 1.0, "#f87171"),
        ]),
        Some("This method promotes relaxation and stress relief.".to_string()),
    )
}

/// The 5-4-3-2-1 sensory grounding exercise.
pub fn grounding_54321() -> Result<Exercise, ExerciseError> {
    Exercise::new(
        GROUNDING_54321_KEY,
        ExerciseCategory::Grounding,
        "5-4-3-2-1 Grounding",
        "A sensory exercise to anchor you in the present.",
        ExerciseSteps::Untimed(vec![
            GroundingStep::new("5 Sights", "Notice five things you see.", "I see..."),
            GroundingStep::new("4 Touches", "Feel four things around you.", "I feel..."),
            GroundingStep::new("3 Sounds", "Listen for three distinct sounds.", "I hear..."),
            GroundingStep::new("2 Smells", "Identify two smells or recall them.", "I smell..."),
            GroundingStep::new("1 Taste", "Focus on one taste or memory of it.", "I taste..."),
        ]),
        None,
    )
}

/// All built-in exercises in display order.
pub fn builtin_exercises() -> Result<Vec<Exercise>, ExerciseError> {
    Ok(vec![breathing_478()?, grounding_54321()?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breathing_478_durations() {
        let exercise = breathing_478().unwrap();
        assert_eq!(exercise.duration_of(0), Some(4));
        assert_eq!(exercise.duration_of(1), Some(7));
        assert_eq!(exercise.duration_of(2), Some(8));
        assert_eq!(exercise.cycle_secs(), Some(19));
    }

    #[test]
    fn test_grounding_has_five_untimed_steps() {
        let exercise = grounding_54321().unwrap();
        assert_eq!(exercise.step_count(), 5);
        assert!(!exercise.is_timed());
        assert_eq!(exercise.step(4).unwrap().label(), "1 Taste");
    }

    #[test]
    fn test_builtin_keys_are_unique() {
        let exercises = builtin_exercises().unwrap();
        assert_eq!(exercises.len(), 2);
        assert_ne!(exercises[0].key(), exercises[1].key());
    }
}
