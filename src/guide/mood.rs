//! Category selection for recommendations.
//!
//! Requests rotate through the four categories so repeated suggestions
//! vary. A mood description can then steer the rotated pick away from a
//! category that suits it poorly. Rules are checked in order and only the
//! first rule whose keywords match is applied.

use crate::exercise::ExerciseCategory;

struct MoodRule {
    keywords: &'static [&'static str],
    avoid: ExerciseCategory,
    instead: ExerciseCategory,
}

const MOOD_RULES: &[MoodRule] = &[
    MoodRule {
        keywords: &["sad", "stressed"],
        avoid: ExerciseCategory::Visualization,
        instead: ExerciseCategory::Mindfulness,
    },
    MoodRule {
        keywords: &["anxious", "restless"],
        avoid: ExerciseCategory::Breathing,
        instead: ExerciseCategory::Grounding,
    },
    MoodRule {
        keywords: &["tense", "tight"],
        avoid: ExerciseCategory::Breathing,
        instead: ExerciseCategory::Mindfulness,
    },
    MoodRule {
        keywords: &["scared", "afraid"],
        avoid: ExerciseCategory::Breathing,
        instead: ExerciseCategory::Visualization,
    },
];

/// Picks the category for the `rotation`-th successful request.
pub fn preferred_category(rotation: usize, mood: &str) -> ExerciseCategory {
    let rotated = ExerciseCategory::ALL[rotation % ExerciseCategory::ALL.len()];
    let mood = mood.to_lowercase();

    match MOOD_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| mood.contains(k)))
    {
        Some(rule) if rule.avoid == rotated => rule.instead,
        _ => rotated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_without_keywords() {
        let picks: Vec<_> = (0..5).map(|i| preferred_category(i, "fine")).collect();
        assert_eq!(
            picks,
            vec![
                ExerciseCategory::Breathing,
                ExerciseCategory::Grounding,
                ExerciseCategory::Visualization,
                ExerciseCategory::Mindfulness,
                ExerciseCategory::Breathing,
            ]
        );
    }

    #[test]
    fn test_anxious_avoids_breathing() {
        assert_eq!(
            preferred_category(0, "I'm so ANXIOUS today"),
            ExerciseCategory::Grounding
        );
        assert_eq!(
            preferred_category(2, "anxious"),
            ExerciseCategory::Visualization
        );
    }

    #[test]
    fn test_sad_avoids_visualization() {
        assert_eq!(preferred_category(2, "sad"), ExerciseCategory::Mindfulness);
        assert_eq!(preferred_category(0, "sad"), ExerciseCategory::Breathing);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // "stressed" matches before "afraid", and that rule leaves breathing alone.
        assert_eq!(
            preferred_category(0, "stressed and afraid"),
            ExerciseCategory::Breathing
        );
        assert_eq!(
            preferred_category(0, "tense"),
            ExerciseCategory::Mindfulness
        );
        assert_eq!(
            preferred_category(0, "scared"),
            ExerciseCategory::Visualization
        );
    }
}
