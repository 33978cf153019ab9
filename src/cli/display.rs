//! Display utilities for the ZenSoul CLI.
//!
//! This module provides formatted output for:
//! - The exercise catalog
//! - Live session events
//! - Guide results (recommendations, feedback, affirmations)
//! - Error messages

use crate::catalog::Catalog;
use crate::exercise::{Exercise, ExerciseSteps};
use crate::guide::Recommendation;
use crate::session::SessionEvent;
use crate::types::SessionSnapshot;

use super::input::KEY_HELP;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows every exercise in the catalog, one per line.
    pub fn show_catalog(catalog: &Catalog) {
        println!("Exercises");
        println!("─────────────────────────────");
        for exercise in catalog.iter() {
            println!("{}", Self::catalog_line(exercise));
        }
    }

    /// Shows the catalog as pretty-printed JSON.
    pub fn show_catalog_json(catalog: &Catalog) -> serde_json::Result<()> {
        let exercises: Vec<&Exercise> = catalog.iter().map(|exercise| &**exercise).collect();
        println!("{}", serde_json::to_string_pretty(&exercises)?);
        Ok(())
    }

    /// Shows the full details of one exercise.
    pub fn show_exercise(exercise: &Exercise) {
        println!("{} [{}]", exercise.title(), exercise.category());
        if !exercise.description().is_empty() {
            println!("  {}", exercise.description());
        }
        match exercise.steps() {
            ExerciseSteps::Timed(steps) => {
                for (i, step) in steps.iter().enumerate() {
                    println!(
                        "  {}. {} ({}s) {}",
                        i + 1,
                        step.label,
                        step.duration_secs,
                        step.instruction
                    );
                }
            }
            ExerciseSteps::Untimed(steps) => {
                for (i, step) in steps.iter().enumerate() {
                    println!("  {}. {}: {}", i + 1, step.label, step.instruction);
                }
            }
        }
        if let Some(note) = exercise.note() {
            println!("  Note: {note}");
        }
    }

    /// Shows the banner printed when a session begins.
    pub fn show_session_header(snapshot: &SessionSnapshot) {
        println!("~ {} ({} steps)", snapshot.title, snapshot.step_count);
        println!("  {KEY_HELP}");
    }

    /// Shows a single session event.
    pub fn show_event(event: &SessionEvent, exercise: &Exercise) {
        println!("{}", Self::describe_event(event, exercise));
    }

    /// Shows a recommendation that was added to the catalog.
    pub fn show_recommendation(recommendation: &Recommendation) {
        println!("* Added a new exercise: {}", recommendation.exercise.key());
        Self::show_exercise(&recommendation.exercise);
        if let Some(tip) = &recommendation.tip {
            println!("  Tip: {tip}");
        }
    }

    /// Shows feedback on grounding responses.
    pub fn show_feedback(feedback: &str) {
        println!();
        println!("{feedback}");
    }

    /// Shows an affirmation.
    pub fn show_affirmation(text: &str) {
        println!("\"{text}\"");
    }

    /// Shows a short, non-fatal notice.
    pub fn show_notice(message: &str) {
        eprintln!("! {message}");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {message}");
    }

    fn catalog_line(exercise: &Exercise) -> String {
        let length = match exercise.cycle_secs() {
            Some(secs) => {
                let (minutes, seconds) = Self::format_time(secs);
                format!("{minutes}:{seconds:02} per cycle")
            }
            None => format!("{} prompts", exercise.step_count()),
        };
        format!(
            "{:<40} {:<14} {:<28} {}",
            exercise.key(),
            exercise.category().as_str(),
            exercise.title(),
            length
        )
    }

    fn step_label(exercise: &Exercise, index: usize) -> String {
        exercise
            .step(index)
            .map(|step| step.label().to_string())
            .unwrap_or_default()
    }

    fn step_line(exercise: &Exercise, index: usize, remaining: Option<u32>) -> String {
        let label = Self::step_label(exercise, index);
        let position = format!("[{}/{}]", index + 1, exercise.step_count());
        let instruction = exercise
            .step(index)
            .map(|step| step.instruction().to_string())
            .unwrap_or_default();
        match remaining {
            Some(secs) => {
                let (minutes, seconds) = Self::format_time(u64::from(secs));
                format!("{position} {label} {minutes}:{seconds:02}  {instruction}")
            }
            None => format!("{position} {label}  {instruction}"),
        }
    }

    fn describe_event(event: &SessionEvent, exercise: &Exercise) -> String {
        match event {
            SessionEvent::Started { step, remaining } => {
                format!("> {}", Self::step_line(exercise, *step, *remaining))
            }
            SessionEvent::Paused { .. } => "|| paused".to_string(),
            SessionEvent::Resumed { .. } => "> resumed".to_string(),
            SessionEvent::Tick { remaining } => {
                let (minutes, seconds) = Self::format_time(u64::from(*remaining));
                format!("  {minutes}:{seconds:02}")
            }
            SessionEvent::PhaseExpired { to, remaining, .. } => {
                format!("> {}", Self::step_line(exercise, *to, Some(*remaining)))
            }
            SessionEvent::CycleCompleted { cycles } => {
                format!("* cycle {cycles} complete")
            }
            SessionEvent::StepChanged { step, remaining } => {
                format!("- {}", Self::step_line(exercise, *step, *remaining))
            }
            SessionEvent::ExerciseSwitched { key } => format!("* switched to {key}"),
            SessionEvent::Reset => "[] reset".to_string(),
            SessionEvent::ResponseRecorded { step } => {
                format!("  noted for {}", Self::step_label(exercise, *step))
            }
        }
    }

    /// Formats remaining seconds as (minutes, seconds).
    fn format_time(total_seconds: u64) -> (u64, u64) {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        (minutes, seconds)
    }
}

// ============================================================================
// Tests
// ============================================================================
