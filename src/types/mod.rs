//! Core data types shared across the crate.
//!
//! This module defines:
//! - Session phase and the serializable session snapshot
//! - The minimal journal entry shape handed to the companion

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::exercise::ExerciseCategory;

// ============================================================================
// SessionPhase
// ============================================================================

/// Represents the current phase of an exercise session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Session has not been started
    #[default]
    Idle,
    /// Countdown is active
    Running,
    /// Countdown is frozen and can be resumed
    Paused,
}

impl SessionPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Running => "running",
            SessionPhase::Paused => "paused",
        }
    }

    /// Returns true once the session has been started.
    pub fn is_started(&self) -> bool {
        !matches!(self, SessionPhase::Idle)
    }
}

// ============================================================================
// SessionSnapshot
// ============================================================================

/// Point-in-time view of a session, for display and serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Key of the active exercise
    #[serde(rename = "exerciseKey")]
    pub exercise_key: String,
    /// Title of the active exercise
    pub title: String,
    /// Category of the active exercise
    pub category: ExerciseCategory,
    /// Current session phase
    pub phase: SessionPhase,
    /// Zero-based index of the current step
    #[serde(rename = "stepIndex")]
    pub step_index: usize,
    /// Total number of steps
    #[serde(rename = "stepCount")]
    pub step_count: usize,
    /// Label of the current step
    #[serde(rename = "stepLabel")]
    pub step_label: String,
    /// Instruction of the current step
    pub instruction: String,
    /// Seconds left in the current step (timed exercises only)
    #[serde(rename = "remainingSeconds", skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<u32>,
    /// Number of full passes through the steps
    #[serde(rename = "cyclesCompleted")]
    pub cycles_completed: u32,
}

// ============================================================================
// JournalEntry
// ============================================================================

/// A journal entry as handed over by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Document identifier assigned by the store
    pub id: String,
    /// Entry title
    pub title: String,
    /// Free-text body
    pub content: String,
    /// Mood the user tagged the entry with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    /// Creation time
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Tests
// ============================================================================
