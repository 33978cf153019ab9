//! ZenSoul Guide Library
//!
//! This library provides the core of the ZenSoul anxiety-relief guide.
//! It includes:
//! - Exercise model and validation of oracle-supplied exercise records
//! - Append-only exercise catalog seeded with built-in exercises
//! - Session engine: countdown timer, phase sequencer and session controller
//! - Text oracle abstraction with a Gemini REST client
//! - Guide flows: mood-based recommendations, feedback, journal insights, affirmations
//! - Configuration loading and CLI command parsing/display utilities

pub mod catalog;
pub mod cli;
pub mod config;
pub mod exercise;
pub mod guide;
pub mod oracle;
pub mod session;
pub mod types;

// Re-export commonly used types for convenience
pub use catalog::Catalog;
pub use config::{ConfigError, OracleConfig, TimingConfig, ZenConfig};
pub use exercise::{Exercise, ExerciseCategory, ExerciseError, ExerciseSteps};
pub use guide::{Guide, GuideError, Recommendation};
pub use oracle::{GeminiOracle, MockOracle, OracleError, TextOracle};
pub use session::{Session, SessionCommand, SessionEvent};
pub use types::{JournalEntry, SessionPhase, SessionSnapshot};
