//! Command definitions for the ZenSoul CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::exercise::ExerciseCategory;

// ============================================================================
// CLI Structure
// ============================================================================

/// ZenSoul - guided breathing and grounding exercises in the terminal
#[derive(Parser, Debug)]
#[command(
    name = "zensoul",
    version,
    about = "Guided breathing and grounding exercises",
    long_about = "Runs guided anxiety-relief exercises in the terminal.\n\
                  Breathing exercises count down each phase; grounding exercises\n\
                  walk through prompts and collect your responses.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a JSON config file (defaults to ~/.zensoul/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the available exercises
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run an exercise session
    Run(RunArgs),

    /// Ask the AI guide for a new exercise that fits your mood
    Suggest(SuggestArgs),

    /// Print an uplifting affirmation
    Affirm {
        /// How you are feeling right now
        #[arg(short, long)]
        mood: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Exercise key (see `zensoul list`)
    pub key: String,

    /// Stop after this many full cycles (1-100)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    pub cycles: Option<u32>,
}

/// Arguments for the suggest command
#[derive(Args, Debug, Clone)]
pub struct SuggestArgs {
    /// How you are feeling right now
    #[arg(short, long, value_parser = validate_mood)]
    pub mood: String,

    /// Exercise type to ask for (breathing, grounding, visualization, mindfulness)
    #[arg(long)]
    pub category: Option<ExerciseCategory>,

    /// Start the suggested exercise right away
    #[arg(long)]
    pub run: bool,
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates the mood description.
///
/// - Must not be blank
/// - Must not exceed 200 characters
fn validate_mood(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("mood must not be empty".to_string());
    }
    if trimmed.chars().count() > 200 {
        return Err("mood must be 200 characters or fewer".to_string());
    }
    Ok(trimmed.to_string())
}

// ============================================================================
// Tests
// ============================================================================
