//! CLI module for ZenSoul.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `input`: Keyboard commands during a running session
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;
pub mod input;

pub use commands::{Cli, Commands, RunArgs, SuggestArgs};
pub use display::Display;
pub use input::{forward_lines, parse_line, KEY_HELP};
