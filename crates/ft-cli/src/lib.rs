//! Intake tracker CLI library.
//!
//! This crate provides the CLI interface for the intake-timing tracker.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, GoalAction};
pub use config::Config;
