//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Personal intake-timing tracker.
///
/// Logs meal events and surfaces the temporal structure between them:
/// gaps, overnight fasting windows, and live fasting progress.
#[derive(Debug, Parser)]
#[command(name = "ft", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log an intake event.
    Log {
        /// The intake category (water, fruit, light, medium, heavy, fast_food, drink).
        category: String,

        /// When the intake occurred, RFC 3339 (defaults to now).
        #[arg(long)]
        at: Option<String>,

        /// Optional free-form note.
        #[arg(long)]
        notes: Option<String>,
    },

    /// Edit a previously logged event.
    Edit {
        /// The event ID.
        id: String,

        /// New category.
        #[arg(long)]
        category: Option<String>,

        /// New timestamp, RFC 3339.
        #[arg(long)]
        at: Option<String>,

        /// New note; an empty string clears it.
        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove a logged event.
    Remove {
        /// The event ID.
        id: String,
    },

    /// Show the summary and stats for one local day.
    Day {
        /// The day as YYYY-MM-DD (defaults to today).
        date: Option<String>,

        /// Emit JSON instead of human-readable output.
        #[arg(long)]
        json: bool,
    },

    /// Show live fasting progress against the configured goal.
    Status,

    /// Analyze eating/fasting patterns over recent days.
    Report {
        /// Number of trailing days to analyze.
        #[arg(long, default_value_t = 7)]
        days: u32,

        /// Emit JSON instead of human-readable output.
        #[arg(long)]
        json: bool,
    },

    /// Show or set the fasting goal.
    Goal {
        #[command(subcommand)]
        action: Option<GoalAction>,
    },
}

/// Goal subcommands.
#[derive(Debug, Subcommand)]
pub enum GoalAction {
    /// Set the fasting goal in hours (8-24).
    Set {
        /// Goal duration in hours.
        hours: i64,
    },
}
