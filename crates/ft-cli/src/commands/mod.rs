//! CLI subcommand implementations.

pub mod day;
pub mod edit;
pub mod goal;
pub mod log;
pub mod remove;
pub mod report;
pub mod status;
mod util;
