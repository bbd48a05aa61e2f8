use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ft_cli::commands::{day, edit, goal, log, remove, report, status};
use ft_cli::{Cli, Commands, Config};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<ft_db::Database> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    let db_path = config.database_path();
    tracing::debug!(path = %db_path.display(), "opening database");

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    ft_db::Database::open(&db_path).context("failed to open database")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Log {
            category,
            at,
            notes,
        }) => {
            let mut db = open_database(cli.config.as_deref())?;
            log::run(&mut stdout, &mut db, category, at.as_deref(), notes.clone())?;
        }
        Some(Commands::Edit {
            id,
            category,
            at,
            notes,
        }) => {
            let mut db = open_database(cli.config.as_deref())?;
            edit::run(
                &mut stdout,
                &mut db,
                id,
                category.as_deref(),
                at.as_deref(),
                notes.clone(),
            )?;
        }
        Some(Commands::Remove { id }) => {
            let mut db = open_database(cli.config.as_deref())?;
            remove::run(&mut stdout, &mut db, id)?;
        }
        Some(Commands::Day { date, json }) => {
            let db = open_database(cli.config.as_deref())?;
            day::run(&mut stdout, &db, date.as_deref(), *json)?;
        }
        Some(Commands::Status) => {
            let db = open_database(cli.config.as_deref())?;
            status::run(&mut stdout, &db)?;
        }
        Some(Commands::Report { days, json }) => {
            let db = open_database(cli.config.as_deref())?;
            report::run(&mut stdout, &db, *days, *json)?;
        }
        Some(Commands::Goal { action }) => {
            let mut db = open_database(cli.config.as_deref())?;
            goal::run(&mut stdout, &mut db, action.as_ref())?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
