//! Pocket Notes terminal entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging, open the local store.
//! - Hand the state container to the terminal UI and tear it down on exit.

mod config;
mod tui;

use config::CliConfig;
use log::{error, warn};
use pocketnotes_core::db::{open_db, DbError};
use pocketnotes_core::{
    core_version, init_logging, JsonGroupStore, NotesApp, SqliteKeyValueStorage, StoreError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;
use tui::Scale;

#[derive(Debug)]
enum CliError {
    Db(DbError),
    Store(StoreError),
    Io(std::io::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "failed to open notes database: {err}"),
            Self::Store(err) => write!(f, "failed to prepare notes storage: {err}"),
            Self::Io(err) => write!(f, "terminal error: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

fn main() -> ExitCode {
    if std::env::args().skip(1).any(|arg| arg == "--version" || arg == "-V") {
        println!("pocketnotes {}", core_version());
        return ExitCode::SUCCESS;
    }

    let config = CliConfig::from_env();
    if let Err(err) = init_logging(&config.log_level, &config.log_dir.to_string_lossy()) {
        eprintln!("pocketnotes: file logging disabled: {err}");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("pocketnotes: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CliConfig) -> Result<(), CliError> {
    let conn = open_db(&config.db_path)?;
    let storage = SqliteKeyValueStorage::try_new(&conn)?;

    let scale = Scale::new(config.units_per_cell);
    let (columns, _) = crossterm::terminal::size().unwrap_or_else(|err| {
        warn!("event=terminal_size module=cli status=fallback error={err}");
        (80, 24)
    });
    let mut app = NotesApp::new(JsonGroupStore::new(storage), scale.width_units(columns));

    let outcome = tui::run(&mut app, scale);
    app.shutdown();
    outcome.map_err(CliError::from)
}
