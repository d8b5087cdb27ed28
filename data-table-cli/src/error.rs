use std::io;
use std::path::PathBuf;

use data_table::LoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Failed to create log file {}: {source}", path.display())]
    LogFile { path: PathBuf, source: io::Error },

    #[error("Failed to initialise logging: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
