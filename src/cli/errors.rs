//! CLI-specific error types

use std::io;

use thiserror::Error;

use crate::database::DbError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Database errors render as their canonical message
    #[error("{0}")]
    Database(#[from] DbError),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Database(e) => e.code().code(),
            CliError::Config(_) => "TDB_CLI_CONFIG_ERROR",
            CliError::Io(_) => "TDB_CLI_IO_ERROR",
            CliError::Json(_) => "TDB_CLI_JSON_ERROR",
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        CliError::Config(msg.into())
    }
}
