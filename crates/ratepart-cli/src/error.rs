//! Error types for the CLI application.

use ratepart_domain::DomainError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Division factor below 1.1; aborts before any file is touched
    #[error("You need to enter factor for division as positive numerical value (greater or equal than 1.1), got {0}")]
    DivisionFactor(f64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate file could not be read
    #[error("Failed to read rate file {path}: {source}")]
    ReadRates {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// Rate file content was malformed or empty
    #[error("Invalid rate file {path}: {source}")]
    RateFile {
        /// File that was being parsed
        path: PathBuf,
        /// Parse failure
        source: DomainError,
    },

    /// Report could not be written
    #[error("Failed to write report {path}: {source}")]
    WriteReport {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
