use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the glucose log.
#[derive(Error, Debug)]
pub enum GlucoseError {
    /// The record file could not be opened or read.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record file could not be opened for appending or written to.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV record could not be encoded or decoded.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A timestamp string did not match `YYYY-MM-DD HH:MM:SS`.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// A glucose value is not a positive, finite number.
    #[error("Invalid reading: {0}")]
    InvalidReading(String),

    /// A year/month pair is outside the accepted range.
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the glucose crates.
pub type Result<T> = std::result::Result<T, GlucoseError>;
