//! Error handling for the converter.
//!
//! Everything here is fatal: a bad input file or a malformed record aborts
//! the run with no cleanup of partially written tables. Expected-absence
//! conditions (missing fields, empty lists) never surface as errors; the
//! expanders resolve them to NULL columns or zero rows.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a conversion run
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input file could not be read
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not valid JSON
    #[error("failed to parse {path} as JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The dump must be a single top-level array of record objects
    #[error("expected a top-level JSON array of records in {path}")]
    NotAnArray { path: PathBuf },

    /// A record in the dump is not a JSON object
    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },

    /// A record has no string `id` to use as its primary key
    #[error("record {index} has no string `id` field")]
    MissingId { index: usize },

    /// Any database failure while writing or counting tables
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
