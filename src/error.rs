// Table loading errors
//
// Lookup and rendering never fail: bad values fall back to defaults.
// Only reading a table from disk or from pasted text can go wrong.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to read table file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid CSV table: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV table has no {0} column")]
    MissingColumn(&'static str),

    #[error("Unsupported table format: {0}")]
    UnknownFormat(String),
}
