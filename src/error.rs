//! Error types.
//!
//! - [`LayoutError`] aborts a layout pass; the engine stays empty and logs it.
//! - [`IoError`] covers project files and CSV interchange; the app shows it in the
//!   status bar.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a layout pass can be abandoned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The builder was handed no items.
    #[error("cannot lay out an empty timeline")]
    EmptyTimeline,

    /// The host could not supply a date for an item.
    #[error("no date available for item at position {position}")]
    UnresolvedDate { position: usize },
}

/// Failures reading or writing record files.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid record file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV header row has no column that can be read as a timestamp.
    #[error("CSV is missing a date column. Found headers: {found:?}")]
    MissingColumns { found: Vec<String> },
}
