//! Error types for loading and querying sales data.
//!
//! Two failure families reach callers: the data file is absent
//! (`NotFound`) or its contents are malformed (`Parse`, `MissingColumn`,
//! `Csv`). Nothing is retried.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// The data file does not exist
    #[error("Data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A row could not be turned into a record
    #[error("Parse error on line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Header row is missing a required column
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// CSV error outside of row parsing (e.g. unreadable header)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalyticsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AnalyticsError::NotFound { .. })
    }

    /// True for every error caused by the file's contents rather than its absence
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            AnalyticsError::Parse { .. } | AnalyticsError::MissingColumn(_) | AnalyticsError::Csv(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
