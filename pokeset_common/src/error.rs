//! Error types for want-list loading

use thiserror::Error;

/// Errors raised while reading a want-list from CSV or from disk.
///
/// Problems inside individual rows are not errors: they surface as
/// `format_error` match results instead.
#[derive(Debug, Error)]
pub enum WantListError {
    /// The CSV could not be decoded
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// The want-list file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for want-list operations
pub type Result<T> = std::result::Result<T, WantListError>;
