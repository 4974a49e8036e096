//! Error types for the record store client

use thiserror::Error;

/// Unified error type for Airtable operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Base id or access token missing; raised before any request is sent
    #[error("Airtable env not configured: {0}")]
    Config(String),
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Airtable answered with a non-success status
    #[error("Airtable error {status}: {body}")]
    Remote { status: u16, body: String },
    /// Failed to parse JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// An update succeeded but the record was not echoed back
    #[error("Airtable did not return updated record {0}")]
    MissingRecord(String),
}

/// Result alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
