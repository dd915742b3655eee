//! Error types for risk engine

use thiserror::Error;

/// Risk engine error
///
/// Scoring and decisions are total; only loading a merchant directory can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// Merchant directory content is malformed
    #[error("Invalid merchant directory: {0}")]
    InvalidDirectory(String),

    /// Merchant directory file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
