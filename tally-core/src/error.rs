//! Error types shared by the ingestion crates.

use thiserror::Error;

/// Failures reported by a [`crate::Store`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {message}")]
    Unavailable { message: String },

    #[error("store rejected records: {message}")]
    Rejected { message: String },
}

/// Structural failures of an ingestion call.
///
/// Malformed rows, dates and numbers never surface here; they are skipped
/// or defaulted by the parser.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type IngestResult<T> = Result<T, IngestError>;
