//! Error types for enrichment requests.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using [`FieldFailure`].
pub type Result<T> = std::result::Result<T, FieldFailure>;

/// Why one section could not be enriched.
///
/// A failure only ever affects its own section.
#[derive(Error, Debug)]
pub enum FieldFailure {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// The response carried no message content.
    #[error("Response has no message content")]
    MissingContent,

    /// The message content was not valid JSON.
    #[error("Malformed response content: {0}")]
    Json(#[from] serde_json::Error),

    /// The decoded content did not fit the record.
    #[error("Response does not fit the record: {0}")]
    Record(#[from] bid_core::Error),

    #[error("No response within {0:?}")]
    Timeout(Duration),

    #[error("Enrichment was cancelled")]
    Cancelled,

    /// No API credential is configured.
    #[error("Missing API credential: set {0}")]
    MissingCredential(&'static str),
}
