//! Error types for building Business Intelligence Decks.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while importing, sequencing or rendering a deck.
///
/// Row-level and field-level problems are not errors; they are reported
/// as skipped rows or failed fields and never abort a whole operation.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to read or write delimited rows.
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Failed to encode or decode a JSON record.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A value of the wrong shape was assigned to a record field.
    #[error("Field '{path}' expects {expected}")]
    ShapeMismatch {
        path: &'static str,
        expected: &'static str,
    },

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML generation or parsing error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// A produced or supplied deck is structurally invalid.
    #[error("Invalid or corrupted deck: {0}")]
    CorruptedDeck(String),
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::CsvError(e.to_string())
    }
}
