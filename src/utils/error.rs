// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application

/// Per-document parse outcomes that are not a populated record.
/// Fatal for the current document unless `is_recoverable()` — the two
/// recoverable kinds mark the document for manual review instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unresolvable code, manual correction required: {0}")]
    UnresolvableCode(String),

    #[error("duplicate country key {country} within variety {variety}")]
    DuplicateKey { variety: String, country: String },

    #[error("duplicate variety record for {0}")]
    DuplicateVariety(String),

    #[error("only {found} varieties resolved, minimum is {minimum}")]
    ThresholdViolation { found: usize, minimum: usize },

    #[error("could not confirm the journal date of the document")]
    MissingDate,

    #[error("could not locate the start of the SIV table")]
    MissingTableStart,

    #[error("odd number of unit headers on one page, column layout unsupported")]
    UnsupportedColumnLayout,

    #[error("document is a correction of an earlier SIV listing")]
    DocumentIsCorrection,
}

impl ParseError {
    /// Recoverable errors end the document early with a manual-review
    /// marker; the caller logs them and moves on to the next document.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ParseError::UnsupportedColumnLayout | ParseError::DocumentIsCorrection
        )
    }
}

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("duplicate 2-letter country code(s): {0}")]
    DuplicateAlpha2(String),

    #[error("duplicate 3-digit country code(s): {0}")]
    DuplicateDigit3(String),
}

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse span dump: {0}")]
    SpanDump(#[from] serde_json::Error),

    #[error("document contains no table cells")]
    NoCells,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Reference table error: {0}")]
    Reference(#[from] ReferenceError),

    #[error("Ingestion failed: {0}")]
    Ingest(#[from] IngestError),

    #[error("Parse failed: {0}")]
    Parse(#[from] ParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
