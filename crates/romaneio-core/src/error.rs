//! Error types for the romaneio-core library.

use thiserror::Error;

/// Main error type for the romaneio library.
#[derive(Error, Debug)]
pub enum RomaneioError {
    /// Document loading or tokenization error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Dispatch sink error.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// Record store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to reading an input document.
///
/// Extraction absences (no plate, no label match, no date) are never
/// errors; they surface as `None` or empty collections downstream.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Failed to extract text from a PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The document carries no text at all.
    #[error("document has no text")]
    Empty,

    /// A token dump could not be parsed.
    #[error("failed to parse token dump: {0}")]
    TokenDump(String),

    /// Unrecognized input file extension.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Errors from the messaging-endpoint session.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The endpoint could not be reached.
    #[error("failed to reach dispatch endpoint: {0}")]
    Transport(String),

    /// No session handle could be acquired.
    #[error("no active dispatch session")]
    NoSession,
}

/// Errors from the backend record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A duplicate pre-check or lookup failed. Callers fail open on this.
    #[error("failed to query store: {0}")]
    Query(String),

    /// An insert failed. Logged per record; never aborts a run.
    #[error("failed to write record: {0}")]
    Write(String),
}

/// Result type for the romaneio library.
pub type Result<T> = std::result::Result<T, RomaneioError>;
