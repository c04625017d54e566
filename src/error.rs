//! Structural error types for the ingestion core.
//!
//! Structural errors abort a parse: the file could not be decoded, or the
//! sheet is shaped in a way that makes column-role resolution impossible.
//! They are distinct from the recoverable, per-cell [`ParseError`] values
//! that accumulate inside a [`ParseResult`] envelope.
//!
//! [`ParseError`]: crate::report::ParseError
//! [`ParseResult`]: crate::report::ParseResult
use thiserror::Error;

/// Structural failure of a parse; always yields `data = None`.
#[derive(Error, Debug)]
pub enum Error {
    /// The spreadsheet container could not be decoded.
    #[error("failed to decode spreadsheet: {0}")]
    Decode(String),

    /// The workbook decoded but contains no sheet at all.
    #[error("workbook contains no sheets")]
    NoSheet,

    /// The first sheet has fewer rows than the configured minimum.
    #[error("sheet has {got} rows, at least {want} required")]
    InsufficientRows { got: usize, want: usize },

    /// No header row matched within the scan window. The message embeds the
    /// literal content of every inspected row so a human can diagnose the
    /// file without re-opening it.
    #[error("no header row found in rows {start}..{end}; inspected: {inspected}")]
    HeaderNotFound {
        start: usize,
        end: usize,
        inspected: String,
    },

    /// Required column roles could not be resolved from the header rows.
    #[error("required columns could not be resolved ({missing}); header content: {inspected}")]
    MissingRoles { missing: String, inspected: String },
}

/// Result type for structural ingestion steps.
pub type Result<T> = std::result::Result<T, Error>;
