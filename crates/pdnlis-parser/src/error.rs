//! Error types for pdnlis-parser.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A required section header is absent from the listing.
    #[error("section not found: {section:?}")]
    SectionNotFound { section: String },

    /// A directory record never completed, even after continuation lines.
    #[error("unmatched directory record at line {line}: {text}")]
    DirectoryLineUnmatched { line: usize, text: String },

    /// A numeric token could not be read.
    #[error(transparent)]
    MalformedNumber(#[from] pdnlis_core::Error),

    /// An `element` token without a leading `<index>:`.
    #[error("invalid element reference: {token:?}")]
    InvalidElementRef { token: String },

    /// A resistor row is shorter than its `element` row.
    #[error("missing {row} value in column {column}")]
    MissingValue { row: &'static str, column: usize },

    /// Invalid report configuration.
    #[error("invalid config: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
