use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Errors raised while loading node and edge tables.
///
/// Every variant describes input that must not reach the graph builder.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CsvProviderError {
    #[error("could not open `{}`: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{file}: no header row")]
    EmptyInput { file: String },
    #[error("{file}: missing required column `{column}`")]
    MissingColumn { file: String, column: &'static str },
    #[error("{file}:{line}: missing value for `{column}`")]
    MissingField {
        file: String,
        line: usize,
        column: &'static str,
    },
    #[error("{file}:{line}: follower count `{value}` is not a non-negative integer")]
    InvalidFollowers {
        file: String,
        line: usize,
        value: String,
    },
    #[error("{file}:{line}: node id `{id}` already defined on line {first_line}")]
    DuplicateNodeId {
        file: String,
        line: usize,
        id: String,
        first_line: usize,
    },
    #[error("{file}:{line}: quoted field is never closed")]
    UnterminatedQuote { file: String, line: usize },
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Stable codes describing [`CsvProviderError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum CsvProviderErrorCode {
    /// A file could not be opened.
    Open,
    /// A table had no header row.
    EmptyInput,
    /// A required column was absent from the header.
    MissingColumn,
    /// A row left a required value blank.
    MissingField,
    /// A follower count did not parse.
    InvalidFollowers,
    /// A node identifier appeared twice.
    DuplicateNodeId,
    /// A quoted field ran to the end of input.
    UnterminatedQuote,
    /// Reading failed part-way through.
    Io,
}

impl CsvProviderErrorCode {
    /// Return the stable machine-readable representation of this error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "INFODEMICS_CSV_OPEN",
            Self::EmptyInput => "INFODEMICS_CSV_EMPTY_INPUT",
            Self::MissingColumn => "INFODEMICS_CSV_MISSING_COLUMN",
            Self::MissingField => "INFODEMICS_CSV_MISSING_FIELD",
            Self::InvalidFollowers => "INFODEMICS_CSV_INVALID_FOLLOWERS",
            Self::DuplicateNodeId => "INFODEMICS_CSV_DUPLICATE_NODE_ID",
            Self::UnterminatedQuote => "INFODEMICS_CSV_UNTERMINATED_QUOTE",
            Self::Io => "INFODEMICS_CSV_IO",
        }
    }
}

impl fmt::Display for CsvProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CsvProviderError {
    /// Retrieve the stable [`CsvProviderErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> CsvProviderErrorCode {
        match self {
            Self::Open { .. } => CsvProviderErrorCode::Open,
            Self::EmptyInput { .. } => CsvProviderErrorCode::EmptyInput,
            Self::MissingColumn { .. } => CsvProviderErrorCode::MissingColumn,
            Self::MissingField { .. } => CsvProviderErrorCode::MissingField,
            Self::InvalidFollowers { .. } => CsvProviderErrorCode::InvalidFollowers,
            Self::DuplicateNodeId { .. } => CsvProviderErrorCode::DuplicateNodeId,
            Self::UnterminatedQuote { .. } => CsvProviderErrorCode::UnterminatedQuote,
            Self::Io(_) => CsvProviderErrorCode::Io,
        }
    }
}
