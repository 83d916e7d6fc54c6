//! Error types for the ingestion pipeline and its configuration.
//!
//! Library code reports typed errors from this module; the command layer and
//! the binary wrap them in `anyhow` with context, the same split the I/O
//! helpers use elsewhere in the crate.

use thiserror::Error;

/// Rejected [`Config`](crate::Config) values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// What was wrong with a malformed quoted record.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unterminated quoted field")]
    UnterminatedQuote,
    #[error("bare quote in non-quoted field")]
    BareQuote,
    #[error("extraneous or missing quote in quoted field")]
    ExtraneousQuote,
}

/// Everything that can stop a file from being read.
///
/// Only [`ReadError::NoContent`] and [`ReadError::Io`] (at open time) and
/// [`ReadError::Config`] are returned directly; the rest travel in-band on the
/// last [`Chunk`](crate::Chunk) of a file.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The input holds zero bytes. Not a failure: callers report zeros.
    #[error("no content")]
    NoContent,

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line} (record {record}): {kind}")]
    Parse {
        line: u64,
        record: u64,
        kind: ParseErrorKind,
    },

    #[error("line {line} (record {record}): invalid UTF-8 in field {field}")]
    Utf8 { line: u64, record: u64, field: usize },

    #[error("line {line} (record {record}): wrong number of fields: expected {expected}, found {found}")]
    FieldCount {
        line: u64,
        record: u64,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ReadError {
    pub(crate) fn io(path: &str, source: std::io::Error) -> Self {
        ReadError::Io {
            path: path.to_string(),
            source,
        }
    }

    /// `true` for the empty-input sentinel.
    #[must_use]
    pub fn is_no_content(&self) -> bool {
        matches!(self, ReadError::NoContent)
    }
}
