//! Dialect configuration for the ingestion pipeline.
//!
//! A [`Config`] is a plain value: every [`CsvReader`](crate::CsvReader) takes
//! its own copy at construction, so readers for different files never share
//! settings or state.

use crate::error::ConfigError;

/// Records handed to a worker at a time when nothing else is requested.
pub const DEFAULT_CHUNK_SIZE: usize = 50;

/// Upper bound for the default CPU budget.
pub const MAX_DEFAULT_CPUS: usize = 4;

/// How records whose width differs from the first record are treated.
///
/// Rows are never padded or truncated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RaggedRows {
    /// Pass every record through unchanged.
    #[default]
    Allow,
    /// A width mismatch ends the file with [`ReadError::FieldCount`](crate::ReadError::FieldCount).
    Strict,
    /// Drop mismatching records and count them in the [`ReadReport`](crate::ReadReport).
    Skip,
}

/// How to split raw bytes into records and how hard to work at it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Field separator.
    pub delimiter: u8,
    /// Quote character enclosing fields with embedded delimiters or newlines.
    pub quote: u8,
    /// Lines starting with this byte are skipped.
    pub comment: Option<u8>,
    /// Whether record 0 holds column names.
    pub header_present: bool,
    /// Accept stray quotes instead of reporting them.
    pub lazy_quotes: bool,
    /// Drop records whose fields are all empty.
    pub ignore_empty_row: bool,
    pub ragged: RaggedRows,
    /// CPU budget; [`Config::workers`] is clipped to it.
    pub num_cpus: usize,
    /// Requested worker threads per reader.
    pub workers: usize,
    /// Records per chunk.
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        let cpus = default_cpus();
        Self {
            delimiter: b',',
            quote: b'"',
            comment: None,
            header_present: true,
            lazy_quotes: false,
            ignore_empty_row: false,
            ragged: RaggedRows::Allow,
            num_cpus: cpus,
            workers: cpus,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Available CPUs, capped at [`MAX_DEFAULT_CPUS`].
#[must_use]
pub fn default_cpus() -> usize {
    num_cpus::get().clamp(1, MAX_DEFAULT_CPUS)
}

impl Config {
    /// Tab-separated defaults.
    #[must_use]
    pub fn tsv() -> Self {
        Self::default().with_delimiter(b'\t')
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: Option<u8>) -> Self {
        self.comment = comment;
        self
    }

    #[must_use]
    pub fn with_header(mut self, header_present: bool) -> Self {
        self.header_present = header_present;
        self
    }

    #[must_use]
    pub fn with_lazy_quotes(mut self, lazy: bool) -> Self {
        self.lazy_quotes = lazy;
        self
    }

    #[must_use]
    pub fn with_ignore_empty_row(mut self, ignore: bool) -> Self {
        self.ignore_empty_row = ignore;
        self
    }

    #[must_use]
    pub fn with_ragged(mut self, ragged: RaggedRows) -> Self {
        self.ragged = ragged;
        self
    }

    /// Set the CPU budget. The worker count follows unless set afterwards.
    #[must_use]
    pub fn with_num_cpus(mut self, num_cpus: usize) -> Self {
        self.num_cpus = num_cpus;
        self.workers = num_cpus;
        self
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Worker threads a reader actually starts: `workers` clipped to `num_cpus`.
    #[must_use]
    pub fn effective_workers(&self) -> usize {
        self.workers.clamp(1, self.num_cpus.max(1))
    }

    /// Chunks allowed between the batcher and the consumer at once.
    pub(crate) fn in_flight_limit(&self) -> usize {
        2 * self.effective_workers()
    }

    /// Check the dialect for combinations the splitter cannot honor.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let line_break = |b: u8| b == b'\n' || b == b'\r';
        if line_break(self.delimiter) {
            return Err(invalid("delimiter", "must not be a line break"));
        }
        if line_break(self.quote) {
            return Err(invalid("quote", "must not be a line break"));
        }
        if self.delimiter == self.quote {
            return Err(invalid("quote", "must differ from the delimiter"));
        }
        if let Some(c) = self.comment
            && (line_break(c) || c == self.delimiter || c == self.quote)
        {
            return Err(invalid(
                "comment",
                "must differ from the delimiter, the quote and line breaks",
            ));
        }
        if self.chunk_size == 0 {
            return Err(invalid("chunk-size", "must be at least 1"));
        }
        if self.workers == 0 {
            return Err(invalid("workers", "must be at least 1"));
        }
        if self.num_cpus == 0 {
            return Err(invalid("num-cpus", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}

/// Parse a one-byte dialect character given on the command line.
///
/// Accepts the escapes `\t`, `\\` and `tab` besides a literal ASCII byte.
///
/// # Errors
/// Returns [`ConfigError::InvalidValue`] for empty, multi-byte or non-ASCII input.
pub fn parse_dialect_byte(field: &'static str, raw: &str) -> Result<u8, ConfigError> {
    match raw {
        "\\t" | "tab" => return Ok(b'\t'),
        "\\\\" => return Ok(b'\\'),
        _ => {}
    }
    match raw.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        [] => Err(invalid(field, "must not be empty")),
        _ => Err(ConfigError::InvalidValue {
            field,
            reason: format!("expected a single ASCII character, got {raw:?}"),
        }),
    }
}
