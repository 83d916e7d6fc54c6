//! # csvtk
//!
//! A **toolkit for inspecting and reformatting delimited text** (CSV/TSV),
//! built on a streaming, chunked, concurrent ingestion pipeline.
//!
//! ## Key Features
//!
//! - **Streaming reads** - records arrive in fixed-size chunks over a bounded channel
//! - **Parallel field work** - UTF-8 decoding and row policies run on a worker pool
//! - **File order preserved** - chunks are resequenced before delivery, for any worker count
//! - **In-band errors** - a malformed record ends the file with an error on the last chunk
//! - **Early stop** - dropping the iterator cancels the pipeline and joins its threads
//! - **Empty input is not an error** - [`ReadError::NoContent`] lets callers report zeros
//! - **Transparent decompression** - gzip, zstd, bzip2 and xz (optional via feature flags)
//!
//! ## Quick Start
//!
//! ```no_run
//! use csvtk::{Config, CsvReader, ReadError};
//!
//! # fn main() -> Result<(), ReadError> {
//! let mut reader = CsvReader::open("people.csv", Config::default())?;
//!
//! let mut rows = 0;
//! for chunk in reader.chunks() {
//!     rows += chunk.into_result()?.len();
//! }
//! println!("{} data rows", rows.saturating_sub(1));
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Config
//!
//! A [`Config`] describes the dialect (delimiter, quote, comment prefix,
//! header presence) and the effort (CPU budget, workers, chunk size). Each
//! reader takes its own copy; nothing is process-wide.
//!
//! ### CsvReader
//!
//! A [`CsvReader`] handles one input. [`CsvReader::run`] starts its threads
//! and [`CsvReader::chunks`] yields [`Chunk`]s numbered `0, 1, 2, ...` in
//! file order. The header, when present, is the first record of chunk 0.
//!
//! ### Errors
//!
//! Opening reports [`ReadError::NoContent`] or [`ReadError::Io`] directly.
//! Everything found while reading travels on the last chunk, after the
//! records parsed before it.
//!
//! ## Common Patterns
//!
//! ### Whole file in memory
//! ```no_run
//! use csvtk::{Config, read_all};
//!
//! # fn main() -> Result<(), csvtk::ReadError> {
//! let data = read_all("people.csv", &Config::default())?;
//! println!("{:?}: {} rows", data.header, data.records.len());
//! # Ok(())
//! # }
//! ```
//!
//! ### Only the first chunk
//! ```no_run
//! use csvtk::{Config, CsvReader};
//!
//! # fn main() -> Result<(), csvtk::ReadError> {
//! let mut reader = CsvReader::open("big.tsv", Config::tsv().with_workers(1))?;
//! let width = reader
//!     .chunks()
//!     .next()
//!     .and_then(|chunk| chunk.records.first().map(Vec::len));
//! drop(reader); // cancels and joins the pipeline
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`reader`] - The ingestion pipeline
//! - [`config`] - Dialect and parallelism settings
//! - [`io`] - Input sources, decompression, file lists and outputs
//! - [`commands`] - The `dim` and `pretty` commands
//! - [`render`] - Aligned text tables and number formatting
//! - [`cli`] / [`logging`] - The binary's flags and log setup
//! - [`testing`] - Fixtures and assertions for reader tests

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod reader;
pub mod render;
pub mod testing;

pub use config::{Config, RaggedRows};
pub use error::{ConfigError, ParseErrorKind, ReadError};
pub use reader::{Chunk, Chunks, CsvData, CsvReader, LeakProbe, ReadReport, Record, read_all};
