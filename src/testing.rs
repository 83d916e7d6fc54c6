//! Testing utilities for code built on [`CsvReader`].
//!
//! - **Fixtures**: canned and generated CSV inputs
//! - **Mock I/O**: temporary files that clean up after themselves
//! - **Assertions**: chunk ordering and record equality with useful messages
//! - [`drain`]: run a reader to completion and keep everything it delivered
//!
//! # Quick Start
//!
//! ```no_run
//! use csvtk::testing::*;
//! use csvtk::{Config, CsvReader};
//!
//! #[test]
//! fn reads_sample() -> anyhow::Result<()> {
//!     let file = temp_csv(SAMPLE_CSV)?;
//!     let mut reader = CsvReader::open(file.path(), Config::default())?;
//!     let drained = drain(&mut reader);
//!
//!     assert_chunks_gapless(&drained.chunks);
//!     assert_records_equal(&drained.records(), &sample_records());
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mock_io;

pub use assertions::*;
pub use fixtures::*;
pub use mock_io::*;

use crate::error::ReadError;
use crate::reader::{Chunk, CsvReader, ReadReport, Record};

/// Everything one reader delivered.
#[derive(Debug, Default)]
pub struct Drained {
    pub chunks: Vec<Chunk>,
    pub report: ReadReport,
}

impl Drained {
    /// All records, in delivery order.
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        self.chunks
            .iter()
            .flat_map(|c| c.records.iter().cloned())
            .collect()
    }

    /// The error on the last chunk, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ReadError> {
        self.chunks.last().and_then(|c| c.error.as_ref())
    }
}

/// Read every chunk of `reader`; the report is exact once the chunks are in.
pub fn drain(reader: &mut CsvReader) -> Drained {
    let chunks: Vec<Chunk> = reader.chunks().collect();
    Drained {
        chunks,
        report: reader.report(),
    }
}
