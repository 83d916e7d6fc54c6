//! Field-level work done in parallel: decoding, empty-row filtering and the
//! ragged-row policy.

use crate::config::{Config, RaggedRows};
use crate::error::ReadError;
use crate::reader::batcher::Batch;
use crate::reader::chunk::{Chunk, Record};
use crate::reader::report::ReadStats;
use crate::reader::splitter::RawRecord;

#[derive(Clone, Copy, Debug)]
pub(crate) struct FieldPolicy {
    ignore_empty_row: bool,
    ragged: RaggedRows,
}

impl FieldPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            ignore_empty_row: config.ignore_empty_row,
            ragged: config.ragged,
        }
    }
}

/// Turn a batch into a chunk.
///
/// Records keep their order. The first failing record ends the chunk with
/// that error; a splitter error on the batch is kept when no record failed.
pub(crate) fn process(batch: Batch, policy: FieldPolicy, stats: &ReadStats) -> Chunk {
    let Batch {
        seq,
        width,
        records: raw,
        error,
    } = batch;

    let mut records = Vec::with_capacity(raw.len());
    let mut failure = None;
    for rec in &raw {
        if policy.ignore_empty_row && rec.fields().all(<[u8]>::is_empty) {
            stats.empty_row_ignored();
            continue;
        }
        if let Some(expected) = width
            && rec.width() != expected
        {
            match policy.ragged {
                RaggedRows::Allow => {}
                RaggedRows::Skip => {
                    stats.illegal_row_ignored();
                    continue;
                }
                RaggedRows::Strict => {
                    failure = Some(ReadError::FieldCount {
                        line: rec.line,
                        record: rec.index,
                        expected,
                        found: rec.width(),
                    });
                    break;
                }
            }
        }
        match decode(rec) {
            Ok(fields) => records.push(fields),
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }

    Chunk {
        seq,
        records,
        error: failure.or(error),
    }
}

fn decode(rec: &RawRecord) -> Result<Record, ReadError> {
    rec.fields()
        .enumerate()
        .map(|(i, field)| {
            std::str::from_utf8(field)
                .map(str::to_owned)
                .map_err(|_| ReadError::Utf8 {
                    line: rec.line,
                    record: rec.index,
                    field: i + 1,
                })
        })
        .collect()
}
