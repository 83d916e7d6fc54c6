use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by one reader's threads.
#[derive(Debug, Default)]
pub(crate) struct ReadStats {
    chunks: AtomicU64,
    records: AtomicU64,
    empty_rows_ignored: AtomicU64,
    illegal_rows_ignored: AtomicU64,
}

impl ReadStats {
    pub fn delivered(&self, records: usize) {
        self.chunks.fetch_add(1, Ordering::Relaxed);
        self.records.fetch_add(records as u64, Ordering::Relaxed);
    }

    pub fn empty_row_ignored(&self) {
        self.empty_rows_ignored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn illegal_row_ignored(&self) {
        self.illegal_rows_ignored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ReadReport {
        ReadReport {
            chunks: self.chunks.load(Ordering::Relaxed),
            records: self.records.load(Ordering::Relaxed),
            empty_rows_ignored: self.empty_rows_ignored.load(Ordering::Relaxed),
            illegal_rows_ignored: self.illegal_rows_ignored.load(Ordering::Relaxed),
        }
    }
}

/// What a reader did with its input.
///
/// `chunks` and `records` count what was handed to the consumer channel,
/// header included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReadReport {
    pub chunks: u64,
    pub records: u64,
    pub empty_rows_ignored: u64,
    pub illegal_rows_ignored: u64,
}

impl ReadReport {
    /// Warn about rows dropped by `--ignore-empty-row` / `--ignore-illegal-row`.
    pub fn log(&self, file: &str) {
        if self.empty_rows_ignored > 0 {
            tracing::warn!("file '{file}': {} empty rows ignored", self.empty_rows_ignored);
        }
        if self.illegal_rows_ignored > 0 {
            tracing::warn!(
                "file '{file}': {} illegal rows ignored",
                self.illegal_rows_ignored
            );
        }
    }
}
