use crate::error::ReadError;
use crate::reader::splitter::{RawRecord, Splitter};
use std::io::BufRead;

/// A unit of work: consecutive raw records tagged with their sequence number.
#[derive(Debug)]
pub(crate) struct Batch {
    pub seq: u64,
    /// Width of the first record of the file, for ragged-row checks.
    pub width: Option<usize>,
    pub records: Vec<RawRecord>,
    /// Splitting stopped here; no batch follows.
    pub error: Option<ReadError>,
}

/// Groups the splitter's records into batches of `chunk_size`.
///
/// Never yields an empty batch unless it carries an error.
pub(crate) struct Batcher<R> {
    splitter: Splitter<R>,
    chunk_size: usize,
    next_seq: u64,
    width: Option<usize>,
    finished: bool,
}

impl<R: BufRead> Batcher<R> {
    pub fn new(splitter: Splitter<R>, chunk_size: usize) -> Self {
        Self {
            splitter,
            chunk_size: chunk_size.max(1),
            next_seq: 0,
            width: None,
            finished: false,
        }
    }
}

impl<R: BufRead> Iterator for Batcher<R> {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        if self.finished {
            return None;
        }
        let mut records = Vec::with_capacity(self.chunk_size);
        let mut error = None;
        while records.len() < self.chunk_size {
            match self.splitter.next_record() {
                Ok(Some(rec)) => {
                    self.width.get_or_insert(rec.width());
                    records.push(rec);
                }
                Ok(None) => {
                    self.finished = true;
                    break;
                }
                Err(e) => {
                    self.finished = true;
                    error = Some(e);
                    break;
                }
            }
        }
        if records.is_empty() && error.is_none() {
            return None;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        Some(Batch {
            seq,
            width: self.width,
            records,
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    fn batches(input: &str, chunk_size: usize) -> Vec<Batch> {
        let splitter = Splitter::new("t", input.as_bytes(), &Config::default());
        Batcher::new(splitter, chunk_size).collect()
    }

    #[test]
    fn numbers_batches_in_order() {
        let got = batches("a\nb\nc\nd\ne\n", 2);
        let shape: Vec<(u64, usize)> = got.iter().map(|b| (b.seq, b.records.len())).collect();
        assert_eq!(shape, vec![(0, 2), (1, 2), (2, 1)]);
        assert!(got.iter().all(|b| b.width == Some(1)));
    }

    #[test]
    fn exact_multiple_has_no_empty_tail() {
        assert_eq!(batches("a\nb\n", 2).len(), 1);
    }

    #[test]
    fn error_rides_on_last_batch() {
        let got = batches("a\nb\nc\n\"d\n", 2);
        assert_eq!(got.len(), 2);
        assert!(got[0].error.is_none());
        assert_eq!(got[1].records.len(), 1);
        assert!(got[1].error.is_some());
    }

    #[test]
    fn error_alone_still_yields_a_batch() {
        let got = batches("a\nb\n\"c\n", 2);
        assert_eq!(got.len(), 2);
        assert!(got[1].records.is_empty());
        assert!(got[1].error.is_some());
    }
}
