use crate::error::ReadError;

/// One record: its fields in source order.
pub type Record = Vec<String>;

/// A run of consecutive records, as delivered to the consumer.
///
/// Chunks arrive with `seq` equal to 0, 1, 2, ... in file order. A chunk
/// carrying an [`error`](Chunk::error) is the last one for its file; its
/// records are the ones parsed before the problem was found.
#[derive(Debug)]
pub struct Chunk {
    pub seq: u64,
    pub records: Vec<Record>,
    pub error: Option<ReadError>,
}

impl Chunk {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    /// The error, if any, leaving the records in place.
    pub fn take_error(&mut self) -> Option<ReadError> {
        self.error.take()
    }

    /// Records, or the error if the chunk carries one.
    ///
    /// # Errors
    /// The chunk's error; its partial records are dropped.
    pub fn into_result(self) -> Result<Vec<Record>, ReadError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.records),
        }
    }
}
