//! Reorder buffer for the ordered sink.
//!
//! Workers finish chunks in any order; the resequencer holds them in a ring
//! of `window` slots indexed by `seq % window` and hands them out strictly by
//! sequence number. The batcher never has more than `window` chunks in
//! flight, so an in-window slot is always free.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("chunk {seq} outside reorder window starting at {next} (size {window})")]
pub(crate) struct OutOfWindow {
    pub seq: u64,
    pub next: u64,
    pub window: usize,
}

pub(crate) struct Resequencer<T> {
    slots: Vec<Option<T>>,
    next: u64,
    pending: usize,
}

impl<T> Resequencer<T> {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            slots: (0..window).map(|_| None).collect(),
            next: 0,
            pending: 0,
        }
    }

    fn slot(&self, seq: u64) -> usize {
        (seq % self.slots.len() as u64) as usize
    }

    /// Park `item` under `seq`.
    ///
    /// # Errors
    /// [`OutOfWindow`] if `seq` was already released, is too far ahead, or its
    /// slot is taken.
    pub fn insert(&mut self, seq: u64, item: T) -> Result<(), OutOfWindow> {
        let window = self.slots.len();
        let idx = self.slot(seq);
        if seq < self.next || seq - self.next >= window as u64 || self.slots[idx].is_some() {
            return Err(OutOfWindow {
                seq,
                next: self.next,
                window,
            });
        }
        self.slots[idx] = Some(item);
        self.pending += 1;
        Ok(())
    }

    /// The item for the next expected sequence number, if it has arrived.
    pub fn pop_ready(&mut self) -> Option<T> {
        let idx = self.slot(self.next);
        let item = self.slots[idx].take()?;
        self.next += 1;
        self.pending -= 1;
        Some(item)
    }

    pub fn next_expected(&self) -> u64 {
        self.next
    }

    pub fn pending(&self) -> usize {
        self.pending
    }
}
