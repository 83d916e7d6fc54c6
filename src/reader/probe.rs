use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts the background participants of a reader that are still alive:
/// its threads and its open input.
///
/// After a [`CsvReader`](crate::CsvReader) is dropped or finished,
/// [`outstanding`](LeakProbe::outstanding) is zero.
#[derive(Clone, Debug, Default)]
pub struct LeakProbe {
    live: Arc<AtomicUsize>,
}

impl LeakProbe {
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }

    pub(crate) fn enter(&self) -> Activity {
        self.live.fetch_add(1, Ordering::AcqRel);
        Activity {
            live: Arc::clone(&self.live),
        }
    }
}

/// Held for as long as one participant is alive.
#[derive(Debug)]
pub(crate) struct Activity {
    live: Arc<AtomicUsize>,
}

impl Drop for Activity {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::AcqRel);
    }
}
