//! Streaming, chunked, order-preserving CSV ingestion.
//!
//! A [`CsvReader`] owns everything needed to read one input: the open
//! [`Source`], a producer thread that splits and batches records, a pool of
//! worker threads for field-level work, and a sink thread that restores file
//! order before handing [`Chunk`]s to the consumer.
//!
//! ```text
//!  Source ─► Splitter ─► Batcher ══work══► workers ══done══► sink ══out══► Chunks
//!                          ▲                                   │
//!                          └──────────── permits ◄─────────────┘
//! ```
//!
//! Every channel is bounded, so a slow consumer stalls the whole pipeline
//! rather than growing memory. Dropping the iterator or the reader
//! disconnects the outbound channel; each stage notices on its next send,
//! exits, and [`Drop`] joins the threads.
//!
//! ```no_run
//! use csvtk::{Config, CsvReader};
//!
//! # fn main() -> Result<(), csvtk::ReadError> {
//! let mut reader = CsvReader::open("data.csv", Config::default())?;
//! for chunk in reader.chunks() {
//!     let records = chunk.into_result()?;
//!     println!("{} records", records.len());
//! }
//! # Ok(())
//! # }
//! ```

mod batcher;
mod chunk;
mod probe;
mod report;
mod resequencer;
mod splitter;
mod worker;

pub use chunk::{Chunk, Record};
pub use probe::LeakProbe;
pub use report::ReadReport;

use crate::config::Config;
use crate::error::ReadError;
use crate::io::Source;
use batcher::{Batch, Batcher};
use crossbeam_channel::{Receiver, Sender, bounded};
use probe::Activity;
use report::ReadStats;
use resequencer::Resequencer;
use splitter::Splitter;
use std::io::Read;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, warn};
use worker::FieldPolicy;

/// Handle for reading one input.
///
/// Nothing is shared between readers; several may run side by side.
pub struct CsvReader {
    name: String,
    config: Config,
    /// Present until [`run`](CsvReader::run) moves it to the producer.
    source: Option<(Source, Activity)>,
    output: Option<Receiver<Chunk>>,
    threads: Vec<JoinHandle<()>>,
    stats: Arc<ReadStats>,
    probe: LeakProbe,
}

impl std::fmt::Debug for CsvReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvReader")
            .field("name", &self.name)
            .field("started", &self.source.is_none())
            .field("threads", &self.threads.len())
            .finish_non_exhaustive()
    }
}

impl CsvReader {
    /// Open `path` (`-` for stdin) for reading with `config`.
    ///
    /// # Errors
    /// [`ReadError::Config`] for an invalid config, [`ReadError::NoContent`]
    /// for empty input and [`ReadError::Io`] when the file cannot be opened.
    pub fn open(path: impl AsRef<Path>, config: Config) -> Result<Self, ReadError> {
        config.validate()?;
        Self::with_source(Source::open(path)?, config)
    }

    /// Read from any byte stream; `name` labels errors and logs.
    ///
    /// # Errors
    /// As for [`CsvReader::open`].
    pub fn from_reader<R: Read + Send + 'static>(
        name: impl Into<String>,
        reader: R,
        config: Config,
    ) -> Result<Self, ReadError> {
        config.validate()?;
        Self::with_source(Source::from_reader(name, reader)?, config)
    }

    /// Wrap an already opened source.
    ///
    /// # Errors
    /// [`ReadError::Config`] for an invalid config.
    pub fn with_source(source: Source, config: Config) -> Result<Self, ReadError> {
        config.validate()?;
        let probe = LeakProbe::default();
        let active = probe.enter();
        Ok(Self {
            name: source.name().to_string(),
            config,
            source: Some((source, active)),
            output: None,
            threads: Vec::new(),
            stats: Arc::new(ReadStats::default()),
            probe,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Counter of this reader's live threads and open input.
    #[must_use]
    pub fn probe(&self) -> LeakProbe {
        self.probe.clone()
    }

    /// Counts so far. Exact once the chunks have been drained.
    #[must_use]
    pub fn report(&self) -> ReadReport {
        self.stats.snapshot()
    }

    /// Start the pipeline threads. Calling it again does nothing.
    ///
    /// # Errors
    /// [`ReadError::Io`] if a thread cannot be spawned; threads already
    /// started wind down on their own.
    pub fn run(&mut self) -> Result<(), ReadError> {
        let Some((source, source_active)) = self.source.take() else {
            return Ok(());
        };
        let workers = self.config.effective_workers();
        let window = self.config.in_flight_limit();
        debug!(
            file = %self.name,
            workers,
            window,
            chunk_size = self.config.chunk_size,
            "starting reader"
        );

        let (work_tx, work_rx) = bounded::<Batch>(workers);
        let (done_tx, done_rx) = bounded::<Chunk>(workers);
        let (permit_tx, permit_rx) = bounded::<()>(window);
        let (out_tx, out_rx) = bounded::<Chunk>(workers);

        let name = self.name.clone();
        self.spawn("csvtk-sink", move || sink(&name, window, done_rx, permit_rx, out_tx))?;

        let policy = FieldPolicy::from_config(&self.config);
        for i in 0..workers {
            let rx = work_rx.clone();
            let tx = done_tx.clone();
            let stats = Arc::clone(&self.stats);
            self.spawn(&format!("csvtk-worker-{i}"), move || {
                for batch in rx.iter() {
                    if tx.send(worker::process(batch, policy, &stats)).is_err() {
                        return;
                    }
                }
            })?;
        }
        drop(done_tx);
        drop(work_rx);

        let config = self.config.clone();
        self.spawn("csvtk-producer", move || {
            let _source_active = source_active;
            produce(source, &config, &permit_tx, &work_tx);
        })?;

        self.output = Some(out_rx);
        Ok(())
    }

    fn spawn<F>(&mut self, name: &str, body: F) -> Result<(), ReadError>
    where
        F: FnOnce() + Send + 'static,
    {
        let active = self.probe.enter();
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let _active = active;
                body();
            })
            .map_err(|e| ReadError::io(&self.name, e))?;
        self.threads.push(handle);
        Ok(())
    }

    /// Start if needed and iterate the chunks in file order.
    ///
    /// The sequence is not restartable: a second call yields nothing.
    pub fn chunks(&mut self) -> Chunks<'_> {
        let failed = self.run().err();
        Chunks {
            output: self.output.take(),
            failed,
            stats: Arc::clone(&self.stats),
            _reader: PhantomData,
        }
    }

    /// Stop reading, wait for every thread and return the final counts.
    pub fn finish(mut self) -> ReadReport {
        self.shutdown();
        self.stats.snapshot()
    }

    fn shutdown(&mut self) {
        self.output = None;
        self.source = None;
        for handle in self.threads.drain(..) {
            let thread = handle.thread().name().unwrap_or("csvtk").to_string();
            if handle.join().is_err() {
                warn!(file = %self.name, thread, "reader thread panicked");
            }
        }
    }
}

impl Drop for CsvReader {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn produce(source: Source, config: &Config, permits: &Sender<()>, work: &Sender<Batch>) {
    let (name, reader) = source.into_parts();
    let splitter = Splitter::new(name.as_str(), reader, config);
    let mut dispatched = 0u64;
    for batch in Batcher::new(splitter, config.chunk_size) {
        if permits.send(()).is_err() || work.send(batch).is_err() {
            debug!(file = %name, dispatched, "consumer gone, producer stopping");
            return;
        }
        dispatched += 1;
    }
    debug!(file = %name, dispatched, "input exhausted");
}

fn sink(
    name: &str,
    window: usize,
    done: Receiver<Chunk>,
    permits: Receiver<()>,
    out: Sender<Chunk>,
) {
    let mut reorder = Resequencer::new(window);
    for chunk in done.iter() {
        if let Err(e) = reorder.insert(chunk.seq, chunk) {
            error!(file = %name, "{e}");
            let _ = out.send(broken(name, reorder.next_expected(), e.to_string()));
            return;
        }
        while let Some(ready) = reorder.pop_ready() {
            let last = ready.is_err();
            if out.send(ready).is_err() {
                return;
            }
            let _ = permits.try_recv();
            if last {
                return;
            }
        }
    }
    if reorder.pending() > 0 {
        let next = reorder.next_expected();
        error!(
            file = %name,
            next,
            pending = reorder.pending(),
            "worker lost a chunk; output truncated"
        );
        let _ = out.send(broken(name, next, format!("worker lost chunk {next}")));
    }
}

/// Terminal chunk for a stream the sink cannot complete in order.
fn broken(name: &str, seq: u64, reason: String) -> Chunk {
    Chunk {
        seq,
        records: Vec::new(),
        error: Some(ReadError::io(name, std::io::Error::other(reason))),
    }
}

/// Ordered chunks of one reader.
///
/// Ends when the input is exhausted or right after a chunk carrying an error.
/// Dropping it early cancels the pipeline.
pub struct Chunks<'a> {
    output: Option<Receiver<Chunk>>,
    failed: Option<ReadError>,
    stats: Arc<ReadStats>,
    _reader: PhantomData<&'a mut CsvReader>,
}

impl Iterator for Chunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if let Some(error) = self.failed.take() {
            self.output = None;
            return Some(Chunk {
                seq: 0,
                records: Vec::new(),
                error: Some(error),
            });
        }
        let chunk = self.output.as_ref()?.recv().ok();
        match &chunk {
            Some(c) => {
                self.stats.delivered(c.len());
                if c.is_err() {
                    self.output = None;
                }
            }
            None => self.output = None,
        }
        chunk
    }
}

impl FusedIterator for Chunks<'_> {}

/// A whole file in memory.
#[derive(Debug, Default)]
pub struct CsvData {
    /// First record when the config says there is a header.
    pub header: Option<Record>,
    pub records: Vec<Record>,
    pub report: ReadReport,
}

/// Read every record of `path`, splitting off the header per `config`.
///
/// # Errors
/// Any [`ReadError`], including [`ReadError::NoContent`] for empty input.
/// Records before an in-band error are discarded.
pub fn read_all(path: impl AsRef<Path>, config: &Config) -> Result<CsvData, ReadError> {
    let mut reader = CsvReader::open(path, config.clone())?;
    let mut header = None;
    let mut records = Vec::new();
    for chunk in reader.chunks() {
        let mut rows = chunk.into_result()?.into_iter();
        if config.header_present && header.is_none() {
            header = rows.next();
        }
        records.extend(rows);
    }
    Ok(CsvData {
        header,
        records,
        report: reader.finish(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(seq: u64) -> Chunk {
        Chunk {
            seq,
            records: vec![vec![seq.to_string()]],
            error: None,
        }
    }

    fn run_sink(window: usize, arriving: &[u64]) -> Vec<Chunk> {
        let (done_tx, done_rx) = bounded(arriving.len());
        let (_permit_tx, permit_rx) = bounded::<()>(window);
        let (out_tx, out_rx) = bounded(arriving.len() + 1);
        for &seq in arriving {
            done_tx.send(chunk(seq)).unwrap();
        }
        drop(done_tx);
        sink("mem", window, done_rx, permit_rx, out_tx);
        out_rx.iter().collect()
    }

    #[test]
    fn sink_releases_in_order() {
        let out = run_sink(4, &[2, 0, 1]);
        let seqs: Vec<u64> = out.iter().map(|c| c.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert!(out.iter().all(|c| !c.is_err()));
    }

    #[test]
    fn lost_chunk_ends_with_error() {
        let out = run_sink(4, &[0, 2, 3]);
        let seqs: Vec<u64> = out.iter().map(|c| c.seq).collect();
        assert_eq!(seqs, vec![0, 1]);
        let err = out[1].error.as_ref().unwrap();
        assert!(matches!(err, ReadError::Io { .. }));
        assert!(err.to_string().contains("worker lost chunk 1"));
    }

    #[test]
    fn out_of_window_chunk_ends_with_error() {
        let out = run_sink(2, &[0, 5]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].seq, 1);
        assert!(out[1].is_err());
    }
}
