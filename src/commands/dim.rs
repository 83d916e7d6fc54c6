//! `dim`: number of columns and data rows per file.

use crate::config::Config;
use crate::error::ReadError;
use crate::reader::CsvReader;
use crate::render::{Column, Table, comma};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::error;

/// Output selection for [`run`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DimOptions {
    /// Tab-separated `file num_cols num_rows` with a header line.
    pub tabular: bool,
    /// Only the column count; reading stops after the first chunk.
    pub cols: bool,
    /// Only the row count.
    pub rows: bool,
    /// Leave file names out of `--cols`, `--rows` and `--tabular` output.
    pub no_files: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dimensions {
    pub cols: u64,
    pub rows: u64,
}

/// Outcome of a [`run`] over several files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DimSummary {
    pub files: usize,
    pub failed: usize,
}

#[derive(Serialize)]
struct DimRow<'a> {
    file: &'a str,
    num_cols: u64,
    num_rows: u64,
}

/// Columns (width of the first record) and data rows of one file.
///
/// Empty input counts as zero by zero.
///
/// # Errors
/// The first [`ReadError`] met while opening or reading.
pub fn dimensions(path: impl AsRef<Path>, config: &Config) -> Result<Dimensions, ReadError> {
    let mut reader = match CsvReader::open(path, config.clone()) {
        Ok(reader) => reader,
        Err(ReadError::NoContent) => return Ok(Dimensions::default()),
        Err(e) => return Err(e),
    };
    let mut dims = Dimensions::default();
    let mut first = true;
    for chunk in reader.chunks() {
        let records = chunk.into_result()?;
        if first && let Some(record) = records.first() {
            dims.cols = record.len() as u64;
            first = false;
        }
        dims.rows += records.len() as u64;
    }
    if config.header_present && dims.rows > 0 {
        dims.rows -= 1;
    }
    let name = reader.name().to_string();
    reader.finish().log(&name);
    Ok(dims)
}

/// Width of the first record, reading as little as possible.
///
/// Uses a single worker and drops the reader after the first non-empty
/// chunk, which cancels the rest of the pipeline.
///
/// # Errors
/// The first [`ReadError`] met before the first record.
pub fn column_count(path: impl AsRef<Path>, config: &Config) -> Result<u64, ReadError> {
    let config = config.clone().with_workers(1);
    let mut reader = match CsvReader::open(path, config) {
        Ok(reader) => reader,
        Err(ReadError::NoContent) => return Ok(0),
        Err(e) => return Err(e),
    };
    for chunk in reader.chunks() {
        if let Some(record) = chunk.into_result()?.first() {
            return Ok(record.len() as u64);
        }
    }
    Ok(0)
}

fn measure(file: &Path, config: &Config, opts: &DimOptions) -> Result<Dimensions, ReadError> {
    if opts.cols {
        Ok(Dimensions {
            cols: column_count(file, config)?,
            rows: 0,
        })
    } else {
        dimensions(file, config)
    }
}

/// Measure `files` concurrently and write the results in argument order.
///
/// A file that fails is logged and left out; the others are still reported.
///
/// # Errors
/// Failing to build the thread pool or to write to `out`.
pub fn run(
    files: &[PathBuf],
    config: &Config,
    opts: &DimOptions,
    out: &mut dyn Write,
) -> Result<DimSummary> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.num_cpus.max(1))
        .build()
        .context("build dim thread pool")?;
    let results: Vec<Result<Dimensions, ReadError>> =
        pool.install(|| files.par_iter().map(|f| measure(f, config, opts)).collect());

    let mut measured = Vec::with_capacity(files.len());
    let mut failed = 0;
    for (file, result) in files.iter().zip(results) {
        match result {
            Ok(dims) => measured.push((file.display().to_string(), dims)),
            Err(e) => {
                error!("{}: {e}", file.display());
                failed += 1;
            }
        }
    }

    if opts.cols || opts.rows || opts.tabular {
        write_plain(&measured, opts, out)?;
    } else {
        let mut table = Table::new(vec![
            Column::new("file"),
            Column::new("num_cols").right(),
            Column::new("num_rows").right(),
        ]);
        for (file, dims) in &measured {
            table.add_row([file.clone(), comma(dims.cols), comma(dims.rows)]);
        }
        table.write_to(out).context("write dim table")?;
    }
    out.flush().context("flush dim output")?;

    Ok(DimSummary {
        files: files.len(),
        failed,
    })
}

fn write_plain(measured: &[(String, Dimensions)], opts: &DimOptions, out: &mut dyn Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(out);
    if opts.cols || opts.rows {
        for (file, dims) in measured {
            let n = (if opts.cols { dims.cols } else { dims.rows }).to_string();
            if opts.no_files {
                wtr.write_record([n])?;
            } else {
                wtr.write_record([file.as_str(), n.as_str()])?;
            }
        }
    } else {
        wtr.write_record(["file", "num_cols", "num_rows"])?;
        for (file, dims) in measured {
            if opts.no_files {
                wtr.serialize((dims.cols, dims.rows))?;
            } else {
                wtr.serialize(DimRow {
                    file,
                    num_cols: dims.cols,
                    num_rows: dims.rows,
                })?;
            }
        }
    }
    wtr.flush().context("write dim rows")?;
    Ok(())
}
