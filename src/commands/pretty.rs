//! `pretty`: a CSV file as an aligned text table.

use crate::config::Config;
use crate::error::ReadError;
use crate::reader::{CsvData, Record, read_all};
use crate::render::{Column, Table};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::warn;

#[derive(Clone, Debug)]
pub struct PrettyOptions {
    pub separator: String,
    pub align_right: bool,
    pub min_width: usize,
    pub max_width: usize,
}

impl Default for PrettyOptions {
    fn default() -> Self {
        Self {
            separator: "   ".to_string(),
            align_right: false,
            min_width: 0,
            max_width: 0,
        }
    }
}

/// Render `file` to `out`.
///
/// With a header row the header is printed and followed by a dashed rule;
/// without one, columns are named `1..n` internally and no header line is
/// printed. Empty input is skipped with a warning.
///
/// # Errors
/// A read error for `file` or a failure writing to `out`.
pub fn run(file: &Path, config: &Config, opts: &PrettyOptions, out: &mut dyn Write) -> Result<()> {
    let name = file.display().to_string();
    let CsvData {
        header,
        records,
        report,
    } = match read_all(file, config) {
        Ok(data) => data,
        Err(ReadError::NoContent) => {
            warn!("skipping empty input file: {name}");
            return Ok(());
        }
        Err(e) => return Err(e).with_context(|| format!("read {name}")),
    };

    let names = match (&header, records.first()) {
        (Some(header), _) => header.clone(),
        (None, Some(first)) => (1..=first.len()).map(|i| i.to_string()).collect(),
        (None, None) => {
            warn!("no data found in file: {name}");
            report.log(&name);
            return Ok(());
        }
    };

    let columns = names
        .iter()
        .map(|n| {
            let col = Column::new(n.as_str()).with_widths(opts.min_width, opts.max_width);
            if opts.align_right { col.right() } else { col }
        })
        .collect();
    let mut table = Table::new(columns).with_separator(opts.separator.as_str());

    if let Some(header) = &header {
        table.add_row(rule(header, &records, opts));
    }
    for record in records {
        table.add_row(record);
    }

    let written = if header.is_some() {
        table.write_to(out)
    } else {
        table.write_rows_to(out)
    };
    written.with_context(|| format!("write table for {name}"))?;
    out.flush().context("flush output")?;

    report.log(&name);
    Ok(())
}

/// Dashes as wide as each header column's widest cell, clamped to the
/// configured bounds. An empty header name still gets one dash.
fn rule(header: &Record, records: &[Record], opts: &PrettyOptions) -> Vec<String> {
    header
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let widest = records
                .iter()
                .filter_map(|r| r.get(i))
                .map(|cell| cell.chars().count())
                .fold(name.chars().count().max(1), usize::max);
            let mut width = widest;
            if opts.max_width > 0 {
                width = width.min(opts.max_width);
            }
            width = width.max(opts.min_width);
            "-".repeat(width)
        })
        .collect()
}
