//! Output destinations for command results.

use crate::io::compression::auto_detect_writer;
use crate::io::source::STDIN;
use anyhow::{Context, Result};
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Open `path` for writing; `-` is stdout.
///
/// * Creates parent directories if they don't exist.
/// * Compresses by extension (`.gz`, `.zst`, ...) when the codec is enabled.
///
/// # Errors
/// Returns an error if the file/dirs cannot be created.
pub fn open_output(path: impl AsRef<Path>) -> Result<Box<dyn Write>> {
    let path = path.as_ref();
    if path.as_os_str() == STDIN {
        return Ok(Box::new(BufWriter::new(std::io::stdout())));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    auto_detect_writer(f, path).with_context(|| format!("setup compression for {}", path.display()))
}
