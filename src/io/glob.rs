//! Input file list expansion.
//!
//! Command-line inputs may be plain paths, `-` for stdin, or glob patterns;
//! an `--infile-list` file adds one path per line.
//!
//! ```no_run
//! use csvtk::io::glob::expand_glob;
//!
//! let files = expand_glob("data/**/*.csv")?;
//! # use anyhow::Error; Ok::<(), Error>(())
//! ```

use crate::io::source::STDIN;
use anyhow::{Context, Result, bail};
use glob::glob;
use std::fs;
use std::path::{Path, PathBuf};

/// Expand a glob pattern into a sorted vector of matching file paths.
///
/// Directories are skipped. No match yields an empty vector.
///
/// # Errors
/// Returns an error for an invalid pattern or an unreadable directory entry.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;

    let mut result = Vec::new();
    for entry in paths {
        let path =
            entry.with_context(|| format!("error reading glob entry for pattern: {pattern}"))?;
        if path.is_file() {
            result.push(path);
        }
    }

    result.sort();
    Ok(result)
}

fn is_pattern(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

/// Resolve positional inputs plus an optional list file into the ordered
/// list of inputs to process.
///
/// * An argument naming an existing path is taken literally, even if it
///   contains glob metacharacters.
/// * Other arguments with `*`, `?` or `[` are expanded; a pattern matching
///   nothing is an error.
/// * Blank lines and surrounding whitespace in the list file are ignored.
/// * With no inputs at all, stdin (`-`) is read.
///
/// # Errors
/// Returns an error if the list file cannot be read or a pattern is invalid
/// or matches nothing.
pub fn resolve_inputs(args: &[String], infile_list: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for arg in args {
        if arg != STDIN && is_pattern(arg) && !Path::new(arg).exists() {
            let matched = expand_glob(arg)?;
            if matched.is_empty() {
                bail!("no files found matching pattern: {arg}");
            }
            files.extend(matched);
        } else {
            files.push(PathBuf::from(arg));
        }
    }

    if let Some(list) = infile_list {
        let text = fs::read_to_string(list)
            .with_context(|| format!("read file list {}", list.display()))?;
        files.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(PathBuf::from),
        );
    }

    if files.is_empty() {
        files.push(PathBuf::from(STDIN));
    }
    Ok(files)
}
