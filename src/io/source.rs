//! The byte source feeding a reader: a file, stdin, or any `Read`, with
//! decompression applied and emptiness decided up front.

use crate::error::ReadError;
use crate::io::compression::auto_detect_reader;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Path that selects standard input.
pub const STDIN: &str = "-";

const READ_BUFFER: usize = 64 * 1024;

/// An open input with at least one byte of (decompressed) content.
pub struct Source {
    name: String,
    reader: Box<dyn BufRead + Send>,
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source").field("name", &self.name).finish()
    }
}

impl Source {
    /// Open `path` (or stdin for `-`).
    ///
    /// # Errors
    /// [`ReadError::NoContent`] when there is nothing to read, after
    /// decompression; [`ReadError::Io`] when the input cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        if name == STDIN {
            return Self::from_reader(name, std::io::stdin());
        }

        let file = File::open(path).map_err(|e| ReadError::io(&name, e))?;
        let meta = file.metadata().map_err(|e| ReadError::io(&name, e))?;
        // Compressed empty files are not valid streams; settle them before decoding.
        if meta.is_file() && meta.len() == 0 {
            return Err(ReadError::NoContent);
        }
        let decoded = auto_detect_reader(file, path).map_err(|e| ReadError::io(&name, e))?;
        Self::buffered(name, decoded)
    }

    /// Wrap an arbitrary reader; `name` is used in error messages and logs.
    ///
    /// # Errors
    /// Same as [`Source::open`].
    pub fn from_reader<R: Read + Send + 'static>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, ReadError> {
        let name = name.into();
        let decoded = auto_detect_reader(reader, &name).map_err(|e| ReadError::io(&name, e))?;
        Self::buffered(name, decoded)
    }

    fn buffered(name: String, reader: Box<dyn Read + Send>) -> Result<Self, ReadError> {
        let mut reader = BufReader::with_capacity(READ_BUFFER, reader);
        let empty = reader
            .fill_buf()
            .map_err(|e| ReadError::io(&name, e))?
            .is_empty();
        if empty {
            return Err(ReadError::NoContent);
        }
        Ok(Self {
            name,
            reader: Box::new(reader),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_parts(self) -> (String, Box<dyn BufRead + Send>) {
        (self.name, self.reader)
    }
}
