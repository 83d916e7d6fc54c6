//! Temporary files for reader tests.

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

/// A temporary file that is deleted when dropped.
pub struct TempFilePath {
    _file: NamedTempFile,
    path: PathBuf,
}

impl TempFilePath {
    /// An empty temporary file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn new() -> std::io::Result<Self> {
        Self::with_extension("csv")
    }

    /// An empty temporary file ending in `.{extension}`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn with_extension(extension: &str) -> std::io::Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("csvtk-")
            .suffix(&format!(".{extension}"))
            .tempfile()?;
        let path = file.path().to_path_buf();
        Ok(Self { _file: file, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A temporary directory that is deleted, with its contents, when dropped.
pub struct TempDirPath {
    _dir: TempDir,
    path: PathBuf,
}

impl TempDirPath {
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        let dir = TempDir::new()?;
        let path = dir.path().to_path_buf();
        Ok(Self { _dir: dir, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `contents` to `name` inside the directory and return its path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> std::io::Result<PathBuf> {
        let path = self.path.join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

/// A temporary `.csv` file holding `contents`.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
///
/// # Example
///
/// ```
/// use csvtk::testing::temp_csv;
///
/// let file = temp_csv("a,b\n1,2\n").unwrap();
/// assert!(file.path().exists());
/// ```
pub fn temp_csv(contents: impl AsRef<[u8]>) -> std::io::Result<TempFilePath> {
    temp_file_with_extension(contents, "csv")
}

/// A temporary file named `*.{extension}` holding `contents` as given.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn temp_file_with_extension(
    contents: impl AsRef<[u8]>,
    extension: &str,
) -> std::io::Result<TempFilePath> {
    let temp = TempFilePath::with_extension(extension)?;
    let mut f = std::fs::File::create(temp.path())?;
    f.write_all(contents.as_ref())?;
    f.flush()?;
    Ok(temp)
}
