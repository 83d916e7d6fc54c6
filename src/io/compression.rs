//! Transparent decompression for inputs and compression for outputs.
//!
//! Inputs are checked by file extension first and by magic bytes second, so
//! `data.csv.gz` and a gzip stream piped through stdin both decode without
//! flags. Outputs are compressed by extension only.
//!
//! ## Built-in Codecs
//!
//! When enabled via feature flags, the following codecs are available:
//! - **Gzip** (`.gz`) - via `flate2` crate (feature: `compression-gzip`)
//! - **Zstd** (`.zst`) - via `zstd` crate (feature: `compression-zstd`)
//! - **Bzip2** (`.bz2`) - via `bzip2` crate (feature: `compression-bzip2`)
//! - **Xz** (`.xz`) - via `xz2` crate (feature: `compression-xz`)
//!
//! The codec table is immutable; nothing here is registered at runtime, so
//! concurrent readers never contend on it.
//!
//! ```no_run
//! use csvtk::io::compression::{auto_detect_reader, auto_detect_writer};
//! use std::fs::File;
//! # fn main() -> std::io::Result<()> {
//! let file = File::open("data.csv.gz")?;
//! let reader = auto_detect_reader(file, "data.csv.gz")?;
//!
//! let file = File::create("dims.tsv.zst")?;
//! let writer = auto_detect_writer(file, "dims.tsv.zst")?;
//! # Ok(())
//! # }
//! ```

use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// A compression format the I/O layer can unwrap or apply.
pub trait CompressionCodec: Send + Sync {
    /// Human-readable codec name (e.g., "gzip", "zstd").
    fn name(&self) -> &str;

    /// File extensions associated with this codec, lowercase with the leading dot.
    fn extensions(&self) -> &[&str];

    /// Optional magic byte signature for content-based detection.
    fn magic_bytes(&self) -> Option<&[u8]>;

    /// Wrap a reader with decompression.
    fn wrap_reader_dyn(
        &self,
        reader: Box<dyn Read + Send>,
    ) -> std::io::Result<Box<dyn Read + Send>>;

    /// Wrap a writer with compression.
    fn wrap_writer_dyn(&self, writer: Box<dyn Write>) -> std::io::Result<Box<dyn Write>>;
}

static CODECS: &[&dyn CompressionCodec] = &[
    #[cfg(feature = "compression-gzip")]
    &GzipCodec,
    #[cfg(feature = "compression-zstd")]
    &ZstdCodec,
    #[cfg(feature = "compression-bzip2")]
    &Bzip2Codec,
    #[cfg(feature = "compression-xz")]
    &XzCodec,
];

/// Codecs compiled into this build.
#[must_use]
pub fn codecs() -> &'static [&'static dyn CompressionCodec] {
    CODECS
}

/// Codec whose extension matches `path`, case-insensitively.
#[must_use]
pub fn detect_from_extension(path: impl AsRef<Path>) -> Option<&'static dyn CompressionCodec> {
    let path_str = path.as_ref().to_string_lossy().to_lowercase();
    CODECS
        .iter()
        .copied()
        .find(|codec| codec.extensions().iter().any(|ext| path_str.ends_with(ext)))
}

/// Peeks at the beginning of the buffered reader; the reader is not advanced.
fn detect_from_magic<R: BufRead>(reader: &mut R) -> Option<&'static dyn CompressionCodec> {
    let buf = reader.fill_buf().ok()?;
    if buf.is_empty() {
        return None;
    }
    CODECS.iter().copied().find(|codec| {
        codec
            .magic_bytes()
            .is_some_and(|magic| buf.len() >= magic.len() && buf.starts_with(magic))
    })
}

/// Wrap `reader` with a decompressor when the path or the content asks for one.
///
/// Detection strategy:
/// 1. Check file path extension (fast path)
/// 2. Fall back to magic byte detection if extension not recognized
/// 3. Return the reader buffered but otherwise untouched
///
/// # Errors
/// Returns an error if the codec fails to initialize on the stream.
pub fn auto_detect_reader<R: Read + Send + 'static>(
    reader: R,
    path_hint: impl AsRef<Path>,
) -> std::io::Result<Box<dyn Read + Send>> {
    if let Some(codec) = detect_from_extension(&path_hint) {
        tracing::debug!(codec = codec.name(), "decompressing by extension");
        return codec.wrap_reader_dyn(Box::new(reader));
    }

    let mut buf_reader = BufReader::new(reader);
    if let Some(codec) = detect_from_magic(&mut buf_reader) {
        tracing::debug!(codec = codec.name(), "decompressing by magic bytes");
        return codec.wrap_reader_dyn(Box::new(buf_reader));
    }

    Ok(Box::new(buf_reader))
}

/// Wrap `writer` with a compressor when the path extension names one.
///
/// # Errors
/// Returns an error if the codec fails to initialize.
pub fn auto_detect_writer<W: Write + 'static>(
    writer: W,
    path_hint: impl AsRef<Path>,
) -> std::io::Result<Box<dyn Write>> {
    if let Some(codec) = detect_from_extension(&path_hint) {
        return codec.wrap_writer_dyn(Box::new(writer));
    }
    Ok(Box::new(BufWriter::new(writer)))
}

// ============================================================================
// Built-in Codec Implementations
// ============================================================================

#[cfg(feature = "compression-gzip")]
struct GzipCodec;

#[cfg(feature = "compression-gzip")]
impl CompressionCodec for GzipCodec {
    fn name(&self) -> &str {
        "gzip"
    }

    fn extensions(&self) -> &[&str] {
        &[".gz", ".gzip"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0x1f, 0x8b])
    }

    fn wrap_reader_dyn(
        &self,
        reader: Box<dyn Read + Send>,
    ) -> std::io::Result<Box<dyn Read + Send>> {
        // Concatenated members are legal gzip (`cat a.gz b.gz`).
        use flate2::read::MultiGzDecoder;
        Ok(Box::new(MultiGzDecoder::new(reader)))
    }

    fn wrap_writer_dyn(&self, writer: Box<dyn Write>) -> std::io::Result<Box<dyn Write>> {
        use flate2::Compression;
        use flate2::write::GzEncoder;
        Ok(Box::new(GzEncoder::new(writer, Compression::default())))
    }
}

#[cfg(feature = "compression-zstd")]
struct ZstdCodec;

#[cfg(feature = "compression-zstd")]
impl CompressionCodec for ZstdCodec {
    fn name(&self) -> &str {
        "zstd"
    }

    fn extensions(&self) -> &[&str] {
        &[".zst", ".zstd"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0x28, 0xb5, 0x2f, 0xfd])
    }

    fn wrap_reader_dyn(
        &self,
        reader: Box<dyn Read + Send>,
    ) -> std::io::Result<Box<dyn Read + Send>> {
        zstd::stream::read::Decoder::new(reader).map(|d| Box::new(d) as Box<dyn Read + Send>)
    }

    fn wrap_writer_dyn(&self, writer: Box<dyn Write>) -> std::io::Result<Box<dyn Write>> {
        zstd::stream::write::Encoder::new(writer, 3)
            .map(|e| Box::new(e.auto_finish()) as Box<dyn Write>)
    }
}

#[cfg(feature = "compression-bzip2")]
struct Bzip2Codec;

#[cfg(feature = "compression-bzip2")]
impl CompressionCodec for Bzip2Codec {
    fn name(&self) -> &str {
        "bzip2"
    }

    fn extensions(&self) -> &[&str] {
        &[".bz2", ".bzip2"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(b"BZh")
    }

    fn wrap_reader_dyn(
        &self,
        reader: Box<dyn Read + Send>,
    ) -> std::io::Result<Box<dyn Read + Send>> {
        use bzip2::read::MultiBzDecoder;
        Ok(Box::new(MultiBzDecoder::new(reader)))
    }

    fn wrap_writer_dyn(&self, writer: Box<dyn Write>) -> std::io::Result<Box<dyn Write>> {
        use bzip2::Compression;
        use bzip2::write::BzEncoder;
        Ok(Box::new(BzEncoder::new(writer, Compression::default())))
    }
}

#[cfg(feature = "compression-xz")]
struct XzCodec;

#[cfg(feature = "compression-xz")]
impl CompressionCodec for XzCodec {
    fn name(&self) -> &str {
        "xz"
    }

    fn extensions(&self) -> &[&str] {
        &[".xz"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00])
    }

    fn wrap_reader_dyn(
        &self,
        reader: Box<dyn Read + Send>,
    ) -> std::io::Result<Box<dyn Read + Send>> {
        use xz2::read::XzDecoder;
        Ok(Box::new(XzDecoder::new_multi_decoder(reader)))
    }

    fn wrap_writer_dyn(&self, writer: Box<dyn Write>) -> std::io::Result<Box<dyn Write>> {
        use xz2::write::XzEncoder;
        Ok(Box::new(XzEncoder::new(writer, 6)))
    }
}
