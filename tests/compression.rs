#[cfg(any(
    feature = "compression-gzip",
    feature = "compression-zstd",
    feature = "compression-bzip2",
    feature = "compression-xz"
))]
mod compression_tests {
    use csvtk::io::compression::{auto_detect_writer, codecs, detect_from_extension};
    use csvtk::testing::*;
    use csvtk::{Config, CsvReader, ReadError, read_all};
    use std::io::Write;
    use std::path::Path;

    fn write_compressed(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = auto_detect_writer(file, path)?;
        writer.write_all(contents)?;
        writer.flush()?;
        drop(writer);
        Ok(())
    }

    fn roundtrip(ext: &str) -> anyhow::Result<()> {
        let dir = TempDirPath::new()?;
        let path = dir.path().join(format!("data.csv.{ext}"));
        let expected = synthetic_records(300, 4, 11);
        write_compressed(&path, &to_csv(&expected, b',')?)?;

        let mut reader = CsvReader::open(&path, Config::default())?;
        let drained = drain(&mut reader);
        assert_chunks_gapless(&drained.chunks);
        assert_records_equal(&drained.records(), &expected);
        Ok(())
    }

    #[cfg(feature = "compression-gzip")]
    #[test]
    fn test_gzip_roundtrip() -> anyhow::Result<()> {
        roundtrip("gz")
    }

    #[cfg(feature = "compression-zstd")]
    #[test]
    fn test_zstd_roundtrip() -> anyhow::Result<()> {
        roundtrip("zst")
    }

    #[cfg(feature = "compression-bzip2")]
    #[test]
    fn test_bzip2_roundtrip() -> anyhow::Result<()> {
        roundtrip("bz2")
    }

    #[cfg(feature = "compression-xz")]
    #[test]
    fn test_xz_roundtrip() -> anyhow::Result<()> {
        roundtrip("xz")
    }

    #[cfg(feature = "compression-gzip")]
    #[test]
    fn test_gzip_detected_by_magic_bytes() -> anyhow::Result<()> {
        let dir = TempDirPath::new()?;
        let gz = dir.path().join("hidden.gz");
        write_compressed(&gz, SAMPLE_CSV.as_bytes())?;
        let renamed = dir.path().join("hidden.csv");
        std::fs::rename(&gz, &renamed)?;

        let data = read_all(&renamed, &Config::default())?;
        assert_eq!(data.records.len(), 2);
        Ok(())
    }

    #[cfg(feature = "compression-gzip")]
    #[test]
    fn test_compressed_empty_stream_is_no_content() -> anyhow::Result<()> {
        let dir = TempDirPath::new()?;
        let path = dir.path().join("empty.csv.gz");
        write_compressed(&path, b"")?;
        assert!(std::fs::metadata(&path)?.len() > 0);

        let err = CsvReader::open(&path, Config::default()).unwrap_err();
        assert!(matches!(err, ReadError::NoContent));
        Ok(())
    }

    #[cfg(feature = "compression-gzip")]
    #[test]
    fn test_zero_byte_gz_is_no_content() -> anyhow::Result<()> {
        let file = temp_file_with_extension(b"", "gz")?;
        let err = CsvReader::open(file.path(), Config::default()).unwrap_err();
        assert!(err.is_no_content());
        Ok(())
    }

    #[test]
    fn test_extension_detection() {
        assert!(detect_from_extension("plain.csv").is_none());
        for codec in codecs() {
            for ext in codec.extensions() {
                let name = format!("FILE.CSV{}", ext.to_uppercase());
                let found = detect_from_extension(&name).map(|c| c.name());
                assert_eq!(found, Some(codec.name()));
            }
        }
    }
}
