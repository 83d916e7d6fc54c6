use csvtk::io::output::open_output;
use csvtk::testing::*;
use csvtk::{Config, read_all};
use std::io::Write;

#[test]
fn test_creates_parent_dirs() -> anyhow::Result<()> {
    let dir = TempDirPath::new()?;
    let path = dir.path().join("a/b/out.csv");
    let mut out = open_output(&path)?;
    out.write_all(SAMPLE_CSV.as_bytes())?;
    drop(out);
    assert_eq!(std::fs::read_to_string(&path)?, SAMPLE_CSV);
    Ok(())
}

#[cfg(feature = "compression-gzip")]
#[test]
fn test_compressed_output_reads_back() -> anyhow::Result<()> {
    let dir = TempDirPath::new()?;
    let path = dir.path().join("out.csv.gz");
    let mut out = open_output(&path)?;
    out.write_all(SAMPLE_CSV.as_bytes())?;
    drop(out);

    let data = read_all(&path, &Config::default())?;
    assert_eq!(data.header.map(|h| h.len()), Some(3));
    assert_eq!(data.records.len(), 2);
    Ok(())
}

#[test]
fn test_overwrites_existing_file() -> anyhow::Result<()> {
    let file = TempFilePath::new()?;
    std::fs::write(file.path(), "stale contents that are longer\n")?;
    let mut out = open_output(file.path())?;
    out.write_all(b"x\n")?;
    drop(out);
    assert_eq!(std::fs::read_to_string(file.path())?, "x\n");
    Ok(())
}
