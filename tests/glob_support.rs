//! Integration tests for input resolution: globs, list files and stdin.

use csvtk::io::glob::{expand_glob, resolve_inputs};
use csvtk::testing::TempDirPath;
use std::path::PathBuf;

#[test]
fn test_glob_pattern_sorted_files_only() -> anyhow::Result<()> {
    let dir = TempDirPath::new()?;
    dir.write("b.csv", "x\n")?;
    dir.write("a.csv", "x\n")?;
    dir.write("c.tsv", "x\n")?;
    std::fs::create_dir(dir.path().join("d.csv"))?;

    let found = expand_glob(&format!("{}/*.csv", dir.path().display()))?;
    let names: Vec<_> = found
        .iter()
        .filter_map(|p| p.file_name()?.to_str())
        .collect();
    assert_eq!(names, vec!["a.csv", "b.csv"]);
    Ok(())
}

#[test]
fn test_resolve_keeps_argument_order() -> anyhow::Result<()> {
    let dir = TempDirPath::new()?;
    let z = dir.write("z.csv", "x\n")?;
    dir.write("m1.csv", "x\n")?;
    dir.write("m2.csv", "x\n")?;

    let args = vec![
        z.display().to_string(),
        format!("{}/m*.csv", dir.path().display()),
    ];
    let files = resolve_inputs(&args, None)?;
    assert_eq!(files.len(), 3);
    assert_eq!(files[0], z);
    assert!(files[1].ends_with("m1.csv"));
    assert!(files[2].ends_with("m2.csv"));
    Ok(())
}

#[test]
fn test_unmatched_pattern_is_error() -> anyhow::Result<()> {
    let dir = TempDirPath::new()?;
    let args = vec![format!("{}/*.nothing", dir.path().display())];
    let err = resolve_inputs(&args, None).unwrap_err();
    assert!(err.to_string().contains("no files found"));
    Ok(())
}

#[test]
fn test_infile_list_appended() -> anyhow::Result<()> {
    let dir = TempDirPath::new()?;
    let list = dir.write("list.txt", "  one.csv \n\n two.csv\n")?;
    let files = resolve_inputs(&["first.csv".to_string()], Some(list.as_path()))?;
    assert_eq!(
        files,
        vec![
            PathBuf::from("first.csv"),
            PathBuf::from("one.csv"),
            PathBuf::from("two.csv")
        ]
    );
    Ok(())
}

#[test]
fn test_no_inputs_means_stdin() -> anyhow::Result<()> {
    assert_eq!(resolve_inputs(&[], None)?, vec![PathBuf::from("-")]);
    Ok(())
}
