//! Integration tests for the `pretty` command.

use anyhow::Result;
use csvtk::Config;
use csvtk::commands::pretty::{PrettyOptions, run};
use csvtk::testing::*;

fn pretty(input: &str, config: &Config, opts: &PrettyOptions) -> Result<String> {
    let file = temp_csv(input)?;
    let mut out = Vec::new();
    run(file.path(), config, opts, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_sample_with_header_rule() -> Result<()> {
    let out = pretty(SAMPLE_CSV, &Config::default(), &PrettyOptions::default())?;
    assert_eq!(out, "a   b   c\n-   -   -\n1   2   3\n4   5   6\n");
    Ok(())
}

#[test]
fn test_no_header_row_prints_data_only() -> Result<()> {
    let config = Config::default().with_header(false);
    let out = pretty(SAMPLE_CSV, &config, &PrettyOptions::default())?;
    assert_eq!(out, "a   b   c\n1   2   3\n4   5   6\n");
    Ok(())
}

#[test]
fn test_alignment() -> Result<()> {
    let input = "name,n\nalice,1\nbob,22\n";
    let left = pretty(input, &Config::default(), &PrettyOptions::default())?;
    assert_eq!(left, "name    n\n-----   --\nalice   1\nbob     22\n");

    let opts = PrettyOptions {
        align_right: true,
        ..PrettyOptions::default()
    };
    let right = pretty(input, &Config::default(), &opts)?;
    assert_eq!(right, " name    n\n-----   --\nalice    1\n  bob   22\n");
    Ok(())
}

#[test]
fn test_width_bounds() -> Result<()> {
    let opts = PrettyOptions {
        max_width: 3,
        ..PrettyOptions::default()
    };
    let out = pretty("name,n\nalice,1\n", &Config::default(), &opts)?;
    assert_eq!(out, "nam   n\n---   -\nali   1\n");

    let opts = PrettyOptions {
        min_width: 4,
        separator: "|".to_string(),
        ..PrettyOptions::default()
    };
    let out = pretty("a,b\n1,2\n", &Config::default(), &opts)?;
    assert_eq!(out, "a   |b\n----|----\n1   |2\n");
    Ok(())
}

#[test]
fn test_empty_header_name_gets_one_dash() -> Result<()> {
    let out = pretty("a,,c\n1,2,3\n", &Config::default(), &PrettyOptions::default())?;
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[1], "-   -   -");
    assert_eq!(lines[2], "1   2   3");
    Ok(())
}

#[test]
fn test_header_only() -> Result<()> {
    let out = pretty("a,b\n", &Config::default(), &PrettyOptions::default())?;
    assert_eq!(out, "a   b\n-   -\n");
    Ok(())
}

#[test]
fn test_empty_input_is_skipped() -> Result<()> {
    let out = pretty("", &Config::default(), &PrettyOptions::default())?;
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn test_parse_error_is_reported() -> Result<()> {
    let file = temp_csv("a,b\n1,\"2\n")?;
    let mut out = Vec::new();
    let err = run(file.path(), &Config::default(), &PrettyOptions::default(), &mut out)
        .unwrap_err();
    assert!(format!("{err:#}").contains("unterminated"));
    Ok(())
}

#[test]
fn test_tsv_input() -> Result<()> {
    let out = pretty("x\ty\n10\t200\n", &Config::tsv(), &PrettyOptions::default())?;
    assert_eq!(out, "x    y\n--   ---\n10   200\n");
    Ok(())
}
