use csvtk::render::{Column, Table, comma};

#[test]
fn test_table_pads_short_rows_and_keeps_extra_cells() {
    let mut table = Table::new(vec![Column::new("k"), Column::new("value").right()]);
    table.add_row(["alpha", "1"]);
    table.add_row(["b"]);
    table.add_row(["c", "22", "extra"]);
    assert_eq!(table.len(), 3);
    assert_eq!(
        table.render(),
        "k       value\nalpha       1\nb\nc          22   extra\n"
    );
}

#[test]
fn test_rows_without_header() {
    let mut table = Table::new(vec![Column::new("x"), Column::new("y")]).with_separator(" | ");
    table.add_row(["1", "2"]);
    let mut out = Vec::new();
    table.write_rows_to(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "1 | 2\n");
}

#[test]
fn test_widths_count_characters() {
    let mut table = Table::new(vec![Column::new("名前"), Column::new("n")]);
    table.add_row(["né", "1"]);
    assert_eq!(table.render(), "名前   n\nné     1\n");
}

#[test]
fn test_comma_large_numbers() {
    assert_eq!(comma(12_345), "12,345");
    assert_eq!(comma(u64::MAX), "18,446,744,073,709,551,615");
}
