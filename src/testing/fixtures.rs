//! Canned and generated CSV inputs.

use crate::reader::Record;

/// The three-column file used throughout the docs: a header and two rows.
pub const SAMPLE_CSV: &str = "a,b,c\n1,2,3\n4,5,6\n";

/// Parsed form of [`SAMPLE_CSV`], header first.
#[must_use]
pub fn sample_records() -> Vec<Record> {
    [["a", "b", "c"], ["1", "2", "3"], ["4", "5", "6"]]
        .iter()
        .map(|r| r.iter().map(ToString::to_string).collect())
        .collect()
}

/// Deterministic pseudo-random generator so fixtures are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }
}

/// `rows` records of `cols` fields, header first.
///
/// Cells exercise the splitter: some hold the delimiter, doubled quotes,
/// embedded newlines, non-ASCII text or nothing at all. The same `seed`
/// always gives the same records.
///
/// # Example
///
/// ```
/// use csvtk::testing::synthetic_records;
///
/// let records = synthetic_records(10, 4, 7);
/// assert_eq!(records.len(), 11);
/// assert!(records.iter().all(|r| r.len() == 4));
/// ```
#[must_use]
pub fn synthetic_records(rows: usize, cols: usize, seed: u64) -> Vec<Record> {
    let mut rng = Lcg(seed);
    let mut records = Vec::with_capacity(rows + 1);
    records.push((1..=cols).map(|c| format!("col{c}")).collect());
    for row in 0..rows {
        let record = (0..cols)
            .map(|col| match rng.next() % 10 {
                0 => format!("{row},{col}"),
                1 => format!("say \"{row}\""),
                2 => format!("line\n{col}"),
                3 => String::new(),
                4 => format!("naïve-{row}"),
                _ => format!("r{row}c{col}"),
            })
            .collect();
        records.push(record);
    }
    records
}

/// Serialize `records` as CSV text with the `csv` crate.
///
/// # Errors
/// Any error from the writer.
pub fn to_csv(records: &[Record], delimiter: u8) -> csv::Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(Vec::new());
    for record in records {
        wtr.write_record(record)?;
    }
    wtr.into_inner().map_err(|e| e.into_error().into())
}
