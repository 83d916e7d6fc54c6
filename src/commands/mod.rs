//! Command implementations. Each drives one or more [`CsvReader`](crate::CsvReader)s
//! and writes its result to a caller-supplied writer.

pub mod dim;
pub mod pretty;
