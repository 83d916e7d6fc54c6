//! Assertions over reader output.

use crate::reader::{Chunk, Record};

/// Assert that chunk sequence numbers run `0, 1, 2, ...` with no gaps or
/// repeats, and that only the last chunk carries an error.
///
/// # Panics
///
/// Panics on the first out-of-place chunk.
pub fn assert_chunks_gapless(chunks: &[Chunk]) {
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(
            chunk.seq, i as u64,
            "Chunk out of sequence at position {i}: got seq {}\n  All seqs: {:?}",
            chunk.seq,
            chunks.iter().map(|c| c.seq).collect::<Vec<_>>()
        );
        if i + 1 < chunks.len() {
            assert!(
                chunk.error.is_none(),
                "Chunk {i} carries an error but is not the last: {:?}",
                chunk.error
            );
        }
    }
}

/// Assert that two record lists match, in order.
///
/// # Panics
///
/// Panics with the first differing record and its index.
///
/// # Example
///
/// ```
/// use csvtk::testing::{assert_records_equal, sample_records};
///
/// assert_records_equal(&sample_records(), &sample_records());
/// ```
pub fn assert_records_equal(actual: &[Record], expected: &[Record]) {
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(
            a, e,
            "Record mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}"
        );
    }
    assert_eq!(
        actual.len(),
        expected.len(),
        "Record count mismatch:\n  Expected: {}\n  Actual: {}",
        expected.len(),
        actual.len()
    );
}
