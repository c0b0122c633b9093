//! Ragged-to-rectangular intensity matrix construction.

use ndarray::{s, Array2};

/// Splits row lengths into maximal runs of equal length, as `(start, end, len)`.
fn equal_length_runs<S: AsRef<[u16]>>(rows: &[S]) -> Vec<(usize, usize, usize)> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=rows.len() {
        let run_len = rows[start].as_ref().len();
        if i == rows.len() || rows[i].as_ref().len() != run_len {
            runs.push((start, i, run_len));
            start = i;
        }
    }
    runs
}

/// Stacks variable-length sample vectors into one NaN-padded matrix.
///
/// The matrix has one row per input vector and as many columns as the
/// longest vector. Consecutive vectors of equal length are copied as a
/// single block.
#[must_use]
pub fn build_intensity_matrix<S: AsRef<[u16]>>(rows: &[S]) -> Array2<f64> {
    let width = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
    let mut matrix = Array2::from_elem((rows.len(), width), f64::NAN);
    if rows.is_empty() {
        return matrix;
    }

    for (start, end, len) in equal_length_runs(rows) {
        let block = Array2::from_shape_fn((end - start, len), |(r, c)| {
            f64::from(rows[start + r].as_ref()[c])
        });
        matrix.slice_mut(s![start..end, ..len]).assign(&block);
    }
    matrix
}
