//! Linear interpolation between held (repeated) readings.

/// Indices where the value differs from its predecessor. Index 0 always counts.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn change_points(values: &[f64]) -> Vec<usize> {
    (0..values.len())
        .filter(|&i| i == 0 || values[i] != values[i - 1])
        .collect()
}

/// Replaces each held run with values interpolated along the index.
///
/// Values between consecutive change-points are linearly interpolated. The
/// run after the last change-point continues with the slope of the final two
/// change-points; with a single change-point the series stays constant.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn interpolate_repeats(values: &[f64]) -> Vec<f64> {
    let points = change_points(values);
    let mut out = Vec::with_capacity(values.len());

    for pair in points.windows(2) {
        let (i0, i1) = (pair[0], pair[1]);
        let (v0, v1) = (values[i0], values[i1]);
        let slope = (v1 - v0) / (i1 - i0) as f64;
        out.extend((i0..i1).map(|i| v0 + slope * (i - i0) as f64));
    }

    if let Some(&last) = points.last() {
        let v_last = values[last];
        let slope = match points.len() {
            0 | 1 => 0.0,
            n => {
                let prev = points[n - 2];
                (v_last - values[prev]) / (last - prev) as f64
            }
        };
        out.extend((last..values.len()).map(|i| v_last + slope * (i - last) as f64));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_series(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert_abs_diff_eq!(*a, *e, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_trailing_run_is_extrapolated() {
        let values = [1.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0];
        assert_series(
            &interpolate_repeats(&values),
            &[1.0, 4.0 / 3.0, 5.0 / 3.0, 2.0, 2.5, 3.0, 3.5],
        );
    }

    #[test]
    fn test_monotonic() {
        let values = [
            1.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0, 4.0, 5.0, 5.0, 5.0, 5.0, 6.0, 6.0,
        ];
        assert_series(
            &interpolate_repeats(&values),
            &[
                1.0, 1.333_333_33, 1.666_666_67, 2.0, 2.5, 3.0, 3.333_333_33, 3.666_666_67, 4.0,
                4.5, 5.0, 5.25, 5.5, 5.75, 6.0, 6.25,
            ],
        );
    }

    #[test]
    fn test_non_monotonic() {
        let values = [
            1.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0, 4.0, 2.0, 2.0, 1.0, 1.0, 1.0, 6.0,
        ];
        assert_series(
            &interpolate_repeats(&values),
            &[
                1.0, 1.333_333_33, 1.666_666_67, 2.0, 2.5, 3.0, 3.333_333_33, 3.666_666_67, 4.0,
                3.0, 2.0, 1.5, 1.0, 2.666_666_67, 4.333_333_33, 6.0,
            ],
        );
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(interpolate_repeats(&[]).is_empty());
        assert_series(&interpolate_repeats(&[4.0, 4.0, 4.0]), &[4.0, 4.0, 4.0]);
        assert_series(&interpolate_repeats(&[2.0]), &[2.0]);
    }

    #[test]
    fn test_change_points() {
        assert_eq!(change_points(&[1.0, 1.0, 2.0, 1.0, 1.0]), vec![0, 2, 3]);
        assert!(change_points(&[]).is_empty());
    }
}
