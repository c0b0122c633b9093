//! GPS outlier removal over held coordinate pairs.
//!
//! The positioning sensor updates slower than the sounder, so each fix is
//! held for several traces. Statistics are computed over the change-points
//! only; an outlier fix is removed together with its whole held run.

use crate::interpolate::interpolate_repeats;
use sdi_core::{Advisory, CoordinatePair};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position cleaning parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PositionCleaningConfig {
    /// Run outlier removal at all. Interpolation always runs.
    pub enabled: bool,
    /// Distance from the median, in standard deviations, beyond which a fix is an outlier.
    pub outlier_sigma: f64,
    /// Upper bound on detection passes.
    pub max_iterations: usize,
}

impl Default for PositionCleaningConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            outlier_sigma: 5.0,
            max_iterations: 10,
        }
    }
}

/// Cleaned series for one coordinate pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedPair {
    /// First axis with outliers removed, still held.
    pub x: Vec<f64>,
    /// Second axis with outliers removed, still held.
    pub y: Vec<f64>,
    pub interpolated_x: Vec<f64>,
    pub interpolated_y: Vec<f64>,
    /// Detection passes that found outliers.
    pub iterations: usize,
    /// Outliers still detected when the pass limit was reached.
    pub residual: usize,
}

impl CleanedPair {
    /// Advisory for a pair whose cleaning loop did not converge.
    #[must_use]
    pub fn advisory(&self, pair: CoordinatePair) -> Option<Advisory> {
        (self.residual > 0).then_some(Advisory::OutlierCapReached {
            pair,
            iterations: self.iterations,
            residual: self.residual,
        })
    }
}

/// Indices where either axis differs from the previous index.
#[allow(clippy::float_cmp)]
fn pair_change_points(x: &[f64], y: &[f64]) -> Vec<usize> {
    (0..x.len())
        .filter(|&i| i == 0 || x[i] != x[i - 1] || y[i] != y[i - 1])
        .collect()
}

/// Median and population standard deviation of the finite values.
#[allow(clippy::cast_precision_loss)]
fn median_and_std(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut sorted: Vec<f64> = values.filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    Some((median, variance.sqrt()))
}

/// Replaces NaN with the nearest preceding valid value; leading NaNs take the first valid value.
pub fn forward_fill(values: &mut [f64]) {
    let Some(first) = values.iter().copied().find(|v| !v.is_nan()) else {
        return;
    };
    let mut last = first;
    for v in values.iter_mut() {
        if v.is_nan() {
            *v = last;
        } else {
            last = *v;
        }
    }
}

/// Removes outlier fixes from coordinate pairs.
#[derive(Debug, Clone, Default)]
pub struct PositionCleaner {
    config: PositionCleaningConfig,
}

impl PositionCleaner {
    #[must_use]
    pub fn new(config: PositionCleaningConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &PositionCleaningConfig {
        &self.config
    }

    /// Change-point indices whose value lies beyond `outlier_sigma` standard
    /// deviations from the median on either axis.
    #[must_use]
    pub fn find_outliers(&self, x: &[f64], y: &[f64]) -> Vec<usize> {
        let points = pair_change_points(x, y);
        let (Some((mx, sx)), Some((my, sy))) = (
            median_and_std(points.iter().map(|&i| x[i])),
            median_and_std(points.iter().map(|&i| y[i])),
        ) else {
            return Vec::new();
        };
        let sigma = self.config.outlier_sigma;
        points
            .into_iter()
            .filter(|&i| (x[i] - mx).abs() > sigma * sx || (y[i] - my).abs() > sigma * sy)
            .collect()
    }

    /// Blanks the held run of every outlier, then forward-fills both axes.
    fn remove(x: &mut [f64], y: &mut [f64], outliers: &[usize]) {
        let points = pair_change_points(x, y);
        for &start in outliers {
            let end = points
                .iter()
                .copied()
                .find(|&p| p > start)
                .unwrap_or(x.len());
            x[start..end].fill(f64::NAN);
            y[start..end].fill(f64::NAN);
        }
        forward_fill(x);
        forward_fill(y);
    }

    /// Cleans one coordinate pair and derives its interpolated companions.
    ///
    /// Detection is repeated on the repaired series until no outlier remains
    /// or `max_iterations` passes have run.
    ///
    /// # Panics
    /// Panics if the axes differ in length.
    #[must_use]
    pub fn clean(&self, x: &[f64], y: &[f64]) -> CleanedPair {
        assert_eq!(x.len(), y.len(), "coordinate axes differ in length");
        let mut x = x.to_vec();
        let mut y = y.to_vec();
        let mut iterations = 0;
        let mut residual = 0;

        if self.config.enabled {
            loop {
                let outliers = self.find_outliers(&x, &y);
                if outliers.is_empty() {
                    break;
                }
                if iterations == self.config.max_iterations {
                    residual = outliers.len();
                    break;
                }
                log::debug!("pass {}: removing {} outlier fix(es)", iterations + 1, outliers.len());
                Self::remove(&mut x, &mut y, &outliers);
                iterations += 1;
            }
        }

        CleanedPair {
            interpolated_x: interpolate_repeats(&x),
            interpolated_y: interpolate_repeats(&y),
            x,
            y,
            iterations,
            residual,
        }
    }
}
