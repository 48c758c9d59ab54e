//! Estimation of center and sigma for individuals charts.
//!
//! Used when report data does not carry precomputed statistics. The center
//! is the series mean; sigma is estimated from the average moving range,
//! `sigma = MR-bar / d2` with `d2 = 1.128` for moving ranges of two points
//! (Montgomery, *Introduction to Statistical Quality Control*, ch. 6).

use crate::error::{ChartError, Result};
use statrs::statistics::Statistics;

/// d2 factor for a moving range of span 2
pub const D2_SPAN_TWO: f64 = 1.128;

/// Mean of the monitored values
pub fn estimate_center(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(ChartError::InsufficientData {
            required: 1,
            got: 0,
        });
    }
    Ok(values.mean())
}

/// Absolute differences between consecutive values
pub fn moving_ranges(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| (w[1] - w[0]).abs()).collect()
}

/// Short-term sigma from the average moving range
pub fn estimate_std_deviation(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(ChartError::InsufficientData {
            required: 2,
            got: values.len(),
        });
    }

    let mr_bar = moving_ranges(values).mean();
    Ok(mr_bar / D2_SPAN_TWO)
}
