use crate::error::{ChartError, Result};
use crate::series::{CenterSpec, MonitoredSeries};
use log::debug;

/// Multiplier of the action limits (3 sigma)
pub const ACTION_SIGMAS: f64 = 3.0;
/// Multiplier of the warning limits (2 sigma)
pub const WARNING_SIGMAS: f64 = 2.0;

/// Individuals chart limit model.
///
/// Holds the monitored series, the resolved center line and the process
/// standard deviation. Every limit is derived on demand through [`band`],
/// so the limits can never drift from the center and sigma that produced them.
///
/// [`band`]: ControlLimitModel::band
#[derive(Debug, Clone)]
pub struct ControlLimitModel {
    series: MonitoredSeries,
    center: Vec<f64>,
    std_deviation: f64,
}

impl ControlLimitModel {
    pub fn new(
        series: MonitoredSeries,
        center: impl Into<CenterSpec>,
        std_deviation: f64,
    ) -> Result<Self> {
        validate_sigma(std_deviation)?;
        let center: CenterSpec = center.into();
        let center = center.resolve(series.len())?;

        debug!(
            "Control limit model: {} points, center[0]={:.4}, sigma={:.4}",
            series.len(),
            center[0],
            std_deviation
        );

        Ok(Self {
            series,
            center,
            std_deviation,
        })
    }

    /// Replace the center line. The model is left untouched on error.
    pub fn set_center(&mut self, center: impl Into<CenterSpec>) -> Result<()> {
        let center: CenterSpec = center.into();
        self.center = center.resolve(self.series.len())?;
        Ok(())
    }

    /// Replace the standard deviation. Zero collapses every band onto the center.
    pub fn set_std_deviation(&mut self, std_deviation: f64) -> Result<()> {
        validate_sigma(std_deviation)?;
        self.std_deviation = std_deviation;
        Ok(())
    }

    pub fn series(&self) -> &MonitoredSeries {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn std_deviation(&self) -> f64 {
        self.std_deviation
    }

    pub fn center_line(&self) -> &[f64] {
        &self.center
    }

    /// `center[i] + k * sigma` for every point of the series
    pub fn band(&self, k: f64) -> Vec<f64> {
        let offset = k * self.std_deviation;
        self.center.iter().map(|c| c + offset).collect()
    }

    pub fn upper_action_limit(&self) -> Vec<f64> {
        self.band(ACTION_SIGMAS)
    }

    pub fn lower_action_limit(&self) -> Vec<f64> {
        self.band(-ACTION_SIGMAS)
    }

    pub fn upper_warning_limit(&self) -> Vec<f64> {
        self.band(WARNING_SIGMAS)
    }

    pub fn lower_warning_limit(&self) -> Vec<f64> {
        self.band(-WARNING_SIGMAS)
    }

    pub fn plus_one_sd(&self) -> Vec<f64> {
        self.band(1.0)
    }

    pub fn minus_one_sd(&self) -> Vec<f64> {
        self.band(-1.0)
    }

    /// Positions (1-based) of points outside the action limits
    pub fn points_beyond_action_limits(&self) -> Vec<usize> {
        let upper = self.upper_action_limit();
        let lower = self.lower_action_limit();

        self.series
            .iter()
            .enumerate()
            .filter(|(i, value)| **value > upper[*i] || **value < lower[*i])
            .map(|(i, _)| i + 1)
            .collect()
    }
}

fn validate_sigma(std_deviation: f64) -> Result<()> {
    if !std_deviation.is_finite() || std_deviation < 0.0 {
        return Err(ChartError::InvalidSigma {
            sigma: std_deviation,
        });
    }
    Ok(())
}
