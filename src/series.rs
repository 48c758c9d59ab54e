//! Monitored measurements and center line specifications.

use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::Deref;
use std::sync::Arc;

/// Ordered measurements plotted on an individuals chart.
///
/// The values are shared immutably between the limit model and the signal
/// registry; once attached to a chart they never change.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoredSeries {
    values: Arc<[f64]>,
}

impl MonitoredSeries {
    /// Create a series, rejecting empty input.
    pub fn new(values: impl Into<Vec<f64>>) -> Result<Self> {
        let values = values.into();
        if values.is_empty() {
            return Err(ChartError::EmptySeries);
        }
        Ok(Self {
            values: values.into(),
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at a 1-based display position.
    pub fn at_position(&self, position: usize) -> Option<f64> {
        position
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .copied()
    }
}

impl Deref for MonitoredSeries {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}

impl TryFrom<Vec<f64>> for MonitoredSeries {
    type Error = ChartError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

/// Center line of a chart: a constant target or an explicit per-point line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CenterSpec {
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl CenterSpec {
    /// Expand into one center value per monitored point.
    pub fn resolve(&self, len: usize) -> Result<Vec<f64>> {
        match self {
            CenterSpec::Scalar(center) => {
                if !center.is_finite() {
                    return Err(ChartError::InvalidCenter {
                        reason: format!("center {} is not finite", center),
                    });
                }
                Ok(vec![*center; len])
            }
            CenterSpec::Sequence(values) => {
                if values.len() != len {
                    return Err(ChartError::InvalidCenter {
                        reason: format!(
                            "center has {} values but the series has {}",
                            values.len(),
                            len
                        ),
                    });
                }
                if let Some(position) = values.iter().position(|v| !v.is_finite()) {
                    return Err(ChartError::InvalidCenter {
                        reason: format!("center value at position {} is not finite", position + 1),
                    });
                }
                Ok(values.clone())
            }
        }
    }
}

impl From<f64> for CenterSpec {
    fn from(center: f64) -> Self {
        CenterSpec::Scalar(center)
    }
}

impl From<Vec<f64>> for CenterSpec {
    fn from(values: Vec<f64>) -> Self {
        CenterSpec::Sequence(values)
    }
}

impl From<&[f64]> for CenterSpec {
    fn from(values: &[f64]) -> Self {
        CenterSpec::Sequence(values.to_vec())
    }
}

/// Loosely typed center values, as they arrive from report data files.
impl TryFrom<&Value> for CenterSpec {
    type Error = ChartError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(CenterSpec::Scalar).ok_or_else(|| {
                ChartError::InvalidCenter {
                    reason: format!("{} is not representable as f64", n),
                }
            }),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_f64().ok_or_else(|| ChartError::InvalidCenter {
                        reason: format!("center sequence contains non-numeric value {}", item),
                    })
                })
                .collect::<Result<Vec<f64>>>()
                .map(CenterSpec::Sequence),
            other => Err(ChartError::InvalidCenter {
                reason: format!("center must be a number or a sequence, got {}", other),
            }),
        }
    }
}
