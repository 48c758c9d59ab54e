//! Chart snapshots: the validated unit handed to the export facade

use crate::error::Result;
use crate::limits::ControlLimitModel;
use crate::render::{ChartExportFacade, SurfaceFactory};
use crate::series::{CenterSpec, MonitoredSeries};
use crate::signals::{SignalRegistry, SignalSequence};
use crate::stats;
use log::info;

/// Immutable, fully validated individuals chart.
///
/// Construction goes through [`ChartSnapshotBuilder`], which raises every
/// configuration error up front.
#[derive(Debug, Clone)]
pub struct ChartSnapshot<F> {
    title: String,
    model: ControlLimitModel,
    registry: SignalRegistry,
    factory: F,
}

impl<F> ChartSnapshot<F> {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn model(&self) -> &ControlLimitModel {
        &self.model
    }

    pub fn registry(&self) -> &SignalRegistry {
        &self.registry
    }

    pub fn series(&self) -> &MonitoredSeries {
        self.model.series()
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}

impl<F: SurfaceFactory> ChartSnapshot<F> {
    pub fn into_facade(self) -> ChartExportFacade<F> {
        ChartExportFacade::new(self)
    }
}

/// Builder for [`ChartSnapshot`]
///
/// Center and standard deviation fall back to estimates from the data
/// (series mean, average moving range) when not provided.
#[derive(Debug, Clone)]
pub struct ChartSnapshotBuilder {
    title: Option<String>,
    monitored_values: Vec<f64>,
    center: Option<CenterSpec>,
    std_deviation: Option<f64>,
    signals: Option<SignalSequence>,
}

impl ChartSnapshotBuilder {
    pub fn new(monitored_values: impl Into<Vec<f64>>) -> Self {
        Self {
            title: None,
            monitored_values: monitored_values.into(),
            center: None,
            std_deviation: None,
            signals: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_center(mut self, center: impl Into<CenterSpec>) -> Self {
        self.center = Some(center.into());
        self
    }

    pub fn with_std_deviation(mut self, std_deviation: f64) -> Self {
        self.std_deviation = Some(std_deviation);
        self
    }

    pub fn with_signals(mut self, signals: impl Into<SignalSequence>) -> Self {
        self.signals = Some(signals.into());
        self
    }

    /// Validate everything and bind the surface factory
    pub fn build<F>(self, factory: F) -> Result<ChartSnapshot<F>> {
        let series = MonitoredSeries::new(self.monitored_values)?;

        let center = match self.center {
            Some(center) => center,
            None => {
                let mean = stats::estimate_center(&series)?;
                info!("No center provided, using series mean {:.4}", mean);
                CenterSpec::Scalar(mean)
            }
        };

        let std_deviation = match self.std_deviation {
            Some(sigma) => sigma,
            None => {
                let sigma = stats::estimate_std_deviation(&series)?;
                info!("No standard deviation provided, using moving-range estimate {:.4}", sigma);
                sigma
            }
        };

        let model = ControlLimitModel::new(series.clone(), center, std_deviation)?;
        let registry = match self.signals {
            Some(signals) => SignalRegistry::new(series, signals)?,
            None => SignalRegistry::without_signals(series),
        };

        Ok(ChartSnapshot {
            title: self.title.unwrap_or_default(),
            model,
            registry,
            factory,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartError;

    #[test]
    fn test_builder_with_explicit_statistics() {
        let snapshot = ChartSnapshotBuilder::new(vec![5.0; 5])
            .with_title("Flat")
            .with_center(5.0)
            .with_std_deviation(1.0)
            .with_signals(vec![0; 5])
            .build(())
            .unwrap();

        assert_eq!(snapshot.title(), "Flat");
        assert_eq!(snapshot.model().upper_action_limit(), vec![8.0; 5]);
        assert!(snapshot.registry().points_above_threshold().is_empty());
    }

    #[test]
    fn test_builder_estimates_missing_statistics() {
        let snapshot = ChartSnapshotBuilder::new(vec![10.0, 12.0, 10.0, 12.0])
            .build(())
            .unwrap();

        assert!((snapshot.model().center_line()[0] - 11.0).abs() < 1e-12);
        assert!((snapshot.model().std_deviation() - 2.0 / 1.128).abs() < 1e-12);
        assert_eq!(snapshot.registry().signals().codes(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_builder_fails_fast() {
        let empty = ChartSnapshotBuilder::new(Vec::<f64>::new()).build(());
        assert!(matches!(empty, Err(ChartError::EmptySeries)));

        let bad_center = ChartSnapshotBuilder::new(vec![1.0, 2.0])
            .with_center(vec![1.0])
            .with_std_deviation(1.0)
            .build(());
        assert!(matches!(bad_center, Err(ChartError::InvalidCenter { .. })));

        let bad_sigma = ChartSnapshotBuilder::new(vec![1.0, 2.0])
            .with_center(1.5)
            .with_std_deviation(-1.0)
            .build(());
        assert!(matches!(bad_sigma, Err(ChartError::InvalidSigma { .. })));

        let bad_signals = ChartSnapshotBuilder::new(vec![1.0, 2.0])
            .with_center(1.5)
            .with_std_deviation(1.0)
            .with_signals(vec![0, 0, 1])
            .build(());
        assert!(matches!(
            bad_signals,
            Err(ChartError::SignalLengthMismatch { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn test_single_point_needs_explicit_sigma() {
        let result = ChartSnapshotBuilder::new(vec![4.0]).build(());
        assert!(matches!(result, Err(ChartError::InsufficientData { .. })));

        let snapshot = ChartSnapshotBuilder::new(vec![4.0])
            .with_std_deviation(0.5)
            .build(())
            .unwrap();
        assert_eq!(snapshot.model().upper_warning_limit(), vec![5.0]);
    }
}
