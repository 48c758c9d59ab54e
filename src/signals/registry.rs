//! Canonical signal codes aligned with a monitored series

use super::core::{NelsonRule, SignalEntry};
use crate::error::{ChartError, Result};
use crate::series::MonitoredSeries;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical rule-violation codes, one per monitored point.
///
/// Codes are kept verbatim: zero and negative codes stay in the sequence
/// and only count as "no signal" when markers are selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSequence {
    codes: Vec<i64>,
}

impl SignalSequence {
    /// All-zero sequence of the given length
    pub fn none(len: usize) -> Self {
        Self {
            codes: vec![0; len],
        }
    }

    pub fn from_entries<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<SignalEntry>,
    {
        Self {
            codes: entries.into_iter().map(|e| e.into().code()).collect(),
        }
    }

    pub fn codes(&self) -> &[i64] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Number of codes that flag a signal
    pub fn flagged_count(&self) -> usize {
        self.codes.iter().filter(|&&code| code > 0).count()
    }
}

impl From<Vec<i64>> for SignalSequence {
    fn from(codes: Vec<i64>) -> Self {
        Self { codes }
    }
}

/// A flagged point: 1-based position and its monitored value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalPoint {
    pub index: usize,
    pub value: f64,
}

/// Signal codes bound to the series they annotate
#[derive(Debug, Clone)]
pub struct SignalRegistry {
    series: MonitoredSeries,
    signals: SignalSequence,
}

impl SignalRegistry {
    /// Normalize loosely typed entries into canonical codes.
    ///
    /// The whole input is rejected on the first entry that is neither an
    /// integer nor a rule object; no partial sequence is produced.
    pub fn normalize(raw_signals: &[Value]) -> Result<SignalSequence> {
        let codes = raw_signals
            .iter()
            .enumerate()
            .map(|(position, value)| SignalEntry::from_value(position, value).map(|e| e.code()))
            .collect::<Result<Vec<i64>>>()?;

        debug!("Normalized {} signal entries", codes.len());
        Ok(SignalSequence { codes })
    }

    /// Attach signals to a series; lengths must match.
    pub fn new(series: MonitoredSeries, signals: SignalSequence) -> Result<Self> {
        if signals.len() != series.len() {
            return Err(ChartError::SignalLengthMismatch {
                expected: series.len(),
                got: signals.len(),
            });
        }

        info!(
            "Signal registry: {} of {} points flagged",
            signals.flagged_count(),
            series.len()
        );
        for (i, code) in signals.codes.iter().enumerate().filter(|(_, code)| **code > 0) {
            debug!("Point {} flagged by rule {}: {}", i + 1, code, rule_label(*code));
        }

        Ok(Self { series, signals })
    }

    /// Registry with no flagged points
    pub fn without_signals(series: MonitoredSeries) -> Self {
        let signals = SignalSequence::none(series.len());
        Self { series, signals }
    }

    pub fn signals(&self) -> &SignalSequence {
        &self.signals
    }

    pub fn series(&self) -> &MonitoredSeries {
        &self.series
    }

    /// Points whose aligned code is positive, in series order
    pub fn points_above_threshold(&self) -> Vec<SignalPoint> {
        self.series
            .iter()
            .zip(self.signals.codes.iter())
            .enumerate()
            .filter(|(_, (_, code))| **code > 0)
            .map(|(i, (value, _))| SignalPoint {
                index: i + 1,
                value: *value,
            })
            .collect()
    }
}

/// Nelson description of a code; engines may use codes beyond the eight rules
fn rule_label(code: i64) -> &'static str {
    NelsonRule::from_number(code)
        .map(|rule| rule.description())
        .unwrap_or("rule outside the Nelson set")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn series(values: Vec<f64>) -> MonitoredSeries {
        MonitoredSeries::new(values).unwrap()
    }

    #[test]
    fn test_normalize_mixed_entries() {
        let raw = vec![json!(2), json!({"rule_number": 4}), json!(0)];
        let signals = SignalRegistry::normalize(&raw).unwrap();
        assert_eq!(signals.codes(), &[2, 4, 0]);
    }

    #[test]
    fn test_normalize_is_all_or_nothing() {
        let raw = vec![json!(2), json!("bad")];
        let result = SignalRegistry::normalize(&raw);
        assert!(matches!(
            result,
            Err(ChartError::InvalidSignalEntry { position: 1, .. })
        ));
    }

    #[test]
    fn test_negative_codes_preserved_but_not_flagged() {
        let signals = SignalSequence::from(vec![-1, 0, 3]);
        let registry = SignalRegistry::new(series(vec![1.0, 2.0, 3.0]), signals).unwrap();

        assert_eq!(registry.signals().codes(), &[-1, 0, 3]);
        assert_eq!(
            registry.points_above_threshold(),
            vec![SignalPoint { index: 3, value: 3.0 }]
        );
    }

    #[test]
    fn test_points_above_threshold_one_based() {
        let registry = SignalRegistry::new(
            series(vec![10.0, 12.0, 9.0, 20.0]),
            SignalSequence::from(vec![0, 0, 0, 5]),
        )
        .unwrap();

        assert_eq!(
            registry.points_above_threshold(),
            vec![SignalPoint { index: 4, value: 20.0 }]
        );
    }

    #[test]
    fn test_length_mismatch() {
        let result = SignalRegistry::new(series(vec![1.0, 2.0]), SignalSequence::from(vec![0]));
        assert!(matches!(
            result,
            Err(ChartError::SignalLengthMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_typed_entries() {
        let signals = SignalSequence::from_entries([
            SignalEntry::from(2),
            SignalEntry::from(NelsonRule::SixTrend),
            SignalEntry::from(0),
        ]);
        assert_eq!(signals.codes(), &[2, 3, 0]);
        assert_eq!(signals.flagged_count(), 2);
    }

    #[test]
    fn test_without_signals() {
        let registry = SignalRegistry::without_signals(series(vec![5.0; 3]));
        assert_eq!(registry.signals().codes(), &[0, 0, 0]);
        assert!(registry.points_above_threshold().is_empty());
    }

    #[test]
    fn test_rule_label_names_nelson_rules() {
        assert_eq!(rule_label(1), "point beyond the action limits");
        assert_eq!(rule_label(3), NelsonRule::SixTrend.description());
        assert_eq!(rule_label(42), "rule outside the Nelson set");
    }
}
