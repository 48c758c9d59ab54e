use anyhow::Result;
use ichart::signals::{NelsonRule, RuleViolation};
use ichart::{ChartError, MonitoredSeries, SignalEntry, SignalPoint, SignalRegistry, SignalSequence};
use serde_json::json;

/// Rule object as produced by an external rule engine
struct EngineSignal {
    rule: i64,
}

impl RuleViolation for EngineSignal {
    fn rule_number(&self) -> i64 {
        self.rule
    }
}

#[test]
fn test_normalize_integers_and_rule_objects() -> Result<()> {
    let raw = vec![json!(2), json!({"rule_number": 4}), json!(0)];
    let signals = SignalRegistry::normalize(&raw)?;

    assert_eq!(signals.codes(), &[2, 4, 0]);
    Ok(())
}

#[test]
fn test_normalize_rejects_whole_input() {
    let raw = vec![json!(2), json!("bad")];
    let result = SignalRegistry::normalize(&raw);

    match result {
        Err(ChartError::InvalidSignalEntry { position, found }) => {
            assert_eq!(position, 1);
            assert_eq!(found, "\"bad\"");
        }
        other => panic!("expected InvalidSignalEntry, got {:?}", other),
    }
}

#[test]
fn test_typed_rule_objects() -> Result<()> {
    let engine = EngineSignal { rule: 4 };
    let signals = SignalSequence::from_entries([
        SignalEntry::from(2),
        SignalEntry::from_rule(&engine),
        SignalEntry::from(NelsonRule::BeyondLimits),
        SignalEntry::from(0),
    ]);

    assert_eq!(signals.codes(), &[2, 4, 1, 0]);
    Ok(())
}

#[test]
fn test_points_above_threshold() -> Result<()> {
    let series = MonitoredSeries::new(vec![10.0, 12.0, 9.0, 20.0])?;
    let registry = SignalRegistry::new(series, SignalSequence::from(vec![0, 0, 0, 5]))?;

    assert_eq!(
        registry.points_above_threshold(),
        vec![SignalPoint {
            index: 4,
            value: 20.0
        }]
    );
    Ok(())
}

#[test]
fn test_points_keep_series_order() -> Result<()> {
    let series = MonitoredSeries::new(vec![1.0, 2.0, 3.0, 4.0, 5.0])?;
    let registry = SignalRegistry::new(series, SignalSequence::from(vec![3, -2, 0, 1, 7]))?;

    let indexes: Vec<usize> = registry
        .points_above_threshold()
        .iter()
        .map(|p| p.index)
        .collect();
    assert_eq!(indexes, vec![1, 4, 5]);
    assert_eq!(registry.signals().codes(), &[3, -2, 0, 1, 7]);
    Ok(())
}

#[test]
fn test_flat_series_has_no_points() -> Result<()> {
    let series = MonitoredSeries::new(vec![5.0; 5])?;
    let registry = SignalRegistry::new(series, SignalSequence::from(vec![0; 5]))?;

    assert!(registry.points_above_threshold().is_empty());
    Ok(())
}

#[test]
fn test_length_mismatch() -> Result<()> {
    let series = MonitoredSeries::new(vec![1.0, 2.0, 3.0])?;
    let signals = SignalRegistry::normalize(&[json!(1), json!(0)])?;

    let result = SignalRegistry::new(series, signals);
    assert!(matches!(
        result,
        Err(ChartError::SignalLengthMismatch {
            expected: 3,
            got: 2
        })
    ));
    Ok(())
}
