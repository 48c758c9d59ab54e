//! Signal entry shapes accepted by the registry
//!
//! A signal is either a bare rule-violation code or a rule object from an
//! external rule engine that exposes its code through [`RuleViolation`].

use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key under which rule objects carry their numeric code
pub const RULE_NUMBER_KEY: &str = "rule_number";

/// Capability of rule objects produced by a rule engine
pub trait RuleViolation {
    /// Numeric code of the violated rule (0 means no violation)
    fn rule_number(&self) -> i64;
}

/// Closed set of signal entry shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalEntry {
    IntegerCode(i64),
    RuleCode(i64),
}

impl SignalEntry {
    pub fn from_rule<R: RuleViolation + ?Sized>(rule: &R) -> Self {
        SignalEntry::RuleCode(rule.rule_number())
    }

    pub fn code(&self) -> i64 {
        match self {
            SignalEntry::IntegerCode(code) | SignalEntry::RuleCode(code) => *code,
        }
    }

    /// Classify a loosely typed entry: an integer, or an object carrying `rule_number`
    pub fn from_value(position: usize, value: &Value) -> Result<Self> {
        let invalid = || ChartError::InvalidSignalEntry {
            position,
            found: value.to_string(),
        };

        match value {
            Value::Number(n) => n.as_i64().map(SignalEntry::IntegerCode).ok_or_else(invalid),
            Value::Object(fields) => fields
                .get(RULE_NUMBER_KEY)
                .and_then(Value::as_i64)
                .map(SignalEntry::RuleCode)
                .ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }
}

impl From<i64> for SignalEntry {
    fn from(code: i64) -> Self {
        SignalEntry::IntegerCode(code)
    }
}

impl From<i32> for SignalEntry {
    fn from(code: i32) -> Self {
        SignalEntry::IntegerCode(code.into())
    }
}

impl From<NelsonRule> for SignalEntry {
    fn from(rule: NelsonRule) -> Self {
        SignalEntry::from_rule(&rule)
    }
}

/// Nelson's eight tests for special causes, numbered as in Nelson (1984)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NelsonRule {
    BeyondLimits,
    NineOneSide,
    SixTrend,
    FourteenAlternating,
    TwoOfThreeBeyond2Sigma,
    FourOfFiveBeyond1Sigma,
    FifteenWithin1Sigma,
    EightBeyond1Sigma,
}

impl NelsonRule {
    pub const ALL: [NelsonRule; 8] = [
        NelsonRule::BeyondLimits,
        NelsonRule::NineOneSide,
        NelsonRule::SixTrend,
        NelsonRule::FourteenAlternating,
        NelsonRule::TwoOfThreeBeyond2Sigma,
        NelsonRule::FourOfFiveBeyond1Sigma,
        NelsonRule::FifteenWithin1Sigma,
        NelsonRule::EightBeyond1Sigma,
    ];

    pub fn from_number(number: i64) -> Option<Self> {
        usize::try_from(number)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    pub fn description(&self) -> &'static str {
        match self {
            NelsonRule::BeyondLimits => "point beyond the action limits",
            NelsonRule::NineOneSide => "nine points in a row on one side of the center",
            NelsonRule::SixTrend => "six points in a row steadily increasing or decreasing",
            NelsonRule::FourteenAlternating => "fourteen points in a row alternating up and down",
            NelsonRule::TwoOfThreeBeyond2Sigma => "two of three points beyond 2 sigma, same side",
            NelsonRule::FourOfFiveBeyond1Sigma => "four of five points beyond 1 sigma, same side",
            NelsonRule::FifteenWithin1Sigma => "fifteen points in a row within 1 sigma",
            NelsonRule::EightBeyond1Sigma => "eight points in a row beyond 1 sigma",
        }
    }
}

impl RuleViolation for NelsonRule {
    fn rule_number(&self) -> i64 {
        match self {
            NelsonRule::BeyondLimits => 1,
            NelsonRule::NineOneSide => 2,
            NelsonRule::SixTrend => 3,
            NelsonRule::FourteenAlternating => 4,
            NelsonRule::TwoOfThreeBeyond2Sigma => 5,
            NelsonRule::FourOfFiveBeyond1Sigma => 6,
            NelsonRule::FifteenWithin1Sigma => 7,
            NelsonRule::EightBeyond1Sigma => 8,
        }
    }
}
