//! Signal annotations
//!
//! Out-of-control signals come from an external rule engine, either as bare
//! rule codes or as rule objects. This module normalizes both shapes into one
//! canonical code sequence aligned with the monitored series.

pub mod core;
pub mod registry;

pub use self::core::{NelsonRule, RuleViolation, SignalEntry};
pub use self::registry::{SignalPoint, SignalRegistry, SignalSequence};
