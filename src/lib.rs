//! Individuals (I) control charts
//!
//! Computes the center line and the ±1σ, ±2σ (warning) and ±3σ (action)
//! limit bands of an individuals chart, aligns out-of-control signal codes
//! with the monitored series, and renders the result through a pluggable
//! plotting surface.

pub mod chart;
pub mod config;
pub mod error;
pub mod limits;
pub mod render;
pub mod series;
pub mod signals;
pub mod stats;

pub use chart::{ChartSnapshot, ChartSnapshotBuilder};
pub use error::{ChartError, Result};
pub use limits::ControlLimitModel;
pub use render::{ChartExportFacade, ChartState, PlottingSurface, RenderPlan};
pub use series::{CenterSpec, MonitoredSeries};
pub use signals::{SignalEntry, SignalPoint, SignalRegistry, SignalSequence};
