use crate::chart::{ChartSnapshot, ChartSnapshotBuilder};
use crate::render::bitmap::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::series::CenterSpec;
use crate::signals::SignalRegistry;
use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;

/// Chart data and statistics as supplied by the report tooling.
///
/// `center` and `signals` stay loosely typed here; they are validated when
/// the snapshot is built so malformed entries surface as chart errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub title: Option<String>,
    pub monitored_values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_deviation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signals: Option<Vec<Value>>,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_output_path() -> String {
    "ichart.jpeg".to_string()
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

impl ChartConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read chart config {}", path))?;
        let config = Self::from_json_str(&config_str)
            .with_context(|| format!("Failed to parse chart config {}", path))?;

        info!(
            "Loaded chart config '{}' with {} values",
            config.title.as_deref().unwrap_or(""),
            config.monitored_values.len()
        );
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder carrying every field of the config, validated
    pub fn snapshot_builder(&self) -> crate::error::Result<ChartSnapshotBuilder> {
        let mut builder = ChartSnapshotBuilder::new(self.monitored_values.clone());

        if let Some(title) = &self.title {
            builder = builder.with_title(title.clone());
        }
        if let Some(center) = &self.center {
            builder = builder.with_center(CenterSpec::try_from(center)?);
        }
        if let Some(sigma) = self.standard_deviation {
            builder = builder.with_std_deviation(sigma);
        }
        match &self.signals {
            Some(raw) => builder = builder.with_signals(SignalRegistry::normalize(raw)?),
            None => warn!("No signals supplied, chart will show no markers"),
        }

        Ok(builder)
    }

    pub fn build_snapshot<F>(&self, factory: F) -> Result<ChartSnapshot<F>> {
        Ok(self.snapshot_builder()?.build(factory)?)
    }
}
