//! Bitmap plotting surface backed by `plotters`
//!
//! Lines and markers are collected in memory and drawn when the surface is
//! exported; the image format follows the file extension.

use super::surface::{AxisRange, LineStyle, MarkerStyle, PlottingSurface, Rgb, normalize_image_path};
use crate::error::{ChartError, Result};
use crate::signals::SignalPoint;
use log::debug;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// 6 x 3 inch figure at 100 dpi
pub const DEFAULT_WIDTH: u32 = 600;
pub const DEFAULT_HEIGHT: u32 = 300;

#[derive(Debug, Clone)]
struct PendingLine {
    values: Vec<f64>,
    style: LineStyle,
}

#[derive(Debug, Clone)]
struct PendingMarkers {
    points: Vec<SignalPoint>,
    style: MarkerStyle,
}

#[derive(Debug, Clone)]
pub struct BitmapSurface {
    width: u32,
    height: u32,
    lines: Vec<PendingLine>,
    markers: Vec<PendingMarkers>,
    range: Option<AxisRange>,
}

impl Default for BitmapSurface {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl BitmapSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            lines: Vec::new(),
            markers: Vec::new(),
            range: None,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Visible range, defaulting to the extent of the submitted data
    fn effective_range(&self) -> AxisRange {
        if let Some(range) = self.range {
            return range;
        }

        let x_max = self.lines.iter().map(|l| l.values.len()).max().unwrap_or(1) as f64;
        let (y_min, y_max) = self
            .lines
            .iter()
            .flat_map(|l| l.values.iter().copied())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if y_min.is_finite() && y_max.is_finite() {
            AxisRange {
                x_min: 0.0,
                x_max,
                y_min,
                y_max,
            }
        } else {
            AxisRange {
                x_min: 0.0,
                x_max,
                y_min: 0.0,
                y_max: 1.0,
            }
        }
    }

    fn draw(&self, path: &Path) -> std::result::Result<(), String> {
        let range = widen_degenerate(self.effective_range());

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .build_cartesian_2d(range.x_min..range.x_max, range.y_min..range.y_max)
            .map_err(|e| e.to_string())?;

        for line in &self.lines {
            let color = to_plotters_color(line.style.color);
            chart
                .draw_series(LineSeries::new(
                    positioned(&line.values),
                    color.stroke_width(line.style.width),
                ))
                .map_err(|e| e.to_string())?;
        }

        for markers in &self.markers {
            let color = to_plotters_color(markers.style.color);
            let radius = markers.style.size.round().max(1.0) as u32;
            chart
                .draw_series(markers.points.iter().map(|p| {
                    Circle::new((p.index as f64, p.value), radius, color.filled())
                }))
                .map_err(|e| e.to_string())?;
        }

        root.present().map_err(|e| e.to_string())?;
        Ok(())
    }
}

impl PlottingSurface for BitmapSurface {
    fn add_line(&mut self, label: &str, values: &[f64], style: &LineStyle) {
        debug!("Adding line '{}' with {} values", label, values.len());
        self.lines.push(PendingLine {
            values: values.to_vec(),
            style: *style,
        });
    }

    fn add_markers(&mut self, points: &[SignalPoint], style: &MarkerStyle) {
        self.markers.push(PendingMarkers {
            points: points.to_vec(),
            style: *style,
        });
    }

    fn set_visible_range(&mut self, range: &AxisRange) {
        self.range = Some(*range);
    }

    fn export(&mut self, path: &Path) -> Result<PathBuf> {
        let path = normalize_image_path(path);
        self.draw(&path).map_err(|reason| ChartError::Export {
            path: path.clone(),
            reason,
        })?;
        Ok(path)
    }
}

/// Pair values with their 1-based positions
fn positioned(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| ((i + 1) as f64, *v))
        .collect()
}

fn to_plotters_color(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// A zero sigma gives an empty y-range; pad it so coordinates stay finite.
fn widen_degenerate(range: AxisRange) -> AxisRange {
    let mut widened = range;
    if widened.y_max <= widened.y_min {
        widened.y_min -= 1.0;
        widened.y_max += 1.0;
    }
    if widened.x_max <= widened.x_min {
        widened.x_max = widened.x_min + 1.0;
    }
    widened
}
