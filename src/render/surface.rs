//! Plotting surface capability and the styles passed to it

use crate::error::Result;
use crate::signals::SignalPoint;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Image extensions accepted as-is by [`normalize_image_path`]
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "bmp"];
/// Extension appended to paths without a recognized image suffix
pub const DEFAULT_IMAGE_EXTENSION: &str = "jpeg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const DARK_ORANGE: Rgb = Rgb(0xFF, 0x8C, 0x00);
    pub const GREEN: Rgb = Rgb(0, 128, 0);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Rgb,
    pub width: u32,
}

impl LineStyle {
    pub const fn solid(color: Rgb) -> Self {
        Self { color, width: 1 }
    }
}

/// Style of unconnected signal markers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub color: Rgb,
    pub size: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: Rgb::RED,
            size: 2.2,
        }
    }
}

/// Visible axis bounds of a chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Drawing capability consumed by the export facade.
///
/// Line values are plotted against 1-based positions. Implementations own
/// pixels and file encoding; callers only submit lines, markers and bounds.
pub trait PlottingSurface {
    fn add_line(&mut self, label: &str, values: &[f64], style: &LineStyle);

    fn add_markers(&mut self, points: &[SignalPoint], style: &MarkerStyle);

    fn set_visible_range(&mut self, range: &AxisRange);

    /// Write the current drawing, returning the path actually written
    fn export(&mut self, path: &Path) -> Result<PathBuf>;
}

/// Creates a fresh surface for every render
pub trait SurfaceFactory {
    type Surface: PlottingSurface;

    fn create_surface(&self) -> Self::Surface;
}

impl<F, S> SurfaceFactory for F
where
    F: Fn() -> S,
    S: PlottingSurface,
{
    type Surface = S;

    fn create_surface(&self) -> S {
        self()
    }
}

/// Append the default image extension unless the path already has a recognized one
pub fn normalize_image_path(path: &Path) -> PathBuf {
    let recognized = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false);

    if recognized {
        return path.to_path_buf();
    }

    let mut normalized = OsString::from(path.as_os_str());
    normalized.push(".");
    normalized.push(DEFAULT_IMAGE_EXTENSION);
    PathBuf::from(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_extensions_kept() {
        for name in ["chart.jpeg", "chart.jpg", "chart.PNG", "out/chart.bmp"] {
            assert_eq!(normalize_image_path(Path::new(name)), PathBuf::from(name));
        }
    }

    #[test]
    fn test_default_extension_appended() {
        assert_eq!(
            normalize_image_path(Path::new("report/chart")),
            PathBuf::from("report/chart.jpeg")
        );
        assert_eq!(
            normalize_image_path(Path::new("chart.v2")),
            PathBuf::from("chart.v2.jpeg")
        );
    }
}
