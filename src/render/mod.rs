//! Chart rendering
//!
//! The chart core never touches pixels. [`RenderPlan`] turns a snapshot into
//! labeled lines, signal markers and axis bounds; [`ChartExportFacade`]
//! replays the plan onto a [`PlottingSurface`] and exports the result.
//! [`BitmapSurface`] is the `plotters` implementation used by the binary.

pub mod bitmap;
pub mod facade;
pub mod plan;
pub mod surface;

pub use bitmap::BitmapSurface;
pub use facade::{ChartExportFacade, ChartState};
pub use plan::{LineRole, PlannedLine, RenderPlan};
pub use surface::{
    AxisRange, LineStyle, MarkerStyle, PlottingSurface, Rgb, SurfaceFactory, normalize_image_path,
};
