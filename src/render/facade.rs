//! Export facade: drives a plotting surface from a chart snapshot

use super::plan::RenderPlan;
use super::surface::{PlottingSurface, SurfaceFactory, normalize_image_path};
use crate::chart::ChartSnapshot;
use crate::error::Result;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Lifecycle of a facade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    /// Snapshot validated, nothing drawn yet
    Built,
    /// Lines, markers and bounds submitted to a surface
    Rendered,
    /// Drawing written to at least one image file
    Exported,
}

/// Renders one snapshot and exports it to image files.
///
/// Rendering is explicit: [`render`] draws onto a fresh surface from the
/// snapshot's factory. [`export`] renders first when needed and writes each
/// distinct path once per facade.
///
/// [`render`]: ChartExportFacade::render
/// [`export`]: ChartExportFacade::export
pub struct ChartExportFacade<F: SurfaceFactory> {
    snapshot: ChartSnapshot<F>,
    surface: Option<F::Surface>,
    state: ChartState,
    /// Normalized request paths, aligned with `exported`
    requested: Vec<PathBuf>,
    exported: Vec<PathBuf>,
}

impl<F: SurfaceFactory> ChartExportFacade<F> {
    pub fn new(snapshot: ChartSnapshot<F>) -> Self {
        Self {
            snapshot,
            surface: None,
            state: ChartState::Built,
            requested: Vec::new(),
            exported: Vec::new(),
        }
    }

    pub fn state(&self) -> ChartState {
        self.state
    }

    pub fn snapshot(&self) -> &ChartSnapshot<F> {
        &self.snapshot
    }

    /// Paths the surface reported writing, in export order
    pub fn exported_paths(&self) -> &[PathBuf] {
        &self.exported
    }

    pub fn plan(&self) -> RenderPlan {
        RenderPlan::build(
            self.snapshot.title(),
            self.snapshot.model(),
            self.snapshot.registry(),
        )
    }

    /// Draw all lines, signal markers and axis bounds onto a new surface
    pub fn render(&mut self) {
        self.surface = Some(self.draw());
        self.state = ChartState::Rendered;
    }

    fn draw(&self) -> F::Surface {
        let plan = self.plan();
        let mut surface = self.snapshot.factory().create_surface();
        plan.apply(&mut surface);

        info!(
            "Rendered chart '{}': {} lines, {} signal markers",
            plan.title,
            plan.lines.len(),
            plan.markers.len()
        );
        surface
    }

    /// Export the drawing, returning the path the surface wrote.
    ///
    /// A path already exported by this facade is not written again.
    pub fn export(&mut self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let normalized = normalize_image_path(path.as_ref());
        if let Some(i) = self.requested.iter().position(|p| *p == normalized) {
            debug!("{} already exported, skipping", normalized.display());
            return Ok(self.exported[i].clone());
        }

        let mut surface = match self.surface.take() {
            Some(surface) => surface,
            None => {
                self.state = ChartState::Rendered;
                self.draw()
            }
        };
        let written = surface.export(&normalized);
        self.surface = Some(surface);

        let written = written?;
        info!("Exported chart to {}", written.display());

        self.requested.push(normalized);
        self.exported.push(written.clone());
        self.state = ChartState::Exported;
        Ok(written)
    }

    /// Surface of the last render, if any
    pub fn surface(&self) -> Option<&F::Surface> {
        self.surface.as_ref()
    }
}
