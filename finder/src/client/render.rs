//! Grid rendering
//!
//! The visual state of the board is a pure function of the annotations and
//! the last applied result ([`project`]). [`GridRenderer`] keeps that result
//! around so an annotation-only update keeps the probability overlay, and a
//! result update re-reads the annotations instead of trusting stale visuals.

use crate::grid::{Cell, GRID_SIZE};

use super::annotation::{AnnotationState, CellStatus};
use super::inference::InferenceResult;

/// Counts at or above this share the strongest intensity
pub const MAX_INTENSITY: u64 = 10;

/// What one cell looks like
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellVisual {
    pub annotation: CellStatus,
    /// `min(count, 10)`, absent when nothing covers the cell
    pub intensity: Option<u8>,
    pub label: String,
}

impl Default for CellVisual {
    fn default() -> Self {
        Self {
            annotation: CellStatus::Unknown,
            intensity: None,
            label: "0".to_string(),
        }
    }
}

impl CellVisual {
    /// Class list in the board's stylesheet vocabulary
    pub fn classes(&self) -> Vec<String> {
        let mut classes = vec!["cell".to_string()];
        match self.annotation {
            CellStatus::Treasure => classes.push("has-treasure".to_string()),
            CellStatus::Empty => classes.push("no-treasure".to_string()),
            CellStatus::Unknown => {}
        }
        if let Some(level) = self.intensity {
            classes.push(format!("probability-{}", level));
        }
        classes
    }
}

/// Visual state of the whole board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisualGrid {
    cells: [[CellVisual; GRID_SIZE]; GRID_SIZE],
}

impl VisualGrid {
    pub fn cell(&self, cell: Cell) -> &CellVisual {
        &self.cells[cell.row()][cell.col()]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellVisual; GRID_SIZE]> {
        self.cells.iter()
    }
}

/// Compose annotation visuals with an optional probability overlay
pub fn project(annotations: &AnnotationState, result: Option<&InferenceResult>) -> VisualGrid {
    let mut grid = VisualGrid::default();
    for cell in Cell::all() {
        let visual = &mut grid.cells[cell.row()][cell.col()];
        visual.annotation = annotations.status(cell);
        if let Some(result) = result {
            let count = result.counts[cell.row()][cell.col()];
            visual.intensity = (count > 0).then(|| count.min(MAX_INTENSITY) as u8);
            visual.label = count.to_string();
        }
    }
    grid
}

/// Holds the rendered board and the overlay it was rendered with
#[derive(Debug, Clone, Default)]
pub struct GridRenderer {
    overlay: Option<InferenceResult>,
    grid: VisualGrid,
}

impl GridRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh annotation visuals, keeping the current overlay
    pub fn apply_annotations(&mut self, annotations: &AnnotationState) {
        self.grid = project(annotations, self.overlay.as_ref());
    }

    /// Replace the overlay wholesale and re-apply the annotations
    pub fn apply_result(&mut self, annotations: &AnnotationState, result: InferenceResult) {
        self.grid = project(annotations, Some(&result));
        self.overlay = Some(result);
    }

    /// Neutral board: no annotations, no overlay, every label "0"
    pub fn reset_all(&mut self) {
        self.overlay = None;
        self.grid = VisualGrid::default();
    }

    pub fn grid(&self) -> &VisualGrid {
        &self.grid
    }

    pub fn overlay(&self) -> Option<&InferenceResult> {
        self.overlay.as_ref()
    }
}
