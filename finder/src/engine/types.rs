//! Engine types and error definitions

use thiserror::Error;

use crate::grid::{Cell, CellError, GRID_SIZE};
use crate::protocol::PositionResponse;

/// Errors that can occur when counting placements
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown shape: {0}")]
    UnknownShape(String),

    #[error("Invalid cell: {0}")]
    InvalidCell(#[from] CellError),
}

/// A placement is the set of covered cells, as a row-major bitmask
pub type PlacementMask = u32;

pub fn mask_of(cells: impl IntoIterator<Item = Cell>) -> PlacementMask {
    cells.into_iter().fold(0, |mask, c| mask | (1 << c.index()))
}

/// Cells a placement must cover and cells it must avoid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Constraints {
    pub required: PlacementMask,
    pub forbidden: PlacementMask,
}

impl Constraints {
    /// Build from wire `[row, col]` pairs, rejecting out-of-range cells
    pub fn from_pairs(
        has_treasure: &[[i64; 2]],
        no_treasure: &[[i64; 2]],
    ) -> Result<Self, EngineError> {
        let cells = |pairs: &[[i64; 2]]| -> Result<Vec<Cell>, CellError> {
            pairs.iter().map(|&[row, col]| Cell::new(row, col)).collect()
        };
        Ok(Self {
            required: mask_of(cells(has_treasure)?),
            forbidden: mask_of(cells(no_treasure)?),
        })
    }

    pub fn admits(&self, placement: PlacementMask) -> bool {
        placement & self.required == self.required && placement & self.forbidden == 0
    }
}

/// Per-cell coverage of the placements that survived filtering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    pub grid: [[u64; GRID_SIZE]; GRID_SIZE],
    pub total: u64,
}

impl Coverage {
    pub fn add(&mut self, placement: PlacementMask) {
        for cell in Cell::all() {
            if placement & (1 << cell.index()) != 0 {
                self.grid[cell.row()][cell.col()] += 1;
            }
        }
        self.total += 1;
    }
}

impl From<Coverage> for PositionResponse {
    fn from(coverage: Coverage) -> Self {
        Self {
            grid_counts: coverage.grid.iter().map(|row| row.to_vec()).collect(),
            all_positions_count: coverage.total,
        }
    }
}
