//! Per-cell player annotations

use serde::{Deserialize, Serialize};

use crate::grid::{Cell, GRID_SIZE};

/// What the player has recorded about a cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    #[default]
    Unknown,
    Treasure,
    Empty,
}

/// The status a click asks for; also the active marking mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    #[default]
    Treasure,
    Empty,
}

impl From<Mark> for CellStatus {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::Treasure => CellStatus::Treasure,
            Mark::Empty => CellStatus::Empty,
        }
    }
}

/// Derived coordinate lists, in row-major order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSnapshot {
    pub treasure: Vec<Cell>,
    pub empty: Vec<Cell>,
}

/// One status per cell. The treasure and empty lists are only ever derived
/// from this table, so a cell can never appear in both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationState {
    cells: [[CellStatus; GRID_SIZE]; GRID_SIZE],
}

impl AnnotationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, cell: Cell) -> CellStatus {
        self.cells[cell.row()][cell.col()]
    }

    /// Toggle `mark` on a cell: marking a cell with the status it already has
    /// clears it, anything else overwrites. Returns the new status.
    pub fn mark(&mut self, cell: Cell, mark: Mark) -> CellStatus {
        let desired = CellStatus::from(mark);
        let slot = &mut self.cells[cell.row()][cell.col()];
        *slot = if *slot == desired {
            CellStatus::Unknown
        } else {
            desired
        };
        *slot
    }

    pub fn reset(&mut self) {
        self.cells = Default::default();
    }

    pub fn snapshot(&self) -> AnnotationSnapshot {
        let mut snapshot = AnnotationSnapshot::default();
        for cell in Cell::all() {
            match self.status(cell) {
                CellStatus::Treasure => snapshot.treasure.push(cell),
                CellStatus::Empty => snapshot.empty.push(cell),
                CellStatus::Unknown => {}
            }
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: i64, col: i64) -> Cell {
        Cell::new(row, col).unwrap()
    }

    #[test]
    fn test_all_cells_start_unknown() {
        let state = AnnotationState::new();
        assert!(Cell::all().all(|c| state.status(c) == CellStatus::Unknown));
        assert_eq!(state.snapshot(), AnnotationSnapshot::default());
    }

    #[test]
    fn test_repeated_mark_toggles() {
        let mut state = AnnotationState::new();
        let c = cell(1, 4);

        assert_eq!(state.mark(c, Mark::Treasure), CellStatus::Treasure);
        assert_eq!(state.mark(c, Mark::Treasure), CellStatus::Unknown);
        assert_eq!(state.mark(c, Mark::Treasure), CellStatus::Treasure);
    }

    #[test]
    fn test_opposite_mark_overrides_directly() {
        let mut state = AnnotationState::new();
        let c = cell(3, 0);

        state.mark(c, Mark::Treasure);
        assert_eq!(state.mark(c, Mark::Empty), CellStatus::Empty);

        let snapshot = state.snapshot();
        assert!(snapshot.treasure.is_empty());
        assert_eq!(snapshot.empty, vec![c]);
    }

    #[test]
    fn test_derived_lists_stay_disjoint() {
        let mut state = AnnotationState::new();
        // Deterministic pseudo-random walk over cells and marks
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let c = Cell::from_index(seed as usize % 25).unwrap();
            let mark = if seed & 0x100 == 0 { Mark::Treasure } else { Mark::Empty };
            state.mark(c, mark);

            let snapshot = state.snapshot();
            assert!(snapshot.treasure.iter().all(|t| !snapshot.empty.contains(t)));
            for c in Cell::all() {
                let listed = (snapshot.treasure.contains(&c), snapshot.empty.contains(&c));
                let expected = match state.status(c) {
                    CellStatus::Unknown => (false, false),
                    CellStatus::Treasure => (true, false),
                    CellStatus::Empty => (false, true),
                };
                assert_eq!(listed, expected, "cell {}", c);
            }
        }
    }

    #[test]
    fn test_reset_clears_every_cell() {
        let mut state = AnnotationState::new();
        state.mark(cell(0, 0), Mark::Treasure);
        state.mark(cell(4, 4), Mark::Empty);

        state.reset();
        assert_eq!(state, AnnotationState::new());
    }

    #[test]
    fn test_snapshot_is_row_major() {
        let mut state = AnnotationState::new();
        state.mark(cell(3, 1), Mark::Treasure);
        state.mark(cell(0, 2), Mark::Treasure);
        assert_eq!(state.snapshot().treasure, vec![cell(0, 2), cell(3, 1)]);
    }
}
