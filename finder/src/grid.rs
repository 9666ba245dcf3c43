//! Board geometry shared by the client and the counting engine

use std::fmt;
use thiserror::Error;

/// Side length of the square board
pub const GRID_SIZE: usize = 5;

/// Total number of cells on the board
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cell ({row}, {col}) is outside the grid")]
pub struct CellError {
    pub row: i64,
    pub col: i64,
}

/// A board cell, always within bounds once constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    pub fn new(row: i64, col: i64) -> Result<Self, CellError> {
        let size = GRID_SIZE as i64;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(CellError { row, col })
        }
    }

    /// Cell at a row-major index in `0..CELL_COUNT`
    pub fn from_index(index: usize) -> Option<Self> {
        (index < CELL_COUNT).then(|| Self {
            row: (index / GRID_SIZE) as u8,
            col: (index % GRID_SIZE) as u8,
        })
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major index, also the bit position used by placement masks
    pub fn index(self) -> usize {
        self.row() * GRID_SIZE + self.col()
    }

    /// All 25 cells in row-major order
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..CELL_COUNT).filter_map(Cell::from_index)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_bounds() {
        assert!(Cell::new(0, 0).is_ok());
        assert!(Cell::new(4, 4).is_ok());
        assert_eq!(Cell::new(5, 0), Err(CellError { row: 5, col: 0 }));
        assert!(Cell::new(0, -1).is_err());
    }

    #[test]
    fn test_all_cells_row_major() {
        let cells: Vec<Cell> = Cell::all().collect();
        assert_eq!(cells.len(), CELL_COUNT);
        assert_eq!(cells[0], Cell::new(0, 0).unwrap());
        assert_eq!(cells[7], Cell::new(1, 2).unwrap());
        assert!(cells.iter().enumerate().all(|(i, c)| c.index() == i));
    }
}
