#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;

pub use cell::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use payout::*;
pub use random::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod cell;
mod config;
mod error;
mod generator;
mod payout;
mod random;
mod session;
mod types;
mod view;

/// Square grid of cells with a fixed mine layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Builds a board from row-major mine labels, `labels.len()` must be `size * size`.
    pub(crate) fn from_labels(size: Coord, labels: &[bool]) -> Result<Self> {
        check_layout(size, labels.iter().filter(|&&is_mine| is_mine).count())?;
        let side = usize::from(size);
        let cells = Array2::from_shape_fn([side, side], |(row, col)| {
            Cell::new(labels[row * side + col])
        });
        let mine_count = cells.iter().filter(|cell| cell.is_mine()).count() as CellCount;
        Ok(Self { cells, mine_count })
    }

    /// Builds a board with mines at the given row-major indices. Duplicate indices count once.
    pub fn from_mine_indices(size: Coord, mines: &[CellIndex]) -> Result<Self> {
        let total_cells = mult(size, size);
        let mut labels = alloc::vec![false; usize::from(total_cells)];
        for &index in mines {
            if index >= total_cells {
                return Err(GameError::InvalidCell { index, total_cells });
            }
            labels[usize::from(index)] = true;
        }
        Self::from_labels(size, &labels)
    }

    pub fn size(&self) -> Coord {
        self.cells.dim().0 as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        let total_cells = self.total_cells();
        if index < total_cells {
            Ok(index)
        } else {
            Err(GameError::InvalidCell { index, total_cells })
        }
    }

    pub fn cell(&self, index: CellIndex) -> Result<Cell> {
        let index = self.validate_index(index)?;
        Ok(self[index])
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn mine_indices(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.cells()
            .enumerate()
            .filter(|(_, cell)| cell.is_mine())
            .map(|(index, _)| index as CellIndex)
    }

    pub(crate) fn cell_mut(&mut self, index: CellIndex) -> &mut Cell {
        let coords = index_to_coords(index, self.size());
        &mut self.cells[coords.to_nd_index()]
    }

    /// Reveals every mine that has not exploded, leaving safe cells untouched.
    pub(crate) fn show_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine()) {
            cell.reveal();
        }
    }
}

impl Index<CellIndex> for Board {
    type Output = Cell;

    fn index(&self, index: CellIndex) -> &Self::Output {
        let coords = index_to_coords(index, self.size());
        &self.cells[coords.to_nd_index()]
    }
}

/// Checks `1 <= mines < size * size`.
pub(crate) fn check_layout(size: Coord, mines: usize) -> Result<()> {
    if size == 0 {
        return Err(GameError::InvalidConfiguration(ConfigIssue::BoardTooSmall(
            size,
        )));
    }
    let total_cells = mult(size, size);
    if mines < 1 || mines >= usize::from(total_cells) {
        return Err(GameError::InvalidConfiguration(
            ConfigIssue::MineCountOutOfRange {
                mines: mines.min(usize::from(CellCount::MAX)) as CellCount,
                total_cells,
            },
        ));
    }
    Ok(())
}
