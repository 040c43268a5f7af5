use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

/// What the player may see of a cell. `is_mine` stays hidden until the cell is revealed
/// or the round has ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub is_mine: Option<bool>,
    pub is_revealed: bool,
    pub is_exploded: bool,
}

impl CellView {
    fn new(cell: Cell, disclose: bool) -> Self {
        Self {
            is_mine: (disclose || cell.is_revealed()).then_some(cell.is_mine()),
            is_revealed: cell.is_revealed(),
            is_exploded: cell.is_exploded(),
        }
    }
}

/// Read model handed to the presentation layer after every transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub coins: Coins,
    pub current_bet: Coins,
    pub status: SessionStatus,
    pub board_size: Coord,
    pub mines: CellCount,
    pub revealed_safe_count: CellCount,
    /// Row-major, empty while idle.
    pub cells: Vec<CellView>,
    pub multiplier_range: MultiplierRange,
    pub last_multiplier: Option<f64>,
}

impl SessionView {
    pub(crate) fn idle(coins: Coins, board_size: Coord, mines: CellCount) -> Self {
        Self {
            coins,
            current_bet: 0.0,
            status: SessionStatus::Idle,
            board_size,
            mines,
            revealed_safe_count: 0,
            cells: Vec::new(),
            multiplier_range: MultiplierRange::for_mines(mines),
            last_multiplier: None,
        }
    }

    pub(crate) fn from_round(
        coins: Coins,
        current_bet: Coins,
        status: SessionStatus,
        board: &Board,
        revealed_safe_count: CellCount,
        last_multiplier: Option<f64>,
    ) -> Self {
        let disclose = matches!(status, SessionStatus::Ended);
        Self {
            coins,
            current_bet,
            status,
            board_size: board.size(),
            mines: board.mine_count(),
            revealed_safe_count,
            cells: board
                .cells()
                .map(|cell| CellView::new(cell, disclose))
                .collect(),
            multiplier_range: MultiplierRange::for_mines(board.mine_count()),
            last_multiplier,
        }
    }

    /// Cells grouped by row.
    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(usize::from(self.board_size.max(1)))
    }
}
