use core::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::*;

/// Mine counts covered by the multiplier table.
pub const PAYOUT_MINES: RangeInclusive<CellCount> = 1..=24;

const FEWEST_MINES: MultiplierRange = MultiplierRange {
    min: 1.1,
    max: 20.0,
};

const MOST_MINES: MultiplierRange = MultiplierRange {
    min: 10.0,
    max: 500.0,
};

/// Per-reveal multipliers available for a mine count.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiplierRange {
    pub min: f64,
    pub max: f64,
}

impl MultiplierRange {
    pub fn for_mines(mines: CellCount) -> Self {
        Self {
            min: min_multiplier(mines),
            max: max_multiplier(mines),
        }
    }

    pub fn spread(self) -> f64 {
        self.max - self.min
    }
}

fn interpolate(mines: CellCount, low: f64, high: f64) -> f64 {
    let first = *PAYOUT_MINES.start();
    let span = f64::from(PAYOUT_MINES.end() - first);
    low + f64::from(mines.saturating_sub(first)) * (high - low) / span
}

/// Multiplier of the first safe reveal.
pub fn min_multiplier(mines: CellCount) -> f64 {
    match mines {
        1 => FEWEST_MINES.min,
        24 => MOST_MINES.min,
        _ => interpolate(mines, FEWEST_MINES.min, MOST_MINES.min),
    }
}

/// Multiplier of the last safe reveal.
pub fn max_multiplier(mines: CellCount) -> f64 {
    match mines {
        1 => FEWEST_MINES.max,
        24 => MOST_MINES.max,
        _ => interpolate(mines, FEWEST_MINES.max, MOST_MINES.max),
    }
}

/// Per-reveal multiplier for the `revealed`-th safe reveal, see [`PayoutModel::multiplier_at`].
pub fn multiplier_at(
    mines: CellCount,
    revealed: CellCount,
    total_safe_cells: CellCount,
) -> Result<f64> {
    Ok(PayoutModel::new(mines, total_safe_cells)?.multiplier_at(revealed))
}

/// Multipliers for one round. Each safe reveal multiplies the running bet value, so the
/// payout compounds: the `k`-th reveal applies `min + (k - 1) * step`, stepping linearly
/// from the range minimum on the first reveal to the maximum on the last.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PayoutModel {
    mines: CellCount,
    total_safe_cells: CellCount,
    range: MultiplierRange,
}

impl PayoutModel {
    pub fn new(mines: CellCount, total_safe_cells: CellCount) -> Result<Self> {
        if !PAYOUT_MINES.contains(&mines) {
            return Err(GameError::InvalidConfiguration(
                ConfigIssue::MinesOutsidePayoutTable(mines),
            ));
        }
        if total_safe_cells == 0 {
            return Err(GameError::InvalidConfiguration(
                ConfigIssue::MineCountOutOfRange {
                    mines,
                    total_cells: mines,
                },
            ));
        }
        Ok(Self {
            mines,
            total_safe_cells,
            range: MultiplierRange::for_mines(mines),
        })
    }

    pub fn for_board(board: &Board) -> Result<Self> {
        Self::new(board.mine_count(), board.safe_cell_count())
    }

    pub fn mines(&self) -> CellCount {
        self.mines
    }

    pub fn total_safe_cells(&self) -> CellCount {
        self.total_safe_cells
    }

    pub fn range(&self) -> MultiplierRange {
        self.range
    }

    /// Increment between consecutive reveals, `None` with a single safe cell.
    pub fn step(&self) -> Option<f64> {
        if self.total_safe_cells < 2 {
            None
        } else {
            Some(self.range.spread() / f64::from(self.total_safe_cells - 1))
        }
    }

    /// `revealed` is clamped to `1..=total_safe_cells`. With a single safe cell its only
    /// reveal is also the last, so it pays the range maximum.
    pub fn multiplier_at(&self, revealed: CellCount) -> f64 {
        let revealed = revealed.clamp(1, self.total_safe_cells);
        match self.step() {
            Some(step) => self.range.min + f64::from(revealed - 1) * step,
            None => self.range.max,
        }
    }

    /// Product of the multipliers of the first `revealed` reveals, `1.0` for none.
    pub fn cumulative_multiplier(&self, revealed: CellCount) -> f64 {
        (1..=revealed.min(self.total_safe_cells))
            .map(|k| self.multiplier_at(k))
            .product()
    }

    /// Bet value after `revealed` safe reveals.
    pub fn payout(&self, bet: Coins, revealed: CellCount) -> Coins {
        bet * self.cumulative_multiplier(revealed)
    }
}
