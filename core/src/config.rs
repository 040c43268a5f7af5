use serde::{Deserialize, Serialize};

use crate::*;

/// Settings fixed for the lifetime of a [`GameSession`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub board_size: Coord,
    pub starting_coins: Coins,
    pub min_bet: Coins,
    /// Upper bound on the balance, credits beyond it are dropped.
    pub max_coins_cap: Option<Coins>,
    /// Mine count offered before the player picks one.
    pub default_mines: CellCount,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_size: 5,
            starting_coins: 2000.0,
            min_bet: 10.0,
            max_coins_cap: None,
            default_mines: 1,
        }
    }
}

impl SessionConfig {
    pub const fn total_cells(&self) -> CellCount {
        mult(self.board_size, self.board_size)
    }

    pub fn validate(&self) -> Result<()> {
        use ConfigIssue::*;

        if self.board_size < 2 {
            return Err(GameError::InvalidConfiguration(BoardTooSmall(
                self.board_size,
            )));
        }
        if !is_amount(self.min_bet) || self.min_bet == 0.0 {
            return Err(GameError::InvalidConfiguration(NonPositiveMinBet));
        }
        if !is_amount(self.starting_coins) {
            return Err(GameError::InvalidConfiguration(InvalidCoinAmount));
        }
        if let Some(cap) = self.max_coins_cap {
            if !is_amount(cap) {
                return Err(GameError::InvalidConfiguration(InvalidCoinAmount));
            }
            if self.starting_coins > cap {
                return Err(GameError::InvalidConfiguration(StartingCoinsOverCap));
            }
        }
        self.check_mines(self.default_mines)
    }

    /// Mine count must fit the board and the payout table.
    pub fn check_mines(&self, mines: CellCount) -> Result<()> {
        check_layout(self.board_size, usize::from(mines))?;
        if !PAYOUT_MINES.contains(&mines) {
            return Err(GameError::InvalidConfiguration(
                ConfigIssue::MinesOutsidePayoutTable(mines),
            ));
        }
        Ok(())
    }

    /// Applies the coin cap, if any.
    pub fn cap_coins(&self, coins: Coins) -> Coins {
        match self.max_coins_cap {
            Some(cap) if coins > cap => cap,
            _ => coins,
        }
    }
}

fn is_amount(value: Coins) -> bool {
    value.is_finite() && value >= 0.0
}
