use core::fmt;

use thiserror::Error;

use crate::*;

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(ConfigIssue),
    #[error("Invalid bet of {bet:.2}: {issue}")]
    InvalidBet { bet: Coins, issue: BetIssue },
    #[error("Cannot {action} while the game is {status}")]
    InvalidTransition {
        action: Action,
        status: SessionStatus,
    },
    #[error("Cell {index} is outside a board of {total_cells} cells")]
    InvalidCell {
        index: CellIndex,
        total_cells: CellCount,
    },
}

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum ConfigIssue {
    #[error("board size {0} is too small")]
    BoardTooSmall(Coord),
    #[error("{mines} mines do not fit a board of {total_cells} cells")]
    MineCountOutOfRange {
        mines: CellCount,
        total_cells: CellCount,
    },
    #[error("{0} mines is outside the payout table")]
    MinesOutsidePayoutTable(CellCount),
    #[error("board size {actual} does not match the configured size {expected}")]
    BoardSizeMismatch { expected: Coord, actual: Coord },
    #[error("minimum bet must be positive")]
    NonPositiveMinBet,
    #[error("coin amounts must be finite and non-negative")]
    InvalidCoinAmount,
    #[error("starting coins exceed the coin cap")]
    StartingCoinsOverCap,
}

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum BetIssue {
    #[error("amount is not a number")]
    NotFinite,
    #[error("minimum bet is {min:.2}")]
    BelowMinimum { min: Coins },
    #[error("not enough coins, {available:.2} available")]
    ExceedsBalance { available: Coins },
}

/// Player actions that are only valid in some states.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    Reveal,
    Stop,
    Reset,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Reveal => "reveal",
            Self::Stop => "stop",
            Self::Reset => "reset",
        })
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
