use core::fmt;

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    Idle,
    Active,
    Won,
    Lost,
    Stopped,
    Ended,
}

impl SessionStatus {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Player-facing summary of the state.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Idle => "Place a bet to start.",
            Self::Active => "Pick a cell.",
            Self::Won => "You Win!",
            Self::Lost => "Game Over!",
            Self::Stopped => "Bet added to coins.",
            Self::Ended => "Game Ended!",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Won => "won",
            Self::Lost => "lost",
            Self::Stopped => "stopped",
            Self::Ended => "ended",
        })
    }
}

/// Board and payout state of the current or most recent round.
#[derive(Clone, Debug, PartialEq)]
struct Round {
    board: Board,
    payout: PayoutModel,
    stake: Coins,
    revealed_safe_count: CellCount,
}

/// A player's wallet and the round being played with it.
///
/// Every transition validates first and mutates after, so an `Err` leaves the session as
/// it was. A round keeps its board after it finishes so it can still be displayed, the
/// board is only dropped by [`GameSession::reset`].
#[derive(Clone, Debug)]
pub struct GameSession<R> {
    config: SessionConfig,
    rng: R,
    coins: Coins,
    current_bet: Coins,
    status: SessionStatus,
    round: Option<Round>,
    last_multiplier: Option<f64>,
}

impl<R: RandomSource> GameSession<R> {
    pub fn new(config: SessionConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            coins: config.starting_coins,
            config,
            rng,
            current_bet: 0.0,
            status: SessionStatus::Idle,
            round: None,
            last_multiplier: None,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn coins(&self) -> Coins {
        self.coins
    }

    pub fn current_bet(&self) -> Coins {
        self.current_bet
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn board(&self) -> Option<&Board> {
        self.round.as_ref().map(|round| &round.board)
    }

    pub fn mines(&self) -> Option<CellCount> {
        self.round.as_ref().map(|round| round.payout.mines())
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.round
            .as_ref()
            .map_or(0, |round| round.revealed_safe_count)
    }

    /// Stake of the current round, before any multiplier.
    pub fn stake(&self) -> Option<Coins> {
        self.round.as_ref().map(|round| round.stake)
    }

    /// Multiplier applied by the latest safe reveal of this round.
    pub fn last_multiplier(&self) -> Option<f64> {
        self.last_multiplier
    }

    /// Largest bet the balance allows.
    pub fn max_bet(&self) -> Coins {
        self.coins
    }

    pub fn multiplier_range(&self, mines: CellCount) -> Result<MultiplierRange> {
        self.config.check_mines(mines)?;
        Ok(MultiplierRange::for_mines(mines))
    }

    /// Stakes `bet` on a freshly generated board with `mines` mines.
    pub fn start(&mut self, bet: Coins, mines: CellCount) -> Result<SessionView> {
        self.check_can_start()?;
        self.config.check_mines(mines)?;
        self.check_bet(bet)?;

        let board = generate_board(self.config.board_size, mines, &mut self.rng)?;
        self.begin(bet, board)
    }

    /// Like [`start`](Self::start) but plays on the given board.
    pub fn start_with_board(&mut self, bet: Coins, board: Board) -> Result<SessionView> {
        self.check_can_start()?;
        if board.size() != self.config.board_size {
            return Err(GameError::InvalidConfiguration(
                ConfigIssue::BoardSizeMismatch {
                    expected: self.config.board_size,
                    actual: board.size(),
                },
            ));
        }
        self.config.check_mines(board.mine_count())?;
        self.check_bet(bet)?;

        self.begin(bet, board)
    }

    fn begin(&mut self, bet: Coins, board: Board) -> Result<SessionView> {
        let payout = PayoutModel::for_board(&board)?;

        log::debug!(
            "Round started: bet {:.2}, {} mines, {} safe cells",
            bet,
            payout.mines(),
            payout.total_safe_cells()
        );

        self.coins -= bet;
        self.current_bet = bet;
        self.last_multiplier = None;
        self.round = Some(Round {
            board,
            payout,
            stake: bet,
            revealed_safe_count: 0,
        });
        self.status = SessionStatus::Active;

        Ok(self.view())
    }

    /// Opens the cell at `index`. Opening an already revealed cell changes nothing.
    pub fn reveal(&mut self, index: CellIndex) -> Result<SessionView> {
        let status = self.status;
        let round = match self.round.as_mut() {
            Some(round) if status.is_active() => round,
            _ => {
                log::warn!("Rejected reveal of cell {} while {}", index, status);
                return Err(GameError::InvalidTransition {
                    action: Action::Reveal,
                    status,
                });
            }
        };
        let index = round.board.validate_index(index)?;
        let cell = round.board[index];

        if cell.is_revealed() {
            log::trace!("Cell {} already revealed", index);
            return Ok(self.view());
        }

        if cell.is_mine() {
            round.board.cell_mut(index).explode();
            round.board.show_mines();
            log::debug!(
                "Hit mine at cell {} after {} safe reveals, lost {:.2}",
                index,
                round.revealed_safe_count,
                self.current_bet
            );
            self.current_bet = 0.0;
            self.status = SessionStatus::Lost;
            return Ok(self.view());
        }

        round.board.cell_mut(index).reveal();
        round.revealed_safe_count += 1;
        let multiplier = round.payout.multiplier_at(round.revealed_safe_count);
        // saturates on long sweeps of large boards
        self.current_bet = (self.current_bet * multiplier).min(Coins::MAX);
        self.last_multiplier = Some(multiplier);
        log::trace!(
            "Safe cell {}: x{:.2}, bet value {:.2}",
            index,
            multiplier,
            self.current_bet
        );

        if round.revealed_safe_count == round.payout.total_safe_cells() {
            log::debug!("Board cleared, crediting {:.2}", self.current_bet);
            self.credit(self.current_bet);
            self.status = SessionStatus::Won;
        }

        Ok(self.view())
    }

    /// Cashes out the current bet value and finishes the round.
    pub fn stop(&mut self) -> Result<SessionView> {
        if !self.status.is_active() {
            log::warn!("Rejected stop while {}", self.status);
            return Err(GameError::InvalidTransition {
                action: Action::Stop,
                status: self.status,
            });
        }

        log::debug!("Cashing out {:.2}", self.current_bet);
        self.credit(self.current_bet);
        self.current_bet = 0.0;
        self.status = SessionStatus::Stopped;

        Ok(self.view())
    }

    /// Finishes the round and shows every mine. No coins move; ending an active round
    /// forfeits its bet value. Does nothing while idle.
    pub fn end(&mut self) -> SessionView {
        let Some(round) = self.round.as_mut() else {
            return self.view();
        };

        round.board.show_mines();
        if self.status.is_active() {
            log::debug!("Round ended early, forfeiting {:.2}", self.current_bet);
            self.current_bet = 0.0;
        }
        self.status = SessionStatus::Ended;

        self.view()
    }

    /// Drops the finished round's board and returns to idle.
    pub fn reset(&mut self) -> Result<SessionView> {
        if self.status.is_active() {
            return Err(GameError::InvalidTransition {
                action: Action::Reset,
                status: self.status,
            });
        }

        self.round = None;
        self.current_bet = 0.0;
        self.last_multiplier = None;
        self.status = SessionStatus::Idle;

        Ok(self.view())
    }

    pub fn view(&self) -> SessionView {
        match &self.round {
            Some(round) => SessionView::from_round(
                self.coins,
                self.current_bet,
                self.status,
                &round.board,
                round.revealed_safe_count,
                self.last_multiplier,
            ),
            None => SessionView::idle(
                self.coins,
                self.config.board_size,
                self.config.default_mines,
            ),
        }
    }

    fn check_can_start(&self) -> Result<()> {
        if self.status.is_active() {
            log::warn!("Rejected start while a round is active");
            Err(GameError::InvalidTransition {
                action: Action::Start,
                status: self.status,
            })
        } else {
            Ok(())
        }
    }

    fn check_bet(&self, bet: Coins) -> Result<()> {
        let issue = if !bet.is_finite() {
            BetIssue::NotFinite
        } else if bet < self.config.min_bet {
            BetIssue::BelowMinimum {
                min: self.config.min_bet,
            }
        } else if bet > self.coins {
            BetIssue::ExceedsBalance {
                available: self.coins,
            }
        } else {
            return Ok(());
        };

        log::warn!("Rejected bet of {:.2}: {}", bet, issue);
        Err(GameError::InvalidBet { bet, issue })
    }

    fn credit(&mut self, amount: Coins) {
        self.coins = self.config.cap_coins((self.coins + amount).min(Coins::MAX));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn session() -> GameSession<RngSource<rand::rngs::SmallRng>> {
        GameSession::new(SessionConfig::default(), RngSource::seeded(5)).unwrap()
    }

    fn board(mines: &[CellIndex]) -> Board {
        Board::from_mine_indices(5, mines).unwrap()
    }

    #[test]
    fn new_session_is_idle() {
        let session = session();

        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.coins(), 2000.0);
        assert_eq!(session.current_bet(), 0.0);
        assert!(session.board().is_none());
        assert_eq!(session.max_bet(), 2000.0);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = SessionConfig {
            min_bet: -1.0,
            ..Default::default()
        };
        assert!(GameSession::new(config, RngSource::seeded(0)).is_err());
    }

    #[test]
    fn start_deducts_bet_and_allocates_board() {
        let mut session = session();

        let view = session.start(10.0, 3).unwrap();

        assert_eq!(view.status, SessionStatus::Active);
        assert_eq!(session.coins(), 1990.0);
        assert_eq!(session.current_bet(), 10.0);
        assert_eq!(session.stake(), Some(10.0));
        assert_eq!(session.mines(), Some(3));
        assert_eq!(session.board().map(Board::mine_count), Some(3));
        assert_eq!(session.revealed_safe_count(), 0);
    }

    #[test]
    fn start_rejections_leave_session_untouched() {
        let mut session = session();

        assert!(matches!(
            session.start(5.0, 1),
            Err(GameError::InvalidBet {
                issue: BetIssue::BelowMinimum { .. },
                ..
            })
        ));
        assert!(matches!(
            session.start(f64::NAN, 1),
            Err(GameError::InvalidBet {
                issue: BetIssue::NotFinite,
                ..
            })
        ));
        assert!(matches!(
            session.start(10.0, 25),
            Err(GameError::InvalidConfiguration(_))
        ));
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.coins(), 2000.0);
        assert!(session.board().is_none());
    }

    #[test]
    fn start_while_active_is_rejected() {
        let mut session = session();
        session.start(10.0, 1).unwrap();

        assert_eq!(
            session.start(10.0, 1),
            Err(GameError::InvalidTransition {
                action: Action::Start,
                status: SessionStatus::Active
            })
        );
        assert_eq!(session.coins(), 1990.0);
    }

    #[test]
    fn start_with_board_checks_size() {
        let mut session = session();
        let small = Board::from_mine_indices(3, &[0]).unwrap();

        assert_eq!(
            session.start_with_board(10.0, small),
            Err(GameError::InvalidConfiguration(
                ConfigIssue::BoardSizeMismatch {
                    expected: 5,
                    actual: 3
                }
            ))
        );
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    #[test]
    fn reveal_requires_active_round() {
        let mut session = session();

        assert_eq!(
            session.reveal(0),
            Err(GameError::InvalidTransition {
                action: Action::Reveal,
                status: SessionStatus::Idle
            })
        );
    }

    #[test]
    fn reveal_out_of_range_is_rejected() {
        let mut session = session();
        session.start_with_board(10.0, board(&[0])).unwrap();

        assert_eq!(
            session.reveal(25),
            Err(GameError::InvalidCell {
                index: 25,
                total_cells: 25
            })
        );
        assert_eq!(session.status(), SessionStatus::Active);
    }

    #[test]
    fn safe_reveal_compounds_bet() {
        let mut session = session();
        session.start_with_board(10.0, board(&[0])).unwrap();

        session.reveal(1).unwrap();
        assert_relative_eq!(session.current_bet(), 11.0, epsilon = 1e-9);
        assert_eq!(session.last_multiplier(), Some(1.1));

        session.reveal(2).unwrap();
        let second = 1.1 + 18.9 / 23.0;
        assert_relative_eq!(session.current_bet(), 11.0 * second, epsilon = 1e-9);
        assert_eq!(session.revealed_safe_count(), 2);
    }

    #[test]
    fn repeated_reveal_changes_nothing() {
        let mut session = session();
        session.start_with_board(10.0, board(&[0])).unwrap();

        let first = session.reveal(7).unwrap();
        let second = session.reveal(7).unwrap();

        assert_eq!(first, second);
        assert_eq!(session.revealed_safe_count(), 1);
    }

    #[test]
    fn mine_loses_bet_and_shows_other_mines() {
        let mut session = session();
        session.start_with_board(10.0, board(&[3, 9, 20])).unwrap();
        session.reveal(0).unwrap();

        session.reveal(9).unwrap();

        assert_eq!(session.status(), SessionStatus::Lost);
        assert_eq!(session.current_bet(), 0.0);
        assert_eq!(session.coins(), 1990.0);
        let board = session.board().unwrap();
        assert!(board[9].is_exploded());
        assert!(board[3].is_shown_mine());
        assert!(board[20].is_shown_mine());
        assert!(!board[1].is_revealed());
    }

    #[test]
    fn clearing_board_wins_and_credits() {
        let mut session = session();
        session.start_with_board(10.0, board(&[0])).unwrap();

        for index in 1..25 {
            session.reveal(index).unwrap();
        }

        let expected = PayoutModel::new(1, 24).unwrap().payout(10.0, 24);
        assert_eq!(session.status(), SessionStatus::Won);
        assert_relative_eq!(session.current_bet(), expected, max_relative = 1e-9);
        assert_relative_eq!(session.coins(), 1990.0 + expected, max_relative = 1e-9);
        assert_eq!(
            session.reveal(0),
            Err(GameError::InvalidTransition {
                action: Action::Reveal,
                status: SessionStatus::Won
            })
        );
    }

    #[test]
    fn stop_cashes_out() {
        let mut session = session();
        session.start_with_board(10.0, board(&[0])).unwrap();
        session.reveal(1).unwrap();

        session.stop().unwrap();

        assert_eq!(session.status(), SessionStatus::Stopped);
        assert_eq!(session.current_bet(), 0.0);
        assert_relative_eq!(session.coins(), 2001.0, epsilon = 1e-9);
        assert!(matches!(
            session.stop(),
            Err(GameError::InvalidTransition {
                action: Action::Stop,
                ..
            })
        ));
    }

    #[test]
    fn stop_respects_coin_cap() {
        let config = SessionConfig {
            max_coins_cap: Some(2000.0),
            ..Default::default()
        };
        let mut session = GameSession::new(config, RngSource::seeded(0)).unwrap();
        session.start_with_board(10.0, board(&[0])).unwrap();
        session.reveal(1).unwrap();

        session.stop().unwrap();

        assert_eq!(session.coins(), 2000.0);
    }

    #[test]
    fn win_respects_coin_cap() {
        let config = SessionConfig {
            max_coins_cap: Some(2500.0),
            ..Default::default()
        };
        let mut session = GameSession::new(config, RngSource::seeded(0)).unwrap();
        session.start_with_board(10.0, board(&[0])).unwrap();

        for index in 1..25 {
            session.reveal(index).unwrap();
        }

        assert_eq!(session.status(), SessionStatus::Won);
        assert!(session.current_bet() > 510.0);
        assert_eq!(session.coins(), 2500.0);
    }

    #[test]
    fn large_board_sweep_keeps_balance_finite() {
        let config = SessionConfig {
            board_size: 20,
            ..Default::default()
        };
        let mut session = GameSession::new(config, RngSource::seeded(0)).unwrap();
        let board = Board::from_mine_indices(20, &[0]).unwrap();
        session.start_with_board(10.0, board).unwrap();

        for index in 1..400 {
            session.reveal(index).unwrap();
            assert!(session.current_bet().is_finite());
        }

        assert_eq!(session.status(), SessionStatus::Won);
        assert_eq!(session.current_bet(), Coins::MAX);
        assert_eq!(session.coins(), Coins::MAX);
    }

    #[test]
    fn default_status_is_idle() {
        assert_eq!(SessionStatus::default(), SessionStatus::Idle);
    }

    #[test]
    fn end_forfeits_active_round_without_moving_coins() {
        let mut session = session();
        session.start_with_board(10.0, board(&[4, 8])).unwrap();
        session.reveal(0).unwrap();

        let view = session.end();

        assert_eq!(view.status, SessionStatus::Ended);
        assert_eq!(session.coins(), 1990.0);
        assert_eq!(session.current_bet(), 0.0);
        let board = session.board().unwrap();
        assert!(board[4].is_shown_mine());
        assert!(board[8].is_shown_mine());
    }

    #[test]
    fn end_after_stop_keeps_credited_coins() {
        let mut session = session();
        session.start_with_board(10.0, board(&[0])).unwrap();
        session.reveal(1).unwrap();
        session.stop().unwrap();
        let coins = session.coins();

        session.end();

        assert_eq!(session.status(), SessionStatus::Ended);
        assert_eq!(session.coins(), coins);
    }

    #[test]
    fn end_while_idle_is_noop() {
        let mut session = session();
        let view = session.end();
        assert_eq!(view.status, SessionStatus::Idle);
        assert_eq!(session.coins(), 2000.0);
    }

    #[test]
    fn finished_round_can_restart() {
        let mut session = session();
        session.start_with_board(10.0, board(&[0])).unwrap();
        session.reveal(0).unwrap();
        assert_eq!(session.status(), SessionStatus::Lost);

        session.start(20.0, 2).unwrap();

        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(session.coins(), 1970.0);
        assert_eq!(session.revealed_safe_count(), 0);
        assert_eq!(session.last_multiplier(), None);
    }

    #[test]
    fn reset_drops_board() {
        let mut session = session();
        session.start(10.0, 1).unwrap();
        assert!(session.reset().is_err());
        session.stop().unwrap();

        let view = session.reset().unwrap();

        assert_eq!(view.status, SessionStatus::Idle);
        assert!(session.board().is_none());
        assert!(view.cells.is_empty());
    }

    #[test]
    fn multiplier_range_validates_mines() {
        let session = session();
        assert_eq!(
            session.multiplier_range(24),
            Ok(MultiplierRange {
                min: 10.0,
                max: 500.0
            })
        );
        assert!(session.multiplier_range(0).is_err());
    }
}
