use minewager_core::{
    CellCount, Coins, GameError, GameSession, MultiplierRange, RandomSource, Result,
    SessionView, mult,
};

use crate::command::{Command, HELP};

/// What the loop should print after a command.
#[derive(Debug, PartialEq)]
pub(crate) enum Reply {
    View(SessionView),
    Note(String),
    Quit,
}

/// Session plus the pending inputs of the next round, the bet field and mine selector.
pub(crate) struct App<R> {
    session: GameSession<R>,
    bet: Coins,
    mines: CellCount,
}

impl<R: RandomSource> App<R> {
    pub(crate) fn new(session: GameSession<R>) -> Self {
        let config = session.config();
        Self {
            bet: config.min_bet,
            mines: config.default_mines,
            session,
        }
    }

    pub(crate) fn handle(&mut self, command: Command) -> Result<Reply> {
        let reply = match command {
            Command::Start { bet, mines } => {
                let bet = bet.unwrap_or(self.bet);
                let mines = mines.unwrap_or(self.mines);
                self.session.start(bet, mines)?;
                self.bet = bet;
                self.mines = mines;
                Reply::View(self.view())
            }
            Command::Reveal(index) => {
                self.session.reveal(index)?;
                Reply::View(self.view())
            }
            Command::RevealAt(row, col) => {
                let size = self.session.config().board_size;
                if row >= size || col >= size {
                    return Err(GameError::InvalidCell {
                        index: mult(row, size) + CellCount::from(col),
                        total_cells: mult(size, size),
                    });
                }
                self.session.reveal(mult(row, size) + CellCount::from(col))?;
                Reply::View(self.view())
            }
            Command::Stop => {
                self.session.stop()?;
                Reply::View(self.view())
            }
            Command::End => {
                self.session.end();
                Reply::View(self.view())
            }
            Command::Reset => {
                self.session.reset()?;
                Reply::View(self.view())
            }
            Command::Bet(bet) => {
                self.bet = bet;
                Reply::Note(format!("Bet for the next round: {bet:.2}"))
            }
            Command::MaxBet => {
                self.bet = self.session.max_bet();
                Reply::Note(format!("Bet for the next round: {:.2}", self.bet))
            }
            Command::Mines(mines) => {
                let range = self.session.multiplier_range(mines)?;
                self.mines = mines;
                Reply::Note(format!(
                    "Mines for the next round: {mines}, Current Multiply: {:.2} - {:.2}",
                    range.min, range.max
                ))
            }
            Command::Show => Reply::View(self.view()),
            Command::Help => Reply::Note(HELP.to_string()),
            Command::Quit => Reply::Quit,
        };
        Ok(reply)
    }

    /// Session view, with the pending mine count shown while idle.
    pub(crate) fn view(&self) -> SessionView {
        let mut view = self.session.view();
        if view.status.is_idle() {
            view.mines = self.mines;
            view.multiplier_range = MultiplierRange::for_mines(self.mines);
        }
        view
    }
}
