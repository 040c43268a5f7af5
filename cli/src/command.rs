use std::str::FromStr;

use anyhow::{Context, bail};
use minewager_core::{CellCount, CellIndex, Coins, Coord};

/// One line of player input.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Start {
        bet: Option<Coins>,
        mines: Option<CellCount>,
    },
    Reveal(CellIndex),
    RevealAt(Coord, Coord),
    Stop,
    End,
    Reset,
    Bet(Coins),
    MaxBet,
    Mines(CellCount),
    Show,
    Help,
    Quit,
}

pub(crate) const HELP: &str = "\
Commands:
  start [bet] [mines]   stake a bet on a new board (s)
  reveal <cell>         open a cell by index (r, open)
  reveal <row> <col>    open a cell by position
  stop                  cash out the current bet (cashout)
  end                   give up the round and show the mines
  reset                 clear a finished board
  bet <amount>          set the bet for the next round
  max                   bet the whole balance
  mines <count>         set the mine count for the next round (m)
  show                  print the board again
  help                  this text (?)
  quit                  leave (q, exit)";

const NAMES: &[&str] = &[
    "start", "s", "reveal", "r", "open", "stop", "cashout", "end", "reset", "bet", "max", "mines",
    "m", "show", "help", "?", "quit", "q", "exit",
];

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Self::Show);
        };
        let args: Vec<&str> = words.collect();

        let lowered = name.to_ascii_lowercase();
        let command = match (lowered.as_str(), args.as_slice()) {
            ("start" | "s", []) => Self::Start {
                bet: None,
                mines: None,
            },
            ("start" | "s", [bet]) => Self::Start {
                bet: Some(amount(bet)?),
                mines: None,
            },
            ("start" | "s", [bet, mines]) => Self::Start {
                bet: Some(amount(bet)?),
                mines: Some(number(mines)?),
            },
            ("reveal" | "r" | "open", [index]) => Self::Reveal(number(index)?),
            ("reveal" | "r" | "open", [row, col]) => Self::RevealAt(number(row)?, number(col)?),
            ("stop" | "cashout", []) => Self::Stop,
            ("end", []) => Self::End,
            ("reset", []) => Self::Reset,
            ("bet", [bet]) => Self::Bet(amount(bet)?),
            ("max", []) => Self::MaxBet,
            ("mines" | "m", [mines]) => Self::Mines(number(mines)?),
            ("show", []) => Self::Show,
            ("help" | "?", []) => Self::Help,
            ("quit" | "q" | "exit", []) => Self::Quit,
            (known, _) if NAMES.contains(&known) => {
                bail!("wrong number of arguments for {name:?}, try \"help\"")
            }
            _ => bail!("unknown command {name:?}, try \"help\""),
        };
        Ok(command)
    }
}

fn amount(word: &str) -> anyhow::Result<Coins> {
    word.parse()
        .with_context(|| format!("{word:?} is not an amount"))
}

fn number<T: FromStr>(word: &str) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    word.parse()
        .with_context(|| format!("{word:?} is not a whole number"))
}
