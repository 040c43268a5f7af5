use std::io::{self, Write};

use minewager_core::{CellView, SessionStatus, SessionView};

fn glyph(cell: &CellView) -> char {
    match (cell.is_revealed, cell.is_exploded, cell.is_mine) {
        (_, true, _) => 'X',
        (true, false, Some(true)) => '*',
        (true, false, _) => '.',
        (false, ..) => '#',
    }
}

/// Multiplier readout, the last applied one during play or the available range.
pub(crate) fn multiplier_line(view: &SessionView) -> String {
    match view.last_multiplier {
        Some(multiplier) => format!("Current Multiply: {multiplier:.2}"),
        None => format!(
            "Current Multiply: {:.2} - {:.2}",
            view.multiplier_range.min, view.multiplier_range.max
        ),
    }
}

pub(crate) fn status_line(view: &SessionView) -> String {
    match view.status {
        SessionStatus::Won => format!(
            "You Win! Bet amount {:.2} coins has been added to your total coins.",
            view.current_bet
        ),
        SessionStatus::Stopped => {
            format!("Bet added to coins. Current coins: {:.2}", view.coins)
        }
        status => status.message().to_string(),
    }
}

pub(crate) fn write_text(view: &SessionView, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Coins: {:.2}", view.coins)?;
    writeln!(out, "Current Bet: {:.2}", view.current_bet)?;
    writeln!(out, "{}", multiplier_line(view))?;
    writeln!(out, "Mines: {}", view.mines)?;

    if !view.cells.is_empty() {
        write!(out, "   ")?;
        for col in 0..view.board_size {
            write!(out, "{col:>3}")?;
        }
        writeln!(out)?;
        for (row, cells) in view.rows().enumerate() {
            write!(out, "{row:>3}")?;
            for cell in cells {
                write!(out, "{:>3}", glyph(cell))?;
            }
            writeln!(out)?;
        }
    }

    writeln!(out, "{}", status_line(view))
}

pub(crate) fn write_json(view: &SessionView, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer(&mut *out, view)?;
    writeln!(out)
}

pub(crate) fn write_message(message: &str, json: bool, out: &mut impl Write) -> io::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, &serde_json::json!({ "message": message }))?;
        writeln!(out)
    } else {
        writeln!(out, "{message}")
    }
}
