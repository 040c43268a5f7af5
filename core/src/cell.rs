/// A single board cell. The mine assignment is fixed once the board exists, only the
/// revealed and exploded flags change during play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    is_mine: bool,
    is_revealed: bool,
    is_exploded: bool,
}

impl Cell {
    pub(crate) const fn new(is_mine: bool) -> Self {
        Self {
            is_mine,
            is_revealed: false,
            is_exploded: false,
        }
    }

    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn is_exploded(self) -> bool {
        self.is_exploded
    }

    /// Mine cells revealed without being the one that was hit.
    pub const fn is_shown_mine(self) -> bool {
        self.is_mine && self.is_revealed && !self.is_exploded
    }

    /// Returns `false` if the cell was already revealed.
    pub(crate) fn reveal(&mut self) -> bool {
        let changed = !self.is_revealed;
        self.is_revealed = true;
        changed
    }

    pub(crate) fn explode(&mut self) {
        self.is_revealed = true;
        self.is_exploded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_reports_change_once() {
        let mut cell = Cell::new(false);
        assert!(cell.reveal());
        assert!(!cell.reveal());
        assert!(cell.is_revealed());
        assert!(!cell.is_exploded());
    }

    #[test]
    fn explode_marks_cell_revealed() {
        let mut cell = Cell::new(true);
        cell.explode();
        assert!(cell.is_revealed());
        assert!(cell.is_exploded());
        assert!(!cell.is_shown_mine());
    }
}
