/// Side length of a square board.
pub type Coord = u8;

/// Count type used for mine counts, safe-cell counts and total-cell counts.
pub type CellCount = u16;

/// Row-major position of a cell on the board, `0..total_cells`.
pub type CellIndex = CellCount;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Coin amounts, balances and bet values.
pub type Coins = f64;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Splits a row-major index into `(row, col)` for a board of side `size`.
pub const fn index_to_coords(index: CellIndex, size: Coord) -> Coord2 {
    let size = size as CellCount;
    ((index / size) as Coord, (index % size) as Coord)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_to_coords_is_row_major() {
        assert_eq!(index_to_coords(0, 5), (0, 0));
        assert_eq!(index_to_coords(4, 5), (0, 4));
        assert_eq!(index_to_coords(5, 5), (1, 0));
        assert_eq!(index_to_coords(24, 5), (4, 4));
    }

    #[test]
    fn mult_saturates() {
        assert_eq!(mult(5, 5), 25);
        assert_eq!(mult(Coord::MAX, Coord::MAX), 65025);
    }
}
