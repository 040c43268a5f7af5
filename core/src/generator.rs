use alloc::vec;

use crate::*;

/// Lays out `mines` mines uniformly at random over a `size` x `size` board.
pub fn generate_board<R: RandomSource>(
    size: Coord,
    mines: CellCount,
    rng: &mut R,
) -> Result<Board> {
    check_layout(size, usize::from(mines))?;

    let total_cells = usize::from(mult(size, size));
    let mut labels = vec![false; total_cells];
    labels[..usize::from(mines)].fill(true);
    rng.shuffle(&mut labels);

    let board = Board::from_labels(size, &labels)?;
    log::debug!(
        "Generated {}x{} board with {} mines",
        size,
        size,
        board.mine_count()
    );
    log::trace!(
        "Mine positions: {:?}",
        board.mine_indices().collect::<alloc::vec::Vec<_>>()
    );
    Ok(board)
}
