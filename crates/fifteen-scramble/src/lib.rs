//! Random-walk scrambling of puzzle positions.
//!
//! A scramble starts from the solved position and plays a bounded number
//! of random legal moves, never immediately undoing the previous one.
//! Every position produced this way is reachable by construction, and
//! its optimal solution is never longer than the walk.

use fifteen_core::{Board, Move};
use rand::{Rng, RngExt};

/// Walk length used when the caller has no preference.
pub const DEFAULT_STEPS: u32 = 150;

/// Scramble with the default walk length.
pub fn random_board(rng: &mut impl Rng) -> Board {
    scramble(rng, DEFAULT_STEPS)
}

/// Play `steps` random legal moves from the solved position, skipping
/// any move that would undo the one before it.
pub fn scramble(rng: &mut impl Rng, steps: u32) -> Board {
    let mut board = Board::solved();
    let mut last: Option<Move> = None;
    for _ in 0..steps {
        let moves: Vec<Move> = board
            .legal_moves()
            .into_iter()
            .filter(|mv| last.is_none_or(|prev| mv.direction() != prev.direction().opposite()))
            .collect();
        // Every position has at least two legal moves, so at least one
        // candidate survives the filter.
        let mv = moves[rng.random_range(0..moves.len())];
        board = board
            .apply(mv)
            .unwrap_or_else(|err| panic!("legal move {mv} failed to apply: {err}"));
        last = Some(mv);
    }
    board
}
