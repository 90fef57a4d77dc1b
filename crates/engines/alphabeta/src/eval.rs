//! Static evaluation of grid positions.

use grid_core::{Board, Player};

/// Score of a won position. Larger than any heuristic score, so a found win
/// or loss always dominates the evaluation of an open position.
pub const WIN_SCORE: i32 = 1_000_000;

/// Bound on the heuristic part of an evaluation.
pub const MAX_HEURISTIC: i32 = 100_000;

/// Static scoring function used where the search stops.
///
/// Implementations must be pure functions of the board and the perspective,
/// and must score a won board as `±WIN_SCORE` and a drawn one as `0`.
pub trait Evaluator: Send + Sync {
    fn score(&self, board: &Board, perspective: Player) -> i32;
}

impl<F> Evaluator for F
where
    F: Fn(&Board, Player) -> i32 + Send + Sync,
{
    fn score(&self, board: &Board, perspective: Player) -> i32 {
        self(board, perspective)
    }
}

/// Counts open lines.
///
/// Every segment of `win_length` cells that holds stones of a single player
/// is worth `4^stones` to that player; segments holding both colours are
/// dead and worth nothing. Central cells sit on more segments, so the
/// heuristic also rewards center control.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineEvaluator;

impl Evaluator for LineEvaluator {
    fn score(&self, board: &Board, perspective: Player) -> i32 {
        match board.is_terminal() {
            (true, Some(winner)) if winner == perspective => return WIN_SCORE,
            (true, Some(_)) => return -WIN_SCORE,
            (true, None) => return 0,
            (false, _) => {}
        }

        let mine = perspective.idx();
        let theirs = perspective.other().idx();
        let mut score = 0i64;
        for counts in board.window_counts() {
            match (counts[mine], counts[theirs]) {
                (0, 0) => {}
                (m, 0) => score = score.saturating_add(window_weight(m)),
                (0, t) => score = score.saturating_sub(window_weight(t)),
                _ => {}
            }
        }
        score.clamp(-(MAX_HEURISTIC as i64), MAX_HEURISTIC as i64) as i32
    }
}

fn window_weight(stones: usize) -> i64 {
    4i64.saturating_pow(stones as u32)
}
