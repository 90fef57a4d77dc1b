//! Minimax search with alpha-beta pruning

use grid_core::{Board, Move, Player};
use rayon::prelude::*;

use crate::eval::{Evaluator, WIN_SCORE};
use crate::heuristics::SearchHeuristics;

/// Window bound beyond any score the evaluator can produce.
const INFINITY: i32 = i32::MAX / 2;

/// Whether the search may cut branches that cannot change the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pruning {
    AlphaBeta,
    /// Plain minimax. Visits every node; used as a reference.
    Exhaustive,
}

/// Result from pick_best_move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Best move and its score for the searching player (None if the board is full)
    pub best_move: Option<(Move, i32)>,
    /// Positions visited below the root
    pub nodes: u64,
}

/// Scores every legal move for `player` and returns the best one.
///
/// Each root move is searched on its own clone of the board with the full
/// `(-inf, +inf)` window, so root scores are exact minimax values. Ties go
/// to the move that comes first in row-major order. With `parallel` the root
/// moves are scored on the rayon pool; all scores are collected before the
/// choice is made, so the selected move does not depend on scheduling.
///
/// A decided board has no legal moves, even with empty cells left.
pub fn pick_best_move<E: Evaluator>(
    board: &Board,
    player: Player,
    depth: u8,
    evaluator: &E,
    pruning: Pruning,
    parallel: bool,
) -> SearchOutcome {
    let moves: Vec<Move> = if board.is_terminal().0 {
        Vec::new()
    } else {
        board.legal_moves(player).collect()
    };
    if moves.is_empty() {
        return SearchOutcome {
            best_move: None,
            nodes: 0,
        };
    }

    // Heuristic tables are per root move, so parallel and sequential
    // searches visit the same nodes.
    let score_root = |mv: &Move| -> (i32, u64) {
        let mut node = board.clone();
        node.set_to_move(player);
        node.make_move(*mv);
        let mut search = Search::new(board.size(), player, evaluator, pruning);
        let score = search.alpha_beta(&mut node, depth.saturating_sub(1), -INFINITY, INFINITY, 1);
        (score, search.nodes() + 1)
    };

    let scored: Vec<(i32, u64)> = if parallel {
        moves.par_iter().map(score_root).collect()
    } else {
        moves.iter().map(score_root).collect()
    };

    let mut best: Option<(Move, i32)> = None;
    let mut nodes = 0;
    for (&mv, &(score, visited)) in moves.iter().zip(&scored) {
        nodes += visited;
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }

    SearchOutcome {
        best_move: best,
        nodes,
    }
}

/// State for one recursive search below a root move.
pub struct Search<'a, E> {
    perspective: Player,
    evaluator: &'a E,
    pruning: Pruning,
    heuristics: SearchHeuristics,
    nodes: u64,
}

impl<'a, E: Evaluator> Search<'a, E> {
    /// Scores are from `perspective`'s point of view.
    pub fn new(board_size: usize, perspective: Player, evaluator: &'a E, pruning: Pruning) -> Self {
        Self {
            perspective,
            evaluator,
            pruning,
            heuristics: SearchHeuristics::new(board_size),
            nodes: 0,
        }
    }

    /// Positions visited so far
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Recursive minimax with alpha-beta pruning.
    ///
    /// The side to move in `node` maximizes when it is the perspective
    /// player. `ply` counts moves from the root. The board is restored
    /// before every return.
    pub fn alpha_beta(
        &mut self,
        node: &mut Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        ply: usize,
    ) -> i32 {
        if depth == 0 || node.is_terminal().0 {
            return self.leaf_score(node, ply);
        }

        let to_move = node.to_move();
        let maximizing = to_move == self.perspective;
        let moves = self.heuristics.order(node, to_move, ply);
        let mut best = if maximizing { -INFINITY } else { INFINITY };

        for mv in moves {
            let undo = node.make_move(mv);
            self.nodes += 1;
            let score = self.alpha_beta(node, depth - 1, alpha, beta, ply + 1);
            node.unmake_move(mv, undo);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if self.pruning == Pruning::AlphaBeta && alpha >= beta {
                self.heuristics.record_cutoff(ply, mv, depth);
                break;
            }
        }

        best
    }

    /// Evaluator score, with wins found closer to the root ranked higher
    /// and losses further away ranked higher.
    fn leaf_score(&self, node: &Board, ply: usize) -> i32 {
        let score = self.evaluator.score(node, self.perspective);
        let ply = ply as i32;
        if score >= WIN_SCORE {
            score - ply
        } else if score <= -WIN_SCORE {
            score + ply
        } else {
            score
        }
    }
}

/// Static ordering key: contact with existing stones, then centrality.
pub(crate) fn move_priority(board: &Board, mv: &Move) -> usize {
    let span = board.size() - 1;
    let distance = (2 * mv.row()).abs_diff(span) + (2 * mv.col()).abs_diff(span);
    let centrality = span - distance / 2;
    2 * board.occupied_neighbours(mv.row(), mv.col()) + centrality
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
