//! Alpha-Beta Grid Engine
//!
//! Fixed-depth minimax search with alpha-beta pruning over a line-count
//! evaluation. This is the reference engine the random baseline is compared
//! against.

mod eval;
mod heuristics;
mod search;

use grid_core::{Board, Engine, EngineError, Move, Player, SearchResult};
use tracing::debug;

pub use eval::{Evaluator, LineEvaluator, MAX_HEURISTIC, WIN_SCORE};
pub use heuristics::SearchHeuristics;
pub use search::{pick_best_move, Pruning, Search, SearchOutcome};

/// Search depth used when none is configured.
pub const DEFAULT_DEPTH: u8 = 3;

/// Grid engine using minimax with alpha-beta pruning.
///
/// This engine uses:
/// - Minimax search with alpha-beta pruning, depth-limited
/// - Killer, history, contact and centrality move ordering inside the tree
/// - A pluggable static evaluator ([`LineEvaluator`] by default)
/// - Optional parallel scoring of the root moves
///
/// The engine keeps no state between calls, so one instance can serve any
/// number of independent matches.
#[derive(Debug, Clone)]
pub struct AlphaBetaEngine<E = LineEvaluator> {
    depth: u8,
    evaluator: E,
    parallel_root: bool,
}

impl AlphaBetaEngine<LineEvaluator> {
    /// Engine searching `depth` plies (at least one) with the line evaluator.
    pub fn new(depth: u8) -> Self {
        Self::with_evaluator(depth, LineEvaluator)
    }
}

impl Default for AlphaBetaEngine<LineEvaluator> {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl<E: Evaluator> AlphaBetaEngine<E> {
    pub fn with_evaluator(depth: u8, evaluator: E) -> Self {
        Self {
            depth: depth.max(1),
            evaluator,
            parallel_root: false,
        }
    }

    /// Score root moves on the rayon thread pool. The chosen move is the same
    /// as with a sequential search.
    pub fn with_parallel_root(mut self, parallel: bool) -> Self {
        self.parallel_root = parallel;
        self
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Full search with statistics.
    pub fn search(&self, board: &Board, player: Player) -> SearchResult {
        let outcome = pick_best_move(
            board,
            player,
            self.depth,
            &self.evaluator,
            Pruning::AlphaBeta,
            self.parallel_root,
        );

        SearchResult {
            best_move: outcome.best_move.map(|(mv, _)| mv),
            score: outcome.best_move.map(|(_, s)| s).unwrap_or(0),
            depth: self.depth,
            nodes: outcome.nodes,
        }
    }
}

impl<E: Evaluator> Engine for AlphaBetaEngine<E> {
    fn select_move(&mut self, board: &Board, player: Player) -> Result<Move, EngineError> {
        let result = self.search(board, player);
        match result.best_move {
            Some(mv) => {
                debug!(
                    %mv,
                    score = result.score,
                    nodes = result.nodes,
                    depth = result.depth,
                    "alpha-beta search finished"
                );
                Ok(mv)
            }
            None => Err(EngineError::NoLegalMove { player }),
        }
    }

    fn name(&self) -> &str {
        "AlphaBeta"
    }
}
