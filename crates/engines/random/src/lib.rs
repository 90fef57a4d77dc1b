//! Random Move Engine
//!
//! An engine that selects moves uniformly at random from the empty cells.
//! Useful for:
//! - Baseline comparisons (any search engine should never lose to this)
//! - Stress testing the match runner with many short games
//!
//! The entropy source is supplied at construction, so tests and seeded
//! comparison runs are reproducible.

use grid_core::{Board, Engine, EngineError, Move, Player};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[cfg(test)]
mod lib_tests;

/// An engine that plays random legal moves.
///
/// No evaluation happens here: the engine collects the legal moves into a
/// reusable buffer and picks one with its own random number generator.
#[derive(Debug, Clone)]
pub struct RandomEngine<R = StdRng> {
    rng: R,
    moves: Vec<Move>,
}

impl RandomEngine<StdRng> {
    /// Engine seeded from operating-system entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Engine whose choices are fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            moves: Vec::with_capacity(81),
        }
    }
}

impl<R: Rng + Send> Engine for RandomEngine<R> {
    fn select_move(&mut self, board: &Board, player: Player) -> Result<Move, EngineError> {
        self.moves.clear();
        // A decided board has no legal moves, even with empty cells left.
        if !board.is_terminal().0 {
            self.moves.extend(board.legal_moves(player));
        }

        self.moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(EngineError::NoLegalMove { player })
    }

    fn name(&self) -> &str {
        "Random"
    }
}
