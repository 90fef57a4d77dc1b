//! The closed set of engines the harness can construct.

use alphabeta_engine::AlphaBetaEngine;
use grid_core::{Board, Engine, EngineError, Move, Player};
use random_engine::RandomEngine;

use crate::error::EngineSpecError;

/// An engine chosen at runtime.
#[derive(Debug, Clone)]
pub enum EngineKind {
    Random(RandomEngine),
    AlphaBeta(AlphaBetaEngine),
}

impl EngineKind {
    pub fn alpha_beta(depth: u8) -> Self {
        EngineKind::AlphaBeta(AlphaBetaEngine::new(depth))
    }

    /// Seeded random engine; `None` draws the seed from entropy.
    pub fn random(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => EngineKind::Random(RandomEngine::seeded(seed)),
            None => EngineKind::Random(RandomEngine::new()),
        }
    }

    /// Parses `alphabeta[:depth]` or `random[:seed]`.
    ///
    /// A missing parameter falls back to `default_depth` or `default_seed`.
    pub fn from_spec(
        spec: &str,
        default_depth: u8,
        default_seed: Option<u64>,
    ) -> Result<Self, EngineSpecError> {
        let (name, param) = match spec.split_once(':') {
            Some((name, param)) => (name, Some(param)),
            None => (spec, None),
        };
        let invalid = |value: &str| EngineSpecError::InvalidParameter {
            spec: spec.to_string(),
            value: value.to_string(),
        };

        match name.to_ascii_lowercase().as_str() {
            "alphabeta" | "alpha-beta" | "ab" => {
                let depth = match param {
                    Some(p) => p.parse::<u8>().ok().filter(|&d| d > 0).ok_or_else(|| invalid(p))?,
                    None => default_depth,
                };
                Ok(Self::alpha_beta(depth))
            }
            "random" => {
                let seed = match param {
                    Some(p) => Some(p.parse::<u64>().map_err(|_| invalid(p))?),
                    None => default_seed,
                };
                Ok(Self::random(seed))
            }
            _ => Err(EngineSpecError::UnknownEngine(spec.to_string())),
        }
    }

    /// Stable label for ratings, e.g. `AlphaBeta(d3)`.
    pub fn label(&self) -> String {
        match self {
            EngineKind::Random(_) => "Random".to_string(),
            EngineKind::AlphaBeta(engine) => format!("AlphaBeta(d{})", engine.depth()),
        }
    }
}

impl Engine for EngineKind {
    fn select_move(&mut self, board: &Board, player: Player) -> Result<Move, EngineError> {
        match self {
            EngineKind::Random(engine) => engine.select_move(board, player),
            EngineKind::AlphaBeta(engine) => engine.select_move(board, player),
        }
    }

    fn name(&self) -> &str {
        match self {
            EngineKind::Random(engine) => engine.name(),
            EngineKind::AlphaBeta(engine) => engine.name(),
        }
    }

    fn new_game(&mut self) {
        match self {
            EngineKind::Random(engine) => engine.new_game(),
            EngineKind::AlphaBeta(engine) => engine.new_game(),
        }
    }
}
