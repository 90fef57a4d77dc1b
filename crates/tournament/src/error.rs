//! Error types for matches, configuration and persisted statistics.

use std::fmt;
use std::path::PathBuf;

use grid_core::{BoardError, EngineError, Move};
use thiserror::Error;

/// Which side of a comparison an engine sits on. Seat A moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    A,
    B,
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::A => write!(f, "engine A"),
            Seat::B => write!(f, "engine B"),
        }
    }
}

/// Any of these aborts the match it was raised in.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The engine returned a move the board refused.
    #[error("{seat} ({engine}) broke the move contract with {mv}: {source}")]
    EngineProtocol {
        engine: String,
        seat: Seat,
        mv: Move,
        #[source]
        source: BoardError,
    },

    #[error("{seat} ({engine}) failed to select a move: {source}")]
    Engine {
        engine: String,
        seat: Seat,
        #[source]
        source: EngineError,
    },

    #[error("board already holds {moves} moves; a match needs a fresh board")]
    BoardInProgress { moves: u32 },

    #[error(transparent)]
    Board(#[from] BoardError),
}

impl MatchError {
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, MatchError::EngineProtocol { .. })
    }
}

#[derive(Debug, Error)]
pub enum EngineSpecError {
    #[error("unknown engine {0:?} (expected alphabeta[:depth] or random[:seed])")]
    UnknownEngine(String),

    #[error("invalid parameter {value:?} in engine spec {spec:?}")]
    InvalidParameter { spec: String, value: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure to load or store JSON statistics.
#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to (de)serialize statistics: {0}")]
    Json(#[from] serde_json::Error),
}
