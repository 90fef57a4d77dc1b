//! Error types for board construction, move application and engine requests.

use std::fmt;

use thiserror::Error;

use crate::types::{Move, Player};

/// Why a move was rejected by [`Board::apply_move`](crate::Board::apply_move).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveReason {
    OutOfBounds { size: usize },
    Occupied,
    WrongPlayer { expected: Player },
    GameOver { winner: Player },
}

impl fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveReason::OutOfBounds { size } => {
                write!(f, "outside the {size}x{size} board")
            }
            IllegalMoveReason::Occupied => write!(f, "cell is already occupied"),
            IllegalMoveReason::WrongPlayer { expected } => {
                write!(f, "it is {expected}'s turn")
            }
            IllegalMoveReason::GameOver { winner } => {
                write!(f, "the game is already won by {winner}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("invalid board size {size}: a board needs at least one cell per side")]
    InvalidSize { size: i64 },

    #[error("board size {size} exceeds the maximum side length of {max}")]
    TooLarge { size: usize, max: usize },

    #[error("invalid win length {length} for a {size}x{size} board")]
    InvalidWinLength { size: usize, length: usize },

    #[error("illegal move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: IllegalMoveReason },

    #[error("invalid board diagram: {0}")]
    InvalidDiagram(String),
}

impl BoardError {
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, BoardError::IllegalMove { .. })
    }
}

/// Raised by an engine asked to move on a board without empty cells.
///
/// This is a contract violation by the caller, who should have checked
/// [`Board::is_terminal`](crate::Board::is_terminal) first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{player} was asked to move but the board has no empty cell")]
    NoLegalMove { player: Player },
}
