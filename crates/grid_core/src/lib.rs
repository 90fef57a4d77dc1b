//! Core game model for grid engines: a square board on which two players
//! alternately place stones until one of them aligns `win_length` in a row
//! or the board fills up.

pub mod board;
pub mod error;
pub mod types;

pub use board::*;
pub use error::*;
pub use types::*;

// =============================================================================
// Engine trait — implemented by every move-selection strategy
// =============================================================================

/// Detailed outcome of one search, for engines that report statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The chosen move (None if the board has no empty cell)
    pub best_move: Option<Move>,
    /// Score of the chosen move from the searching player's perspective
    pub score: i32,
    /// Search depth in plies
    pub depth: u8,
    /// Number of positions visited
    pub nodes: u64,
}

/// Capability shared by all engines: pick a move for `player` on `board`.
///
/// Engines only see the board through a shared reference. The caller applies
/// the returned move, so an engine can never corrupt the authoritative game.
pub trait Engine: Send {
    /// Select a move for `player`.
    ///
    /// Fails with [`EngineError::NoLegalMove`] when the board has no empty
    /// cell; callers are expected to check [`Board::is_terminal`] first.
    fn select_move(&mut self, board: &Board, player: Player) -> Result<Move, EngineError>;

    /// Short name used in logs and reports
    fn name(&self) -> &str;

    /// Reset per-game state. Most engines have none.
    fn new_game(&mut self) {}
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn select_move(&mut self, board: &Board, player: Player) -> Result<Move, EngineError> {
        (**self).select_move(board, player)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn new_game(&mut self) {
        (**self).new_game()
    }
}
