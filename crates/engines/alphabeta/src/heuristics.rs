//! Killer and history move ordering for one search.

use std::cmp::Reverse;

use grid_core::{Board, Move, Player};

use crate::search::move_priority;

/// Upper bound for a history entry.
const HISTORY_CAP: u32 = 50_000;

/// Cutoff statistics gathered while searching one root move.
///
/// Killers are the last two cells that caused a cutoff at each ply; history
/// accumulates `depth^2` per cutoff for the side that played the cell. Both
/// only reorder moves, so the search result is unchanged.
#[derive(Debug, Clone)]
pub struct SearchHeuristics {
    size: usize,
    killers: Vec<[Option<usize>; 2]>,
    history: [Vec<u32>; 2],
}

impl SearchHeuristics {
    pub fn new(board_size: usize) -> Self {
        let cells = board_size * board_size;
        Self {
            size: board_size,
            killers: Vec::new(),
            history: [vec![0; cells], vec![0; cells]],
        }
    }

    fn cell(&self, mv: &Move) -> usize {
        mv.row() * self.size + mv.col()
    }

    pub fn killers_at(&self, ply: usize) -> [Option<usize>; 2] {
        self.killers.get(ply).copied().unwrap_or([None; 2])
    }

    pub fn history(&self, mv: &Move) -> u32 {
        self.history[mv.player().idx()][self.cell(mv)]
    }

    /// Remembers `mv` as the move that cut off the search at `ply`.
    pub fn record_cutoff(&mut self, ply: usize, mv: Move, depth: u8) {
        let cell = self.cell(&mv);
        if self.killers.len() <= ply {
            self.killers.resize(ply + 1, [None; 2]);
        }
        let slot = &mut self.killers[ply];
        if slot[0] != Some(cell) {
            slot[1] = slot[0];
            slot[0] = Some(cell);
        }

        let bonus = u32::from(depth) * u32::from(depth);
        let entry = &mut self.history[mv.player().idx()][cell];
        *entry = entry.saturating_add(bonus).min(HISTORY_CAP);
    }

    /// Legal moves for `player` at `ply`: killers first, then by history,
    /// then by contact and centrality. Equal keys keep row-major order.
    pub fn order(&self, board: &Board, player: Player, ply: usize) -> Vec<Move> {
        let killers = self.killers_at(ply);
        let mut moves: Vec<Move> = board.legal_moves(player).collect();
        moves.sort_by_cached_key(|mv| {
            let cell = Some(self.cell(mv));
            let killer = if killers[0] == cell {
                2
            } else if killers[1] == cell {
                1
            } else {
                0
            };
            Reverse((killer, self.history(mv), move_priority(board, mv)))
        });
        moves
    }
}
