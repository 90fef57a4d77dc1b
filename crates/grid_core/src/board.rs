use std::fmt;
use std::iter::FusedIterator;

use crate::error::{BoardError, IllegalMoveReason};
use crate::types::{Cell, Move, Player};

/// Line directions checked for alignments: east, south, south-east, south-west.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Square grid of cells plus the bookkeeping needed to adjudicate a game:
/// the player to move, a move counter and the cached winner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    win_length: usize,
    cells: Vec<Cell>,
    to_move: Player,
    move_count: u32,
    winner: Option<Player>,
}

/// State captured by [`Board::make_move`] so the move can be taken back.
#[derive(Clone, Copy, Debug)]
pub struct Undo {
    pub to_move: Player,
    pub winner: Option<Player>,
}

impl Board {
    /// Default alignment length on boards of at least this size.
    pub const MAX_DEFAULT_WIN_LENGTH: usize = 5;
    /// Largest accepted side length.
    pub const MAX_SIZE: usize = 256;

    /// Empty `size`x`size` board with the default win length `min(size, 5)`.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        Self::with_win_length(size, size.min(Self::MAX_DEFAULT_WIN_LENGTH))
    }

    pub fn with_win_length(size: usize, win_length: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::InvalidSize { size: 0 });
        }
        if size > Self::MAX_SIZE {
            return Err(BoardError::TooLarge {
                size,
                max: Self::MAX_SIZE,
            });
        }
        if win_length == 0 || win_length > size {
            return Err(BoardError::InvalidWinLength {
                size,
                length: win_length,
            });
        }
        Ok(Self {
            size,
            win_length,
            cells: vec![Cell::Empty; size * size],
            to_move: Player::One,
            move_count: 0,
            winner: None,
        })
    }

    /// Builds a position from a row diagram such as `"X.O ... ..X"`.
    ///
    /// Rows are separated by whitespace; `X`/`1` is player one, `O`/`2` is
    /// player two and `.` is empty. The move counter is set to the number of
    /// stones on the board.
    pub fn from_diagram(diagram: &str, to_move: Player) -> Result<Self, BoardError> {
        Self::parse_diagram(diagram, None, to_move)
    }

    pub fn from_diagram_with_win_length(
        diagram: &str,
        win_length: usize,
        to_move: Player,
    ) -> Result<Self, BoardError> {
        Self::parse_diagram(diagram, Some(win_length), to_move)
    }

    fn parse_diagram(
        diagram: &str,
        win_length: Option<usize>,
        to_move: Player,
    ) -> Result<Self, BoardError> {
        let rows: Vec<&str> = diagram.split_whitespace().collect();
        if rows.is_empty() {
            return Err(BoardError::InvalidDiagram("diagram has no rows".to_string()));
        }
        let size = rows.len();
        let mut board = match win_length {
            Some(k) => Self::with_win_length(size, k)?,
            None => Self::new(size)?,
        };

        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().collect();
            if symbols.len() != size {
                return Err(BoardError::InvalidDiagram(format!(
                    "row {row} has {} cells, expected {size}",
                    symbols.len()
                )));
            }
            for (col, ch) in symbols.into_iter().enumerate() {
                let cell = Cell::from_symbol(ch).ok_or_else(|| {
                    BoardError::InvalidDiagram(format!("unknown symbol {ch:?} at ({row}, {col})"))
                })?;
                if !cell.is_empty() {
                    board.move_count += 1;
                }
                board.cells[row * size + col] = cell;
            }
        }

        board.to_move = to_move;
        board.winner = board.scan_winner()?;
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// The player whose turn it logically is.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Lets a harness decide who opens the game.
    pub fn set_to_move(&mut self, player: Player) {
        self.to_move = player;
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.size && col < self.size {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.move_count as usize
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Clears the grid so the board can host another game.
    pub fn reset(&mut self, first: Player) {
        self.cells.fill(Cell::Empty);
        self.to_move = first;
        self.move_count = 0;
        self.winner = None;
    }

    /// Every empty cell, in row-major order, addressed as a move for `player`.
    ///
    /// The iterator is lazy and borrows the board; call again to restart.
    pub fn legal_moves(&self, player: Player) -> LegalMoves<'_> {
        LegalMoves {
            cells: &self.cells,
            size: self.size,
            next: 0,
            player,
        }
    }

    /// Validates `mv` against the current position without changing it.
    pub fn check_move(&self, mv: Move) -> Result<(), BoardError> {
        let illegal = |reason| BoardError::IllegalMove { mv, reason };

        if mv.row() >= self.size || mv.col() >= self.size {
            return Err(illegal(IllegalMoveReason::OutOfBounds { size: self.size }));
        }
        if !self.cells[self.index(mv.row(), mv.col())].is_empty() {
            return Err(illegal(IllegalMoveReason::Occupied));
        }
        if mv.player() != self.to_move {
            return Err(illegal(IllegalMoveReason::WrongPlayer {
                expected: self.to_move,
            }));
        }
        if let Some(winner) = self.winner {
            return Err(illegal(IllegalMoveReason::GameOver { winner }));
        }
        Ok(())
    }

    /// Places the stone described by `mv`. On error the board is untouched.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), BoardError> {
        self.check_move(mv)?;
        self.make_move(mv);
        Ok(())
    }

    /// Unchecked move application for search. Pair with [`Board::unmake_move`].
    pub fn make_move(&mut self, mv: Move) -> Undo {
        debug_assert!(self.check_move(mv).is_ok(), "make_move with illegal {mv}");

        let undo = Undo {
            to_move: self.to_move,
            winner: self.winner,
        };
        let idx = self.index(mv.row(), mv.col());
        self.cells[idx] = mv.player().into();
        self.move_count += 1;
        self.to_move = mv.player().other();
        if self.winner.is_none() && self.aligned_through(mv.row(), mv.col(), mv.player()) {
            self.winner = Some(mv.player());
        }
        undo
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        let idx = self.index(mv.row(), mv.col());
        self.cells[idx] = Cell::Empty;
        self.move_count -= 1;
        self.to_move = undo.to_move;
        self.winner = undo.winner;
    }

    /// `(true, Some(p))` once `p` has aligned `win_length` stones,
    /// `(true, None)` for a full board without a winner, otherwise `(false, None)`.
    pub fn is_terminal(&self) -> (bool, Option<Player>) {
        match self.winner {
            Some(p) => (true, Some(p)),
            None => (self.is_full(), None),
        }
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Stone counts `[player one, player two]` for every line segment of
    /// `win_length` cells on the board.
    pub fn window_counts(&self) -> impl Iterator<Item = [usize; 2]> + '_ {
        let k = self.win_length as isize;
        // A one-cell window is the same in every direction.
        let directions = if k == 1 { 1 } else { DIRECTIONS.len() };

        (0..self.cells.len()).flat_map(move |idx| {
            let row = (idx / self.size) as isize;
            let col = (idx % self.size) as isize;
            DIRECTIONS
                .into_iter()
                .take(directions)
                .filter_map(move |(dr, dc)| {
                    if !self.in_bounds(row + dr * (k - 1), col + dc * (k - 1)) {
                        return None;
                    }
                    let mut counts = [0usize; 2];
                    for step in 0..k {
                        let r = (row + dr * step) as usize;
                        let c = (col + dc * step) as usize;
                        if let Some(p) = self.cells[self.index(r, c)].owner() {
                            counts[p.idx()] += 1;
                        }
                    }
                    Some(counts)
                })
        })
    }

    /// Number of occupied cells among the eight neighbours of `(row, col)`.
    pub fn occupied_neighbours(&self, row: usize, col: usize) -> usize {
        let mut n = 0;
        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let (r, c) = (row as isize + dr, col as isize + dc);
                if self.in_bounds(r, c) && !self.cells[self.index(r as usize, c as usize)].is_empty() {
                    n += 1;
                }
            }
        }
        n
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    fn aligned_through(&self, row: usize, col: usize, player: Player) -> bool {
        let stone = Cell::from(player);
        DIRECTIONS.iter().any(|&(dr, dc)| {
            1 + self.run_length(row, col, dr, dc, stone) + self.run_length(row, col, -dr, -dc, stone)
                >= self.win_length
        })
    }

    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, stone: Cell) -> usize {
        let mut n = 0;
        let (mut r, mut c) = (row as isize + dr, col as isize + dc);
        while self.in_bounds(r, c) && self.cells[self.index(r as usize, c as usize)] == stone {
            n += 1;
            r += dr;
            c += dc;
        }
        n
    }

    fn scan_winner(&self) -> Result<Option<Player>, BoardError> {
        let mut found = None;
        for (idx, cell) in self.cells.iter().enumerate() {
            let Some(p) = cell.owner() else { continue };
            if !self.aligned_through(idx / self.size, idx % self.size, p) {
                continue;
            }
            match found {
                Some(q) if q != p => {
                    return Err(BoardError::InvalidDiagram(
                        "both players have a winning line".to_string(),
                    ));
                }
                _ => found = Some(p),
            }
        }
        Ok(found)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: String = row.iter().map(|c| c.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Lazy iterator over the empty cells of a [`Board`], in row-major order.
#[derive(Clone, Debug)]
pub struct LegalMoves<'a> {
    cells: &'a [Cell],
    size: usize,
    next: usize,
    player: Player,
}

impl Iterator for LegalMoves<'_> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        while self.next < self.cells.len() {
            let idx = self.next;
            self.next += 1;
            if self.cells[idx].is_empty() {
                return Some(Move::new(idx / self.size, idx % self.size, self.player));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.cells.len() - self.next))
    }
}

impl FusedIterator for LegalMoves<'_> {}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
