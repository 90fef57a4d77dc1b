//! Handle-based comparison surface for external drivers.
//!
//! Everything here is a thin adapter over [`compare_engines`]: engines and
//! boards live in per-kind registries and are addressed by opaque integer
//! handles. Handles are never reused, which lets the harness tell a handle
//! it never issued apart from one that was released.

use std::collections::HashMap;
use std::fmt;

use grid_core::{Board, BoardError, Player};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::TournamentConfig;
use crate::engines::EngineKind;
use crate::error::MatchError;
use crate::match_runner::compare_engines;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EngineHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Engine,
    Board,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleKind::Engine => write!(f, "engine"),
            HandleKind::Board => write!(f, "board"),
        }
    }
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("unknown {kind} handle {id}")]
    UnknownHandle { kind: HandleKind, id: u64 },

    #[error("{kind} handle {id} was already released")]
    ReleasedHandle { kind: HandleKind, id: u64 },

    #[error("first player must be 1 or 2, got {0}")]
    InvalidPlayer(i32),

    #[error("move cap must not be negative, got {0}")]
    InvalidMoveCap(i32),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Values keyed by ids from a counter that only ever grows.
#[derive(Debug)]
struct Registry<T> {
    kind: HandleKind,
    next_id: u64,
    live: HashMap<u64, T>,
}

impl<T> Registry<T> {
    fn new(kind: HandleKind) -> Self {
        Self {
            kind,
            next_id: 1,
            live: HashMap::new(),
        }
    }

    fn insert(&mut self, value: T) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id, value);
        id
    }

    fn missing(&self, id: u64) -> HarnessError {
        if id > 0 && id < self.next_id {
            HarnessError::ReleasedHandle { kind: self.kind, id }
        } else {
            HarnessError::UnknownHandle { kind: self.kind, id }
        }
    }

    fn get(&self, id: u64) -> Result<&T, HarnessError> {
        self.live.get(&id).ok_or_else(|| self.missing(id))
    }

    fn remove(&mut self, id: u64) -> Result<T, HarnessError> {
        match self.live.remove(&id) {
            Some(value) => Ok(value),
            None => Err(self.missing(id)),
        }
    }

    fn len(&self) -> usize {
        self.live.len()
    }
}

/// Owns every engine and board created through handles.
#[derive(Debug)]
pub struct Harness {
    engines: Registry<EngineKind>,
    boards: Registry<Board>,
    depth: u8,
    win_length: Option<usize>,
    seeds: StdRng,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// Default depth and win length; random engines seeded from entropy.
    pub fn new() -> Self {
        Self::with_seeds(alphabeta_engine::DEFAULT_DEPTH, None, StdRng::from_entropy())
    }

    /// Takes `depth`, `win_length` and `seed` from a config.
    ///
    /// With a seed, every random engine created here is reproducible in
    /// creation order.
    pub fn from_config(config: &TournamentConfig) -> Self {
        let seeds = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_seeds(config.depth, config.win_length, seeds)
    }

    fn with_seeds(depth: u8, win_length: Option<usize>, seeds: StdRng) -> Self {
        Self {
            engines: Registry::new(HandleKind::Engine),
            boards: Registry::new(HandleKind::Board),
            depth,
            win_length,
            seeds,
        }
    }

    pub fn new_alpha_beta_engine(&mut self) -> EngineHandle {
        EngineHandle(self.engines.insert(EngineKind::alpha_beta(self.depth)))
    }

    pub fn new_random_engine(&mut self) -> EngineHandle {
        let seed = self.seeds.next_u64();
        EngineHandle(self.engines.insert(EngineKind::random(Some(seed))))
    }

    /// Registers an empty board. Sizes outside `1..=256` are rejected.
    pub fn new_board(&mut self, size: i32) -> Result<BoardHandle, HarnessError> {
        let size = usize::try_from(size).map_err(|_| BoardError::InvalidSize {
            size: i64::from(size),
        })?;
        let board = match self.win_length {
            Some(k) => Board::with_win_length(size, k.min(size))?,
            None => Board::new(size)?,
        };
        Ok(BoardHandle(self.boards.insert(board)))
    }

    /// Plays one match and returns `0` for a draw, `1` if engine A won and
    /// `2` if engine B won. Engine A moves first with colour `first_player`.
    ///
    /// The registered engines keep their state across calls, so repeated
    /// comparisons with a random engine play different games. When both
    /// handles are the same, seat B plays a copy of the engine and only
    /// seat A's state is written back.
    #[instrument(skip(self))]
    pub fn compare_engines(
        &mut self,
        engine_a: EngineHandle,
        engine_b: EngineHandle,
        board: BoardHandle,
        first_player: i32,
        max_moves: i32,
    ) -> Result<i32, HarnessError> {
        let first = Player::from_number(first_player)
            .ok_or(HarnessError::InvalidPlayer(first_player))?;
        let max_moves =
            u32::try_from(max_moves).map_err(|_| HarnessError::InvalidMoveCap(max_moves))?;

        let board = self.boards.get(board.0)?.clone();
        let result = if engine_a == engine_b {
            // Seat B plays a copy; seat A's state, RNG included, is kept.
            let mut a = self.engines.remove(engine_a.0)?;
            let mut b = a.clone();
            let outcome = compare_engines(&mut a, &mut b, board, first, max_moves);
            self.engines.live.insert(engine_a.0, a);
            outcome?
        } else {
            // Detach A so both engines can be borrowed mutably.
            let mut a = self.engines.remove(engine_a.0)?;
            let outcome = match self.engines.live.get_mut(&engine_b.0) {
                Some(b) => compare_engines(&mut a, b, board, first, max_moves)
                    .map_err(HarnessError::from),
                None => Err(self.engines.missing(engine_b.0)),
            };
            self.engines.live.insert(engine_a.0, a);
            outcome?
        };

        let code = result.code_for(first);
        debug!(code, moves = result.moves, "comparison finished");
        Ok(code)
    }

    pub fn release_engine(&mut self, handle: EngineHandle) -> Result<(), HarnessError> {
        self.engines.remove(handle.0).map(drop)
    }

    pub fn release_board(&mut self, handle: BoardHandle) -> Result<(), HarnessError> {
        self.boards.remove(handle.0).map(drop)
    }

    pub fn live_engines(&self) -> usize {
        self.engines.len()
    }

    pub fn live_boards(&self) -> usize {
        self.boards.len()
    }
}

#[cfg(test)]
#[path = "harness_tests.rs"]
mod harness_tests;
