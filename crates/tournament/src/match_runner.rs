//! Match runner for playing games between engines

use grid_core::{Board, BoardError, Engine, Player};
use tracing::{debug, info, instrument};

use crate::elo::{GameResult, SeriesScore};
use crate::error::{MatchError, Seat};

/// How a finished match ended, by player colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

impl Outcome {
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::One => Outcome::PlayerOneWin,
            Player::Two => Outcome::PlayerTwoWin,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::PlayerOneWin => Some(Player::One),
            Outcome::PlayerTwoWin => Some(Player::Two),
            Outcome::Draw => None,
        }
    }
}

/// Why a match stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A player aligned enough stones
    Alignment,
    /// Every cell is taken and nobody aligned
    BoardFull,
    /// The move cap was hit first. Adjudicated as a draw.
    MoveCap,
}

/// Final result of one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub outcome: Outcome,
    /// Moves played during the match
    pub moves: u32,
    pub termination: Termination,
}

impl MatchResult {
    pub fn winner(&self) -> Option<Player> {
        self.outcome.winner()
    }

    /// Result from the point of view of whoever played `player`.
    pub fn result_for(&self, player: Player) -> GameResult {
        match self.winner() {
            None => GameResult::Draw,
            Some(p) if p == player => GameResult::Win,
            Some(_) => GameResult::Loss,
        }
    }

    /// External result code: `0` draw, `1` seat A won, `2` seat B won,
    /// where seat A played `seat_a`.
    pub fn code_for(&self, seat_a: Player) -> i32 {
        match self.result_for(seat_a) {
            GameResult::Draw => 0,
            GameResult::Win => 1,
            GameResult::Loss => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    NotStarted,
    InProgress,
    Finished(MatchResult),
}

/// One match between two engines on one board.
///
/// Seat A plays `first_player` and moves first; seat B plays the other
/// colour. Each [`Game::step`] applies exactly one move, and the game
/// finishes as soon as the board is terminal or `max_moves` moves were
/// played. A capped game is a draw.
pub struct Game<'e, A: Engine + ?Sized, B: Engine + ?Sized> {
    board: Board,
    engine_a: &'e mut A,
    engine_b: &'e mut B,
    seat_a: Player,
    max_moves: u32,
    moves: u32,
    state: MatchState,
}

impl<'e, A: Engine + ?Sized, B: Engine + ?Sized> Game<'e, A, B> {
    pub fn new(
        engine_a: &'e mut A,
        engine_b: &'e mut B,
        mut board: Board,
        first_player: Player,
        max_moves: u32,
    ) -> Result<Self, MatchError> {
        if board.move_count() > 0 {
            return Err(MatchError::BoardInProgress {
                moves: board.move_count(),
            });
        }
        board.set_to_move(first_player);

        Ok(Self {
            board,
            engine_a,
            engine_b,
            seat_a: first_player,
            max_moves,
            moves: 0,
            state: MatchState::NotStarted,
        })
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves_played(&self) -> u32 {
        self.moves
    }

    /// Advances the state machine by one transition.
    ///
    /// `NotStarted` only adjudicates the initial board, so a zero move cap
    /// finishes without consulting either engine. `InProgress` plays one
    /// move. `Finished` is absorbing.
    pub fn step(&mut self) -> Result<MatchState, MatchError> {
        match self.state {
            MatchState::Finished(_) => return Ok(self.state),
            MatchState::NotStarted => {
                self.engine_a.new_game();
                self.engine_b.new_game();
            }
            MatchState::InProgress => self.play_move()?,
        }

        self.state = self.adjudicate();
        if let MatchState::Finished(result) = self.state {
            info!(
                outcome = ?result.outcome,
                termination = ?result.termination,
                moves = result.moves,
                "match finished"
            );
        }
        Ok(self.state)
    }

    /// Steps until the match is finished.
    pub fn run(mut self) -> Result<MatchResult, MatchError> {
        loop {
            if let MatchState::Finished(result) = self.step()? {
                return Ok(result);
            }
        }
    }

    fn seat_of(&self, player: Player) -> Seat {
        if player == self.seat_a {
            Seat::A
        } else {
            Seat::B
        }
    }

    fn engine_name(&self, seat: Seat) -> String {
        match seat {
            Seat::A => self.engine_a.name().to_string(),
            Seat::B => self.engine_b.name().to_string(),
        }
    }

    fn play_move(&mut self) -> Result<(), MatchError> {
        let player = self.board.to_move();
        let seat = self.seat_of(player);

        let selected = match seat {
            Seat::A => self.engine_a.select_move(&self.board, player),
            Seat::B => self.engine_b.select_move(&self.board, player),
        };
        let mv = selected.map_err(|source| MatchError::Engine {
            engine: self.engine_name(seat),
            seat,
            source,
        })?;

        // No retry and no substitute move: a bad move ends the match.
        if let Err(source) = self.board.apply_move(mv) {
            return Err(MatchError::EngineProtocol {
                engine: self.engine_name(seat),
                seat,
                mv,
                source,
            });
        }
        self.moves += 1;
        debug!(%seat, %mv, ply = self.moves, "move applied");
        Ok(())
    }

    fn adjudicate(&self) -> MatchState {
        let finished = |outcome, termination| {
            MatchState::Finished(MatchResult {
                outcome,
                moves: self.moves,
                termination,
            })
        };

        match self.board.is_terminal() {
            (true, Some(winner)) => finished(Outcome::win_for(winner), Termination::Alignment),
            (true, None) => finished(Outcome::Draw, Termination::BoardFull),
            (false, _) if self.moves >= self.max_moves => {
                finished(Outcome::Draw, Termination::MoveCap)
            }
            (false, _) => MatchState::InProgress,
        }
    }
}

/// Plays one match: `engine_a` moves first with colour `first_player`.
#[instrument(skip(engine_a, engine_b, board), fields(engine_a = engine_a.name(), engine_b = engine_b.name()))]
pub fn compare_engines<A: Engine + ?Sized, B: Engine + ?Sized>(
    engine_a: &mut A,
    engine_b: &mut B,
    board: Board,
    first_player: Player,
    max_moves: u32,
) -> Result<MatchResult, MatchError> {
    Game::new(engine_a, engine_b, board, first_player, max_moves)?.run()
}

/// Configuration for a series of matches
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Side length of the board
    pub board_size: usize,
    /// Stones in a row needed to win (None = min(board_size, 5))
    pub win_length: Option<usize>,
    /// Maximum moves per game before declaring a draw
    pub max_moves: u32,
    /// Colour of whoever moves first
    pub first_player: Player,
    /// Whether the engines take turns moving first
    pub alternate_first_player: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            board_size: 9,
            win_length: None,
            max_moves: 100,
            first_player: Player::One,
            alternate_first_player: true,
        }
    }
}

impl MatchConfig {
    /// Fresh board for one game of the series
    pub fn fresh_board(&self) -> Result<Board, BoardError> {
        match self.win_length {
            Some(k) => Board::with_win_length(self.board_size, k),
            None => Board::new(self.board_size),
        }
    }
}

/// Runs series of matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run a series between two engines
    ///
    /// Returns the score from engine1's perspective
    #[instrument(skip_all, fields(engine1 = engine1.name(), engine2 = engine2.name(), games = self.config.num_games))]
    pub fn run_match<A: Engine + ?Sized, B: Engine + ?Sized>(
        &self,
        engine1: &mut A,
        engine2: &mut B,
    ) -> Result<SeriesScore, MatchError> {
        let mut score = SeriesScore::new();
        let first = self.config.first_player;

        for game_num in 0..self.config.num_games {
            let engine1_first = !self.config.alternate_first_player || game_num % 2 == 0;
            let board = self.config.fresh_board()?;

            let game_result = if engine1_first {
                compare_engines(engine1, engine2, board, first, self.config.max_moves)?
                    .result_for(first)
            } else {
                // engine2 opens with the first colour; engine1 holds the other one
                compare_engines(engine2, engine1, board, first, self.config.max_moves)?
                    .result_for(first.other())
            };
            score.record(game_result);

            info!(
                game = game_num + 1,
                of = self.config.num_games,
                engine1_first,
                result = ?game_result,
                wins = score.wins,
                losses = score.losses,
                draws = score.draws,
                "game complete"
            );
        }

        Ok(score)
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
