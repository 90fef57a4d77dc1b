//! TOML configuration for comparison series.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

use grid_core::{Board, Player};

use crate::error::ConfigError;
use crate::match_runner::MatchConfig;

/// Settings shared by the `compare` and `match` commands.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TournamentConfig {
    /// Side length of the square board
    pub board_size: usize,
    /// Stones in a row needed to win; `min(board_size, 5)` when absent
    pub win_length: Option<usize>,
    /// Alpha-beta search depth in plies
    pub depth: u8,
    /// Moves per game before adjudicating a draw
    pub max_moves: u32,
    /// Games per series
    pub games: u32,
    /// Seed for random engines; entropy when absent
    pub seed: Option<u64>,
    /// Colour of whoever opens each game, 1 or 2
    pub first_player: i32,
    pub alternate_first_player: bool,
    /// Engine spec for seat A, e.g. `alphabeta:4`
    pub engine_a: String,
    pub engine_b: String,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            board_size: 9,
            win_length: None,
            depth: 3,
            max_moves: 100,
            games: 10,
            seed: None,
            first_player: 1,
            alternate_first_player: true,
            engine_a: "alphabeta".to_string(),
            engine_b: "random".to_string(),
        }
    }
}

impl TournamentConfig {
    /// Loads and validates a config file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("loading config");
        let contents =
            std::fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
                path: path.as_ref().to_path_buf(),
                source,
            })?;
        let config = Self::from_toml_str(&contents)?;
        info!(
            board_size = config.board_size,
            depth = config.depth,
            games = config.games,
            "config loaded"
        );
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.empty_board()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.depth == 0 {
            return Err(ConfigError::Invalid("depth must be at least 1".into()));
        }
        self.first_player()?;
        Ok(())
    }

    pub fn first_player(&self) -> Result<Player, ConfigError> {
        Player::from_number(self.first_player).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "first_player must be 1 or 2, got {}",
                self.first_player
            ))
        })
    }

    /// Board described by `board_size` and `win_length`
    pub fn empty_board(&self) -> Result<Board, grid_core::BoardError> {
        match self.win_length {
            Some(k) => Board::with_win_length(self.board_size, k),
            None => Board::new(self.board_size),
        }
    }

    pub fn match_config(&self) -> Result<MatchConfig, ConfigError> {
        Ok(MatchConfig {
            num_games: self.games,
            board_size: self.board_size,
            win_length: self.win_length,
            max_moves: self.max_moves,
            first_player: self.first_player()?,
            alternate_first_player: self.alternate_first_player,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TournamentConfig::from_toml_str("").unwrap();
        assert_eq!(config, TournamentConfig::default());
        assert_eq!(config.empty_board().unwrap().win_length(), 5);
    }

    #[test]
    fn test_partial_override() {
        let config = TournamentConfig::from_toml_str(
            "board_size = 3\nwin_length = 3\ngames = 4\nseed = 7\nengine_a = \"alphabeta:2\"\n",
        )
        .unwrap();
        assert_eq!(config.board_size, 3);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.depth, 3);
        assert_eq!(config.engine_a, "alphabeta:2");

        let mc = config.match_config().unwrap();
        assert_eq!(mc.num_games, 4);
        assert_eq!(mc.first_player, Player::One);
    }

    #[test]
    fn test_rejects_bad_values() {
        for toml in [
            "board_size = 0",
            "board_size = 3\nwin_length = 4",
            "depth = 0",
            "first_player = 3",
        ] {
            assert!(
                matches!(
                    TournamentConfig::from_toml_str(toml),
                    Err(ConfigError::Invalid(_))
                ),
                "{toml}"
            );
        }
    }

    #[test]
    fn test_rejects_unknown_keys_and_bad_syntax() {
        assert!(matches!(
            TournamentConfig::from_toml_str("bord_size = 3"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            TournamentConfig::from_toml_str("board_size = "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compare.toml");
        std::fs::write(&path, "max_moves = 9\nfirst_player = 2\n").unwrap();

        let config = TournamentConfig::load(&path).unwrap();
        assert_eq!(config.max_moves, 9);
        assert_eq!(config.first_player().unwrap(), Player::Two);

        assert!(matches!(
            TournamentConfig::load(dir.path().join("missing.toml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
