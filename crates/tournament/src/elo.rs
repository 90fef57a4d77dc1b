//! Elo rating tracking across engine series

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ResultsError;

/// Default starting Elo for new engines
pub const DEFAULT_ELO: f64 = 1500.0;

/// K-factor for Elo updates (higher = more volatile)
pub const K_FACTOR: f64 = 32.0;

/// Ratings, game counts and series history keyed by engine label
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EloTracker {
    pub ratings: HashMap<String, f64>,
    pub games_played: HashMap<String, u32>,
    pub history: Vec<SeriesRecord>,
}

/// One finished series between two engines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub engine1: String,
    pub engine2: String,
    pub score: SeriesScore,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
    pub elo_change: f64,
}

/// Result of a single game from one engine's point of view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

/// Tally of a series from engine1's perspective
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesScore {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl SeriesScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from engine1's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

impl EloTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load tracker from a JSON file
    pub fn load(path: &Path) -> Result<Self, ResultsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ResultsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Like [`EloTracker::load`], but a missing file yields an empty tracker.
    pub fn load_or_default(path: &Path) -> Result<Self, ResultsError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Save tracker to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), ResultsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ResultsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Current rating, without registering the engine
    pub fn rating(&self, engine: &str) -> f64 {
        self.ratings.get(engine).copied().unwrap_or(DEFAULT_ELO)
    }

    /// Expected score for engine1 against engine2
    pub fn expected_score(&self, engine1: &str, engine2: &str) -> f64 {
        let r1 = self.rating(engine1);
        let r2 = self.rating(engine2);
        1.0 / (1.0 + 10.0_f64.powf((r2 - r1) / 400.0))
    }

    /// Update ratings after a series
    pub fn update_ratings(&mut self, engine1: &str, engine2: &str, score: &SeriesScore) {
        let expected = self.expected_score(engine1, engine2);
        let games = score.total_games() as f64;
        let elo_change = K_FACTOR * games * (score.score() - expected);

        let r1 = self.rating(engine1);
        let r2 = self.rating(engine2);
        self.ratings.insert(engine1.to_string(), r1 + elo_change);
        self.ratings.insert(engine2.to_string(), r2 - elo_change);

        *self.games_played.entry(engine1.to_string()).or_insert(0) += score.total_games();
        *self.games_played.entry(engine2.to_string()).or_insert(0) += score.total_games();

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        self.history.push(SeriesRecord {
            engine1: engine1.to_string(),
            engine2: engine2.to_string(),
            score: *score,
            timestamp,
            elo_change,
        });
    }

    /// Engines sorted by rating, best first
    pub fn leaderboard(&self) -> Vec<(String, f64, u32)> {
        let mut entries: Vec<_> = self
            .ratings
            .iter()
            .map(|(name, &rating)| {
                let games = self.games_played.get(name).copied().unwrap_or(0);
                (name.clone(), rating, games)
            })
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    pub fn format_leaderboard(&self) -> String {
        let mut out = String::from("=== Engine Leaderboard ===\n");
        out.push_str(&format!("{:<30} {:>8} {:>8}\n", "Engine", "Elo", "Games"));
        out.push_str(&"-".repeat(48));
        out.push('\n');
        for (name, rating, games) in self.leaderboard() {
            out.push_str(&format!("{:<30} {:>8.1} {:>8}\n", name, rating, games));
        }
        out
    }
}

#[cfg(test)]
#[path = "elo_tests.rs"]
mod elo_tests;
