//! Series results storage and reporting

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::TournamentConfig;
use crate::elo::SeriesScore;
use crate::error::ResultsError;

/// Every series run under one configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentResults {
    /// Name/description of the run
    pub name: String,
    /// Participating engine labels
    pub participants: Vec<String>,
    pub matches: Vec<MatchEntry>,
    /// Configuration used
    pub config: TournamentConfig,
}

/// One series, scored from engine1's perspective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    pub engine1: String,
    pub engine2: String,
    pub score: SeriesScore,
}

impl TournamentResults {
    pub fn new(name: &str, participants: Vec<String>, config: TournamentConfig) -> Self {
        Self {
            name: name.to_string(),
            participants,
            matches: Vec::new(),
            config,
        }
    }

    pub fn add_match(&mut self, engine1: &str, engine2: &str, score: SeriesScore) {
        self.matches.push(MatchEntry {
            engine1: engine1.to_string(),
            engine2: engine2.to_string(),
            score,
        });
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<(), ResultsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ResultsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self, ResultsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ResultsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== {} ===\n\n", self.name));
        report.push_str(&format!("Participants: {}\n", self.participants.join(", ")));
        report.push_str(&format!(
            "Config: {}x{} board, {} games/match, depth {}, move cap {}\n\n",
            self.config.board_size,
            self.config.board_size,
            self.config.games,
            self.config.depth,
            self.config.max_moves
        ));

        report.push_str("Results:\n");
        report.push_str(&format!(
            "{:<20} vs {:<20} {:>5}-{:<5}-{:<5}\n",
            "Engine 1", "Engine 2", "W", "L", "D"
        ));
        report.push_str(&"-".repeat(60));
        report.push('\n');

        for entry in &self.matches {
            report.push_str(&format!(
                "{:<20} vs {:<20} {:>5}-{:<5}-{:<5}\n",
                entry.engine1, entry.engine2, entry.score.wins, entry.score.losses, entry.score.draws
            ));
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_and_round_trip() {
        let mut results = TournamentResults::new(
            "AlphaBeta vs Random",
            vec!["AlphaBeta(d3)".into(), "Random".into()],
            TournamentConfig::default(),
        );
        results.add_match(
            "AlphaBeta(d3)",
            "Random",
            SeriesScore {
                wins: 8,
                losses: 0,
                draws: 2,
            },
        );

        let report = results.generate_report();
        assert!(report.contains("AlphaBeta vs Random"));
        assert!(report.contains("9x9 board"));
        assert!(report.contains("    8-0    -2"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        results.save(&path).unwrap();
        let loaded = TournamentResults::load(&path).unwrap();
        assert_eq!(loaded.matches.len(), 1);
        assert_eq!(loaded.matches[0].score, results.matches[0].score);
        assert_eq!(loaded.config, results.config);
    }

    #[test]
    fn test_load_garbage_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            TournamentResults::load(&path),
            Err(ResultsError::Json(_))
        ));
    }
}
