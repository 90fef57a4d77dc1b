//! Comparison harness for grid alignment engines
//!
//! This crate provides infrastructure for:
//! - Playing single matches between two engines ([`compare_engines`])
//! - Running series with alternating first player ([`MatchRunner`])
//! - Tracking Elo ratings and persisting series results
//! - A handle-based surface for external drivers ([`Harness`])
//!
//! # Usage
//!
//! ```bash
//! # One alpha-beta vs random game on a 3x3 board
//! cargo run -p tournament -- compare --size 3 --first 1 --max-moves 9
//!
//! # A ten game series
//! cargo run -p tournament -- match alphabeta:3 random:42 --games 10
//! ```

mod config;
mod elo;
mod engines;
mod error;
mod harness;
mod match_runner;
mod results;

pub use config::*;
pub use elo::*;
pub use engines::*;
pub use error::*;
pub use harness::*;
pub use match_runner::*;
pub use results::*;
