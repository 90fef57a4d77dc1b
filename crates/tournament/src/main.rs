//! Tournament CLI
//!
//! Compare engines, run series and track Elo ratings.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use grid_core::Engine;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tournament::{
    EloTracker, EngineKind, Harness, MatchRunner, TournamentConfig, TournamentResults,
};

const ELO_FILE: &str = "tournament_elo.json";

#[derive(Parser, Debug)]
#[command(name = "tournament")]
#[command(about = "Compare grid alignment engines", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one alpha-beta vs random game through the handle harness
    Compare {
        /// TOML config file; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Board side length
        #[arg(long)]
        size: Option<usize>,

        /// Colour engine A opens with (1 or 2)
        #[arg(long)]
        first: Option<i32>,

        #[arg(long)]
        max_moves: Option<u32>,

        /// Alpha-beta search depth
        #[arg(short, long)]
        depth: Option<u8>,

        /// Seed for the random engine
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run a series between two engines and update ratings
    Match {
        /// Engine for seat A, e.g. `alphabeta:4`
        engine_a: Option<String>,

        /// Engine for seat B, e.g. `random:42`
        engine_b: Option<String>,

        #[arg(short, long)]
        games: Option<u32>,

        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write JSON results here
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Elo tracker file
        #[arg(long, default_value = ELO_FILE)]
        elo: PathBuf,
    },

    /// Show the Elo leaderboard
    Leaderboard {
        #[arg(long, default_value = ELO_FILE)]
        elo: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<TournamentConfig> {
    match path {
        Some(path) => TournamentConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(TournamentConfig::default()),
    }
}

fn run_compare(mut config: TournamentConfig, first: Option<i32>) -> Result<()> {
    config.validate().context("invalid settings")?;
    let first = first.unwrap_or(config.first_player);
    let size = i32::try_from(config.board_size).context("board size out of range")?;

    let mut harness = Harness::from_config(&config);
    let engine_a = harness.new_alpha_beta_engine();
    let engine_b = harness.new_random_engine();
    let board = harness.new_board(size)?;

    let max_moves = i32::try_from(config.max_moves).context("move cap out of range")?;
    let result = harness
        .compare_engines(engine_a, engine_b, board, first, max_moves)
        .context("comparison failed")?;

    match result {
        1 => println!("Winner: Engine A (Alpha-Beta)"),
        2 => println!("Winner: Engine B (Random)"),
        0 => println!("Result: Draw"),
        other => bail!("unexpected comparison result {other}"),
    }

    harness.release_engine(engine_a)?;
    harness.release_engine(engine_b)?;
    harness.release_board(board)?;
    Ok(())
}

fn run_match(config: TournamentConfig, out: Option<PathBuf>, elo: PathBuf) -> Result<()> {
    config.validate().context("invalid settings")?;

    let mut engine_a = EngineKind::from_spec(&config.engine_a, config.depth, config.seed)?;
    // Distinct stream for seat B when both seats are random.
    let seed_b = config.seed.map(|s| s.wrapping_add(1));
    let mut engine_b = EngineKind::from_spec(&config.engine_b, config.depth, seed_b)?;
    let (label_a, label_b) = (engine_a.label(), engine_b.label());

    println!("=== Match: {} vs {} ===", label_a, label_b);
    println!(
        "Games: {}, Board: {}x{}, Depth: {}",
        config.games, config.board_size, config.board_size, config.depth
    );

    let runner = MatchRunner::new(config.match_config()?);
    let score = runner
        .run_match(&mut engine_a, &mut engine_b)
        .with_context(|| format!("{} vs {}", engine_a.name(), engine_b.name()))?;

    println!();
    println!("=== Final Result ===");
    println!(
        "{}: {} wins, {} losses, {} draws",
        label_a, score.wins, score.losses, score.draws
    );
    println!("Score: {:.1}%", score.score() * 100.0);

    let mut tracker = EloTracker::load_or_default(&elo)?;
    tracker.update_ratings(&label_a, &label_b, &score);
    println!();
    print!("{}", tracker.format_leaderboard());
    tracker.save(&elo)?;

    if let Some(out) = out {
        let mut results = TournamentResults::new(
            &format!("{} vs {}", label_a, label_b),
            vec![label_a.clone(), label_b.clone()],
            config,
        );
        results.add_match(&label_a, &label_b, score);
        results.save(&out)?;
        info!(path = %out.display(), "results written");
    }
    Ok(())
}

fn show_leaderboard(elo: PathBuf) -> Result<()> {
    if !elo.exists() {
        println!("No tournament data found. Run some matches first!");
        return Ok(());
    }
    let tracker = EloTracker::load(&elo)?;
    print!("{}", tracker.format_leaderboard());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Compare {
            config,
            size,
            first,
            max_moves,
            depth,
            seed,
        } => {
            let mut config = load_config(config.as_ref())?;
            if let Some(size) = size {
                config.board_size = size;
                config.win_length = None;
            }
            if let Some(max_moves) = max_moves {
                config.max_moves = max_moves;
            }
            if let Some(depth) = depth {
                config.depth = depth;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            run_compare(config, first)
        }
        Command::Match {
            engine_a,
            engine_b,
            games,
            config,
            out,
            elo,
        } => {
            let mut config = load_config(config.as_ref())?;
            if let Some(engine_a) = engine_a {
                config.engine_a = engine_a;
            }
            if let Some(engine_b) = engine_b {
                config.engine_b = engine_b;
            }
            if let Some(games) = games {
                config.games = games;
            }
            run_match(config, out, elo)
        }
        Command::Leaderboard { elo } => show_leaderboard(elo),
    }
}
