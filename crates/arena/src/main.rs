//! Tic-tac-toe arena for the UCT search engine.
//!
//! Plays the engine against a baseline opponent and inspects single
//! searches from a given opening.

mod minimax;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use minimax::Minimax;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};
use uct_core::{Actor, Board, Outcome, PlayerId};
use uct_mcts::games::TicTacToe;
use uct_mcts::{Mcts, UctConfig};

/// UCT tic-tac-toe arena.
#[derive(Parser)]
#[command(name = "uct-arena")]
#[command(about = "Play and inspect UCT searches on tic-tac-toe")]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the engine against a baseline opponent.
    Play {
        /// Number of games to play.
        #[arg(short, long, default_value = "20")]
        games: usize,

        /// Search iterations per engine move.
        #[arg(short, long, default_value = "1000")]
        iterations: usize,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Opponent the engine plays against.
        #[arg(short, long, value_enum, default_value_t = OpponentKind::Random)]
        opponent: OpponentKind,

        /// Side played by the engine.
        #[arg(long, value_enum, default_value_t = SideChoice::Alternate)]
        side: SideChoice,

        /// Write a JSON report of every game to this file.
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Search one position and print the statistics of every move.
    Suggest {
        /// Opening moves (cells 0-8, row-major), X first.
        #[arg(short, long, value_delimiter = ',')]
        moves: Vec<u8>,

        /// Search iterations.
        #[arg(short, long, default_value = "1000")]
        iterations: usize,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum OpponentKind {
    Random,
    Minimax,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SideChoice {
    X,
    O,
    Alternate,
}

impl SideChoice {
    fn for_game(self, index: usize) -> PlayerId {
        match self {
            SideChoice::X => PlayerId::One,
            SideChoice::O => PlayerId::Two,
            SideChoice::Alternate if index % 2 == 0 => PlayerId::One,
            SideChoice::Alternate => PlayerId::Two,
        }
    }
}

/// One finished game.
#[derive(Serialize, Debug)]
struct GameRecord {
    seed: u64,
    /// "X" or "O".
    engine: &'static str,
    moves: Vec<u8>,
    /// Outcome from the engine's perspective.
    outcome: String,
}

/// Match results.
#[derive(Serialize, Debug)]
struct MatchReport {
    opponent: OpponentKind,
    iterations: usize,
    seed: u64,
    wins: usize,
    losses: usize,
    draws: usize,
    games: Vec<GameRecord>,
}

impl MatchReport {
    fn total(&self) -> usize {
        self.wins + self.losses + self.draws
    }

    fn percent(&self, count: usize) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            count as f64 / self.total() as f64 * 100.0
        }
    }
}

fn side_label(player: PlayerId) -> &'static str {
    match player {
        PlayerId::One => "X",
        PlayerId::Two => "O",
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Play one game of the engine against `opponent`.
fn play_game(
    config: &UctConfig,
    opponent: OpponentKind,
    engine_side: PlayerId,
    seed: u64,
) -> Result<(GameRecord, Outcome)> {
    let mut engine = Mcts::new(config.clone(), ChaCha8Rng::seed_from_u64(seed));
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
    let minimax = Minimax::new();

    let mut game = TicTacToe::new_game();
    let mut moves = Vec::new();

    while !game.is_finished() {
        let player = game.player_to_play();
        let cell = if player == engine_side {
            let result = engine.search(&mut game, player)?;
            debug!(
                ply = game.plies(),
                root_visits = result.root_visits,
                best = ?result.best_move,
                "engine move"
            );
            result
                .best_move
                .context("search returned no move on an unfinished board")?
        } else {
            match opponent {
                OpponentKind::Random => Actor::random(player)
                    .propose(&game.board().empty_cells(), &mut rng)
                    .context("no empty cell on an unfinished board")?,
                OpponentKind::Minimax => minimax
                    .best_move(&mut game)?
                    .context("minimax returned no move on an unfinished board")?,
            }
        };

        game.play_cell(cell)?;
        moves.push(cell.0);
    }

    let outcome = Outcome::for_player(game.status(), engine_side)
        .context("finished game has no outcome")?;
    info!(seed, engine = side_label(engine_side), %outcome, "game finished");

    let record = GameRecord {
        seed,
        engine: side_label(engine_side),
        moves,
        outcome: outcome.to_string(),
    };
    Ok((record, outcome))
}

/// Run the play command.
fn cmd_play(
    games: usize,
    iterations: usize,
    seed: u64,
    opponent: OpponentKind,
    side: SideChoice,
    report: Option<PathBuf>,
) -> Result<()> {
    if games == 0 {
        bail!("--games must be at least 1");
    }

    println!(
        "Playing {} games against {:?} with {} iterations/move (seed {})",
        games, opponent, iterations, seed
    );
    let start = Instant::now();
    let config = UctConfig::with_iterations(iterations);

    let results: Vec<(GameRecord, Outcome)> = (0..games)
        .into_par_iter()
        .map(|i| {
            let game_seed = seed.wrapping_add(i as u64 * 1000);
            play_game(&config, opponent, side.for_game(i), game_seed)
                .with_context(|| format!("game {} (seed {}) failed", i, game_seed))
        })
        .collect::<Result<_>>()?;

    let count = |wanted: Outcome| results.iter().filter(|(_, o)| *o == wanted).count();
    let summary = MatchReport {
        opponent,
        iterations,
        seed,
        wins: count(Outcome::Win),
        losses: count(Outcome::Loss),
        draws: count(Outcome::Draw),
        games: results.into_iter().map(|(record, _)| record).collect(),
    };

    println!("\nCompleted in {:.2}s", start.elapsed().as_secs_f64());
    println!("================================================");
    println!("Engine wins:   {} ({:.1}%)", summary.wins, summary.percent(summary.wins));
    println!("Engine losses: {} ({:.1}%)", summary.losses, summary.percent(summary.losses));
    println!("Draws:         {} ({:.1}%)", summary.draws, summary.percent(summary.draws));

    if let Some(path) = report {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create report file: {:?}", path))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &summary)
            .with_context(|| format!("Failed to write report: {:?}", path))?;
        println!("Report saved to: {:?}", path);
    }

    Ok(())
}

/// Run the suggest command.
fn cmd_suggest(moves: Vec<u8>, iterations: usize, seed: u64) -> Result<()> {
    let mut game = TicTacToe::position(&moves)
        .with_context(|| format!("Invalid opening: {:?}", moves))?;

    print!("{}", game.board());
    if game.is_finished() {
        println!("\nGame is over: {:?}", game.status());
        return Ok(());
    }

    let me = game.player_to_play();
    let mut mcts = Mcts::new(
        UctConfig::with_iterations(iterations),
        ChaCha8Rng::seed_from_u64(seed),
    );
    let result = mcts.search(&mut game, me)?;

    println!(
        "\n{} to move, {} iterations, {} root visits{}",
        side_label(me),
        result.iterations,
        result.root_visits,
        if result.exhausted { " (tree fully explored)" } else { "" }
    );
    println!("cell    visits  score   mean   closed");
    for stats in &result.children {
        println!(
            "{:<7} {:>6} {:>6} {:>7.3}   {}",
            stats.cell.0,
            stats.visits,
            stats.win_score,
            stats.mean_score(),
            if stats.fully_explored { "yes" } else { "no" }
        );
    }

    match result.best_move {
        Some(cell) => println!("\nRecommended move: {} {}", cell.0, cell),
        None => println!("\nNo move to recommend"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Play {
            games,
            iterations,
            seed,
            opponent,
            side,
            report,
        } => cmd_play(games, iterations, seed, opponent, side, report),

        Commands::Suggest {
            moves,
            iterations,
            seed,
        } => cmd_suggest(moves, iterations, seed),
    }
}
