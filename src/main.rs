//! Command line game against the computer.

#![deny(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::must_use_candidate,
    // clippy::restriction,
    // clippy::pedantic
)]
// now allow a few rules which are denied by the above statement
// --> they are ridiculous and not necessary
#![allow(
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::fallible_impl_from,
    clippy::multiple_crate_versions
)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::all)]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use connect_four_rs::config::{AppConfig, FirstPlayer};
use connect_four_rs::{Game, Gameboard, MoveOutcome, Piece, search_best_move};

const HUMAN: Piece = Piece::Cross;
const COMPUTER: Piece = Piece::Nought;

/// Play Connect Four against the computer.
#[derive(Parser, Debug)]
#[command(name = "connect-four", version, about = "Play Connect Four against the computer")]
struct Cli {
    /// Plies the computer looks ahead (overrides the config file)
    #[arg(short, long)]
    depth: Option<usize>,

    /// Who drops the first piece (overrides the config file)
    #[arg(long, value_enum)]
    first: Option<FirstPlayer>,

    /// Search the moves of the computer on all cores
    #[arg(long)]
    parallel: bool,

    /// Seed for choosing the starting player
    #[arg(long)]
    seed: Option<u64>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-four.toml")]
    config: PathBuf,
}

/// Asks until the human enters a playable column.
///
/// Returns `None` when stdin is closed.
fn prompt_human_move<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    input: &mut impl BufRead,
) -> Result<Option<usize>> {
    loop {
        print!("Your turn (select column 0-{}): ", W - 1);
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("failed to read stdin")? == 0 {
            return Ok(None);
        }

        let Ok(column) = line.trim().parse::<usize>() else {
            println!("Please enter a valid number.");
            continue;
        };
        if column >= W {
            println!("Invalid column number.");
            continue;
        }
        if !board.is_valid_column(column) {
            println!("Column is full. Pick another one.");
            continue;
        }
        return Ok(Some(column));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if let Some(first) = cli.first {
        config.game.first = first;
    }
    config.search.parallel |= cli.parallel;
    config.validate().context("invalid settings")?;

    let mut rng = cli
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let human_first = match config.game.first {
        FirstPlayer::Human => true,
        FirstPlayer::Computer => false,
        FirstPlayer::Random => rng.random_bool(0.5),
    };

    let mut game: Game = Game::new();
    let mut current = if human_first { HUMAN } else { COMPUTER };
    let mut stdin = io::stdin().lock();

    println!("=== CONNECT FOUR ===");
    println!("You ({HUMAN}) vs computer ({COMPUTER}), search depth {}", config.search.depth);
    println!("{}", game.board());

    loop {
        let column = if current == HUMAN {
            let Some(column) = prompt_human_move(game.board(), &mut stdin)? else {
                println!();
                println!("Bye.");
                return Ok(());
            };
            column
        } else {
            println!("Computer is calculating its move...");
            let result = search_best_move(&game, COMPUTER, &config.search);
            let Some(column) = result.column else {
                bail!("computer found no legal move");
            };
            println!("Computer chose column {column}");
            column
        };

        let outcome = game
            .play(column, current)
            .with_context(|| format!("{current} cannot play column {column}"))?;
        println!("{}", game.board());

        match outcome {
            MoveOutcome::Continue => current = current.opponent(),
            MoveOutcome::Won(HUMAN) => {
                println!("Congratulations, you won!");
                break;
            }
            MoveOutcome::Won(_) => {
                println!("Game over. The computer won!");
                break;
            }
            MoveOutcome::Draw => {
                println!("Game over: draw");
                break;
            }
        }
    }

    println!("Game finished after {} moves.", game.round());
    Ok(())
}
