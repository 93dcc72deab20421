//! Scratch Game Runner
//!
//! Usage:
//!   scratch-game --config config.json --betting-amount 100
//!   scratch-game -c config.yaml -b 100 --seed 42 --pretty
//!
//! The round result is printed to stdout as JSON; logs go to stderr
//! (`RUST_LOG=debug` for matching detail).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use scratch_engine::{GameConfig, ScratchGame};

#[derive(Parser, Debug)]
#[command(name = "scratch-game", about = "Play one scratch card round")]
struct Cli {
    /// Game configuration (YAML when the extension is .yaml/.yml, JSON otherwise)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Bet placed on the round
    #[arg(short, long, default_value_t = 0.0)]
    betting_amount: f64,

    /// Seed for a reproducible round
    #[arg(long)]
    seed: Option<u64>,

    /// Pretty-print the result
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let output = run(&cli)?;
    println!("{output}");
    Ok(())
}

fn run(cli: &Cli) -> Result<String> {
    let config = GameConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    info!(
        "Loaded {}x{} grid with {} symbols and {} win combinations",
        config.rows,
        config.columns,
        config.symbols.len(),
        config.win_combinations.len()
    );

    let mut game = match cli.seed {
        Some(seed) => ScratchGame::seeded(config, seed),
        None => ScratchGame::new(config),
    }
    .context("Invalid game configuration")?;

    let result = game
        .play(cli.betting_amount)
        .with_context(|| format!("Round failed for bet {}", cli.betting_amount))?;

    result
        .to_json(cli.pretty)
        .context("Failed to serialize round result")
}
