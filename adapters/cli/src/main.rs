#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Scavenger in the terminal.

mod config_file;
mod render;
mod session;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use scavenger_system_turns::TurnController;

use crate::{config_file::ConfigFile, session::TerminalSink};

/// Survive as many days as possible on a grid of walls, food, and enemies.
#[derive(Parser, Debug)]
#[command(name = "scavenger")]
#[command(version, about, long_about = None)]
struct Args {
    /// Run seed; overrides the configuration file. Random when absent.
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of playable columns.
    #[arg(long)]
    columns: Option<u32>,

    /// Number of playable rows.
    #[arg(long)]
    rows: Option<u32>,

    /// Plays the given w/a/s/d keys instead of reading standard input.
    #[arg(long)]
    script: Option<String>,
}

/// Entry point for the Scavenger command-line interface.
fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();

    let file = match &args.config {
        Some(path) => ConfigFile::from_path(path)?,
        None => ConfigFile::default(),
    };
    let mut config = file.game;
    if let Some(columns) = args.columns {
        config.board.columns = columns;
    }
    if let Some(rows) = args.rows {
        config.board.rows = rows;
    }
    let seed = args
        .seed
        .or(file.seed)
        .unwrap_or_else(rand::random::<u64>);
    info!("run seed {seed}");

    let mut controller = TurnController::new(config, seed, TerminalSink::default())
        .context("invalid game configuration")?;
    let mut stdout = io::stdout().lock();
    match args.script {
        Some(script) => session::run(&mut controller, script.as_bytes(), &mut stdout),
        None => session::run(&mut controller, io::stdin().lock(), &mut stdout),
    }
}
