//! Referee: drives the game manager from stdin, one command per line, and
//! answers each with a line of JSON on stdout. Logs go to stderr.

mod commands;

use anyhow::{Context, Result};
use game_manager::{GameManager, ManagerConfig};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::commands::{Reply, dispatch};

fn print_usage() {
    eprintln!("Usage: referee [--config <path>]");
    eprintln!();
    eprintln!("{}", commands::HELP);
}

fn parse_args(args: &[String]) -> Result<Option<PathBuf>> {
    let mut config = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = args.get(i + 1).context("--config needs a path")?;
                config = Some(PathBuf::from(path));
                i += 1;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
        i += 1;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_args(&args)? {
        Some(path) => ManagerConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ManagerConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!(
        max_active_games = config.max_active_games,
        mate_rule = ?config.mate_rule,
        "referee ready"
    );
    let manager = GameManager::new(config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        match dispatch(&manager, line.trim()) {
            Ok(None) => continue,
            Ok(Some(Reply::Quit)) => break,
            Ok(Some(Reply::Text(text))) => writeln!(stdout, "{text}")?,
            Ok(Some(Reply::Json(value))) => writeln!(stdout, "{value}")?,
            Err(err) => {
                error!("{err:#}");
                writeln!(stdout, "{}", serde_json::json!({ "error": format!("{err:#}") }))?;
            }
        }
        stdout.flush()?;
    }

    let leftover = manager.active_games().len();
    if leftover > 0 {
        info!(games = leftover, "exiting with unfinished games");
    }
    Ok(())
}
