//! Command parsing and dispatch for the referee loop

use anyhow::{Context, Result, anyhow, bail};
use chess_rules::Board;
use game_manager::{GameHandle, GameManager, PlayerId};
use serde_json::{Value, json};
use std::path::Path;

pub const HELP: &str = "\
commands:
  new <white> <black> [fen]   start a game, optionally from a FEN position
  move <game> <from> <to>     submit a move, squares like e2 e4
  moves <game> <square>       legal destinations of the piece on a square
  board <game>                board view and diagram
  status <game>               game status
  record <game>               current game record
  end <game> [path]           end a game, optionally saving its record
  games                       list active games
  help                        this text
  quit                        exit";

/// What the loop should do after a command
pub enum Reply {
    Json(Value),
    Text(String),
    Quit,
}

/// Squares are given as a file letter and a rank number. Anything off the
/// board still parses so the manager can report it as out of bounds.
pub fn parse_coords(s: &str) -> Result<(i8, i8)> {
    let mut chars = s.chars();
    let file = chars
        .next()
        .filter(|c| c.is_ascii_lowercase())
        .ok_or_else(|| anyhow!("bad square '{s}'"))?;
    let rank: i64 = chars
        .as_str()
        .parse()
        .with_context(|| format!("bad square '{s}'"))?;
    let rank = rank.saturating_sub(1).clamp(i8::MIN.into(), i8::MAX.into()) as i8;
    Ok(((file as u8 - b'a') as i8, rank))
}

fn parse_handle(s: Option<&&str>) -> Result<GameHandle> {
    let s = s.ok_or_else(|| anyhow!("missing game id"))?;
    s.parse().with_context(|| format!("bad game id '{s}'"))
}

pub fn dispatch(manager: &GameManager, line: &str) -> Result<Option<Reply>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(&command) = parts.first() else {
        return Ok(None);
    };

    let reply = match command {
        "new" => {
            let (Some(white), Some(black)) = (parts.get(1), parts.get(2)) else {
                bail!("usage: new <white> <black> [fen]");
            };
            let (white, black) = (PlayerId::from(*white), PlayerId::from(*black));
            let game = if parts.len() > 3 {
                let board = Board::from_fen(&parts[3..].join(" "))?;
                manager.start_game_at(white, black, board)?
            } else {
                manager.start_game(white, black)?
            };
            Reply::Json(json!({ "game": game }))
        }
        "move" => {
            let game = parse_handle(parts.get(1))?;
            let (Some(from), Some(to)) = (parts.get(2), parts.get(3)) else {
                bail!("usage: move <game> <from> <to>");
            };
            let outcome = manager.submit_move(game, parse_coords(from)?, parse_coords(to)?)?;
            Reply::Json(serde_json::to_value(outcome)?)
        }
        "moves" => {
            let game = parse_handle(parts.get(1))?;
            let from = parts.get(2).ok_or_else(|| anyhow!("missing square"))?;
            let dests: Vec<String> = manager
                .legal_destinations(game, parse_coords(from)?)?
                .into_iter()
                .map(|sq| sq.to_string())
                .collect();
            Reply::Json(json!({ "from": from, "destinations": dests }))
        }
        "board" => {
            let view = manager.board_view(parse_handle(parts.get(1))?)?;
            let diagram = view.to_string();
            Reply::Json(json!({ "view": view, "diagram": diagram }))
        }
        "status" => {
            let status = manager.status(parse_handle(parts.get(1))?)?;
            Reply::Json(json!({ "status": status }))
        }
        "record" => {
            let record = manager.record(parse_handle(parts.get(1))?)?;
            Reply::Json(serde_json::to_value(record)?)
        }
        "end" => {
            let record = manager.end_game(parse_handle(parts.get(1))?)?;
            if let Some(path) = parts.get(2) {
                record
                    .save(Path::new(path))
                    .with_context(|| format!("saving record to {path}"))?;
            }
            Reply::Json(serde_json::to_value(record)?)
        }
        "games" => Reply::Json(json!({ "games": manager.active_games() })),
        "help" => Reply::Text(HELP.to_string()),
        "quit" => Reply::Quit,
        other => bail!("unknown command '{other}', try 'help'"),
    };
    Ok(Some(reply))
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
