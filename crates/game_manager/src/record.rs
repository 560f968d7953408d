//! Game records: who played, when, the move log and the result

use chess_rules::{Color, GameStatus};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use uuid::Uuid;

use crate::error::ManagerError;

/// Opaque identifier of an active game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameHandle(Uuid);

impl GameHandle {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for GameHandle {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for GameHandle {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for GameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity of a player as handed over by the matchmaking side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Archive entry for one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameHandle,
    pub start_time: DateTime<Utc>,
    /// Set when the game is sealed or ended
    pub end_time: Option<DateTime<Utc>>,
    pub white: PlayerId,
    pub black: PlayerId,
    /// Numbered move list, e.g. `1. e4 e5 2. Nf3`
    pub notes: String,
    pub status: GameStatus,
    /// Only set for checkmate
    pub winner: Option<Color>,
}

impl GameRecord {
    pub fn new(id: GameHandle, white: PlayerId, black: PlayerId) -> Self {
        Self {
            id,
            start_time: Utc::now(),
            end_time: None,
            white,
            black,
            notes: String::new(),
            status: GameStatus::InProgress,
            winner: None,
        }
    }

    /// Records a terminal status. `to_move` is the side that was on move
    /// when the status was detected; for checkmate the other side won.
    pub fn seal(&mut self, status: GameStatus, to_move: Color) {
        self.status = status;
        self.winner = match status {
            GameStatus::Checkmate => Some(to_move.other()),
            _ => None,
        };
        self.finish();
    }

    /// Stamps the end time unless it is already set.
    pub fn finish(&mut self) {
        self.end_time.get_or_insert_with(Utc::now);
    }

    pub fn player(&self, color: Color) -> &PlayerId {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        self.end_time.map(|end| end - self.start_time)
    }

    /// One-line result, e.g. `white (alice) wins by checkmate`
    pub fn summary(&self) -> String {
        match (self.status, self.winner) {
            (GameStatus::Checkmate, Some(color)) => {
                format!("{} ({}) wins by checkmate", color, self.player(color))
            }
            (GameStatus::Stalemate, _) => "draw by stalemate".to_string(),
            _ if self.end_time.is_some() => "abandoned".to_string(),
            _ => "in progress".to_string(),
        }
    }

    /// Save record to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), ManagerError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load record from a JSON file
    pub fn load(path: &Path) -> Result<Self, ManagerError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod record_tests;
