//! Manager configuration

use chess_rules::MateRule;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ManagerError;

/// Manager configuration, usually read from a TOML file. Missing keys take
/// their defaults.
///
/// ```toml
/// max_active_games = 64
/// mate_rule = "any_reply"
/// log_filter = "game_manager=debug,info"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManagerConfig {
    /// `start_game` fails once this many games are active
    pub max_active_games: usize,
    /// Which checkmate test ends a game
    pub mate_rule: MateRule,
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            max_active_games: 1024,
            mate_rule: MateRule::KingMobility,
            log_filter: "info".to_string(),
        }
    }
}

impl ManagerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ManagerError> {
        Ok(toml::from_str(s)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ManagerError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
