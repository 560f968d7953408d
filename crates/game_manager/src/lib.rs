//! Game management for the chess rules engine
//!
//! This crate provides:
//! - A registry of active games keyed by an opaque handle
//! - Move submission with per-game single-writer locking
//! - Game records (players, times, move log, result) for archiving
//! - TOML configuration
//!
//! # Usage
//!
//! ```
//! use game_manager::{GameManager, ManagerConfig, MoveOutcome, PlayerId};
//!
//! let manager = GameManager::new(ManagerConfig::default());
//! let game = manager
//!     .start_game(PlayerId::from("alice"), PlayerId::from("bob"))
//!     .unwrap();
//! let outcome = manager.submit_move(game, (4, 1), (4, 3)).unwrap();
//! assert!(matches!(outcome, MoveOutcome::Accepted { .. }));
//! let record = manager.end_game(game).unwrap();
//! assert_eq!(record.notes, "1. e4");
//! ```

mod config;
mod error;
mod manager;
mod outcome;
mod record;

pub use config::*;
pub use error::*;
pub use manager::*;
pub use outcome::*;
pub use record::*;
