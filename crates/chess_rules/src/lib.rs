//! Chess rules engine.
//!
//! Owns the board, decides which moves are legal, detects check, checkmate
//! and stalemate, and applies moves. Everything here is synchronous and
//! allocation-light; a single [`Game`] must be driven by one caller at a time.

pub mod allocation;
pub mod analyzer;
pub mod board;
pub mod error;
pub mod game;
pub mod notation;
pub mod perft;
pub mod piece;
pub mod types;
pub mod view;

pub use allocation::*;
pub use analyzer::*;
pub use board::*;
pub use error::RulesError;
pub use game::*;
pub use perft::{perft, perft_divide};
pub use piece::*;
pub use types::*;
pub use view::*;
