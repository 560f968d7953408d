//! Move execution and the game state machine.
//!
//! A [`Game`] validates and applies one move at a time. Every call either
//! applies the move completely (relocation, transient piece state, king
//! tracker, annotation, turn flip) or rejects it and changes nothing.
//!
//! The game never decides on its own that it is over: after an accepted move
//! the caller runs [`Game::detect_status`] for the new side to move and, if
//! the result is terminal, calls [`Game::seal`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::allocation::{Allocation, legal_moves};
use crate::analyzer::{self, MateRule, is_check};
use crate::board::Board;
use crate::error::RulesError;
use crate::notation;
use crate::piece::PieceDescriptor;
use crate::types::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    InProgress,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::InProgress => "in_progress",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One accepted move as it was played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub mover: PieceDescriptor,
    pub captured: Option<PieceKind>,
    pub promoted: bool,
    pub annotation: String,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    status: GameStatus,
    history: Vec<MoveRecord>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard layout, White to move.
    pub fn new() -> Self {
        Self::from_board(Board::startpos())
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn annotations(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(|r| r.annotation.as_str())
    }

    /// Validates and plays `from`-`to` for the side to move.
    pub fn submit_move(&mut self, from: Square, to: Square) -> Result<MoveRecord, RulesError> {
        let mover = self
            .validate(from, to)
            .inspect_err(|err| debug!(%from, %to, %err, "move rejected"))?;

        let captured = self.board.relocate(from, to);
        let promoted = mover.kind == PieceKind::Pawn
            && self
                .board
                .piece_at(to)
                .is_some_and(|p| p.kind() != PieceKind::Pawn);
        self.board.toggle_turn();

        let check = is_check(self.board.side_to_move(), &self.board);
        let record = MoveRecord {
            mv: Move::new(from, to),
            mover,
            captured: captured.as_ref().map(|p| p.kind()),
            promoted,
            annotation: notation::annotate(mover, from, to, captured.is_some(), promoted, check),
        };
        debug!(annotation = %record.annotation, color = %mover.color, "move accepted");
        self.history.push(record.clone());
        Ok(record)
    }

    fn validate(&self, from: Square, to: Square) -> Result<PieceDescriptor, RulesError> {
        if self.status.is_terminal() {
            return Err(RulesError::GameOver(self.status));
        }
        let piece = self
            .board
            .piece_at(from)
            .ok_or(RulesError::EmptySquare(from))?;
        let expected = self.board.side_to_move();
        if piece.color() != expected {
            return Err(RulesError::WrongTurn {
                square: from,
                expected,
            });
        }
        if !Allocation::new(piece).is_legal_destination(to, &self.board) {
            return Err(RulesError::IllegalMove { from, to });
        }
        Ok(piece.descriptor())
    }

    /// Legal destinations of whatever piece stands on `from`, regardless of
    /// whose turn it is.
    pub fn legal_destinations(&self, from: Square) -> Result<Vec<Square>, RulesError> {
        let piece = self
            .board
            .piece_at(from)
            .ok_or(RulesError::EmptySquare(from))?;
        Ok(Allocation::new(piece).destinations(&self.board))
    }

    /// All legal moves of the side to move; empty once the game is sealed.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        legal_moves(&self.board)
    }

    /// Evaluates the position for the side to move without changing anything.
    pub fn detect_status(&self, rule: MateRule) -> GameStatus {
        analyzer::detect_status(&self.board, rule)
    }

    /// Ends the game with a terminal status. Returns `false`, and leaves the
    /// game alone, for `InProgress` or when the game is already sealed.
    pub fn seal(&mut self, status: GameStatus) -> bool {
        if !status.is_terminal() || self.status.is_terminal() {
            return false;
        }
        debug!(%status, "game sealed");
        self.status = status;
        true
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
