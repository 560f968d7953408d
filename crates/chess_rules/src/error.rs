use thiserror::Error;

use crate::game::GameStatus;
use crate::types::{Color, Square};

/// Every way a rules operation can refuse to act.
///
/// None of these are fatal: a rejected call leaves the board untouched and
/// the caller is free to try again.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    /// A coordinate fell outside `[0, 8)`.
    #[error("coordinates ({file}, {rank}) are outside the board")]
    OutOfBounds { file: i8, rank: i8 },

    /// Text that does not read as a square at all.
    #[error("'{0}' is not a square")]
    InvalidSquare(String),

    /// The origin square of a move holds no piece.
    #[error("no piece on {0}")]
    EmptySquare(Square),

    /// The piece on the origin square belongs to the side not on move.
    #[error("piece on {square} cannot move: it is {expected}'s turn")]
    WrongTurn { square: Square, expected: Color },

    /// The destination is not among the piece's legal destinations.
    #[error("illegal move {from}-{to}")]
    IllegalMove { from: Square, to: Square },

    /// The game already reached a terminal status.
    #[error("game is over ({0})")]
    GameOver(GameStatus),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}
