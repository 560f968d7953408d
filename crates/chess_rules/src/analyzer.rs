//! Check, mate, stalemate and pin analysis.
//!
//! All functions are pure: they read the board, probe snapshots, and never
//! mutate the live position. [`is_check`] only needs the pieces' capture
//! predicates; the mate and stalemate tests are the only ones that call into
//! the enumerator.

use serde::{Deserialize, Serialize};

use crate::allocation::Allocation;
use crate::board::Board;
use crate::game::GameStatus;
use crate::piece::Piece;
use crate::types::Color;

/// Which checkmate test decides that a game is over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MateRule {
    /// In check and the king itself has no legal move. Interposing or
    /// capturing with another piece is not considered.
    #[default]
    KingMobility,
    /// In check and no piece of the side has any legal move.
    AnyReply,
}

/// Any opposing piece can capture on `color`'s king square.
pub fn is_check(color: Color, board: &Board) -> bool {
    let Some(king_sq) = board.king_square(color) else {
        return false;
    };
    board
        .pieces(color.other())
        .any(|p| p.can_capture_at(king_sq, board))
}

/// In check, and the king has no escaping move.
pub fn is_checkmate(color: Color, board: &Board) -> bool {
    if !is_check(color, board) {
        return false;
    }
    match board.king_square(color).and_then(|sq| board.piece_at(sq)) {
        Some(king) => !Allocation::new(king).has_any_moves(board),
        None => false,
    }
}

/// In check, and no piece of `color` has a legal move (blocks and captures
/// of the checking piece included).
pub fn is_checkmate_full(color: Color, board: &Board) -> bool {
    is_check(color, board) && !side_has_moves(color, board)
}

/// Not in check, and no piece of `color` has a legal move.
pub fn is_stalemate(color: Color, board: &Board) -> bool {
    !is_check(color, board) && !side_has_moves(color, board)
}

/// Removing `piece` from the board would leave its own king in check.
pub fn is_pinned(piece: &Piece, board: &Board) -> bool {
    let mut probe = board.snapshot();
    probe.take(piece.square());
    is_check(piece.color(), &probe)
}

/// Status of the game from the point of view of the side to move.
pub fn detect_status(board: &Board, rule: MateRule) -> GameStatus {
    let color = board.side_to_move();
    let mated = match rule {
        MateRule::KingMobility => is_checkmate(color, board),
        MateRule::AnyReply => is_checkmate_full(color, board),
    };
    if mated {
        GameStatus::Checkmate
    } else if is_stalemate(color, board) {
        GameStatus::Stalemate
    } else {
        GameStatus::InProgress
    }
}

fn side_has_moves(color: Color, board: &Board) -> bool {
    board
        .pieces(color)
        .any(|p| Allocation::new(p).has_any_moves(board))
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod analyzer_tests;
