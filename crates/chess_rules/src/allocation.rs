//! Legal-destination enumeration for a single piece.
//!
//! A destination is legal when the piece can move or capture there *and*
//! playing it on a snapshot leaves the mover's own king out of check. That
//! second filter is the only place pins are enforced.

use crate::analyzer::is_check;
use crate::board::Board;
use crate::piece::Piece;
use crate::types::{Move, Square};

/// Enumerates the legal destinations of one piece.
///
/// The piece must be the one standing on its own square of the board passed
/// to each method.
#[derive(Clone, Copy, Debug)]
pub struct Allocation<'a> {
    piece: &'a Piece,
}

impl<'a> Allocation<'a> {
    pub fn new(piece: &'a Piece) -> Self {
        Self { piece }
    }

    pub fn piece(&self) -> &'a Piece {
        self.piece
    }

    /// Geometry only: a quiet move or a capture is possible.
    fn reaches(&self, dest: Square, board: &Board) -> bool {
        self.piece.can_move_to(dest, board) || self.piece.can_capture_at(dest, board)
    }

    fn keeps_king_safe(&self, dest: Square, board: &Board) -> bool {
        let mut probe = board.snapshot();
        probe.relocate(self.piece.square(), dest);
        !is_check(self.piece.color(), &probe)
    }

    pub fn is_legal_destination(&self, dest: Square, board: &Board) -> bool {
        self.reaches(dest, board) && self.keeps_king_safe(dest, board)
    }

    pub fn destinations(&self, board: &Board) -> Vec<Square> {
        Square::all()
            .filter(|&dest| self.is_legal_destination(dest, board))
            .collect()
    }

    /// Stops at the first legal destination.
    pub fn has_any_moves(&self, board: &Board) -> bool {
        Square::all().any(|dest| self.is_legal_destination(dest, board))
    }
}

/// Generate all legal moves of the side to move, returning a freshly
/// allocated vector.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(board, &mut out);
    out
}

/// Generate all legal moves of the side to move into the provided buffer,
/// reusing it across calls.
pub fn legal_moves_into(board: &Board, out: &mut Vec<Move>) {
    out.clear();
    for piece in board.pieces(board.side_to_move()) {
        let from = piece.square();
        out.extend(
            Allocation::new(piece)
                .destinations(board)
                .into_iter()
                .map(|to| Move::new(from, to)),
        );
    }
}

#[cfg(test)]
#[path = "allocation_tests.rs"]
mod allocation_tests;
