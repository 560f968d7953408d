//! Piece capability model.
//!
//! Every piece answers two questions about a board: can it *move* to an empty
//! square, and can it *capture* on a square. For everything but the pawn the
//! capture geometry is the move geometry with the target square ignored, so
//! both predicates share [`Piece::sweeps_to`] and path blocking lives in one
//! place.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::{Color, PieceKind, Square};

/// A piece together with its current square and the transient state its
/// variant needs.
///
/// Not `Copy`: a piece lives in exactly one board cell and moving it
/// transfers ownership between cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Piece {
    Pawn {
        color: Color,
        square: Square,
        has_moved: bool,
        /// Set by a double step, cleared by the next move on the board.
        just_double_stepped: bool,
    },
    Rook {
        color: Color,
        square: Square,
        has_moved: bool,
    },
    Knight {
        color: Color,
        square: Square,
    },
    Bishop {
        color: Color,
        square: Square,
    },
    Queen {
        color: Color,
        square: Square,
    },
    King {
        color: Color,
        square: Square,
        has_moved: bool,
    },
}

/// What a client is allowed to see about a piece: no internal flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceDescriptor {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    /// A fresh, unmoved piece.
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Piece {
        match kind {
            PieceKind::Pawn => Piece::Pawn {
                color,
                square,
                has_moved: false,
                just_double_stepped: false,
            },
            PieceKind::Rook => Piece::Rook {
                color,
                square,
                has_moved: false,
            },
            PieceKind::Knight => Piece::Knight { color, square },
            PieceKind::Bishop => Piece::Bishop { color, square },
            PieceKind::Queen => Piece::Queen { color, square },
            PieceKind::King => Piece::King {
                color,
                square,
                has_moved: false,
            },
        }
    }

    pub fn color(&self) -> Color {
        match *self {
            Piece::Pawn { color, .. }
            | Piece::Rook { color, .. }
            | Piece::Knight { color, .. }
            | Piece::Bishop { color, .. }
            | Piece::Queen { color, .. }
            | Piece::King { color, .. } => color,
        }
    }

    pub fn square(&self) -> Square {
        match *self {
            Piece::Pawn { square, .. }
            | Piece::Rook { square, .. }
            | Piece::Knight { square, .. }
            | Piece::Bishop { square, .. }
            | Piece::Queen { square, .. }
            | Piece::King { square, .. } => square,
        }
    }

    pub fn kind(&self) -> PieceKind {
        match self {
            Piece::Pawn { .. } => PieceKind::Pawn,
            Piece::Rook { .. } => PieceKind::Rook,
            Piece::Knight { .. } => PieceKind::Knight,
            Piece::Bishop { .. } => PieceKind::Bishop,
            Piece::Queen { .. } => PieceKind::Queen,
            Piece::King { .. } => PieceKind::King,
        }
    }

    pub fn descriptor(&self) -> PieceDescriptor {
        PieceDescriptor {
            color: self.color(),
            kind: self.kind(),
        }
    }

    /// First-move flag. Only pawns, rooks and kings track it; the other
    /// variants always report `false`.
    pub fn has_moved(&self) -> bool {
        match *self {
            Piece::Pawn { has_moved, .. }
            | Piece::Rook { has_moved, .. }
            | Piece::King { has_moved, .. } => has_moved,
            _ => false,
        }
    }

    /// En-passant eligibility: this pawn advanced two squares on the
    /// previous move.
    pub fn just_double_stepped(&self) -> bool {
        matches!(
            self,
            Piece::Pawn {
                just_double_stepped: true,
                ..
            }
        )
    }

    pub(crate) fn set_square(&mut self, to: Square) {
        match self {
            Piece::Pawn { square, .. }
            | Piece::Rook { square, .. }
            | Piece::Knight { square, .. }
            | Piece::Bishop { square, .. }
            | Piece::Queen { square, .. }
            | Piece::King { square, .. } => *square = to,
        }
    }

    pub(crate) fn clear_double_step(&mut self) {
        if let Piece::Pawn {
            just_double_stepped,
            ..
        } = self
        {
            *just_double_stepped = false;
        }
    }

    pub(crate) fn set_has_moved(&mut self, moved: bool) {
        match self {
            Piece::Pawn { has_moved, .. }
            | Piece::Rook { has_moved, .. }
            | Piece::King { has_moved, .. } => *has_moved = moved,
            _ => {}
        }
    }

    pub(crate) fn set_double_stepped(&mut self, flag: bool) {
        if let Piece::Pawn {
            just_double_stepped,
            ..
        } = self
        {
            *just_double_stepped = flag;
        }
    }

    /// Updates the per-piece state for a move from the current square to
    /// `to`. The board is responsible for moving the piece between cells.
    pub(crate) fn record_move(&mut self, to: Square) {
        let (_, dr) = self.square().delta_to(to);
        self.set_has_moved(true);
        self.set_double_stepped(dr.abs() == 2);
        self.set_square(to);
    }

    /// Quiet move: `dest` must be empty and reachable.
    pub fn can_move_to(&self, dest: Square, board: &Board) -> bool {
        let from = self.square();
        if dest == from || board.piece_at(dest).is_some() {
            return false;
        }
        match *self {
            Piece::Pawn {
                color, has_moved, ..
            } => {
                let (df, dr) = from.delta_to(dest);
                if df != 0 {
                    return false;
                }
                let fwd = color.forward();
                if dr == fwd {
                    return true;
                }
                // Double step: first move only, both squares empty
                dr == 2 * fwd
                    && !has_moved
                    && from
                        .offset(0, fwd)
                        .is_some_and(|mid| board.piece_at(mid).is_none())
            }
            _ => self.sweeps_to(dest, board),
        }
    }

    /// Capture: an opposing piece sits on `dest` (or, for en passant, beside
    /// the pawn at `dest`'s file) and the attack geometry is legal.
    pub fn can_capture_at(&self, dest: Square, board: &Board) -> bool {
        let from = self.square();
        if dest == from {
            return false;
        }
        match board.piece_at(dest) {
            Some(target) if target.color() != self.color() => match *self {
                Piece::Pawn { color, .. } => {
                    let (df, dr) = from.delta_to(dest);
                    df.abs() == 1 && dr == color.forward()
                }
                _ => self.sweeps_to(dest, board),
            },
            Some(_) => false,
            None => self.can_capture_en_passant(dest, board),
        }
    }

    fn can_capture_en_passant(&self, dest: Square, board: &Board) -> bool {
        let Piece::Pawn { color, square, .. } = *self else {
            return false;
        };
        let (df, dr) = square.delta_to(dest);
        if df.abs() != 1 || dr != color.forward() {
            return false;
        }
        // The victim stands on our rank, on the file we land on
        Square::checked(dest.file() as i8, square.rank() as i8)
            .and_then(|sq| board.piece_at(sq))
            .is_some_and(|victim| {
                victim.kind() == PieceKind::Pawn
                    && victim.color() != color
                    && victim.just_double_stepped()
            })
    }

    /// Non-pawn geometry with path blocking; the occupancy of `dest` itself
    /// is not considered.
    fn sweeps_to(&self, dest: Square, board: &Board) -> bool {
        let from = self.square();
        let (df, dr) = from.delta_to(dest);
        if df == 0 && dr == 0 {
            return false;
        }
        let straight = df == 0 || dr == 0;
        let diagonal = df.abs() == dr.abs();
        match self {
            Piece::Rook { .. } => straight && path_clear(board, from, dest),
            Piece::Bishop { .. } => diagonal && path_clear(board, from, dest),
            Piece::Queen { .. } => (straight || diagonal) && path_clear(board, from, dest),
            Piece::Knight { .. } => matches!((df.abs(), dr.abs()), (1, 2) | (2, 1)),
            Piece::King { .. } => df.abs() <= 1 && dr.abs() <= 1,
            Piece::Pawn { .. } => false,
        }
    }
}

/// True when every square strictly between `from` and `to` is empty.
/// `from` and `to` must share a file, rank or diagonal.
fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (df, dr) = from.delta_to(to);
    let (sf, sr) = (df.signum(), dr.signum());
    let mut cur = from.offset(sf, sr);
    while let Some(sq) = cur {
        if sq == to {
            return true;
        }
        if board.piece_at(sq).is_some() {
            return false;
        }
        cur = sq.offset(sf, sr);
    }
    false
}

#[cfg(test)]
#[path = "piece_tests.rs"]
mod piece_tests;
