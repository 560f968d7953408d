use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
    /// Rank step of a pawn of this color.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
    pub fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }
    pub fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Uppercase letter used in annotations and FEN (`P` for pawns).
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A square on the 8x8 grid.
///
/// The fields are private so that every `Square` in existence is in bounds:
/// raw coordinates go through [`Square::new`], which rejects anything outside
/// `[0, 8)` instead of clamping it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSquare", into = "RawSquare")]
pub struct Square {
    file: u8,
    rank: u8,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct RawSquare {
    file: i8,
    rank: i8,
}

impl TryFrom<RawSquare> for Square {
    type Error = RulesError;

    fn try_from(raw: RawSquare) -> Result<Self, Self::Error> {
        Square::new(raw.file, raw.rank)
    }
}

impl From<Square> for RawSquare {
    fn from(sq: Square) -> Self {
        RawSquare {
            file: sq.file as i8,
            rank: sq.rank as i8,
        }
    }
}

impl Square {
    pub fn new(file: i8, rank: i8) -> Result<Square, RulesError> {
        Square::checked(file, rank).ok_or(RulesError::OutOfBounds { file, rank })
    }

    /// Like [`Square::new`] but for geometry code that only needs to know
    /// whether the target exists.
    pub fn checked(file: i8, rank: i8) -> Option<Square> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    pub fn from_index(idx: usize) -> Option<Square> {
        if idx < 64 {
            Some(Square {
                file: (idx % 8) as u8,
                rank: (idx / 8) as u8,
            })
        } else {
            None
        }
    }

    pub fn file(self) -> u8 {
        self.file
    }
    pub fn rank(self) -> u8 {
        self.rank
    }
    pub fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Square> {
        Square::checked(self.file as i8 + d_file, self.rank as i8 + d_rank)
    }

    /// Signed (file, rank) distance from `self` to `other`.
    pub fn delta_to(self, other: Square) -> (i8, i8) {
        (
            other.file as i8 - self.file as i8,
            other.rank as i8 - self.rank as i8,
        )
    }

    /// All 64 squares, a1 first, h8 last.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file) as char;
        let rank = (b'1' + self.rank) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = RulesError;

    /// Parses algebraic coordinates such as `e4`. Text that is not a file
    /// letter followed by a rank digit is [`RulesError::InvalidSquare`]; a
    /// well-formed square off the board, like `i1`, is `OutOfBounds`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let &[file, rank] = s.as_bytes() else {
            return Err(RulesError::InvalidSquare(s.to_string()));
        };
        if !file.is_ascii_lowercase() || !rank.is_ascii_digit() {
            return Err(RulesError::InvalidSquare(s.to_string()));
        }
        Square::new((file - b'a') as i8, rank as i8 - b'1' as i8)
    }
}

/// A (from, to) pair. Carries no flags: en passant and promotion are implied
/// by the board the move is played on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
