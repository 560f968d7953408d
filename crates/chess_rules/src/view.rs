use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::piece::PieceDescriptor;
use crate::types::{Color, Square};

/// Row-major 8x8 grid indexed `[rank][file]`, rank 0 first.
pub type Grid8x8<T> = [[T; 8]; 8];

/// Read-only snapshot for rendering: colors and kinds, no internal flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub squares: Grid8x8<Option<PieceDescriptor>>,
    pub side_to_move: Color,
}

impl BoardView {
    pub fn get(&self, sq: Square) -> Option<PieceDescriptor> {
        self.squares[sq.rank() as usize][sq.file() as usize]
    }
}

impl Board {
    pub fn view(&self) -> BoardView {
        let mut squares: Grid8x8<Option<PieceDescriptor>> = [[None; 8]; 8];
        for sq in Square::all() {
            squares[sq.rank() as usize][sq.file() as usize] =
                self.piece_at(sq).map(|p| p.descriptor());
        }
        BoardView {
            squares,
            side_to_move: self.side_to_move(),
        }
    }
}

/// Text diagram, rank 8 at the top; uppercase is White.
impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = match self.squares[rank][file] {
                    Some(d) => match d.color {
                        Color::White => d.kind.letter(),
                        Color::Black => d.kind.letter().to_ascii_lowercase(),
                    },
                    None => '.',
                };
                write!(f, "{c}")?;
                if file < 7 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
