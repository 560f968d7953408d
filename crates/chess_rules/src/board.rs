use crate::error::RulesError;
use crate::piece::Piece;
use crate::types::*;

/// Cached king squares, one per color.
///
/// Derived from the cells and kept in step by [`Board::place`] and
/// [`Board::take`], so check tests never scan the board for a king.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct KingTracker {
    squares: [Option<Square>; 2],
}

impl KingTracker {
    fn get(&self, c: Color) -> Option<Square> {
        self.squares[c.idx()]
    }
    fn set(&mut self, c: Color, sq: Option<Square>) {
        self.squares[c.idx()] = sq;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; 64],
    side_to_move: Color,
    kings: KingTracker,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// A board with no pieces. Useful for composing test positions.
    pub fn empty(side_to_move: Color) -> Self {
        Board {
            cells: std::array::from_fn(|_| None),
            side_to_move,
            kings: KingTracker::default(),
        }
    }

    pub fn startpos() -> Self {
        let mut b = Board::empty(Color::White);
        for color in [Color::White, Color::Black] {
            let back = color.back_rank() as usize;
            let pawns = color.pawn_start_rank() as usize;
            for (f, &kind) in BACK_RANK.iter().enumerate() {
                if let Some(sq) = Square::from_index(back * 8 + f) {
                    b.place(sq, Some(Piece::new(kind, color, sq)));
                }
                if let Some(sq) = Square::from_index(pawns * 8 + f) {
                    b.place(sq, Some(Piece::new(PieceKind::Pawn, color, sq)));
                }
            }
        }
        b
    }

    /// Builds a board from the placement, side-to-move and en-passant fields
    /// of a FEN string. Castling and clock fields are accepted and ignored.
    ///
    /// First-move flags are inferred: a pawn off its start rank, or a rook or
    /// king off its home square, counts as moved.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let invalid = |why: &str| RulesError::InvalidFen(format!("{why}: '{fen}'"));

        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(invalid("expected at least 2 fields"));
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(invalid("side to move must be 'w' or 'b'")),
        };
        let mut board = Board::empty(side_to_move);

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(invalid("expected 8 ranks"));
        }

        let mut king_counts = [0u8; 2];
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let kind =
                        PieceKind::from_letter(ch).ok_or_else(|| invalid("unknown piece letter"))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let sq = Square::checked(file, rank)
                        .ok_or_else(|| invalid("too many files in a rank"))?;
                    let mut piece = Piece::new(kind, color, sq);
                    piece.set_has_moved(!is_home_square(kind, color, sq));
                    if kind == PieceKind::King {
                        king_counts[color.idx()] += 1;
                    }
                    board.place(sq, Some(piece));
                    file += 1;
                }
                if file > 8 {
                    return Err(invalid("too many files in a rank"));
                }
            }
            if file != 8 {
                return Err(invalid("not enough files in a rank"));
            }
        }
        if king_counts != [1, 1] {
            return Err(invalid("each side needs exactly one king"));
        }

        if let Some(&ep) = parts.get(3)
            && ep != "-"
        {
            let target: Square = ep.parse().map_err(|_| invalid("bad en-passant square"))?;
            // The pawn that passed over `target` stands one step beyond it and
            // belongs to the side that just moved
            let mover = match target.rank() {
                2 => Color::White,
                5 => Color::Black,
                _ => return Err(invalid("en-passant square must be on rank 3 or 6")),
            };
            if side_to_move != mover.other() {
                return Err(invalid("en-passant square does not fit the side to move"));
            }
            let on_file = |rank: i8| {
                Square::checked(target.file() as i8, rank)
                    .ok_or_else(|| invalid("bad en-passant square"))
            };
            let pawn_sq = on_file(target.rank() as i8 + mover.forward())?;
            let start_sq = on_file(target.rank() as i8 - mover.forward())?;
            if board.piece_at(target).is_some() || board.piece_at(start_sq).is_some() {
                return Err(invalid("en-passant path is not empty"));
            }
            match board.cells[pawn_sq.index()].as_mut() {
                Some(p) if p.kind() == PieceKind::Pawn && p.color() == mover => {
                    p.set_double_stepped(true)
                }
                _ => return Err(invalid("no pawn behind the en-passant square")),
            }
        }

        Ok(board)
    }

    /// Placement, side to move and en-passant fields; castling is always `-`.
    pub fn fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match &self.cells[rank * 8 + file] {
                    Some(p) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        let c = p.kind().letter();
                        out.push(match p.color() {
                            Color::White => c,
                            Color::Black => c.to_ascii_lowercase(),
                        });
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out.push_str(match self.side_to_move {
            Color::White => " w - ",
            Color::Black => " b - ",
        });
        match self.en_passant_target() {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }
        out.push_str(" 0 1");
        out
    }

    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.cells[sq.index()].as_ref()
    }

    /// Raw-coordinate lookup for callers holding unvalidated input.
    pub fn piece_at_coords(&self, file: i8, rank: i8) -> Result<Option<&Piece>, RulesError> {
        Ok(self.piece_at(Square::new(file, rank)?))
    }

    /// Puts `piece` on `sq` (or clears it) and returns whatever was there.
    /// The piece is re-homed to `sq` and the king tracker follows.
    pub fn place(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        let previous = self.take(sq);
        if let Some(mut piece) = piece {
            piece.set_square(sq);
            if piece.kind() == PieceKind::King {
                self.kings.set(piece.color(), Some(sq));
            }
            self.cells[sq.index()] = Some(piece);
        }
        previous
    }

    pub fn place_at_coords(
        &mut self,
        file: i8,
        rank: i8,
        piece: Option<Piece>,
    ) -> Result<Option<Piece>, RulesError> {
        Ok(self.place(Square::new(file, rank)?, piece))
    }

    /// Removes and returns the piece on `sq`.
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.cells[sq.index()].take()?;
        if piece.kind() == PieceKind::King && self.kings.get(piece.color()) == Some(sq) {
            self.kings.set(piece.color(), None);
        }
        Some(piece)
    }

    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.kings.get(c)
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn toggle_turn(&mut self) {
        self.side_to_move = self.side_to_move.other();
    }

    /// Independent deep copy for probing hypothetical positions.
    pub fn snapshot(&self) -> Board {
        self.clone()
    }

    pub fn pieces(&self, c: Color) -> impl Iterator<Item = &Piece> {
        self.cells.iter().flatten().filter(move |p| p.color() == c)
    }

    /// The square a pawn passed over on the previous move, if any.
    pub fn en_passant_target(&self) -> Option<Square> {
        self.cells
            .iter()
            .flatten()
            .find(|p| p.just_double_stepped())
            .and_then(|p| p.square().offset(0, -p.color().forward()))
    }

    /// Moves the piece on `from` to `to` without any legality check and
    /// returns the captured piece.
    ///
    /// Handles the en-passant victim, clears every pawn's double-step flag,
    /// records the mover's first-move and double-step state and replaces a
    /// pawn reaching the last rank with a queen. Does not change the side to
    /// move. An empty `from` is a no-op.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let mut piece = self.take(from)?;
        let mut captured = self.take(to);

        // A pawn moving diagonally onto an empty square captures en passant
        if captured.is_none()
            && piece.kind() == PieceKind::Pawn
            && from.file() != to.file()
            && let Some(victim) = Square::checked(to.file() as i8, from.rank() as i8)
        {
            captured = self.take(victim);
        }

        for p in self.cells.iter_mut().flatten() {
            p.clear_double_step();
        }

        piece.record_move(to);
        if piece.kind() == PieceKind::Pawn && to.rank() == piece.color().other().back_rank() {
            piece = Piece::new(PieceKind::Queen, piece.color(), to);
        }
        self.place(to, Some(piece));
        captured
    }
}

fn is_home_square(kind: PieceKind, color: Color, sq: Square) -> bool {
    match kind {
        PieceKind::Pawn => sq.rank() == color.pawn_start_rank(),
        PieceKind::Rook => sq.rank() == color.back_rank() && (sq.file() == 0 || sq.file() == 7),
        PieceKind::King => sq.rank() == color.back_rank() && sq.file() == 4,
        _ => true,
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
