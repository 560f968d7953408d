//! Short human-readable move annotations for the game log.
//!
//! This is a display format only: no disambiguation and no parser.

use crate::piece::PieceDescriptor;
use crate::types::{PieceKind, Square};

pub fn annotate(
    mover: PieceDescriptor,
    from: Square,
    to: Square,
    capture: bool,
    promoted: bool,
    check: bool,
) -> String {
    let mut s = String::with_capacity(8);
    match mover.kind {
        PieceKind::Pawn => {
            if capture {
                s.push((b'a' + from.file()) as char);
            }
        }
        kind => s.push(kind.letter()),
    }
    if capture {
        s.push('x');
    }
    s.push_str(&to.to_string());
    if promoted {
        s.push_str("=Q");
    }
    if check {
        s.push('+');
    }
    s
}

/// Joins annotations into numbered move pairs: `1. e4 e5 2. Nf3`.
pub fn move_list<'a>(annotations: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for (ply, note) in annotations.into_iter().enumerate() {
        if ply > 0 {
            out.push(' ');
        }
        if ply % 2 == 0 {
            out.push_str(&format!("{}. ", ply / 2 + 1));
        }
        out.push_str(note);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_annotate_shapes() {
        let pawn = PieceDescriptor {
            color: Color::White,
            kind: PieceKind::Pawn,
        };
        let knight = PieceDescriptor {
            color: Color::Black,
            kind: PieceKind::Knight,
        };
        assert_eq!(annotate(pawn, sq("e2"), sq("e4"), false, false, false), "e4");
        assert_eq!(annotate(pawn, sq("e5"), sq("d6"), true, false, false), "exd6");
        assert_eq!(annotate(pawn, sq("a7"), sq("a8"), false, true, true), "a8=Q+");
        assert_eq!(annotate(knight, sq("g8"), sq("f6"), false, false, false), "Nf6");
        assert_eq!(annotate(knight, sq("f6"), sq("e4"), true, false, true), "Nxe4+");
    }

    #[test]
    fn test_move_list_numbering() {
        assert_eq!(move_list(Vec::<&str>::new()), "");
        assert_eq!(move_list(["e4"]), "1. e4");
        assert_eq!(move_list(["e4", "e5", "Nf3"]), "1. e4 e5 2. Nf3");
    }
}
