use super::*;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn board(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

fn piece<'a>(b: &'a Board, s: &str) -> &'a Piece {
    b.piece_at(sq(s)).expect("square should be occupied")
}

#[test]
fn test_rook_geometry() {
    let b = board("4k3/8/8/8/3R4/8/8/4K3 w - - 0 1");
    let rook = piece(&b, "d4");
    assert!(rook.can_move_to(sq("d8"), &b));
    assert!(rook.can_move_to(sq("d1"), &b));
    assert!(rook.can_move_to(sq("a4"), &b));
    assert!(rook.can_move_to(sq("h4"), &b));
    assert!(!rook.can_move_to(sq("e5"), &b));
    assert!(!rook.can_move_to(sq("d4"), &b), "self-move is never legal");
}

#[test]
fn test_rook_blocked_path() {
    let b = board("4k3/8/8/3p4/3R4/8/8/4K3 w - - 0 1");
    let rook = piece(&b, "d4");
    assert!(!rook.can_move_to(sq("d6"), &b), "path through d5 is blocked");
    assert!(!rook.can_move_to(sq("d5"), &b), "occupied square is not a quiet move");
    assert!(rook.can_capture_at(sq("d5"), &b));
    assert!(!rook.can_capture_at(sq("d6"), &b));
}

#[test]
fn test_no_capture_of_own_piece() {
    let b = board("4k3/8/8/3P4/3R4/8/8/4K3 w - - 0 1");
    let rook = piece(&b, "d4");
    assert!(!rook.can_capture_at(sq("d5"), &b));
    assert!(!rook.can_move_to(sq("d5"), &b));
}

#[test]
fn test_bishop_blocked_by_own_pawn() {
    let mut b = Board::startpos();
    assert!(!piece(&b, "c1").can_move_to(sq("e3"), &b));
    b.take(sq("d2"));
    assert!(piece(&b, "c1").can_move_to(sq("e3"), &b));
    assert!(piece(&b, "c1").can_move_to(sq("h6"), &b));
    assert!(!piece(&b, "c1").can_move_to(sq("c3"), &b));
}

#[test]
fn test_queen_is_rook_plus_bishop() {
    let b = board("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1");
    let queen = piece(&b, "d4");
    assert!(queen.can_move_to(sq("h8"), &b));
    assert!(queen.can_move_to(sq("a1"), &b));
    assert!(queen.can_move_to(sq("d8"), &b));
    assert!(queen.can_move_to(sq("a4"), &b));
    assert!(!queen.can_move_to(sq("e6"), &b));
    assert!(!queen.can_move_to(sq("b5"), &b));
}

#[test]
fn test_knight_jumps_over_pieces() {
    let b = Board::startpos();
    let knight = piece(&b, "b1");
    assert!(knight.can_move_to(sq("a3"), &b));
    assert!(knight.can_move_to(sq("c3"), &b));
    assert!(!knight.can_move_to(sq("d2"), &b));
    assert!(!knight.can_capture_at(sq("d2"), &b));
    assert!(!knight.can_move_to(sq("b3"), &b));
}

#[test]
fn test_king_adjacency() {
    let b = board("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    let king = piece(&b, "e1");
    for dest in ["d1", "d2", "e2", "f2", "f1"] {
        assert!(king.can_move_to(sq(dest), &b), "king should reach {dest}");
    }
    assert!(!king.can_move_to(sq("e3"), &b));
    assert!(!king.can_move_to(sq("g1"), &b));
}

#[test]
fn test_pawn_forward_moves() {
    let b = Board::startpos();
    let white = piece(&b, "e2");
    assert!(white.can_move_to(sq("e3"), &b));
    assert!(white.can_move_to(sq("e4"), &b));
    assert!(!white.can_move_to(sq("e5"), &b));
    assert!(!white.can_move_to(sq("d3"), &b));

    let black = piece(&b, "e7");
    assert!(black.can_move_to(sq("e6"), &b));
    assert!(black.can_move_to(sq("e5"), &b));
    assert!(!black.can_move_to(sq("e8"), &b));
}

#[test]
fn test_pawn_double_step_needs_both_squares_empty() {
    let b = board("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
    let pawn = piece(&b, "e2");
    assert!(!pawn.can_move_to(sq("e3"), &b));
    assert!(!pawn.can_move_to(sq("e4"), &b));
    assert!(!pawn.can_capture_at(sq("e3"), &b), "pawns never capture straight ahead");

    let b = board("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1");
    let pawn = piece(&b, "e2");
    assert!(pawn.can_move_to(sq("e3"), &b));
    assert!(!pawn.can_move_to(sq("e4"), &b));
}

#[test]
fn test_moved_pawn_single_steps_only() {
    let b = board("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1");
    let pawn = piece(&b, "e3");
    assert!(pawn.has_moved());
    assert!(pawn.can_move_to(sq("e4"), &b));
    assert!(!pawn.can_move_to(sq("e5"), &b));
}

#[test]
fn test_pawn_captures_diagonally_forward() {
    let b = board("4k3/8/8/8/8/3p1n2/4P3/4K3 w - - 0 1");
    let pawn = piece(&b, "e2");
    assert!(pawn.can_capture_at(sq("d3"), &b));
    assert!(pawn.can_capture_at(sq("f3"), &b));
    assert!(!pawn.can_move_to(sq("d3"), &b));

    let black = piece(&b, "d3");
    assert!(black.can_capture_at(sq("e2"), &b));
    assert!(!black.can_capture_at(sq("c2"), &b));
}

#[test]
fn test_en_passant_requires_double_step_flag() {
    let b = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
    let pawn = piece(&b, "e5");
    assert!(pawn.can_capture_at(sq("d6"), &b));
    assert!(!pawn.can_capture_at(sq("f6"), &b));
    assert!(!pawn.can_move_to(sq("d6"), &b));

    let b = board("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1");
    assert!(!piece(&b, "e5").can_capture_at(sq("d6"), &b));
}

#[test]
fn test_capture_geometry_matches_move_geometry_for_non_pawns() {
    let positions = [
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w - - 4 4",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w - - 0 1",
        "4k3/8/8/3p4/3R4/8/8/4K3 w - - 0 1",
    ];
    for fen in positions {
        let b = board(fen);
        for color in [Color::White, Color::Black] {
            for attacker in b.pieces(color).filter(|p| p.kind() != PieceKind::Pawn) {
                for target in b.pieces(color.other()) {
                    let dest = target.square();
                    let mut cleared = b.clone();
                    cleared.take(dest);
                    assert_eq!(
                        attacker.can_capture_at(dest, &b),
                        attacker.can_move_to(dest, &cleared),
                        "{:?} on {} against {} in {}",
                        attacker.kind(),
                        attacker.square(),
                        dest,
                        fen
                    );
                }
            }
        }
    }
}

#[test]
fn test_descriptor_hides_flags() {
    let b = Board::startpos();
    let d = piece(&b, "g8").descriptor();
    assert_eq!(d.color, Color::Black);
    assert_eq!(d.kind, PieceKind::Knight);
}
