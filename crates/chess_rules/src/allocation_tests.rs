use super::*;
use crate::types::Color;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn board(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

fn dests(b: &Board, from: &str) -> Vec<Square> {
    let piece = b.piece_at(sq(from)).expect("square should be occupied");
    Allocation::new(piece).destinations(b)
}

fn squares(names: &[&str]) -> Vec<Square> {
    let mut v: Vec<Square> = names.iter().map(|s| sq(s)).collect();
    v.sort_by_key(|s| s.index());
    v
}

#[test]
fn test_startpos_destinations() {
    let b = Board::startpos();
    assert_eq!(dests(&b, "b1"), squares(&["a3", "c3"]));
    assert_eq!(dests(&b, "e2"), squares(&["e3", "e4"]));
    assert!(dests(&b, "a1").is_empty());
    assert!(dests(&b, "e1").is_empty());
    assert_eq!(legal_moves(&b).len(), 20);
}

#[test]
fn test_destinations_ignore_side_to_move() {
    let b = Board::startpos();
    assert_eq!(dests(&b, "g8"), squares(&["f6", "h6"]));
}

#[test]
fn test_pinned_knight_has_no_moves() {
    let b = board("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
    let knight = b.piece_at(sq("e2")).unwrap();
    assert!(Allocation::new(knight).destinations(&b).is_empty());
    assert!(!Allocation::new(knight).has_any_moves(&b));
}

#[test]
fn test_pinned_rook_slides_along_the_pin() {
    let b = board("4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1");
    assert_eq!(dests(&b, "e2"), squares(&["e3", "e4", "e5", "e6", "e7"]));
}

#[test]
fn test_king_cannot_step_into_attack() {
    let b = board("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1");
    assert_eq!(dests(&b, "e1"), squares(&["f1", "d2"]));
}

#[test]
fn test_only_check_evasions_are_legal() {
    let b = board("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
    let moves = legal_moves(&b);
    let targets: Vec<Square> = moves.iter().map(|m| m.to).collect();
    assert_eq!(moves.len(), 3, "{moves:?}");
    for t in ["d2", "e2", "f2"] {
        assert!(targets.contains(&sq(t)));
    }
}

#[test]
fn test_en_passant_is_a_legal_destination() {
    let b = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
    assert_eq!(dests(&b, "e5"), squares(&["d6", "e6"]));
}

#[test]
fn test_en_passant_exposing_king_is_illegal() {
    let b = board("8/8/8/KPp4r/8/8/8/4k3 w - c6 0 1");
    assert_eq!(dests(&b, "b5"), squares(&["b6"]));
}

#[test]
fn test_legal_moves_into_reuses_buffer() {
    let b = Board::startpos();
    let mut buf = vec![Move::new(sq("a1"), sq("a2")); 5];
    legal_moves_into(&b, &mut buf);
    assert_eq!(buf.len(), 20);
    assert!(buf.iter().all(|m| m.from.rank() <= 1));
}

#[test]
fn test_no_legal_move_leaves_own_king_in_check() {
    let positions = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w - - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1",
    ];
    for fen in positions {
        let b = board(fen);
        let mover = b.side_to_move();
        for mv in legal_moves(&b) {
            let mut probe = b.snapshot();
            probe.relocate(mv.from, mv.to);
            assert!(!is_check(mover, &probe), "{mv} leaves {mover} in check in {fen}");
        }
        assert!(
            legal_moves(&b)
                .iter()
                .all(|m| b.piece_at(m.from).map(|p| p.color()) == Some(mover))
        );
    }
}

#[test]
fn test_side_to_move_with_no_moves_yields_empty_list() {
    let b = board("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert_eq!(b.side_to_move(), Color::Black);
    assert!(legal_moves(&b).is_empty());
}
