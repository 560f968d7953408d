//! Seeded random games checking the invariants that must hold after every
//! accepted or rejected move.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use chess_rules::{Board, Color, Game, MateRule, PieceKind, Square, is_check};

const GAMES: u64 = 12;
const MAX_PLIES: usize = 120;

fn scan_for_king(board: &Board, color: Color) -> Option<Square> {
    Square::all().find(|&sq| {
        board
            .piece_at(sq)
            .is_some_and(|p| p.kind() == PieceKind::King && p.color() == color)
    })
}

fn assert_invariants(game: &Game, accepted: usize) {
    let board = game.board();
    let expected = if accepted % 2 == 0 {
        Color::White
    } else {
        Color::Black
    };
    assert_eq!(game.side_to_move(), expected, "turn parity broken");

    for color in [Color::White, Color::Black] {
        assert_eq!(
            board.king_square(color),
            scan_for_king(board, color),
            "king tracker out of sync for {color}"
        );
    }

    for sq in Square::all() {
        if let Some(p) = board.piece_at(sq) {
            assert_eq!(p.square(), sq, "piece thinks it is elsewhere");
        }
    }

    // At most one pawn may be en-passant eligible, and only the last mover's
    let flagged: Vec<_> = Square::all()
        .filter_map(|sq| board.piece_at(sq))
        .filter(|p| p.just_double_stepped())
        .collect();
    assert!(flagged.len() <= 1);
    if let Some(p) = flagged.first() {
        assert_eq!(p.color(), game.side_to_move().other());
    }
}

fn play_random_game(seed: u64) -> usize {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new();
    let mut accepted = 0;

    for _ in 0..MAX_PLIES {
        assert_invariants(&game, accepted);

        let moves = game.legal_moves();
        let mover = game.side_to_move();
        for mv in &moves {
            let mut probe = game.board().snapshot();
            probe.relocate(mv.from, mv.to);
            assert!(!is_check(mover, &probe), "{mv} leaves {mover} in check");
        }

        // A random square pair that is not a legal move must be rejected
        // without touching anything
        let from = Square::from_index(rng.gen_range(0..64)).unwrap();
        let to = Square::from_index(rng.gen_range(0..64)).unwrap();
        if !moves.iter().any(|m| m.from == from && m.to == to) {
            let before = game.board().clone();
            assert!(game.submit_move(from, to).is_err());
            assert_eq!(game.board(), &before);
            assert_eq!(game.history().len(), accepted);
        }

        let Some(mv) = moves.choose(&mut rng).copied() else {
            break;
        };
        game.submit_move(mv.from, mv.to)
            .unwrap_or_else(|e| panic!("enumerated move {mv} rejected: {e}"));
        accepted += 1;

        let status = game.detect_status(MateRule::AnyReply);
        if game.seal(status) {
            assert_invariants(&game, accepted);
            assert!(game.legal_moves().is_empty());
            break;
        }
    }
    accepted
}

#[test]
fn random_games_keep_invariants() {
    let plies: Vec<usize> = (0..GAMES)
        .into_par_iter()
        .map(|seed| play_random_game(0x5eed_0000 + seed))
        .collect();
    assert!(plies.iter().all(|&n| n > 0));
}

#[test]
fn random_games_are_reproducible() {
    assert_eq!(play_random_game(42), play_random_game(42));
}
