use crate::{allocation::legal_moves_into, board::Board, types::Move};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(board: &Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner(board: &Board, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        legal_moves_into(board, buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            let mut child = board.snapshot();
            child.relocate(mv.from, mv.to);
            child.toggle_turn();
            nodes += inner(&child, depth - 1, rest);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(board, depth, &mut layers[..])
}

/// Perft split by root move, handy when hunting a count mismatch.
pub fn perft_divide(board: &Board, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut roots = Vec::new();
    legal_moves_into(board, &mut roots);
    roots
        .into_iter()
        .map(|mv| {
            let mut child = board.snapshot();
            child.relocate(mv.from, mv.to);
            child.toggle_turn();
            (mv, perft(&child, depth - 1))
        })
        .collect()
}
