//! Perft timing for profiling the legality filter.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p chess_rules -- [depth] [fen]
//!
//! Without a FEN every built-in position is timed at `depth` (default 4).

use chess_rules::{Board, perft};
use std::env;
use std::time::{Duration, Instant};

/// Castling-free positions; castling is not part of the move set.
const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
    ),
    ("Position 3", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
    (
        "Position 6",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - -",
    ),
];

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    match args.get(2) {
        Some(fen) => run_single_position(fen, depth),
        None => run_all_positions(depth),
    }
}

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}

fn run_single_position(fen: &str, depth: u8) {
    let board = match Board::from_fen(fen) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    println!("Position: {fen}");
    println!("Depth: {depth}");
    println!();

    let start = Instant::now();
    let nodes = perft(&board, depth);
    let elapsed = start.elapsed();

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {:.0}", nps(nodes, elapsed));
}

fn run_all_positions(depth: u8) {
    println!("=== Perft Benchmark Suite ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, fen) in TEST_POSITIONS {
        let Ok(board) = Board::from_fen(fen) else {
            println!("{name:.<30} invalid FEN");
            continue;
        };

        print!("{name:.<30}");
        let start = Instant::now();
        let nodes = perft(&board, depth);
        let elapsed = start.elapsed();

        total_nodes += nodes;
        total_time += elapsed;
        println!(
            " {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            nps(nodes, elapsed)
        );
    }

    println!();
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
}
