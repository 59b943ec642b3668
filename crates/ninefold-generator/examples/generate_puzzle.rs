//! Example demonstrating difficulty-calibrated puzzle generation.
//!
//! This example shows how to:
//! - Create a `PuzzleGenerator` and generate puzzles at a difficulty
//! - Replay a puzzle from its 64-hex-digit seed
//! - Generate a batch of puzzles in parallel
//! - Display puzzles, solutions, seeds, and rating scores
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_puzzle
//! ```
//!
//! Pick a difficulty (easy, medium, hard, or professional):
//!
//! ```sh
//! cargo run --example generate_puzzle -- --difficulty hard
//! ```
//!
//! Replay a specific puzzle from its seed:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --seed c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1
//! ```
//!
//! Generate several puzzles at once, in parallel:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --count 8 --difficulty medium
//! ```

use std::process;

use clap::Parser;
use ninefold_generator::{Difficulty, GeneratedPuzzle, PuzzleGenerator, PuzzleSeed};
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Difficulty to generate at.
    #[arg(long, value_name = "DIFFICULTY", default_value = "easy")]
    difficulty: Difficulty,

    /// Seed to replay, as 64 hex digits. Only valid with --count 1.
    #[arg(long, value_name = "SEED")]
    seed: Option<PuzzleSeed>,

    /// Number of puzzles to generate.
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    count: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.count == 0 {
        eprintln!("--count must be at least 1.");
        process::exit(1);
    }
    if args.seed.is_some() && args.count != 1 {
        eprintln!("--seed replays a single puzzle; use it with --count 1.");
        process::exit(1);
    }

    let generator = PuzzleGenerator::new();

    if let Some(seed) = args.seed {
        let puzzle = generator.generate_with_seed(args.difficulty, seed);
        print_puzzle(&puzzle, args.difficulty);
        return;
    }

    let puzzles: Vec<GeneratedPuzzle> = (0..args.count)
        .into_par_iter()
        .map(|_| generator.generate(args.difficulty))
        .collect();

    for (i, puzzle) in puzzles.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_puzzle(puzzle, args.difficulty);
    }
}

fn print_puzzle(puzzle: &GeneratedPuzzle, difficulty: Difficulty) {
    println!("Seed:");
    println!("  {}", puzzle.seed);
    println!();

    println!("Difficulty:");
    println!("  {difficulty} (rated {})", puzzle.rating.score());
    println!();

    println!("Problem ({} givens):", puzzle.problem.count_filled());
    print_grid(&puzzle.problem.to_string());
    println!();

    println!("Solution:");
    print_grid(&puzzle.solution.to_string());
}

fn print_grid(grid: &str) {
    for line in grid.lines() {
        println!("  {line}");
    }
}
