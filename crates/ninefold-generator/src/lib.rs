//! Difficulty-calibrated Sudoku puzzle generation.
//!
//! [`PuzzleGenerator`] builds puzzles in three stages: a randomized
//! backtracking fill produces a complete solution, a uniqueness-preserving dig
//! removes a difficulty-dependent number of cells, and the technique solver
//! from `ninefold-solver` rates the result by the weighted deduction steps a
//! full solve takes. A puzzle is only returned when its rating lands in the
//! requested [`Difficulty`]'s acceptance band, so the difficulty label and the
//! hint system share one measure of hardness.
//!
//! Generation is reproducible: every puzzle carries the [`PuzzleSeed`] that
//! produced it, and [`PuzzleGenerator::generate_with_seed`] replays one.
//!
//! # Examples
//!
//! ```no_run
//! use ninefold_generator::{Difficulty, PuzzleGenerator};
//!
//! let generator = PuzzleGenerator::new();
//! let puzzle = generator.generate(Difficulty::Medium);
//! println!("{}", puzzle.problem);
//! println!("rated {}", puzzle.rating.score());
//! ```

pub use self::{
    difficulty::{Difficulty, ParseDifficultyError},
    generator::{GeneratedPuzzle, PuzzleGenerator},
    rating::{PuzzleRating, UNSOLVED_SCORE, rate_puzzle},
    seed::{ParsePuzzleSeedError, PuzzleSeed},
};

mod difficulty;
mod fill;
mod generator;
mod rating;
mod seed;
