//! Gameplay layer for the ninefold Sudoku crates.
//!
//! A [`Board`] pairs a generated puzzle with its solution and tracks
//! everything that happens during play: values the player enters, their
//! notes, and the candidate strikes hints have proven. [`find_hint`] asks the
//! deduction engine for the easiest applicable technique, capped at the tier
//! the board's [`Difficulty`] allows, and [`Board::apply_hint`] commits it.
//!
//! # Examples
//!
//! ```
//! use ninefold_core::DigitGrid;
//! use ninefold_game::{Board, Difficulty, find_hint};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let problem: DigitGrid = "\
//!     53..7....6..195....98....6.8...6...34..8.3..1\
//!     7...2...6.6....28....419..5....8..79"
//!     .parse()?;
//! let solution: DigitGrid = "\
//!     5346789126721953481983425678597614234268537917\
//!     13924856961537284287419635345286179"
//!     .parse()?;
//!
//! let mut board = Board::from_grids(&problem, &solution);
//! let hint = find_hint(&board, Difficulty::Easy, None).expect("puzzle has a next step");
//! board.apply_hint(&hint)?;
//! assert!(!board.is_solved());
//! # Ok(())
//! # }
//! ```

pub use ninefold_generator::{Difficulty, GeneratedPuzzle, PuzzleGenerator, PuzzleSeed};

pub use self::{
    board::{Board, Cell, GameError},
    hint::{Hint, HintMove, find_hint},
};

mod board;
mod hint;
