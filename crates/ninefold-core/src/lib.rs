//! Core board types for the ninefold Sudoku engine.
//!
//! This crate holds the representations shared by the solver, generator, and
//! game layers:
//!
//! - [`Digit`] and [`Position`] are the type-safe scalars of the board.
//! - [`DigitGrid`] is a plain 9×9 grid of decided digits.
//! - [`CandidateGrid`] tracks, per digit, the positions where it remains
//!   possible, and checks the Sudoku consistency rules.
//! - [`DigitSet`], [`DigitPositions`], and [`HouseMask`] are bitset views of
//!   digits, board positions, and house cells.
//!
//! The containers are generic over *index semantics* (see [`index`]), so a
//! set of digits and a mask over house cells stay distinct types even though
//! both pack into 9 bits.
//!
//! # Examples
//!
//! ```
//! use ninefold_core::{CandidateGrid, Digit, Position};
//!
//! let mut board = CandidateGrid::new();
//! board.place(Position::new(4, 4), Digit::D5);
//!
//! // Placement propagates: 5 is gone from the rest of column 4.
//! assert!(!board.candidates_at(Position::new(4, 5)).contains(Digit::D5));
//! ```

pub use self::{
    candidate_grid::{CandidateGrid, ConsistencyError},
    digit::Digit,
    digit_grid::{DigitGrid, ParseDigitGridError},
    digit_positions::{DigitPositions, HouseMask},
    digit_set::DigitSet,
    house::House,
    position::Position,
};

pub mod containers;
pub mod index;

mod candidate_grid;
mod digit;
mod digit_grid;
mod digit_positions;
mod digit_set;
mod house;
mod position;
