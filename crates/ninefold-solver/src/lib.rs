//! Human-style deduction engine for the ninefold Sudoku crates.
//!
//! The engine works on a [`TechniqueGrid`](technique::TechniqueGrid), a
//! candidate grid plus the bookkeeping the deduction loop needs. Solving
//! proceeds one step at a time: [`TechniqueSolver`] asks each technique of
//! its catalogue, in difficulty order, for an applicable pattern and applies
//! the first one found. A step is a single pattern instance, never a batch,
//! so the per-technique counts in [`TechniqueSolverStats`] are fine-grained
//! enough to rate a puzzle.
//!
//! The [`technique`] module holds the deduction patterns themselves, from
//! naked singles up to Swordfish, and [`backtrack`] provides the exhaustive
//! counterpart used to check solution uniqueness. Tests for new techniques
//! are written against the harness in [`testing`].
//!
//! # Examples
//!
//! ```
//! use ninefold_core::DigitGrid;
//! use ninefold_solver::{TechniqueGrid, TechniqueSolver};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let puzzle: DigitGrid = "\
//!     ...456789\
//!     ...789123\
//!     ...123456\
//!     234567891\
//!     567891234\
//!     891234567\
//!     345678912\
//!     678912345\
//!     912345678"
//!     .parse()?;
//!
//! let mut grid = TechniqueGrid::from(puzzle);
//! let solver = TechniqueSolver::with_all_techniques();
//! let (solved, _stats) = solver.solve(&mut grid)?;
//! assert!(solved);
//! # Ok(())
//! # }
//! ```

pub mod backtrack;
mod error;
pub mod technique;
mod technique_grid;
mod technique_solver;
mod technique_step;
pub mod testing;

pub use self::{
    error::SolverError,
    technique_grid::TechniqueGrid,
    technique_solver::{TechniqueSolver, TechniqueSolverStats},
    technique_step::{
        BoxedTechniqueStep, ConditionCells, TechniqueApplication, TechniqueStep, TechniqueStepData,
    },
};
