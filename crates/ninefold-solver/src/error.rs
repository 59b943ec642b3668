use derive_more::{Display, Error, From};
use ninefold_core::ConsistencyError;

/// Errors raised while searching for or applying deduction steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum SolverError {
    /// The grid violates a Sudoku consistency rule.
    ///
    /// Techniques report this either when asked to work on a grid that is
    /// already contradictory, or when a pattern they scan for turns out to
    /// prove a contradiction (for example three cells sharing the same two
    /// candidates in one house).
    #[display("inconsistency detected: {_0}")]
    Inconsistent(ConsistencyError),
}
