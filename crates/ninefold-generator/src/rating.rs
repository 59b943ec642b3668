//! Weight-based difficulty rating.

use ninefold_core::DigitGrid;
use ninefold_solver::{TechniqueGrid, TechniqueSolver, technique::TechniqueKind};

/// Sentinel score for puzzles the technique catalogue cannot finish.
///
/// The sentinel lies above every acceptance band, so an unfinishable puzzle
/// is never accepted at any difficulty.
pub const UNSOLVED_SCORE: usize = 9999;

/// How much deduction work solving a puzzle takes.
///
/// The score sums [`TechniqueKind::weight`] over every step of a full
/// technique-solver run; `elite_steps` counts the steps whose technique is
/// [elite](TechniqueKind::is_elite). The puzzle's givens contribute nothing,
/// since they enter the scratch grid already propagated; every originally
/// open cell costs at least a naked single's weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleRating {
    score: usize,
    elite_steps: usize,
}

impl PuzzleRating {
    pub(crate) const fn new(score: usize, elite_steps: usize) -> Self {
        Self { score, elite_steps }
    }

    pub(crate) const fn unsolved() -> Self {
        Self {
            score: UNSOLVED_SCORE,
            elite_steps: 0,
        }
    }

    /// Returns the summed step weights, or [`UNSOLVED_SCORE`].
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns how many elite technique steps the solve used.
    #[must_use]
    pub const fn elite_steps(&self) -> usize {
        self.elite_steps
    }

    /// Returns `true` if the technique catalogue could not finish the puzzle.
    #[must_use]
    pub const fn is_unsolved(&self) -> bool {
        self.score == UNSOLVED_SCORE
    }
}

/// Rates a puzzle by solving a scratch copy with the full technique catalogue.
///
/// A puzzle the catalogue cannot finish, or one whose contradictions surface
/// as a solver error, rates as [unsolved](PuzzleRating::is_unsolved).
///
/// # Examples
///
/// ```
/// use ninefold_core::DigitGrid;
/// use ninefold_generator::rate_puzzle;
///
/// let rating = rate_puzzle(&DigitGrid::new());
/// assert!(rating.is_unsolved());
/// ```
#[must_use]
pub fn rate_puzzle(puzzle: &DigitGrid) -> PuzzleRating {
    rate_with_solver(&TechniqueSolver::with_all_techniques(), puzzle)
}

pub(crate) fn rate_with_solver(solver: &TechniqueSolver, puzzle: &DigitGrid) -> PuzzleRating {
    let mut grid = TechniqueGrid::from_puzzle(puzzle);
    let Ok((solved, stats)) = solver.solve(&mut grid) else {
        return PuzzleRating::unsolved();
    };
    if !solved {
        return PuzzleRating::unsolved();
    }

    let mut score = 0;
    let mut elite_steps = 0;
    for kind in TechniqueKind::ALL {
        let count = stats.count(kind);
        score += count * kind.weight();
        if kind.is_elite() {
            elite_steps += count;
        }
    }
    PuzzleRating::new(score, elite_steps)
}
