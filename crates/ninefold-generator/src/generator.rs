//! Puzzle generation with difficulty acceptance.

use ninefold_core::{DigitGrid, Position};
use ninefold_solver::{TechniqueSolver, backtrack};
use rand::seq::SliceRandom as _;
use rand_pcg::Pcg64;

use crate::{
    Difficulty, PuzzleSeed,
    fill::random_solution,
    rating::{PuzzleRating, rate_with_solver},
};

/// Number of rejected attempts after which the generator starts warning.
const RETRY_WARN_INTERVAL: u64 = 100;

/// A puzzle produced by [`PuzzleGenerator`].
///
/// The problem and its unique solution come from the same generation pass;
/// every given of `problem` equals the corresponding cell of `solution`. The
/// seed reproduces the puzzle through
/// [`generate_with_seed`](PuzzleGenerator::generate_with_seed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// The puzzle grid, with the removed cells left empty.
    pub problem: DigitGrid,
    /// The complete solution the puzzle was dug out of.
    pub solution: DigitGrid,
    /// The seed that produced this puzzle.
    pub seed: PuzzleSeed,
    /// How much deduction work the puzzle was rated at.
    pub rating: PuzzleRating,
}

/// Generates puzzles whose difficulty rating falls in a requested band.
///
/// Each attempt builds a random complete solution, digs cells out while the
/// puzzle keeps a unique solution, and rates the result by solving a scratch
/// copy with the technique catalogue. Attempts are repeated until one lands in
/// the difficulty's acceptance band, so generation always succeeds but takes an
/// unbounded number of tries; run it off any latency-sensitive path.
///
/// # Examples
///
/// ```no_run
/// use ninefold_generator::{Difficulty, PuzzleGenerator};
///
/// let generator = PuzzleGenerator::new();
/// let puzzle = generator.generate(Difficulty::Easy);
/// assert_eq!(puzzle.problem.count_filled(), 41);
/// ```
#[derive(Debug, Clone)]
pub struct PuzzleGenerator {
    solver: TechniqueSolver,
}

impl PuzzleGenerator {
    /// Creates a generator rating puzzles with the full technique catalogue.
    ///
    /// Rating always uses every technique, whatever difficulty is requested;
    /// the difficulty only decides the acceptance band and the removal target.
    #[must_use]
    pub fn new() -> Self {
        Self {
            solver: TechniqueSolver::with_all_techniques(),
        }
    }

    /// Generates a puzzle of the requested difficulty from a fresh random
    /// seed.
    ///
    /// The drawn seed is returned in the puzzle, so any generated puzzle can
    /// be reproduced later.
    #[must_use]
    pub fn generate(&self, difficulty: Difficulty) -> GeneratedPuzzle {
        self.generate_with_seed(difficulty, PuzzleSeed::from_entropy())
    }

    /// Generates a puzzle of the requested difficulty from a given seed.
    ///
    /// The same seed and difficulty always reproduce the same puzzle,
    /// including the attempts the acceptance loop rejected along the way.
    #[must_use]
    pub fn generate_with_seed(&self, difficulty: Difficulty, seed: PuzzleSeed) -> GeneratedPuzzle {
        for attempt in 0.. {
            let mut rng = seed.attempt_rng(attempt);
            if let Some(puzzle) = self.attempt(difficulty, seed, &mut rng) {
                return puzzle;
            }
            if attempt > 0 && attempt % RETRY_WARN_INTERVAL == 0 {
                log::warn!(
                    "still generating a {difficulty} puzzle after {attempt} rejected attempts; \
                     check the difficulty's rating band if this persists"
                );
            }
        }
        unreachable!("the attempt counter never runs out");
    }

    /// Runs one attempt: fill, dig, rate, check acceptance.
    fn attempt(
        &self,
        difficulty: Difficulty,
        seed: PuzzleSeed,
        rng: &mut Pcg64,
    ) -> Option<GeneratedPuzzle> {
        let solution = random_solution(rng)?;
        let problem = dig_cells(&solution, difficulty.removal_target(), rng);
        let rating = rate_with_solver(&self.solver, &problem);
        difficulty.accepts(rating).then(|| GeneratedPuzzle {
            problem,
            solution,
            seed,
            rating,
        })
    }
}

impl Default for PuzzleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes up to `target` cells from a solution, keeping the solution unique.
///
/// Cells are visited in a shuffled order; a removal that would let a second
/// solution in is undone. The loop stops at the target count or after every
/// cell has been tried.
fn dig_cells(solution: &DigitGrid, target: usize, rng: &mut Pcg64) -> DigitGrid {
    let mut puzzle = *solution;
    let mut order = Position::ALL;
    order.shuffle(rng);

    let mut removed = 0;
    for pos in order {
        if removed >= target {
            break;
        }
        let digit = puzzle.get(pos);
        puzzle.set(pos, None);
        if backtrack::has_unique_solution(&puzzle) {
            removed += 1;
        } else {
            puzzle.set(pos, digit);
        }
    }
    puzzle
}
