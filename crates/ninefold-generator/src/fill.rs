//! Randomized construction of complete solutions.

use ninefold_core::{CandidateGrid, Digit, DigitGrid, Position};
use rand::seq::SliceRandom as _;
use rand_pcg::Pcg64;

/// Builds a complete random solution by backtracking over the cells in
/// row-major order, trying each cell's candidates in a shuffled order.
///
/// The shuffle is the only source of puzzle diversity, so distinct RNG
/// streams yield decorrelated solutions. A blank grid always admits a
/// solution; `None` is only possible in theory and makes the caller retry.
pub(crate) fn random_solution(rng: &mut Pcg64) -> Option<DigitGrid> {
    let solved = fill_from(&CandidateGrid::new(), 0, rng)?;
    Some(solved.to_digit_grid())
}

fn fill_from(grid: &CandidateGrid, cell: usize, rng: &mut Pcg64) -> Option<CandidateGrid> {
    let Some(&pos) = Position::ALL.get(cell) else {
        return Some(*grid);
    };

    let mut digits = [Digit::D1; 9];
    let mut len = 0;
    for digit in grid.candidates_at(pos) {
        digits[len] = digit;
        len += 1;
    }
    digits[..len].shuffle(rng);

    // A cell without candidates ends the branch: the loop body never runs.
    for &digit in &digits[..len] {
        let mut child = *grid;
        child.place(pos, digit);
        if let Some(solved) = fill_from(&child, cell + 1, rng) {
            return Some(solved);
        }
    }
    None
}
