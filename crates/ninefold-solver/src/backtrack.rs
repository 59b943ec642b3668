//! Exhaustive solution counting via backtracking.
//!
//! The deduction techniques in [`technique`](crate::technique) only remove
//! candidates a player could justify; this module is the blunt counterpart.
//! [`count_solutions`] explores every assignment of the open cells, stopping
//! early once a requested number of solutions has been seen, and
//! [`has_unique_solution`] is the single-solution gate puzzle generation
//! relies on.

use ninefold_core::{CandidateGrid, DigitGrid, DigitSet, Position};
use tinyvec::ArrayVec;

/// Counts the solutions of a puzzle, stopping once `limit` are found.
///
/// The search is exhaustive up to the limit: digits are tried in ascending
/// order and every consistent branch is explored. Passing `limit = 2`
/// distinguishes the three interesting outcomes (no solution, a unique
/// solution, several solutions) without paying for a full count.
///
/// # Examples
///
/// ```
/// use ninefold_core::DigitGrid;
/// use ninefold_solver::backtrack;
///
/// let empty = DigitGrid::new();
/// assert_eq!(backtrack::count_solutions(&empty, 2), 2);
/// ```
#[must_use]
pub fn count_solutions(puzzle: &DigitGrid, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    let open_cells: ArrayVec<[u8; 81]> = Position::ALL
        .iter()
        .filter(|pos| puzzle.get(**pos).is_none())
        .map(|pos| pos.index())
        .collect();
    let candidates = CandidateGrid::from_digit_grid(puzzle);
    count_branches(&candidates, &open_cells, limit)
}

/// Returns `true` if the puzzle has exactly one solution.
///
/// # Examples
///
/// ```
/// use ninefold_core::DigitGrid;
/// use ninefold_solver::backtrack;
///
/// assert!(!backtrack::has_unique_solution(&DigitGrid::new()));
/// ```
#[must_use]
pub fn has_unique_solution(puzzle: &DigitGrid) -> bool {
    count_solutions(puzzle, 2) == 1
}

fn count_branches(grid: &CandidateGrid, open_cells: &[u8], limit: usize) -> usize {
    let mut grid = grid.clone();

    // Commit every cell that is down to one candidate before branching; each
    // commit prunes its peers and may force further cells. place() is
    // idempotent, so the loop settles once a pass changes nothing.
    loop {
        if grid.check_consistency().is_err() {
            return 0;
        }
        let mut forced = false;
        for &index in open_cells {
            let pos = Position::from_index(index);
            if let Some(digit) = grid.candidates_at(pos).as_single() {
                forced |= grid.place(pos, digit);
            }
        }
        if !forced {
            break;
        }
    }

    // Branch on the open cell with the fewest candidates left.
    let mut branch: Option<(Position, DigitSet)> = None;
    for &index in open_cells {
        let pos = Position::from_index(index);
        let digits = grid.candidates_at(pos);
        if digits.len() <= 1 {
            continue;
        }
        if branch.is_none_or(|(_, best)| digits.len() < best.len()) {
            branch = Some((pos, digits));
            if digits.len() == 2 {
                break;
            }
        }
    }
    let Some((pos, digits)) = branch else {
        // Every cell is decided and the grid is consistent.
        return 1;
    };

    let mut total = 0;
    for digit in digits {
        let mut child = grid.clone();
        child.place(pos, digit);
        total += count_branches(&child, open_cells, limit - total);
        if total >= limit {
            break;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use ninefold_core::Digit;

    use super::*;

    /// A complete grid holding the rectangle 1,2 / 2,1 at rows 0 and 3,
    /// columns 0 and 1.
    const COMPLETE: &str = "\
        123456789\
        456789123\
        789123456\
        214365897\
        365897214\
        897214365\
        531642978\
        678931542\
        942578631";

    fn complete_grid() -> DigitGrid {
        COMPLETE.parse().unwrap()
    }

    #[test]
    fn test_complete_grid_has_one_solution() {
        let grid = complete_grid();
        assert_eq!(count_solutions(&grid, 2), 1);
        assert!(has_unique_solution(&grid));
    }

    #[test]
    fn test_forced_puzzle_has_unique_solution() {
        let mut grid = complete_grid();
        // Blanking one whole box leaves every open cell pinned by its row
        // and column.
        for y in 0..3 {
            for x in 0..3 {
                grid.set(Position::new(x, y), None);
            }
        }
        assert_eq!(count_solutions(&grid, 2), 1);
        assert!(has_unique_solution(&grid));
    }

    #[test]
    fn test_swappable_rectangle_has_two_solutions() {
        let mut grid = complete_grid();
        // The four blanked cells hold 1,2 / 2,1 and can be filled either
        // way around.
        for pos in [
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(0, 3),
            Position::new(1, 3),
        ] {
            grid.set(pos, None);
        }
        assert_eq!(count_solutions(&grid, 3), 2);
        assert!(!has_unique_solution(&grid));
    }

    #[test]
    fn test_empty_grid_counts_up_to_limit() {
        let empty = DigitGrid::new();
        assert_eq!(count_solutions(&empty, 1), 1);
        assert_eq!(count_solutions(&empty, 2), 2);
        assert_eq!(count_solutions(&empty, 5), 5);
    }

    #[test]
    fn test_sparse_grid_reaches_the_limit() {
        // A nearly open grid has astronomically many solutions; the counter
        // must still stop at the limit promptly.
        let mut grid = DigitGrid::new();
        grid.set(Position::new(4, 4), Some(Digit::D7));
        assert_eq!(count_solutions(&grid, 3), 3);
    }

    #[test]
    fn test_contradictory_puzzle_has_no_solutions() {
        let mut grid = DigitGrid::new();
        grid.set(Position::new(0, 0), Some(Digit::D5));
        grid.set(Position::new(5, 0), Some(Digit::D5));
        assert_eq!(count_solutions(&grid, 2), 0);
        assert!(!has_unique_solution(&grid));
    }

    #[test]
    fn test_zero_limit_short_circuits() {
        assert_eq!(count_solutions(&DigitGrid::new(), 0), 0);
    }
}
