use crate::{
    Digit, DigitGrid, DigitPositions, DigitSet, House, Position,
    containers::Array9,
    index::DigitSemantics,
};

/// Candidate bookkeeping for a board, stored as one position set per digit.
///
/// A digit is a *candidate* at a position while nothing rules it out. Placing
/// a digit reduces its cell to that single candidate and removes the digit
/// from every peer, so a freshly imported grid already reflects its givens.
///
/// # Examples
///
/// ```
/// use ninefold_core::{CandidateGrid, Digit, Position};
///
/// let mut grid = CandidateGrid::new();
/// grid.place(Position::new(0, 0), Digit::D5);
/// assert_eq!(grid.candidates_at(Position::new(0, 0)).as_single(), Some(Digit::D5));
/// assert!(!grid.candidates_at(Position::new(8, 0)).contains(Digit::D5));
/// assert!(grid.candidates_at(Position::new(8, 8)).contains(Digit::D5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateGrid {
    positions: Array9<DigitPositions, DigitSemantics>,
}

impl CandidateGrid {
    /// Creates a grid where every digit is a candidate at every position.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Array9::from_array([DigitPositions::FULL; 9]),
        }
    }

    /// Creates a grid from decided digits, propagating each given.
    #[must_use]
    pub fn from_digit_grid(grid: &DigitGrid) -> Self {
        let mut candidates = Self::new();
        for pos in Position::ALL {
            if let Some(digit) = grid.get(pos) {
                candidates.place(pos, digit);
            }
        }
        candidates
    }

    /// Returns every position where the digit is still a candidate.
    #[must_use]
    pub fn digit_positions(&self, digit: Digit) -> DigitPositions {
        self.positions[digit]
    }

    /// Returns the candidate digits at a position.
    #[must_use]
    pub fn candidates_at(&self, pos: Position) -> DigitSet {
        let mut set = DigitSet::EMPTY;
        for digit in Digit::ALL {
            if self.positions[digit].contains(pos) {
                set.insert(digit);
            }
        }
        set
    }

    /// Places a digit: the cell keeps only that candidate and every peer
    /// loses it. Returns `true` if any candidate changed.
    ///
    /// Placing a digit that is no longer a candidate at the position leaves
    /// the cell without candidates, which [`check_consistency`]
    /// (Self::check_consistency) reports.
    pub fn place(&mut self, pos: Position, digit: Digit) -> bool {
        let peers = pos.house_peers();
        let mut changed = false;
        for d in Digit::ALL {
            let board = &mut self.positions[d];
            if d == digit {
                let reduced = board.difference(peers);
                changed |= reduced != *board;
                *board = reduced;
            } else {
                changed |= board.remove(pos);
            }
        }
        changed
    }

    /// Removes a single candidate. Returns `true` if it was present.
    pub fn remove_candidate(&mut self, pos: Position, digit: Digit) -> bool {
        self.positions[digit].remove(pos)
    }

    /// Removes each digit in `digits` from every position in `positions`.
    /// Returns `true` if any candidate changed.
    pub fn remove_candidates_with_mask(
        &mut self,
        positions: DigitPositions,
        digits: DigitSet,
    ) -> bool {
        let mut changed = false;
        for digit in digits {
            let board = &mut self.positions[digit];
            let reduced = board.difference(positions);
            changed |= reduced != *board;
            *board = reduced;
        }
        changed
    }

    /// Returns every position holding exactly one candidate.
    #[must_use]
    pub fn decided_cells(&self) -> DigitPositions {
        let mut at_least_one = 0u128;
        let mut more_than_one = 0u128;
        for board in self.positions.iter() {
            more_than_one |= at_least_one & board.bits();
            at_least_one |= board.bits();
        }
        DigitPositions::from_bits(at_least_one & !more_than_one)
    }

    /// Classifies positions by candidate count: element `k` of the result
    /// holds the positions with exactly `k` candidates. Positions with `N` or
    /// more candidates appear nowhere.
    #[must_use]
    pub fn classify_cells<const N: usize>(&self) -> [DigitPositions; N] {
        let mut counts = [0u128; N];
        if N > 0 {
            counts[0] = DigitPositions::FULL.bits();
        }
        for board in self.positions.iter() {
            let bits = board.bits();
            // Each digit board moves its cells up one class.
            let mut promote = 0u128;
            for count in &mut counts {
                let up = *count & bits;
                *count = (*count & !bits) | promote;
                promote = up;
            }
        }
        counts.map(DigitPositions::from_bits)
    }

    /// Checks that every cell keeps a candidate and every digit remains
    /// placeable in every house.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, cells before houses.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        let mut covered = DigitPositions::EMPTY;
        for digit in Digit::ALL {
            covered |= self.positions[digit];
        }
        if let Some(pos) = (!covered).iter().next() {
            return Err(ConsistencyError::NoCandidates { pos });
        }
        for digit in Digit::ALL {
            for house in House::ALL {
                if (self.positions[digit] & house.positions()).is_empty() {
                    return Err(ConsistencyError::UnplaceableDigit { digit, house });
                }
            }
        }
        Ok(())
    }

    /// Returns `true` if every cell is decided.
    ///
    /// # Errors
    ///
    /// Fails if the grid is inconsistent.
    pub fn is_solved(&self) -> Result<bool, ConsistencyError> {
        self.check_consistency()?;
        Ok(self.decided_cells().len() == 81)
    }

    /// Extracts the decided cells into a [`DigitGrid`].
    #[must_use]
    pub fn to_digit_grid(&self) -> DigitGrid {
        let decided = self.decided_cells();
        let mut grid = DigitGrid::new();
        for digit in Digit::ALL {
            for pos in self.positions[digit] & decided {
                grid.set(pos, Some(digit));
            }
        }
        grid
    }
}

impl From<DigitGrid> for CandidateGrid {
    fn from(grid: DigitGrid) -> Self {
        Self::from_digit_grid(&grid)
    }
}

/// A violation of the Sudoku candidate invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConsistencyError {
    /// A cell has no remaining candidates.
    #[display("cell {pos} has no remaining candidates")]
    NoCandidates {
        /// The cell without candidates.
        pos: Position,
    },
    /// A digit cannot be placed anywhere in a house.
    #[display("digit {digit} cannot be placed anywhere in {house}")]
    UnplaceableDigit {
        /// The digit that became unplaceable.
        digit: Digit,
        /// The house without a slot for it.
        house: House,
    },
    /// A candidate pattern requires a digit to repeat within a house.
    #[display("candidate pattern violates the one-per-house rule")]
    CandidateConstraintViolation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_wide_open() {
        let grid = CandidateGrid::new();
        for pos in Position::ALL {
            assert_eq!(grid.candidates_at(pos), DigitSet::FULL);
        }
        assert_eq!(grid.check_consistency(), Ok(()));
        assert_eq!(grid.is_solved(), Ok(false));
        assert!(grid.decided_cells().is_empty());
    }

    #[test]
    fn test_place_propagates_to_peers() {
        let mut grid = CandidateGrid::new();
        assert!(grid.place(Position::new(4, 4), Digit::D7));

        assert_eq!(
            grid.candidates_at(Position::new(4, 4)).as_single(),
            Some(Digit::D7)
        );
        for pos in Position::new(4, 4).house_peers() {
            assert!(!grid.candidates_at(pos).contains(Digit::D7));
        }
        assert!(grid.candidates_at(Position::new(0, 0)).contains(Digit::D7));
        assert_eq!(grid.decided_cells().as_single(), Some(Position::new(4, 4)));
    }

    #[test]
    fn test_conflicting_placements_fail_consistency() {
        let mut grid = CandidateGrid::new();
        grid.place(Position::new(0, 0), Digit::D3);
        grid.place(Position::new(5, 0), Digit::D3);
        // Each placement strips 3 from the other's cell, so both end up with
        // no candidates; the check reports the lowest-index one.
        assert_eq!(
            grid.check_consistency(),
            Err(ConsistencyError::NoCandidates {
                pos: Position::new(0, 0)
            })
        );
    }

    #[test]
    fn test_unplaceable_digit() {
        let mut grid = CandidateGrid::new();
        for pos in DigitPositions::ROW_POSITIONS[0] {
            grid.remove_candidate(pos, Digit::D1);
        }
        assert_eq!(
            grid.check_consistency(),
            Err(ConsistencyError::UnplaceableDigit {
                digit: Digit::D1,
                house: House::Row { y: 0 },
            })
        );
    }

    #[test]
    fn test_from_digit_grid_reflects_givens() {
        let puzzle: DigitGrid =
            "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79"
                .parse()
                .unwrap();
        let grid = CandidateGrid::from_digit_grid(&puzzle);

        // The 30 givens are decided, plus four open cells that placement
        // propagation reduced to a single candidate.
        assert_eq!(grid.decided_cells().len(), 34);
        let digits = grid.to_digit_grid();
        assert_eq!(digits.count_filled(), 34);
        for pos in Position::ALL {
            if let Some(given) = puzzle.get(pos) {
                assert_eq!(digits.get(pos), Some(given), "given lost at {pos}");
            }
        }
        // (2, 0) sees 5, 3, 7 in its row, 8 in its column, and 6, 9 in its
        // box, leaving {1, 2, 4}.
        let candidates = grid.candidates_at(Position::new(2, 0));
        assert_eq!(
            candidates,
            DigitSet::from_iter([Digit::D1, Digit::D2, Digit::D4])
        );
    }

    #[test]
    fn test_solved_grid() {
        let solution: DigitGrid =
            "534678912672195348198342567859761423426853791713924856961537284287419635345286179"
                .parse()
                .unwrap();
        let grid = CandidateGrid::from_digit_grid(&solution);
        assert_eq!(grid.is_solved(), Ok(true));
        assert_eq!(grid.to_digit_grid(), solution);
    }

    #[test]
    fn test_remove_candidates_with_mask() {
        let mut grid = CandidateGrid::new();
        let row = DigitPositions::ROW_POSITIONS[2];
        let digits = DigitSet::from_iter([Digit::D4, Digit::D5]);
        assert!(grid.remove_candidates_with_mask(row, digits));
        assert!(!grid.remove_candidates_with_mask(row, digits));
        for pos in row {
            assert!(!grid.candidates_at(pos).contains(Digit::D4));
            assert!(!grid.candidates_at(pos).contains(Digit::D5));
            assert_eq!(grid.candidates_at(pos).len(), 7);
        }
    }

    #[test]
    fn test_classify_cells() {
        let mut grid = CandidateGrid::new();
        let pos = Position::new(1, 1);
        for digit in [Digit::D1, Digit::D2, Digit::D3, Digit::D4, Digit::D5] {
            grid.remove_candidate(pos, digit);
        }
        // pos now has 4 candidates, everything else 9.
        let classes = grid.classify_cells::<5>();
        assert!(classes[0].is_empty());
        assert!(classes[1].is_empty());
        assert!(classes[2].is_empty());
        assert!(classes[3].is_empty());
        assert_eq!(classes[4].as_single(), Some(pos));

        grid.place(Position::new(8, 8), Digit::D9);
        let classes = grid.classify_cells::<2>();
        assert!(classes[0].is_empty());
        assert_eq!(classes[1].as_single(), Some(Position::new(8, 8)));
    }
}
