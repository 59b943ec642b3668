use ninefold_core::{
    CandidateGrid, ConsistencyError, Digit, DigitGrid, DigitPositions, DigitSet, House, HouseMask,
    Position,
};

use crate::{TechniqueApplication, TechniqueStep};

/// Solver state for technique-based solving.
///
/// This type wraps a [`CandidateGrid`] and exposes the surface techniques use
/// to query and mutate candidates, together with solver bookkeeping that does
/// not belong in the core grid. The main piece of bookkeeping is
/// `decided_propagated`: the set of decided cells whose digit has already been
/// eliminated from their peers. Givens are marked as propagated on
/// construction, so re-deriving them never counts as a deduction.
///
/// # Examples
///
/// ```
/// use ninefold_core::{Digit, DigitGrid, Position};
/// use ninefold_solver::TechniqueGrid;
///
/// let puzzle: DigitGrid = "5........ .1....... ......... ......... ......... \
///                          ......... ......... ......... ........."
///     .parse()
///     .unwrap();
/// let grid = TechniqueGrid::from_puzzle(&puzzle);
///
/// // The given has been propagated: 5 is no longer a candidate in its row.
/// assert!(!grid.candidates_at(Position::new(8, 0)).contains(Digit::D5));
/// ```
#[derive(Debug, Clone)]
pub struct TechniqueGrid {
    /// Underlying candidate state.
    candidates: CandidateGrid,
    /// Decided cells that have already had their peer eliminations applied.
    decided_propagated: DigitPositions,
}

impl From<DigitGrid> for TechniqueGrid {
    fn from(grid: DigitGrid) -> Self {
        Self::from_puzzle(&grid)
    }
}

impl From<CandidateGrid> for TechniqueGrid {
    fn from(candidates: CandidateGrid) -> Self {
        Self {
            candidates,
            decided_propagated: DigitPositions::EMPTY,
        }
    }
}

impl Default for TechniqueGrid {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TechniqueGrid {
    /// Creates an empty technique grid with all candidates available.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from(CandidateGrid::new())
    }

    /// Builds a technique grid from a puzzle, marking every given as already
    /// propagated.
    ///
    /// [`CandidateGrid::from_digit_grid`] eliminates the peers of each given
    /// while placing it, so treating the givens as pending naked singles would
    /// only re-discover work that is already done.
    #[must_use]
    pub fn from_puzzle(grid: &DigitGrid) -> Self {
        let mut decided_propagated = DigitPositions::EMPTY;
        for pos in Position::ALL {
            if grid[pos].is_some() {
                decided_propagated.insert(pos);
            }
        }
        Self {
            candidates: CandidateGrid::from_digit_grid(grid),
            decided_propagated,
        }
    }

    /// Extracts the decided cells as a digit grid, leaving the rest empty.
    #[inline]
    #[must_use]
    pub fn to_digit_grid(&self) -> DigitGrid {
        self.candidates.to_digit_grid()
    }

    /// Places a digit at a position and strips it from all 20 peers.
    ///
    /// Returns `true` if any candidate changed.
    #[inline]
    pub fn place(&mut self, pos: Position, digit: Digit) -> bool {
        self.candidates.place(pos, digit)
    }

    /// Removes one candidate digit from a position.
    ///
    /// Returns `true` if the candidate was present.
    #[inline]
    pub fn remove_candidate(&mut self, pos: Position, digit: Digit) -> bool {
        self.candidates.remove_candidate(pos, digit)
    }

    /// Removes a set of candidate digits from every position in the mask.
    ///
    /// Returns `true` if any candidate was removed.
    #[inline]
    pub fn remove_candidates_with_mask(
        &mut self,
        positions: DigitPositions,
        digits: DigitSet,
    ) -> bool {
        self.candidates.remove_candidates_with_mask(positions, digits)
    }

    /// Commits every application of a step to the grid.
    ///
    /// Placements are marked as propagated, since [`place`](Self::place)
    /// eliminates the digit from all peers.
    ///
    /// Returns `true` if any candidate changed or a placement was newly
    /// committed. A placement on a cell whose peers are already clean moves
    /// no candidates but still counts as progress.
    pub fn apply_step(&mut self, step: &dyn TechniqueStep) -> bool {
        let mut changed = false;
        for application in step.application() {
            match application {
                TechniqueApplication::Placement { position, digit } => {
                    changed |= self.place(position, digit);
                    changed |= self.insert_decided_propagated(position);
                }
                TechniqueApplication::CandidateElimination { positions, digits } => {
                    changed |= self.remove_candidates_with_mask(positions, digits);
                }
            }
        }
        changed
    }

    /// Returns every position that still admits the digit.
    #[inline]
    #[must_use]
    pub fn digit_positions(&self, digit: Digit) -> DigitPositions {
        self.candidates.digit_positions(digit)
    }

    /// Returns the candidate digits left at a position.
    #[inline]
    #[must_use]
    pub fn candidates_at(&self, pos: Position) -> DigitSet {
        self.candidates.candidates_at(pos)
    }

    /// Returns which cells of a house still admit the digit.
    #[inline]
    #[must_use]
    pub fn house_mask(&self, house: House, digit: Digit) -> HouseMask {
        self.candidates.digit_positions(digit).house_mask(house)
    }

    /// Returns which cells of row `y` still admit the digit.
    #[inline]
    #[must_use]
    pub fn row_mask(&self, y: u8, digit: Digit) -> HouseMask {
        self.house_mask(House::Row { y }, digit)
    }

    /// Returns which cells of column `x` still admit the digit.
    #[inline]
    #[must_use]
    pub fn col_mask(&self, x: u8, digit: Digit) -> HouseMask {
        self.house_mask(House::Column { x }, digit)
    }

    /// Checks the candidate state for contradictions.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError`] if the grid contains contradictions.
    #[inline]
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        self.candidates.check_consistency()
    }

    /// Returns whether every cell is decided and the grid is consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError`] if the grid contains contradictions.
    #[inline]
    pub fn is_solved(&self) -> Result<bool, ConsistencyError> {
        self.candidates.is_solved()
    }

    /// Returns every position holding exactly one candidate.
    #[inline]
    #[must_use]
    pub fn decided_cells(&self) -> DigitPositions {
        self.candidates.decided_cells()
    }

    /// Buckets all positions by candidate count, as
    /// [`CandidateGrid::classify_cells`] does.
    #[inline]
    #[must_use]
    pub fn classify_cells<const N: usize>(&self) -> [DigitPositions; N] {
        self.candidates.classify_cells()
    }

    /// Returns the set of decided cells that have already been propagated.
    #[inline]
    #[must_use]
    pub fn decided_propagated(&self) -> DigitPositions {
        self.decided_propagated
    }

    /// Marks a decided cell as having its peer eliminations applied.
    ///
    /// Returns `true` if the cell was not marked before.
    #[inline]
    pub fn insert_decided_propagated(&mut self, pos: Position) -> bool {
        self.decided_propagated.insert(pos)
    }
}
