use ninefold_core::{Digit, DigitPositions, DigitSet, Position};

use crate::{
    BoxedTechniqueStep, ConditionCells, SolverError, TechniqueApplication, TechniqueGrid,
    TechniqueStep,
    technique::{BoxedTechnique, Technique, TechniqueKind},
};

/// A technique that recognizes cells reduced to a single candidate.
///
/// When a cell is left with only one possible digit (a "naked single"), that
/// digit is the cell's value and every peer in the same row, column, and box
/// loses it as a candidate. The technique reports every decided cell whose
/// placement has not been committed yet, even when the peers hold nothing
/// left to eliminate, so a solve step is still available for the last open
/// cell of a board.
///
/// # Examples
///
/// ```
/// use ninefold_solver::{
///     TechniqueGrid,
///     technique::{NakedSingle, Technique},
/// };
///
/// let mut grid = TechniqueGrid::new();
/// let technique = NakedSingle::new();
///
/// // Apply the technique
/// let changed = technique.apply(&mut grid)?;
/// # Ok::<(), ninefold_solver::SolverError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NakedSingle;

impl NakedSingle {
    /// Creates a new `NakedSingle` technique.
    #[must_use]
    pub const fn new() -> Self {
        NakedSingle
    }

    /// Builds a naked single step for a decided position.
    ///
    /// The step always carries the placement; candidate eliminations are
    /// included only for peers that still hold the digit. Returns `None` when
    /// the position has more than one candidate left.
    #[must_use]
    pub fn build_step(grid: &TechniqueGrid, pos: Position) -> Option<BoxedTechniqueStep> {
        let digit = grid.candidates_at(pos).as_single()?;
        let affected_positions = grid.digit_positions(digit) & pos.house_peers();
        Some(Box::new(NakedSingleStep::new(pos, digit, affected_positions)))
    }

    fn pending_cells(grid: &TechniqueGrid) -> DigitPositions {
        grid.decided_cells() & !grid.decided_propagated()
    }
}

#[derive(Debug, Clone)]
pub struct NakedSingleStep {
    position: Position,
    digit: Digit,
    affected_positions: DigitPositions,
}

impl NakedSingleStep {
    fn new(position: Position, digit: Digit, affected_positions: DigitPositions) -> Self {
        Self {
            position,
            digit,
            affected_positions,
        }
    }
}

impl TechniqueStep for NakedSingleStep {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::NakedSingle
    }

    fn clone_box(&self) -> BoxedTechniqueStep {
        Box::new(self.clone())
    }

    fn condition_cells(&self) -> ConditionCells {
        ConditionCells::from_elem(self.position)
    }

    fn secondary_cells(&self) -> DigitPositions {
        DigitPositions::EMPTY
    }

    fn application(&self) -> Vec<TechniqueApplication> {
        let mut app = vec![TechniqueApplication::Placement {
            position: self.position,
            digit: self.digit,
        }];
        if !self.affected_positions.is_empty() {
            app.push(TechniqueApplication::CandidateElimination {
                positions: self.affected_positions,
                digits: DigitSet::from_elem(self.digit),
            });
        }
        app
    }
}

impl Technique for NakedSingle {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::NakedSingle
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let Some(pos) = Self::pending_cells(grid).iter().next() else {
            return Ok(None);
        };
        Ok(Self::build_step(grid, pos))
    }

    fn find_step_at(
        &self,
        grid: &TechniqueGrid,
        target: Position,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        if !Self::pending_cells(grid).contains(target) {
            return Ok(None);
        }
        Ok(Self::build_step(grid, target))
    }

    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
        let mut changed = false;
        for pos in Self::pending_cells(grid) {
            let Some(digit) = grid.candidates_at(pos).as_single() else {
                continue;
            };
            grid.insert_decided_propagated(pos);
            grid.remove_candidates_with_mask(pos.house_peers(), DigitSet::from_elem(digit));
            changed = true;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use ninefold_core::{CandidateGrid, Digit, Position};

    use super::*;
    use crate::testing::TechniqueTester;

    /// Reduces a cell to a single candidate without touching its peers.
    fn make_single(grid: &mut CandidateGrid, pos: Position, digit: Digit) {
        for d in Digit::ALL {
            if d != digit {
                grid.remove_candidate(pos, d);
            }
        }
    }

    #[test]
    fn test_places_naked_single() {
        // When a cell has only one candidate, placing it removes that digit
        // from all cells in the same row, column, and box
        let mut grid = CandidateGrid::new();

        // Make (0, 0) have only D5 as candidate
        make_single(&mut grid, Position::new(0, 0), Digit::D5);

        TechniqueTester::new(grid)
            .apply_once(&NakedSingle::new())
            // D5 removed from same row
            .assert_removed_exact(Position::new(1, 0), [Digit::D5])
            // D5 removed from same column
            .assert_removed_exact(Position::new(0, 1), [Digit::D5])
            // D5 removed from same box
            .assert_removed_exact(Position::new(1, 1), [Digit::D5]);
    }

    #[test]
    fn test_places_multiple_naked_singles() {
        // Multiple naked singles in different regions are all placed
        let mut grid = CandidateGrid::new();

        // Create naked single at (0, 0) with D3
        make_single(&mut grid, Position::new(0, 0), Digit::D3);

        // Create naked single at (5, 5) with D7
        make_single(&mut grid, Position::new(5, 5), Digit::D7);

        TechniqueTester::new(grid)
            .apply_once(&NakedSingle::new())
            // D3 removed from a cell in same row as (0, 0)
            .assert_removed_exact(Position::new(1, 0), [Digit::D3])
            // D7 removed from a cell in same column as (5, 5)
            .assert_removed_exact(Position::new(5, 4), [Digit::D7]);
    }

    #[test]
    fn test_no_change_when_no_naked_singles() {
        // When no cells have a single candidate, nothing changes
        let grid = CandidateGrid::new();

        TechniqueTester::new(grid)
            .apply_once(&NakedSingle::new())
            .assert_no_change(Position::new(0, 0))
            .assert_no_change(Position::new(4, 4));
    }

    #[test]
    fn test_givens_are_not_rediscovered() {
        // A grid built from a puzzle marks its givens as propagated, so the
        // technique has nothing to do.
        let grid = TechniqueGrid::from_puzzle(
            &"5........ .1....... ......... ......... ......... \
              ......... ......... ......... ........."
                .parse()
                .unwrap(),
        );
        let step = NakedSingle::new().find_step(&grid).unwrap();
        assert!(step.is_none());
    }

    #[test]
    fn test_find_step_at_rejects_other_cells() {
        let mut grid = CandidateGrid::new();
        make_single(&mut grid, Position::new(0, 0), Digit::D5);
        let grid = TechniqueGrid::from(grid);

        let technique = NakedSingle::new();
        let step = technique
            .find_step_at(&grid, Position::new(0, 0))
            .unwrap()
            .expect("naked single at the target cell");
        assert!(step.condition_cells().contains(Position::new(0, 0)));

        let step = technique.find_step_at(&grid, Position::new(4, 4)).unwrap();
        assert!(step.is_none());
    }

    #[test]
    fn test_reports_placement_even_with_clean_peers() {
        // place() has already swept D5 out of the peers, so only the
        // placement itself is left to commit. The step must still be found,
        // or a board's last open cell would never get a solve step.
        let mut grid = CandidateGrid::new();
        grid.place(Position::new(0, 0), Digit::D5);
        let grid = TechniqueGrid::from(grid);

        let technique = NakedSingle::new();
        let step = technique
            .find_step(&grid)
            .unwrap()
            .expect("pending cell yields a step");
        assert_eq!(
            step.application(),
            [TechniqueApplication::Placement {
                position: Position::new(0, 0),
                digit: Digit::D5,
            }]
        );

        let step = technique
            .find_step_at(&grid, Position::new(0, 0))
            .unwrap()
            .expect("pending cell yields a targeted step");
        assert!(step.condition_cells().contains(Position::new(0, 0)));
    }

    #[test]
    fn test_real_puzzle() {
        // Test with an actual puzzle
        TechniqueTester::from_grid_str(
            "
            53_ _7_ ___
            6__ 195 ___
            _98 ___ _6_
            8__ _6_ __3
            4__ 8_3 __1
            7__ _2_ __6
            _6_ ___ 28_
            ___ 419 __5
            ___ _8_ _79
        ",
        )
        .apply_until_stuck(&NakedSingle::new())
        // (4, 4) starts as the lone naked single (only 5 fits); propagating it
        // decides (1, 4) as 2, which then propagates in turn.
        .assert_removed_includes(Position::new(1, 4), [Digit::D5])
        .assert_removed_includes(Position::new(1, 3), [Digit::D2]);
    }
}
