use std::ops::ControlFlow;

use ninefold_core::{ConsistencyError, DigitPositions, DigitSet, House, Position};

use crate::{
    BoxedTechniqueStep, SolverError, TechniqueGrid, TechniqueStepData,
    technique::{BoxedTechnique, Technique, TechniqueKind},
};

/// A technique that removes candidates using a hidden pair within a house.
///
/// A "hidden pair" occurs when two digits are restricted to the same two
/// cells of a row, column, or box. Those two cells must hold those two
/// digits, so all other candidates can be removed from them.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenPair {}

impl HiddenPair {
    /// Creates a new `HiddenPair` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl HiddenPair {
    fn apply_with_control_flow<F>(
        grid: &mut TechniqueGrid,
        mut on_condition: F,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError>
    where
        F: for<'a> FnMut(
            &'a mut TechniqueGrid,
            [Position; 2],
            House,
        ) -> ControlFlow<BoxedTechniqueStep>,
    {
        for house in House::ALL {
            for (d1, remaining) in DigitSet::FULL.pivots_with_following() {
                let d1_mask = grid.house_mask(house, d1);
                let Some((i1, i2)) = d1_mask.as_double() else {
                    continue;
                };
                let mut matching = remaining
                    .into_iter()
                    .filter(|&d2| grid.house_mask(house, d2) == d1_mask);
                let Some(d2) = matching.next() else {
                    continue;
                };
                if matching.next().is_some() {
                    // Three or more digits restricted to two cells.
                    return Err(ConsistencyError::CandidateConstraintViolation.into());
                }

                let pos1 = house.position_from_cell_index(i1);
                let pos2 = house.position_from_cell_index(i2);
                let pair_positions = DigitPositions::from_iter([pos1, pos2]);
                let pair_digits = DigitSet::from_iter([d1, d2]);

                if grid.remove_candidates_with_mask(pair_positions, !pair_digits)
                    && let ControlFlow::Break(step) = on_condition(grid, [pos1, pos2], house)
                {
                    return Ok(Some(step));
                }
            }
        }
        Ok(None)
    }

    fn build_step(
        before: &TechniqueGrid,
        after: &TechniqueGrid,
        [pos1, pos2]: [Position; 2],
        house: House,
    ) -> BoxedTechniqueStep {
        let mut secondary_cells = house.positions();
        secondary_cells.remove(pos1);
        secondary_cells.remove(pos2);
        Box::new(TechniqueStepData::from_diff(
            TechniqueKind::HiddenPair,
            DigitPositions::from_iter([pos1, pos2]),
            secondary_cells,
            before,
            after,
        ))
    }
}

impl Technique for HiddenPair {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::HiddenPair
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut after_grid = grid.clone();
        let step = Self::apply_with_control_flow(&mut after_grid, |after_grid, pair, house| {
            ControlFlow::Break(Self::build_step(grid, after_grid, pair, house))
        })?;
        Ok(step)
    }

    fn find_step_at(
        &self,
        grid: &TechniqueGrid,
        target: Position,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut after_grid = grid.clone();
        let step = Self::apply_with_control_flow(&mut after_grid, |after_grid, pair, house| {
            if !pair.contains(&target) {
                *after_grid = grid.clone();
                return ControlFlow::Continue(());
            }
            ControlFlow::Break(Self::build_step(grid, after_grid, pair, house))
        })?;
        Ok(step)
    }

    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
        let mut changed = false;
        Self::apply_with_control_flow(grid, |_, _, _| {
            changed = true;
            ControlFlow::Continue(())
        })?;
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use ninefold_core::{CandidateGrid, Digit};

    use super::*;
    use crate::testing::TechniqueTester;

    fn confine_to_cells_in_row(
        grid: &mut CandidateGrid,
        digit: Digit,
        pos1: Position,
        pos2: Position,
    ) {
        for pos in Position::ROWS[usize::from(pos1.y())] {
            if pos != pos1 && pos != pos2 {
                grid.remove_candidate(pos, digit);
            }
        }
    }

    #[test]
    fn test_eliminates_other_candidates_in_pair_cells() {
        let mut grid = CandidateGrid::new();
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(4, 0);
        confine_to_cells_in_row(&mut grid, Digit::D1, pos1, pos2);
        confine_to_cells_in_row(&mut grid, Digit::D2, pos1, pos2);

        TechniqueTester::new(grid)
            .apply_once(&HiddenPair::new())
            .assert_removed_exact(
                pos1,
                [
                    Digit::D3,
                    Digit::D4,
                    Digit::D5,
                    Digit::D6,
                    Digit::D7,
                    Digit::D8,
                    Digit::D9,
                ],
            )
            .assert_removed_exact(
                pos2,
                [
                    Digit::D3,
                    Digit::D4,
                    Digit::D5,
                    Digit::D6,
                    Digit::D7,
                    Digit::D8,
                    Digit::D9,
                ],
            );
    }

    #[test]
    fn test_step_reports_house_remainder_as_secondary() {
        let mut grid = CandidateGrid::new();
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(4, 0);
        confine_to_cells_in_row(&mut grid, Digit::D1, pos1, pos2);
        confine_to_cells_in_row(&mut grid, Digit::D2, pos1, pos2);

        let grid = TechniqueGrid::from(grid);
        let step = HiddenPair::new()
            .find_step(&grid)
            .unwrap()
            .expect("hidden pair in row 0");
        assert!(step.condition_cells().contains(pos1));
        assert!(step.condition_cells().contains(pos2));
        assert_eq!(step.secondary_cells().len(), 7);
        assert!(!step.secondary_cells().contains(pos1));
        assert!(step.secondary_cells().contains(Position::new(1, 0)));
    }

    #[test]
    fn test_no_change_when_no_hidden_pairs() {
        let grid = CandidateGrid::new();

        TechniqueTester::new(grid)
            .apply_once(&HiddenPair::new())
            .assert_no_change(Position::new(0, 0))
            .assert_no_change(Position::new(8, 8));
    }

    #[test]
    fn test_no_change_when_pair_cells_have_no_extra_candidates() {
        let mut grid = CandidateGrid::new();
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(4, 0);
        confine_to_cells_in_row(&mut grid, Digit::D1, pos1, pos2);
        confine_to_cells_in_row(&mut grid, Digit::D2, pos1, pos2);
        for digit in Digit::ALL {
            if digit != Digit::D1 && digit != Digit::D2 {
                grid.remove_candidate(pos1, digit);
                grid.remove_candidate(pos2, digit);
            }
        }

        TechniqueTester::new(grid)
            .apply_once(&HiddenPair::new())
            .assert_no_change(pos1)
            .assert_no_change(pos2);
    }

    #[test]
    fn test_find_step_at_requires_pair_cells() {
        let mut grid = CandidateGrid::new();
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(4, 0);
        confine_to_cells_in_row(&mut grid, Digit::D1, pos1, pos2);
        confine_to_cells_in_row(&mut grid, Digit::D2, pos1, pos2);

        let grid = TechniqueGrid::from(grid);
        let technique = HiddenPair::new();
        assert!(technique.find_step_at(&grid, pos1).unwrap().is_some());
        assert!(
            technique
                .find_step_at(&grid, Position::new(1, 0))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_inconsistent_when_three_digits_share_two_cells() {
        let mut grid = CandidateGrid::new();
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(4, 0);
        confine_to_cells_in_row(&mut grid, Digit::D1, pos1, pos2);
        confine_to_cells_in_row(&mut grid, Digit::D2, pos1, pos2);
        confine_to_cells_in_row(&mut grid, Digit::D3, pos1, pos2);

        let mut grid = TechniqueGrid::from(grid);
        let result = HiddenPair::new().apply(&mut grid);
        assert!(matches!(
            result,
            Err(SolverError::Inconsistent(
                ConsistencyError::CandidateConstraintViolation
            ))
        ));
    }
}
