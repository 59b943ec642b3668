use std::ops::ControlFlow;

use ninefold_core::{ConsistencyError, DigitPositions, DigitSet, House, Position};

use crate::{
    BoxedTechniqueStep, SolverError, TechniqueGrid, TechniqueStepData,
    technique::{BoxedTechnique, Technique, TechniqueKind},
};

/// A technique that removes candidates using a hidden triple within a house.
///
/// A "hidden triple" occurs when three digits can only appear in the same
/// three cells of a row, column, or box. Other candidates in those three
/// cells can be removed.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenTriple {}

impl HiddenTriple {
    /// Creates a new `HiddenTriple` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl HiddenTriple {
    fn apply_with_control_flow<F>(
        grid: &mut TechniqueGrid,
        mut on_condition: F,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError>
    where
        F: for<'a> FnMut(
            &'a mut TechniqueGrid,
            DigitPositions,
            House,
        ) -> ControlFlow<BoxedTechniqueStep>,
    {
        for house in House::ALL {
            let house_positions = house.positions();
            for (d1, remaining_digits1) in DigitSet::FULL.pivots_with_following() {
                let d1_positions = grid.digit_positions(d1) & house_positions;
                if d1_positions.is_empty() || d1_positions.len() > 3 {
                    continue;
                }
                let digits1 = DigitSet::from_elem(d1);
                for (d2, remaining_digits2) in remaining_digits1.pivots_with_following() {
                    let d2_positions = grid.digit_positions(d2) & house_positions;
                    if d2_positions.is_empty() {
                        continue;
                    }
                    let pair_positions = d1_positions | d2_positions;
                    if pair_positions.len() > 3 {
                        continue;
                    }
                    let digits12 = digits1 | DigitSet::from_elem(d2);
                    for (d3, remaining_digits3) in remaining_digits2.pivots_with_following() {
                        let d3_positions = grid.digit_positions(d3) & house_positions;
                        if d3_positions.is_empty() {
                            continue;
                        }
                        let triple_positions = pair_positions | d3_positions;
                        if triple_positions.len() > 3 {
                            continue;
                        }
                        if triple_positions.len() < 3 {
                            return Err(ConsistencyError::CandidateConstraintViolation.into());
                        }

                        // Digits smaller than `d3` are checked in earlier
                        // combinations, so only the remaining digits need to
                        // be validated here.
                        for d in remaining_digits3 {
                            let other_positions = grid.digit_positions(d) & house_positions;
                            if !other_positions.is_empty()
                                && other_positions.is_subset(triple_positions)
                            {
                                return Err(ConsistencyError::CandidateConstraintViolation.into());
                            }
                        }

                        let digits123 = digits12 | DigitSet::from_elem(d3);
                        if grid.remove_candidates_with_mask(triple_positions, !digits123)
                            && let ControlFlow::Break(step) =
                                on_condition(grid, triple_positions, house)
                        {
                            return Ok(Some(step));
                        }
                    }
                }
            }
        }
        Ok(None)
    }

    fn build_step(
        before: &TechniqueGrid,
        after: &TechniqueGrid,
        triple_positions: DigitPositions,
        house: House,
    ) -> BoxedTechniqueStep {
        let secondary_cells = house.positions() & !triple_positions;
        Box::new(TechniqueStepData::from_diff(
            TechniqueKind::HiddenTriple,
            triple_positions,
            secondary_cells,
            before,
            after,
        ))
    }
}

impl Technique for HiddenTriple {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::HiddenTriple
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut after_grid = grid.clone();
        let step =
            Self::apply_with_control_flow(&mut after_grid, |after_grid, positions, house| {
                ControlFlow::Break(Self::build_step(grid, after_grid, positions, house))
            })?;
        Ok(step)
    }

    fn find_step_at(
        &self,
        grid: &TechniqueGrid,
        target: Position,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut after_grid = grid.clone();
        let step =
            Self::apply_with_control_flow(&mut after_grid, |after_grid, positions, house| {
                if !positions.contains(target) {
                    *after_grid = grid.clone();
                    return ControlFlow::Continue(());
                }
                ControlFlow::Break(Self::build_step(grid, after_grid, positions, house))
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

    fn confine_digits_to_cells(grid: &mut CandidateGrid, digits: &[Digit], cells: &[Position]) {
        for pos in Position::ROWS[usize::from(cells[0].y())] {
            if !cells.contains(&pos) {
                for &digit in digits {
                    grid.remove_candidate(pos, digit);
                }
            }
        }
    }

    #[test]
    fn test_eliminates_hidden_triple_candidates_in_row() {
        let mut grid = CandidateGrid::new();
        let cells = [Position::new(0, 0), Position::new(3, 0), Position::new(6, 0)];
        confine_digits_to_cells(&mut grid, &[Digit::D1, Digit::D2, Digit::D3], &cells);

        TechniqueTester::new(grid)
            .apply_once(&HiddenTriple::new())
            .assert_removed_includes(cells[0], [Digit::D4, Digit::D9])
            .assert_removed_includes(cells[1], [Digit::D4, Digit::D9])
            .assert_removed_includes(cells[2], [Digit::D4, Digit::D9]);
    }

    #[test]
    fn test_step_reports_triple_cells_as_condition() {
        let mut grid = CandidateGrid::new();
        let cells = [Position::new(0, 0), Position::new(3, 0), Position::new(6, 0)];
        confine_digits_to_cells(&mut grid, &[Digit::D1, Digit::D2, Digit::D3], &cells);

        let grid = TechniqueGrid::from(grid);
        let step = HiddenTriple::new()
            .find_step(&grid)
            .unwrap()
            .expect("hidden triple in row 0");
        assert_eq!(step.condition_cells().len(), 3);
        for cell in cells {
            assert!(step.condition_cells().contains(cell));
        }
        assert_eq!(step.secondary_cells().len(), 6);
        assert!(step.secondary_cells().contains(Position::new(1, 0)));
    }

    #[test]
    fn test_no_change_when_no_hidden_triples() {
        let grid = CandidateGrid::new();

        TechniqueTester::new(grid)
            .apply_once(&HiddenTriple::new())
            .assert_no_change(Position::new(0, 0))
            .assert_no_change(Position::new(4, 4));
    }

    #[test]
    fn test_no_change_when_hidden_triple_has_no_eliminations() {
        let mut grid = CandidateGrid::new();
        let cells = [Position::new(0, 0), Position::new(3, 0), Position::new(6, 0)];
        confine_digits_to_cells(&mut grid, &[Digit::D1, Digit::D2, Digit::D3], &cells);

        for digit in Digit::ALL {
            if digit != Digit::D1 && digit != Digit::D2 && digit != Digit::D3 {
                for cell in cells {
                    grid.remove_candidate(cell, digit);
                }
            }
        }

        TechniqueTester::new(grid)
            .apply_once(&HiddenTriple::new())
            .assert_no_change(Position::new(1, 0))
            .assert_no_change(Position::new(0, 1));
    }

    #[test]
    fn test_find_step_at_requires_triple_cells() {
        let mut grid = CandidateGrid::new();
        let cells = [Position::new(0, 0), Position::new(3, 0), Position::new(6, 0)];
        confine_digits_to_cells(&mut grid, &[Digit::D1, Digit::D2, Digit::D3], &cells);

        let grid = TechniqueGrid::from(grid);
        let technique = HiddenTriple::new();
        assert!(technique.find_step_at(&grid, cells[1]).unwrap().is_some());
        assert!(
            technique
                .find_step_at(&grid, Position::new(1, 0))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_inconsistent_when_four_digits_share_three_positions() {
        let mut grid = CandidateGrid::new();
        let cells = [Position::new(0, 0), Position::new(3, 0), Position::new(6, 0)];
        confine_digits_to_cells(
            &mut grid,
            &[Digit::D1, Digit::D2, Digit::D3, Digit::D4],
            &cells,
        );

        let mut grid = TechniqueGrid::from(grid);
        let result = HiddenTriple::new().apply(&mut grid);
        assert!(matches!(
            result,
            Err(SolverError::Inconsistent(
                ConsistencyError::CandidateConstraintViolation
            ))
        ));
    }
}
