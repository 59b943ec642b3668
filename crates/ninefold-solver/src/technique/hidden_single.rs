use std::ops::ControlFlow;

use ninefold_core::{Digit, DigitPositions, House, Position};

use crate::{
    BoxedTechniqueStep, ConditionCells, SolverError, TechniqueApplication, TechniqueGrid,
    TechniqueStep,
    technique::{BoxedTechnique, Technique, TechniqueKind},
    technique_step::collect_applications_from_diff,
};

/// A technique that places digits confined to one cell of a house.
///
/// A digit is a "hidden single" when exactly one cell of a row, column, or
/// box still admits it. The cell itself may hold several candidates; it is
/// the house that pins the digit down, which is why the pattern is harder to
/// spot than a naked single.
///
/// # Examples
///
/// ```
/// use ninefold_solver::{
///     TechniqueGrid,
///     technique::{HiddenSingle, Technique},
/// };
///
/// let mut grid = TechniqueGrid::new();
/// let changed = HiddenSingle::new().apply(&mut grid)?;
/// assert!(!changed);
/// # Ok::<(), ninefold_solver::SolverError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenSingle {}

impl HiddenSingle {
    /// Creates a new `HiddenSingle` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

#[derive(Debug, Clone)]
pub struct HiddenSingleStep {
    house: House,
    position: Position,
    digit: Digit,
    eliminations: Vec<TechniqueApplication>,
}

impl HiddenSingleStep {
    fn new(
        house: House,
        position: Position,
        digit: Digit,
        eliminations: Vec<TechniqueApplication>,
    ) -> Self {
        HiddenSingleStep {
            house,
            position,
            digit,
            eliminations,
        }
    }
}

impl TechniqueStep for HiddenSingleStep {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::HiddenSingle
    }

    fn clone_box(&self) -> BoxedTechniqueStep {
        Box::new(self.clone())
    }

    fn condition_cells(&self) -> ConditionCells {
        ConditionCells::from_elem(self.position)
    }

    fn secondary_cells(&self) -> DigitPositions {
        let mut cells = self.house.positions();
        cells.remove(self.position);
        cells
    }

    fn application(&self) -> Vec<TechniqueApplication> {
        let mut app = self.eliminations.clone();
        app.push(TechniqueApplication::Placement {
            position: self.position,
            digit: self.digit,
        });
        app
    }
}

impl HiddenSingle {
    /// Sweeps all houses for confined digits, placing each one found and
    /// handing it to `on_single`, which decides whether the sweep stops.
    #[inline]
    fn sweep_with_control_flow<F>(
        grid: &mut TechniqueGrid,
        mut on_single: F,
    ) -> Option<HiddenSingleStep>
    where
        F: for<'a> FnMut(
            &'a mut TechniqueGrid,
            House,
            Position,
            Digit,
        ) -> ControlFlow<HiddenSingleStep>,
    {
        let decided_cells = grid.decided_cells();
        for digit in Digit::ALL {
            let undecided_digit_positions = grid.digit_positions(digit) & !decided_cells;
            for house in House::ALL {
                let house_mask = undecided_digit_positions.house_mask(house);
                if let Some(i) = house_mask.as_single() {
                    let pos = house.position_from_cell_index(i);
                    if grid.place(pos, digit) {
                        grid.insert_decided_propagated(pos);
                        if let ControlFlow::Break(value) = on_single(grid, house, pos, digit) {
                            return Some(value);
                        }
                    }
                }
            }
        }
        None
    }
}

impl Technique for HiddenSingle {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::HiddenSingle
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut scratch = grid.clone();
        let step = Self::sweep_with_control_flow(&mut scratch, |scratch, house, pos, digit| {
            let eliminations = collect_applications_from_diff(grid, scratch);
            ControlFlow::Break(HiddenSingleStep::new(house, pos, digit, eliminations))
        });
        Ok(step.map(|step| step.clone_box()))
    }

    fn find_step_at(
        &self,
        grid: &TechniqueGrid,
        target: Position,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut scratch = grid.clone();
        let step = Self::sweep_with_control_flow(&mut scratch, |scratch, house, pos, digit| {
            if pos != target {
                *scratch = grid.clone();
                return ControlFlow::Continue(());
            }
            let eliminations = collect_applications_from_diff(grid, scratch);
            ControlFlow::Break(HiddenSingleStep::new(house, pos, digit, eliminations))
        });
        Ok(step.map(|step| step.clone_box()))
    }

    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
        let mut changed = false;
        Self::sweep_with_control_flow(grid, |_, _, _, _| {
            changed = true;
            ControlFlow::Continue(())
        });
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use ninefold_core::{CandidateGrid, Digit, Position};

    use super::*;
    use crate::testing::TechniqueTester;

    /// Strips `digit` from every cell of `house_cells` except `keep`.
    fn confine(grid: &mut CandidateGrid, house_cells: [Position; 9], keep: Position, digit: Digit) {
        for pos in house_cells {
            if pos != keep {
                grid.remove_candidate(pos, digit);
            }
        }
    }

    #[test]
    fn test_digit_confined_in_row_is_placed() {
        let mut grid = CandidateGrid::new();
        // (6, 3) keeps all nine candidates, but row 3 admits 2 nowhere else.
        confine(&mut grid, Position::ROWS[3], Position::new(6, 3), Digit::D2);

        TechniqueTester::new(grid)
            .apply_once(&HiddenSingle::new())
            .assert_placed(Position::new(6, 3), Digit::D2);
    }

    #[test]
    fn test_digit_confined_in_column_is_placed() {
        let mut grid = CandidateGrid::new();
        confine(&mut grid, Position::COLUMNS[0], Position::new(0, 7), Digit::D6);

        TechniqueTester::new(grid)
            .apply_once(&HiddenSingle::new())
            .assert_placed(Position::new(0, 7), Digit::D6);
    }

    #[test]
    fn test_digit_confined_in_box_is_placed() {
        let mut grid = CandidateGrid::new();
        // Box 8 is the bottom-right box; 1 stays possible only in its corner.
        confine(&mut grid, Position::BOXES[8], Position::new(8, 8), Digit::D1);

        TechniqueTester::new(grid)
            .apply_once(&HiddenSingle::new())
            .assert_placed(Position::new(8, 8), Digit::D1);
    }

    #[test]
    fn test_sweep_commits_independent_singles() {
        let mut grid = CandidateGrid::new();
        confine(&mut grid, Position::ROWS[3], Position::new(6, 3), Digit::D2);
        confine(&mut grid, Position::COLUMNS[0], Position::new(0, 7), Digit::D6);

        TechniqueTester::new(grid)
            .apply_once(&HiddenSingle::new())
            .assert_placed(Position::new(6, 3), Digit::D2)
            .assert_placed(Position::new(0, 7), Digit::D6);
    }

    #[test]
    fn test_open_grid_has_no_hidden_singles() {
        TechniqueTester::new(CandidateGrid::new())
            .apply_once(&HiddenSingle::new())
            .assert_no_change(Position::new(0, 0))
            .assert_no_change(Position::new(6, 3));
    }

    #[test]
    fn test_step_carries_placement_and_house_context() {
        let mut grid = CandidateGrid::new();
        confine(&mut grid, Position::ROWS[3], Position::new(6, 3), Digit::D2);
        let grid = TechniqueGrid::from(grid);

        let step = HiddenSingle::new()
            .find_step(&grid)
            .unwrap()
            .expect("hidden single in row 3");
        assert_eq!(step.kind(), TechniqueKind::HiddenSingle);
        assert_eq!(
            step.condition_cells().as_single(),
            Some(Position::new(6, 3))
        );

        // The rest of the row provides the context.
        let secondary = step.secondary_cells();
        assert_eq!(secondary.len(), 8);
        assert!(!secondary.contains(Position::new(6, 3)));
        assert!(secondary.contains(Position::new(0, 3)));

        // The placement comes last, after the candidate eliminations.
        assert_eq!(
            step.application().last(),
            Some(&TechniqueApplication::Placement {
                position: Position::new(6, 3),
                digit: Digit::D2,
            })
        );
    }

    #[test]
    fn test_find_step_at_requires_the_single_cell() {
        let mut grid = CandidateGrid::new();
        confine(&mut grid, Position::ROWS[3], Position::new(6, 3), Digit::D2);
        let grid = TechniqueGrid::from(grid);

        let technique = HiddenSingle::new();
        let step = technique
            .find_step_at(&grid, Position::new(6, 3))
            .unwrap()
            .expect("hidden single at the target cell");
        assert!(step.condition_cells().contains(Position::new(6, 3)));

        // The single exists, but not at this target.
        assert!(
            technique
                .find_step_at(&grid, Position::new(2, 2))
                .unwrap()
                .is_none()
        );
    }
}
