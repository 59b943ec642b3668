use std::ops::ControlFlow;

use ninefold_core::{
    ConsistencyError, Digit, DigitPositions, DigitSet, House, HouseMask, Position,
};

use crate::{
    BoxedTechniqueStep, SolverError, TechniqueGrid, TechniqueStepData,
    technique::{BoxedTechnique, Technique, TechniqueKind},
};

/// A technique that removes candidates using a Swordfish pattern.
///
/// A "Swordfish" occurs when a digit appears two or three times in each of
/// three rows (or columns) and those candidates are confined to three columns
/// (or rows). The digit can then be eliminated from the rest of the three
/// covering columns (or rows).
#[derive(Debug, Default, Clone, Copy)]
pub struct Swordfish {}

trait AxisOps {
    fn house(index: u8) -> House;
    fn line_positions(index: u8) -> DigitPositions;
    fn cross_positions(index: u8) -> DigitPositions;
}

#[derive(Debug, Clone, Copy)]
struct RowAxis;

#[derive(Debug, Clone, Copy)]
struct ColumnAxis;

impl AxisOps for RowAxis {
    #[inline]
    fn house(index: u8) -> House {
        House::Row { y: index }
    }

    #[inline]
    fn line_positions(index: u8) -> DigitPositions {
        DigitPositions::ROW_POSITIONS[index]
    }

    #[inline]
    fn cross_positions(index: u8) -> DigitPositions {
        DigitPositions::COLUMN_POSITIONS[index]
    }
}

impl AxisOps for ColumnAxis {
    #[inline]
    fn house(index: u8) -> House {
        House::Column { x: index }
    }

    #[inline]
    fn line_positions(index: u8) -> DigitPositions {
        DigitPositions::COLUMN_POSITIONS[index]
    }

    #[inline]
    fn cross_positions(index: u8) -> DigitPositions {
        DigitPositions::ROW_POSITIONS[index]
    }
}

impl Swordfish {
    /// Creates a new `Swordfish` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    #[inline(always)]
    fn apply_axis_with_control_flow<A, F>(
        grid: &mut TechniqueGrid,
        digit: Digit,
        on_condition: &mut F,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError>
    where
        A: AxisOps,
        F: for<'a> FnMut(
            &'a mut TechniqueGrid,
            DigitPositions,
            DigitPositions,
        ) -> ControlFlow<BoxedTechniqueStep>,
    {
        const INVALID: u8 = u8::MAX;

        // Lines where the digit appears exactly two or three times.
        let mut lines = [(INVALID, HouseMask::EMPTY); 9];
        let mut num_lines = 0usize;
        for line in 0..9u8 {
            let mask = grid.house_mask(A::house(line), digit);
            if (2..=3).contains(&mask.len()) {
                lines[num_lines] = (line, mask);
                num_lines += 1;
            }
        }
        if num_lines < 3 {
            return Ok(None);
        }

        let mut iter1 = lines[..num_lines].iter();
        while let Some(&(line1, mask1)) = iter1.next() {
            let mut iter2 = iter1.clone();
            while let Some(&(line2, mask2)) = iter2.next() {
                let cover12 = mask1 | mask2;
                if cover12.len() > 3 {
                    continue;
                }
                for &(line3, mask3) in iter2.as_slice() {
                    let cover = cover12 | mask3;
                    if cover.len() > 3 {
                        continue;
                    }
                    if cover.len() < 3 {
                        // Three lines confined to fewer than three cross
                        // lines.
                        return Err(ConsistencyError::CandidateConstraintViolation.into());
                    }

                    let base_positions = A::line_positions(line1)
                        | A::line_positions(line2)
                        | A::line_positions(line3);
                    let mut cover_positions = DigitPositions::new();
                    for cross in cover {
                        cover_positions |= A::cross_positions(cross);
                    }
                    let pattern_cells = grid.digit_positions(digit) & base_positions;
                    let eliminate_positions = cover_positions & !base_positions;
                    if grid.remove_candidates_with_mask(
                        eliminate_positions,
                        DigitSet::from_elem(digit),
                    ) && let ControlFlow::Break(step) =
                        on_condition(grid, pattern_cells, eliminate_positions)
                    {
                        return Ok(Some(step));
                    }
                }
            }
        }
        Ok(None)
    }

    #[inline]
    fn apply_with_control_flow<F>(
        grid: &mut TechniqueGrid,
        mut on_condition: F,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError>
    where
        F: for<'a> FnMut(
            &'a mut TechniqueGrid,
            DigitPositions,
            DigitPositions,
        ) -> ControlFlow<BoxedTechniqueStep>,
    {
        for digit in Digit::ALL {
            if let Some(step) =
                Self::apply_axis_with_control_flow::<RowAxis, _>(grid, digit, &mut on_condition)?
            {
                return Ok(Some(step));
            }
            if let Some(step) =
                Self::apply_axis_with_control_flow::<ColumnAxis, _>(grid, digit, &mut on_condition)?
            {
                return Ok(Some(step));
            }
        }
        Ok(None)
    }

    fn build_step(
        before: &TechniqueGrid,
        after: &TechniqueGrid,
        pattern_cells: DigitPositions,
        eliminate_positions: DigitPositions,
    ) -> BoxedTechniqueStep {
        Box::new(TechniqueStepData::from_diff(
            TechniqueKind::Swordfish,
            pattern_cells,
            eliminate_positions,
            before,
            after,
        ))
    }
}

impl Technique for Swordfish {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::Swordfish
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut after_grid = grid.clone();
        let step =
            Self::apply_with_control_flow(&mut after_grid, |after_grid, pattern, region| {
                ControlFlow::Break(Self::build_step(grid, after_grid, pattern, region))
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
            Self::apply_with_control_flow(&mut after_grid, |after_grid, pattern, region| {
                if !pattern.contains(target) {
                    *after_grid = grid.clone();
                    return ControlFlow::Continue(());
                }
                ControlFlow::Break(Self::build_step(grid, after_grid, pattern, region))
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
    use ninefold_core::CandidateGrid;

    use super::*;
    use crate::testing::TechniqueTester;

    fn confine_row(grid: &mut CandidateGrid, digit: Digit, y: u8, xs: &[u8]) {
        for x in 0..9 {
            if !xs.contains(&x) {
                grid.remove_candidate(Position::new(x, y), digit);
            }
        }
    }

    fn confine_column(grid: &mut CandidateGrid, digit: Digit, x: u8, ys: &[u8]) {
        for y in 0..9 {
            if !ys.contains(&y) {
                grid.remove_candidate(Position::new(x, y), digit);
            }
        }
    }

    #[test]
    fn test_eliminates_swordfish_candidates_in_columns() {
        let mut grid = CandidateGrid::new();
        for y in [0, 3, 6] {
            confine_row(&mut grid, Digit::D1, y, &[1, 4, 7]);
        }

        TechniqueTester::new(grid)
            .apply_once(&Swordfish::new())
            .assert_removed_includes(Position::new(1, 1), [Digit::D1])
            .assert_removed_includes(Position::new(4, 8), [Digit::D1])
            .assert_removed_includes(Position::new(7, 5), [Digit::D1]);
    }

    #[test]
    fn test_eliminates_with_two_candidate_lines() {
        let mut grid = CandidateGrid::new();
        confine_row(&mut grid, Digit::D2, 0, &[1, 4]);
        confine_row(&mut grid, Digit::D2, 3, &[4, 7]);
        confine_row(&mut grid, Digit::D2, 6, &[1, 7]);

        TechniqueTester::new(grid)
            .apply_once(&Swordfish::new())
            .assert_removed_includes(Position::new(1, 2), [Digit::D2])
            .assert_removed_includes(Position::new(7, 8), [Digit::D2]);
    }

    #[test]
    fn test_eliminates_column_based_swordfish() {
        let mut grid = CandidateGrid::new();
        for x in [0, 4, 8] {
            confine_column(&mut grid, Digit::D3, x, &[2, 5, 8]);
        }

        TechniqueTester::new(grid)
            .apply_once(&Swordfish::new())
            .assert_removed_includes(Position::new(1, 2), [Digit::D3])
            .assert_removed_includes(Position::new(7, 8), [Digit::D3]);
    }

    #[test]
    fn test_no_change_when_no_swordfish() {
        let grid = CandidateGrid::new();

        TechniqueTester::new(grid)
            .apply_once(&Swordfish::new())
            .assert_no_change(Position::new(0, 0))
            .assert_no_change(Position::new(4, 4));
    }

    #[test]
    fn test_no_change_when_swordfish_has_no_eliminations() {
        let mut grid = CandidateGrid::new();
        for y in [0, 3, 6] {
            confine_row(&mut grid, Digit::D1, y, &[1, 4, 7]);
        }
        for x in [1, 4, 7] {
            confine_column(&mut grid, Digit::D1, x, &[0, 3, 6]);
        }

        TechniqueTester::new(grid)
            .apply_once(&Swordfish::new())
            .assert_no_change(Position::new(1, 1))
            .assert_no_change(Position::new(7, 8));
    }

    #[test]
    fn test_find_step_at_requires_pattern_cells() {
        let mut grid = CandidateGrid::new();
        for y in [0, 3, 6] {
            confine_row(&mut grid, Digit::D1, y, &[1, 4, 7]);
        }

        let grid = TechniqueGrid::from(grid);
        let technique = Swordfish::new();
        let step = technique
            .find_step_at(&grid, Position::new(1, 0))
            .unwrap()
            .expect("swordfish on rows 0, 3, 6");
        assert_eq!(step.condition_cells().len(), 9);
        // (1, 1) loses a candidate but lies outside the pattern rows.
        assert!(
            technique
                .find_step_at(&grid, Position::new(1, 1))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_inconsistent_when_cover_smaller_than_base() {
        let mut grid = CandidateGrid::new();
        for y in [0, 3, 6] {
            confine_row(&mut grid, Digit::D1, y, &[2, 6]);
        }

        let mut grid = TechniqueGrid::from(grid);
        let result = Swordfish::new().apply(&mut grid);
        assert!(matches!(
            result,
            Err(SolverError::Inconsistent(
                ConsistencyError::CandidateConstraintViolation
            ))
        ));
    }
}
