use std::ops::ControlFlow;

use ninefold_core::{ConsistencyError, Digit, DigitPositions, DigitSet, HouseMask, Position};

use crate::{
    BoxedTechniqueStep, SolverError, TechniqueGrid, TechniqueStepData,
    technique::{BoxedTechnique, Technique, TechniqueKind},
};

/// A technique that eliminates candidates across an X-Wing.
///
/// When two rows admit a digit in exactly the same two columns, those four
/// corners carry the digit for both rows, so the two columns cannot take it
/// anywhere else. The same holds with rows and columns swapped. The corners
/// themselves are left untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct XWing {}

impl XWing {
    /// Creates a new `XWing` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

/// Whether the wing's base lines are rows or columns.
#[derive(Debug, Clone, Copy)]
enum Orientation {
    Rows,
    Columns,
}

impl Orientation {
    fn line_mask(self, grid: &TechniqueGrid, line: u8, digit: Digit) -> HouseMask {
        match self {
            Self::Rows => grid.row_mask(line, digit),
            Self::Columns => grid.col_mask(line, digit),
        }
    }

    fn position(self, line: u8, cell: u8) -> Position {
        match self {
            Self::Rows => Position::new(cell, line),
            Self::Columns => Position::new(line, cell),
        }
    }

    /// The line crossing this orientation at cell index `cell`.
    fn cross_positions(self, cell: u8) -> DigitPositions {
        match self {
            Self::Rows => DigitPositions::COLUMN_POSITIONS[cell],
            Self::Columns => DigitPositions::ROW_POSITIONS[cell],
        }
    }

    fn line_positions(self, line: u8) -> DigitPositions {
        match self {
            Self::Rows => DigitPositions::ROW_POSITIONS[line],
            Self::Columns => DigitPositions::COLUMN_POSITIONS[line],
        }
    }
}

impl XWing {
    /// Sweeps both orientations for wings, eliminating around each one found
    /// and handing it to `on_wing`, which decides whether the sweep stops.
    fn sweep_with_control_flow<F>(
        grid: &mut TechniqueGrid,
        mut on_wing: F,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError>
    where
        F: for<'a> FnMut(
            &'a mut TechniqueGrid,
            Digit,
            DigitPositions,
            DigitPositions,
        ) -> ControlFlow<BoxedTechniqueStep>,
    {
        for digit in Digit::ALL {
            for orientation in [Orientation::Rows, Orientation::Columns] {
                // Base lines are the ones holding the digit in exactly two
                // cells.
                let mut base_lines = Vec::new();
                for line in 0..9u8 {
                    if let Some(cells) = orientation.line_mask(grid, line, digit).as_double() {
                        base_lines.push((line, cells));
                    }
                }

                for (i, &(line1, cells @ (c1, c2))) in base_lines.iter().enumerate() {
                    for &(line2, other_cells) in &base_lines[i + 1..] {
                        if other_cells != cells {
                            continue;
                        }
                        // Four corners inside one box would need the digit
                        // twice in that box.
                        if line1 / 3 == line2 / 3 && c1 / 3 == c2 / 3 {
                            return Err(ConsistencyError::CandidateConstraintViolation.into());
                        }
                        let corners = DigitPositions::from_iter([
                            orientation.position(line1, c1),
                            orientation.position(line1, c2),
                            orientation.position(line2, c1),
                            orientation.position(line2, c2),
                        ]);
                        let region = (orientation.cross_positions(c1)
                            | orientation.cross_positions(c2))
                            & !(orientation.line_positions(line1)
                                | orientation.line_positions(line2));
                        if grid.remove_candidates_with_mask(region, DigitSet::from_elem(digit))
                            && let ControlFlow::Break(step) = on_wing(grid, digit, corners, region)
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
        corners: DigitPositions,
        region: DigitPositions,
    ) -> BoxedTechniqueStep {
        Box::new(TechniqueStepData::from_diff(
            TechniqueKind::XWing,
            corners,
            region,
            before,
            after,
        ))
    }
}

impl Technique for XWing {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::XWing
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut scratch = grid.clone();
        Self::sweep_with_control_flow(&mut scratch, |scratch, _, corners, region| {
            ControlFlow::Break(Self::build_step(grid, scratch, corners, region))
        })
    }

    fn find_step_at(
        &self,
        grid: &TechniqueGrid,
        target: Position,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut scratch = grid.clone();
        Self::sweep_with_control_flow(&mut scratch, |scratch, _, corners, region| {
            if !corners.contains(target) {
                *scratch = grid.clone();
                return ControlFlow::Continue(());
            }
            ControlFlow::Break(Self::build_step(grid, scratch, corners, region))
        })
    }

    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
        let mut changed = false;
        Self::sweep_with_control_flow(grid, |_, _, _, _| {
            changed = true;
            ControlFlow::Continue(())
        })?;
        Ok(changed)
    }
}
