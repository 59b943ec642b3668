use std::ops::ControlFlow;

use ninefold_core::{ConsistencyError, DigitPositions, House, Position};

use crate::{
    BoxedTechniqueStep, SolverError, TechniqueGrid, TechniqueStepData,
    technique::{BoxedTechnique, Technique, TechniqueKind},
};

/// A technique that strikes the digits of a naked pair from the rest of the
/// house.
///
/// Two cells of a house holding the same two candidates form a "naked pair":
/// between them they consume both digits, so no other cell of that house can
/// take either one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NakedPair {}

impl NakedPair {
    /// Creates a new `NakedPair` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl NakedPair {
    /// Sweeps all houses for naked pairs, eliminating around each one found
    /// and handing it to `on_pair`, which decides whether the sweep stops.
    fn sweep_with_control_flow<F>(
        grid: &mut TechniqueGrid,
        mut on_pair: F,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError>
    where
        F: for<'a> FnMut(
            &'a mut TechniqueGrid,
            [Position; 2],
            House,
        ) -> ControlFlow<BoxedTechniqueStep>,
    {
        // Only cells with exactly two candidates can be half of a pair.
        let two_candidate_cells = grid.classify_cells::<3>()[2];
        if two_candidate_cells.len() < 2 {
            return Ok(None);
        }

        for house in House::ALL {
            let pair_mask = two_candidate_cells.house_mask(house);
            if pair_mask.len() < 2 {
                continue;
            }
            for (i1, rest) in pair_mask.pivots_with_following() {
                let pos1 = house.position_from_cell_index(i1);
                let pair_digits = grid.candidates_at(pos1);
                let mut matching = rest;
                for d in pair_digits {
                    matching &= grid.house_mask(house, d);
                }
                // Three two-candidate cells over the same two digits leave
                // one of them without a value.
                if matching.len() > 1 {
                    return Err(ConsistencyError::CandidateConstraintViolation.into());
                }
                let Some(i2) = matching.as_single() else {
                    continue;
                };
                let pos2 = house.position_from_cell_index(i2);

                let mut eliminate_positions = house.positions();
                eliminate_positions.remove(pos1);
                eliminate_positions.remove(pos2);
                if grid.remove_candidates_with_mask(eliminate_positions, pair_digits)
                    && let ControlFlow::Break(step) = on_pair(grid, [pos1, pos2], house)
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
            TechniqueKind::NakedPair,
            DigitPositions::from_iter([pos1, pos2]),
            secondary_cells,
            before,
            after,
        ))
    }
}

impl Technique for NakedPair {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::NakedPair
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut scratch = grid.clone();
        Self::sweep_with_control_flow(&mut scratch, |scratch, pair, house| {
            ControlFlow::Break(Self::build_step(grid, scratch, pair, house))
        })
    }

    fn find_step_at(
        &self,
        grid: &TechniqueGrid,
        target: Position,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut scratch = grid.clone();
        Self::sweep_with_control_flow(&mut scratch, |scratch, pair, house| {
            if !pair.contains(&target) {
                *scratch = grid.clone();
                return ControlFlow::Continue(());
            }
            ControlFlow::Break(Self::build_step(grid, scratch, pair, house))
        })
    }

    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
        let mut changed = false;
        Self::sweep_with_control_flow(grid, |_, _, _| {
            changed = true;
            ControlFlow::Continue(())
        })?;
        Ok(changed)
    }
}
