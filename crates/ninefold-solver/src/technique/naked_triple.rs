use ninefold_core::{ConsistencyError, DigitPositions, DigitSet, House, Position};

use crate::{
    BoxedTechniqueStep, ConditionCells, SolverError, TechniqueApplication, TechniqueGrid,
    TechniqueStep,
    technique::{BoxedTechnique, Technique, TechniqueKind},
};

/// A technique that removes candidates using a naked triple within a house.
///
/// A "naked triple" occurs when three cells in a row, column, or box hold
/// candidates drawn from the same three digits. Each cell may hold two or
/// three of them; the union must be exactly three. Those digits can be
/// eliminated from all other cells in that house.
#[derive(Debug, Default, Clone, Copy)]
pub struct NakedTriple {}

impl NakedTriple {
    /// Creates a new `NakedTriple` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

/// A step describing a naked triple and its candidate eliminations.
#[derive(Debug, Clone)]
pub struct NakedTripleStep {
    positions: DigitPositions,
    digits: DigitSet,
    eliminate_positions: DigitPositions,
}

impl NakedTripleStep {
    fn new(positions: DigitPositions, digits: DigitSet, eliminate_positions: DigitPositions) -> Self {
        Self {
            positions,
            digits,
            eliminate_positions,
        }
    }
}

impl TechniqueStep for NakedTripleStep {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::NakedTriple
    }

    fn clone_box(&self) -> BoxedTechniqueStep {
        Box::new(self.clone())
    }

    fn condition_cells(&self) -> ConditionCells {
        self.positions
    }

    fn secondary_cells(&self) -> DigitPositions {
        self.eliminate_positions
    }

    fn application(&self) -> Vec<TechniqueApplication> {
        vec![TechniqueApplication::CandidateElimination {
            positions: self.eliminate_positions,
            digits: self.digits,
        }]
    }
}

impl NakedTriple {
    fn find_step_impl(
        grid: &TechniqueGrid,
        target: Option<Position>,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let classes = grid.classify_cells::<4>();
        let triple_candidate_cells = classes[2] | classes[3];
        if triple_candidate_cells.len() < 3 {
            return Ok(None);
        }

        for house in House::ALL {
            let triple_mask = triple_candidate_cells.house_mask(house);
            if triple_mask.len() < 3 {
                continue;
            }

            for (i1, rest1) in triple_mask.pivots_with_following() {
                let pos1 = house.position_from_cell_index(i1);
                let digits1 = grid.candidates_at(pos1);
                for (i2, rest2) in rest1.pivots_with_following() {
                    let pos2 = house.position_from_cell_index(i2);
                    let digits12 = digits1 | grid.candidates_at(pos2);
                    if digits12.len() > 3 {
                        continue;
                    }
                    for (i3, rest3) in rest2.pivots_with_following() {
                        let pos3 = house.position_from_cell_index(i3);
                        let digits123 = digits12 | grid.candidates_at(pos3);
                        if digits123.len() > 3 {
                            continue;
                        }
                        if digits123.len() < 3 {
                            return Err(ConsistencyError::CandidateConstraintViolation.into());
                        }

                        // Cell indices smaller than `i3` are checked in earlier
                        // combinations, so only the following cells need to be
                        // validated here.
                        let has_fourth_cell = rest3.iter().any(|i| {
                            let pos = house.position_from_cell_index(i);
                            grid.candidates_at(pos).is_subset(digits123)
                        });
                        if has_fourth_cell {
                            return Err(ConsistencyError::CandidateConstraintViolation.into());
                        }

                        if let Some(target) = target
                            && target != pos1
                            && target != pos2
                            && target != pos3
                        {
                            continue;
                        }

                        let mut eliminate_positions = house.positions();
                        eliminate_positions.remove(pos1);
                        eliminate_positions.remove(pos2);
                        eliminate_positions.remove(pos3);
                        let has_elimination = digits123
                            .into_iter()
                            .any(|d| !(grid.digit_positions(d) & eliminate_positions).is_empty());
                        if has_elimination {
                            return Ok(Some(Box::new(NakedTripleStep::new(
                                DigitPositions::from_iter([pos1, pos2, pos3]),
                                digits123,
                                eliminate_positions,
                            ))));
                        }
                    }
                }
            }
        }
        Ok(None)
    }
}

impl Technique for NakedTriple {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::NakedTriple
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        Self::find_step_impl(grid, None)
    }

    fn find_step_at(
        &self,
        grid: &TechniqueGrid,
        target: Position,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        Self::find_step_impl(grid, Some(target))
    }

    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
        let classes = grid.classify_cells::<4>();
        let triple_candidate_cells = classes[2] | classes[3];
        if triple_candidate_cells.len() < 3 {
            return Ok(false);
        }

        let mut changed = false;
        for house in House::ALL {
            let triple_mask = triple_candidate_cells.house_mask(house);
            if triple_mask.len() < 3 {
                continue;
            }

            for (i1, rest1) in triple_mask.pivots_with_following() {
                let pos1 = house.position_from_cell_index(i1);
                let digits1 = grid.candidates_at(pos1);
                for (i2, rest2) in rest1.pivots_with_following() {
                    let pos2 = house.position_from_cell_index(i2);
                    let digits12 = digits1 | grid.candidates_at(pos2);
                    if digits12.len() > 3 {
                        continue;
                    }
                    for (i3, rest3) in rest2.pivots_with_following() {
                        let pos3 = house.position_from_cell_index(i3);
                        let digits123 = digits12 | grid.candidates_at(pos3);
                        if digits123.len() > 3 {
                            continue;
                        }
                        if digits123.len() < 3 {
                            return Err(ConsistencyError::CandidateConstraintViolation.into());
                        }

                        let has_fourth_cell = rest3.iter().any(|i| {
                            let pos = house.position_from_cell_index(i);
                            grid.candidates_at(pos).is_subset(digits123)
                        });
                        if has_fourth_cell {
                            return Err(ConsistencyError::CandidateConstraintViolation.into());
                        }

                        let mut eliminate_positions = house.positions();
                        eliminate_positions.remove(pos1);
                        eliminate_positions.remove(pos2);
                        eliminate_positions.remove(pos3);
                        changed |=
                            grid.remove_candidates_with_mask(eliminate_positions, digits123);
                    }
                }
            }
        }
        Ok(changed)
    }
}
