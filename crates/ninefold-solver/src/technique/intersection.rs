use std::ops::ControlFlow;

use ninefold_core::{Digit, DigitPositions, DigitSet, House, Position};

use crate::{
    BoxedTechniqueStep, ConditionCells, SolverError, TechniqueApplication, TechniqueGrid,
    TechniqueStep,
    technique::{BoxedTechnique, Technique, TechniqueKind},
};

const NAME_POINTING: &str = "Intersection Removal (Pointing)";
const NAME_CLAIMING: &str = "Intersection Removal (Claiming)";

/// A technique that removes candidates using box/line intersections.
///
/// - **Pointing**: Within a box, all candidates of a digit lie on a single
///   row/column, so that digit can be removed from the rest of that
///   row/column outside the box.
/// - **Claiming**: Within a row/column, all candidates of a digit lie in a
///   single box, so that digit can be removed from the rest of that box
///   outside the row/column.
///
/// The scan runs all boxes (pointing) before all rows and columns
/// (claiming).
#[derive(Debug, Default, Clone, Copy)]
pub struct Intersection {}

impl Intersection {
    /// Creates a new `Intersection` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntersectionVariant {
    Pointing,
    Claiming,
}

/// A step describing one box/line intersection and its eliminations.
#[derive(Debug, Clone)]
pub struct IntersectionStep {
    variant: IntersectionVariant,
    digit: Digit,
    box_house: House,
    line: House,
    intersection_cells: DigitPositions,
    eliminations: DigitPositions,
}

impl IntersectionStep {
    fn pointing(
        digit: Digit,
        box_house: House,
        line: House,
        intersection_cells: DigitPositions,
        eliminations: DigitPositions,
    ) -> Self {
        Self {
            variant: IntersectionVariant::Pointing,
            digit,
            box_house,
            line,
            intersection_cells,
            eliminations,
        }
    }

    fn claiming(
        digit: Digit,
        box_house: House,
        line: House,
        intersection_cells: DigitPositions,
        eliminations: DigitPositions,
    ) -> Self {
        Self {
            variant: IntersectionVariant::Claiming,
            digit,
            box_house,
            line,
            intersection_cells,
            eliminations,
        }
    }
}

impl TechniqueStep for IntersectionStep {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::Intersection
    }

    fn technique_name(&self) -> &'static str {
        match self.variant {
            IntersectionVariant::Pointing => NAME_POINTING,
            IntersectionVariant::Claiming => NAME_CLAIMING,
        }
    }

    fn clone_box(&self) -> BoxedTechniqueStep {
        Box::new(self.clone())
    }

    fn condition_cells(&self) -> ConditionCells {
        self.intersection_cells
    }

    fn secondary_cells(&self) -> DigitPositions {
        // The rest of the house the digit is confined in: the box for
        // pointing, the line for claiming.
        let source = match self.variant {
            IntersectionVariant::Pointing => self.box_house,
            IntersectionVariant::Claiming => self.line,
        };
        source.positions() & !self.intersection_cells
    }

    fn application(&self) -> Vec<TechniqueApplication> {
        vec![TechniqueApplication::CandidateElimination {
            positions: self.eliminations,
            digits: DigitSet::from_elem(self.digit),
        }]
    }
}

impl Intersection {
    /// The six rows and columns crossing a box.
    fn box_lines(box_index: u8) -> [House; 6] {
        let origin = Position::box_origin(box_index);
        [
            House::Row { y: origin.y() },
            House::Row { y: origin.y() + 1 },
            House::Row { y: origin.y() + 2 },
            House::Column { x: origin.x() },
            House::Column { x: origin.x() + 1 },
            House::Column { x: origin.x() + 2 },
        ]
    }

    /// Rows then columns, each with the three boxes crossing it.
    fn lines_with_crossing_boxes() -> impl Iterator<Item = (House, [u8; 3])> {
        let rows = (0..9u8).map(|y| {
            let base = y / 3 * 3;
            (House::Row { y }, [base, base + 1, base + 2])
        });
        let columns = (0..9u8).map(|x| {
            let base = x / 3;
            (House::Column { x }, [base, base + 3, base + 6])
        });
        rows.chain(columns)
    }

    fn apply_with_control_flow<F>(
        grid: &mut TechniqueGrid,
        mut on_condition: F,
    ) -> Option<BoxedTechniqueStep>
    where
        F: for<'a> FnMut(&'a mut TechniqueGrid, IntersectionStep) -> ControlFlow<BoxedTechniqueStep>,
    {
        // Pointing: box scan.
        for box_index in 0..9 {
            let box_house = House::Box { index: box_index };
            for line in Self::box_lines(box_index) {
                let intersection = box_house.positions() & line.positions();
                if (intersection & !grid.decided_cells()).is_empty() {
                    continue;
                }
                let rest_in_box = box_house.positions() & !intersection;
                let rest_in_line = line.positions() & !intersection;
                for digit in Digit::ALL {
                    let digit_positions = grid.digit_positions(digit);
                    if (digit_positions & intersection).is_empty()
                        || !(digit_positions & rest_in_box).is_empty()
                    {
                        continue;
                    }
                    let eliminations = digit_positions & rest_in_line;
                    if eliminations.is_empty() {
                        continue;
                    }
                    let step = IntersectionStep::pointing(
                        digit,
                        box_house,
                        line,
                        digit_positions & intersection,
                        eliminations,
                    );
                    grid.remove_candidates_with_mask(eliminations, DigitSet::from_elem(digit));
                    if let ControlFlow::Break(step) = on_condition(grid, step) {
                        return Some(step);
                    }
                }
            }
        }

        // Claiming: row and column scan.
        for (line, crossing_boxes) in Self::lines_with_crossing_boxes() {
            for box_index in crossing_boxes {
                let box_house = House::Box { index: box_index };
                let intersection = box_house.positions() & line.positions();
                if (intersection & !grid.decided_cells()).is_empty() {
                    continue;
                }
                let rest_in_box = box_house.positions() & !intersection;
                let rest_in_line = line.positions() & !intersection;
                for digit in Digit::ALL {
                    let digit_positions = grid.digit_positions(digit);
                    if (digit_positions & intersection).is_empty()
                        || !(digit_positions & rest_in_line).is_empty()
                    {
                        continue;
                    }
                    let eliminations = digit_positions & rest_in_box;
                    if eliminations.is_empty() {
                        continue;
                    }
                    let step = IntersectionStep::claiming(
                        digit,
                        box_house,
                        line,
                        digit_positions & intersection,
                        eliminations,
                    );
                    grid.remove_candidates_with_mask(eliminations, DigitSet::from_elem(digit));
                    if let ControlFlow::Break(step) = on_condition(grid, step) {
                        return Some(step);
                    }
                }
            }
        }
        None
    }
}

impl Technique for Intersection {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::Intersection
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut after_grid = grid.clone();
        let step = Self::apply_with_control_flow(&mut after_grid, |_, step| {
            ControlFlow::Break(Box::new(step))
        });
        Ok(step)
    }

    fn find_step_at(
        &self,
        grid: &TechniqueGrid,
        target: Position,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut after_grid = grid.clone();
        let step = Self::apply_with_control_flow(&mut after_grid, |after_grid, step| {
            if !step.intersection_cells.contains(target) {
                *after_grid = grid.clone();
                return ControlFlow::Continue(());
            }
            ControlFlow::Break(Box::new(step))
        });
        Ok(step)
    }

    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
        let mut changed = false;
        Self::apply_with_control_flow(grid, |_, _| {
            changed = true;
            ControlFlow::Continue(())
        });
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use ninefold_core::CandidateGrid;

    use super::*;
    use crate::testing::TechniqueTester;

    /// Confines `digit` within box 0 to the cells where `keep` holds.
    fn clear_in_box_0(grid: &mut CandidateGrid, digit: Digit, keep: impl Fn(Position) -> bool) {
        for pos in Position::BOXES[0] {
            if !keep(pos) {
                grid.remove_candidate(pos, digit);
            }
        }
    }

    #[test]
    fn test_pointing_eliminates_from_row() {
        let mut grid = CandidateGrid::new();
        clear_in_box_0(&mut grid, Digit::D5, |pos| pos.y() == 0);

        TechniqueTester::new(grid)
            .apply_once(&Intersection::new())
            .assert_removed_includes(Position::new(4, 0), [Digit::D5])
            .assert_removed_includes(Position::new(8, 0), [Digit::D5]);
    }

    #[test]
    fn test_pointing_eliminates_from_column() {
        let mut grid = CandidateGrid::new();
        clear_in_box_0(&mut grid, Digit::D7, |pos| pos.x() == 1);

        TechniqueTester::new(grid)
            .apply_once(&Intersection::new())
            .assert_removed_includes(Position::new(1, 4), [Digit::D7])
            .assert_removed_includes(Position::new(1, 8), [Digit::D7]);
    }

    #[test]
    fn test_claiming_eliminates_from_box() {
        let mut grid = CandidateGrid::new();
        for pos in Position::ROWS[0] {
            if pos.x() >= 3 {
                grid.remove_candidate(pos, Digit::D5);
            }
        }

        TechniqueTester::new(grid)
            .apply_once(&Intersection::new())
            .assert_removed_includes(Position::new(1, 1), [Digit::D5])
            .assert_removed_includes(Position::new(2, 2), [Digit::D5]);
    }

    #[test]
    fn test_claiming_eliminates_from_box_via_column() {
        let mut grid = CandidateGrid::new();
        for pos in Position::COLUMNS[0] {
            if pos.y() >= 3 {
                grid.remove_candidate(pos, Digit::D9);
            }
        }

        TechniqueTester::new(grid)
            .apply_once(&Intersection::new())
            .assert_removed_includes(Position::new(1, 1), [Digit::D9])
            .assert_removed_includes(Position::new(2, 2), [Digit::D9]);
    }

    #[test]
    fn test_no_change_when_no_intersections() {
        let grid = CandidateGrid::new();

        TechniqueTester::new(grid)
            .apply_once(&Intersection::new())
            .assert_no_change(Position::new(0, 0))
            .assert_no_change(Position::new(4, 4));
    }

    #[test]
    fn test_find_step_at_requires_intersection_cells() {
        let mut grid = CandidateGrid::new();
        clear_in_box_0(&mut grid, Digit::D5, |pos| pos.y() == 0);

        let grid = TechniqueGrid::from(grid);
        let technique = Intersection::new();
        assert!(
            technique
                .find_step_at(&grid, Position::new(1, 0))
                .unwrap()
                .is_some()
        );
        // (4, 0) loses a candidate but is not part of the pattern.
        assert!(
            technique
                .find_step_at(&grid, Position::new(4, 0))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_step_names_distinguish_pointing_and_claiming() {
        let mut grid = CandidateGrid::new();
        clear_in_box_0(&mut grid, Digit::D5, |pos| pos.y() == 0);

        let grid = TechniqueGrid::from(grid);
        let step = Intersection::new()
            .find_step(&grid)
            .unwrap()
            .expect("pointing intersection in box 0");
        assert_eq!(step.kind(), TechniqueKind::Intersection);
        assert_eq!(step.technique_name(), "Intersection Removal (Pointing)");
        assert_eq!(step.condition_cells().len(), 3);

        let mut grid = CandidateGrid::new();
        for pos in Position::ROWS[0] {
            if pos.x() >= 3 {
                grid.remove_candidate(pos, Digit::D5);
            }
        }

        let grid = TechniqueGrid::from(grid);
        let step = Intersection::new()
            .find_step(&grid)
            .unwrap()
            .expect("claiming intersection in row 0");
        assert_eq!(step.technique_name(), "Intersection Removal (Claiming)");
    }
}
