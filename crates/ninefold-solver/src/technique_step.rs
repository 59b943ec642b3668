use std::fmt::Debug;

use derive_more::IsVariant;
use ninefold_core::{Digit, DigitPositions, DigitSet, Position};

use crate::technique::{TechniqueGrid, TechniqueKind};

/// Cells that form a step's pattern.
pub type ConditionCells = DigitPositions;

/// A deduction step produced by a technique.
///
/// A step describes one concrete pattern instance: which cells form the
/// pattern, which cells provide its context, and what changes applying it
/// makes. Hint systems present the cells before naming the technique, and
/// apply the changes when the player asks for them.
pub trait TechniqueStep: Debug + Send + Sync {
    /// Returns which technique produced this step.
    fn kind(&self) -> TechniqueKind;

    /// Returns the display name of the technique that produced this step.
    ///
    /// Techniques with named variants (such as intersection removal, which
    /// distinguishes pointing from claiming) override this with the variant
    /// name.
    fn technique_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns a boxed clone of the step.
    fn clone_box(&self) -> BoxedTechniqueStep;

    /// Returns the cells that form the pattern itself.
    ///
    /// For a single this is the solved cell; for a subset, the subset cells;
    /// for a fish, the pattern corners.
    fn condition_cells(&self) -> ConditionCells;

    /// Returns the cells that give the pattern its context, such as the rest
    /// of the house a subset is confined to.
    ///
    /// May be empty for techniques whose pattern cells speak for themselves.
    fn secondary_cells(&self) -> DigitPositions;

    /// Returns the concrete changes produced by applying the step.
    fn application(&self) -> Vec<TechniqueApplication>;
}

/// A boxed technique step.
pub type BoxedTechniqueStep = Box<dyn TechniqueStep>;

impl Clone for BoxedTechniqueStep {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Concrete changes produced by applying a technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum TechniqueApplication {
    /// Place a digit in a single cell.
    Placement {
        /// Cell to place the digit into.
        position: Position,
        /// Digit to place.
        digit: Digit,
    },
    /// Remove candidates from the specified positions.
    CandidateElimination {
        /// Positions where candidates are removed.
        positions: DigitPositions,
        /// Digits to remove from the specified positions.
        digits: DigitSet,
    },
}

/// Shared step representation for techniques without step-specific payloads.
#[derive(Debug, Clone)]
pub struct TechniqueStepData {
    kind: TechniqueKind,
    condition_cells: ConditionCells,
    secondary_cells: DigitPositions,
    application: Vec<TechniqueApplication>,
}

impl TechniqueStepData {
    /// Creates a new `TechniqueStepData`.
    #[must_use]
    pub fn new(
        kind: TechniqueKind,
        condition_cells: ConditionCells,
        secondary_cells: DigitPositions,
        application: Vec<TechniqueApplication>,
    ) -> Self {
        Self {
            kind,
            condition_cells,
            secondary_cells,
            application,
        }
    }

    /// Creates a new `TechniqueStepData` whose applications are the candidate
    /// eliminations between a before and an after grid.
    #[must_use]
    pub fn from_diff(
        kind: TechniqueKind,
        condition_cells: ConditionCells,
        secondary_cells: DigitPositions,
        before: &TechniqueGrid,
        after: &TechniqueGrid,
    ) -> Self {
        Self::new(
            kind,
            condition_cells,
            secondary_cells,
            collect_applications_from_diff(before, after),
        )
    }
}

impl TechniqueStep for TechniqueStepData {
    fn kind(&self) -> TechniqueKind {
        self.kind
    }

    fn clone_box(&self) -> BoxedTechniqueStep {
        Box::new(self.clone())
    }

    fn condition_cells(&self) -> ConditionCells {
        self.condition_cells
    }

    fn secondary_cells(&self) -> DigitPositions {
        self.secondary_cells
    }

    fn application(&self) -> Vec<TechniqueApplication> {
        self.application.clone()
    }
}

/// Collects one [`TechniqueApplication::CandidateElimination`] per digit whose
/// candidates shrank between `before` and `after`.
pub(crate) fn collect_applications_from_diff(
    before: &TechniqueGrid,
    after: &TechniqueGrid,
) -> Vec<TechniqueApplication> {
    let mut app = vec![];
    for digit in DigitSet::FULL {
        let before_positions = before.digit_positions(digit);
        let after_positions = after.digit_positions(digit);
        debug_assert!(before_positions.is_superset(after_positions));
        let diff = before_positions.difference(after_positions);
        if !diff.is_empty() {
            app.push(TechniqueApplication::CandidateElimination {
                positions: diff,
                digits: DigitSet::from_elem(digit),
            });
        }
    }
    app
}
