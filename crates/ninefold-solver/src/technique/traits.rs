use std::fmt::Debug;

use ninefold_core::Position;

use crate::{BoxedTechniqueStep, SolverError, TechniqueGrid, technique::TechniqueKind};

/// A trait representing a Sudoku solving technique.
///
/// Each technique scans a [`TechniqueGrid`] for instances of one deduction
/// pattern. The searching methods report the pattern as a step without
/// committing it; [`apply`](Technique::apply) sweeps the grid and commits
/// every instance it finds.
pub trait Technique: Debug + Send + Sync {
    /// Returns which catalogue entry this technique is.
    fn kind(&self) -> TechniqueKind;

    /// Returns the display name of the technique.
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns a boxed clone of the technique.
    fn clone_box(&self) -> BoxedTechnique;

    /// Finds the first applicable step without mutating the grid.
    ///
    /// Returns `Ok(None)` when this technique has no applicable step. A
    /// pattern only counts as applicable if committing it would change at
    /// least one candidate.
    ///
    /// # Errors
    ///
    /// Returns an error if the technique detects an invalid state in the grid.
    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError>;

    /// Finds the first applicable step whose pattern cells include `target`.
    ///
    /// Steps whose [`condition_cells`](crate::TechniqueStep::condition_cells)
    /// do not contain `target` are skipped, so a match later in the scan
    /// order can still be found behind an unrelated earlier pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the technique detects an invalid state in the grid.
    fn find_step_at(
        &self,
        grid: &TechniqueGrid,
        target: Position,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError>;

    /// Applies every instance of the technique found in one sweep.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - At least one candidate changed
    /// * `Ok(false)` - The sweep found nothing to change
    ///
    /// # Errors
    ///
    /// Returns an error if the technique detects an invalid state in the grid.
    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError>;
}

/// A boxed technique.
pub type BoxedTechnique = Box<dyn Technique>;

impl Clone for BoxedTechnique {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
