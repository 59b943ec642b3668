use ninefold_core::Position;

use crate::{
    BoxedTechniqueStep, SolverError, TechniqueGrid,
    technique::{self, BoxedTechnique, TechniqueKind},
};

/// Per-technique step counts from a solving run.
///
/// Each committed step increments the counter of its [`TechniqueKind`]. A
/// step is one pattern instance, not one sweep over the grid, so the counts
/// are fine-grained enough to weight by [`TechniqueKind::weight`] when rating
/// a puzzle.
///
/// # Examples
///
/// ```
/// use ninefold_solver::{TechniqueGrid, TechniqueSolver, technique::TechniqueKind};
///
/// let solver = TechniqueSolver::with_all_techniques();
/// let mut grid = TechniqueGrid::new();
///
/// let (_solved, stats) = solver.solve(&mut grid)?;
/// println!(
///     "{} steps, {} of them naked singles",
///     stats.total_steps(),
///     stats.count(TechniqueKind::NakedSingle)
/// );
/// # Ok::<(), ninefold_solver::SolverError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechniqueSolverStats {
    counts: [usize; TechniqueKind::COUNT],
    total_steps: usize,
}

impl TechniqueSolverStats {
    /// Creates a statistics object with every count at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: [0; TechniqueKind::COUNT],
            total_steps: 0,
        }
    }

    /// Returns how many steps of the given technique were committed.
    #[must_use]
    pub fn count(&self, kind: TechniqueKind) -> usize {
        self.counts[kind.index()]
    }

    /// Returns the number of committed steps across all techniques.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Returns `true` once at least one step has been recorded.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        self.total_steps > 0
    }

    fn record(&mut self, kind: TechniqueKind) {
        self.counts[kind.index()] += 1;
        self.total_steps += 1;
    }
}

impl Default for TechniqueSolverStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Solves grids by repeatedly committing single deduction steps.
///
/// The solver holds a technique catalogue ordered from cheapest to most
/// expensive. Every step walks the catalogue from the front and commits the
/// first pattern instance any technique reports, so an expensive technique
/// only ever fires when nothing cheaper applies. That ordering is what makes
/// the recorded step counts meaningful as a difficulty measure, and it is
/// also what a step-at-a-time consumer such as a hint provider expects.
///
/// # Examples
///
/// ```
/// use ninefold_solver::{TechniqueGrid, TechniqueSolver};
///
/// let solver = TechniqueSolver::with_all_techniques();
/// let mut grid = TechniqueGrid::new();
///
/// let (solved, stats) = solver.solve(&mut grid)?;
/// if !solved {
///     println!("stuck after {} steps", stats.total_steps());
/// }
/// # Ok::<(), ninefold_solver::SolverError>(())
/// ```
///
/// Stepping manually:
///
/// ```
/// use ninefold_solver::{TechniqueGrid, TechniqueSolver, TechniqueSolverStats};
///
/// let solver = TechniqueSolver::with_all_techniques();
/// let mut grid = TechniqueGrid::new();
/// let mut stats = TechniqueSolverStats::new();
///
/// while solver.step(&mut grid, &mut stats)? {
///     if grid.is_solved()? {
///         break;
///     }
/// }
/// # Ok::<(), ninefold_solver::SolverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TechniqueSolver {
    techniques: Vec<BoxedTechnique>,
}

impl TechniqueSolver {
    /// Creates a solver over the given catalogue.
    ///
    /// The vector order is the trial order: after every committed step the
    /// walk restarts from the first technique.
    ///
    /// # Examples
    ///
    /// ```
    /// use ninefold_solver::{
    ///     TechniqueSolver,
    ///     technique::{BoxedTechnique, NakedSingle},
    /// };
    ///
    /// let catalogue: Vec<BoxedTechnique> = vec![Box::new(NakedSingle::new())];
    /// let solver = TechniqueSolver::new(catalogue);
    /// ```
    #[must_use]
    pub fn new(techniques: Vec<BoxedTechnique>) -> Self {
        Self { techniques }
    }

    /// Creates a solver over the full catalogue, cheapest technique first.
    #[must_use]
    pub fn with_all_techniques() -> Self {
        Self {
            techniques: technique::all_techniques(),
        }
    }

    /// Returns the catalogue in trial order.
    #[must_use]
    pub fn techniques(&self) -> &[BoxedTechnique] {
        &self.techniques
    }

    /// Finds and commits one step, recording it in `stats`.
    ///
    /// Returns `Ok(false)` when no technique in the catalogue reports a step,
    /// which is the solver's stuck state.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] when the grid is inconsistent on
    /// entry, turns inconsistent through the committed step, or a technique
    /// uncovers a contradiction while scanning.
    ///
    /// # Examples
    ///
    /// ```
    /// use ninefold_solver::{TechniqueGrid, TechniqueSolver, TechniqueSolverStats};
    ///
    /// let solver = TechniqueSolver::with_all_techniques();
    /// let mut grid = TechniqueGrid::new();
    /// let mut stats = TechniqueSolverStats::new();
    ///
    /// let progressed = solver.step(&mut grid, &mut stats)?;
    /// assert!(!progressed);
    /// # Ok::<(), ninefold_solver::SolverError>(())
    /// ```
    pub fn step(
        &self,
        grid: &mut TechniqueGrid,
        stats: &mut TechniqueSolverStats,
    ) -> Result<bool, SolverError> {
        grid.check_consistency()?;

        for technique in &self.techniques {
            if let Some(step) = technique.find_step(grid)? {
                let changed = grid.apply_step(step.as_ref());
                debug_assert!(changed, "a found step must change the grid");
                stats.record(step.kind());
                grid.check_consistency()?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Reports the step the next call to [`step`](Self::step) would commit,
    /// leaving the grid untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if the grid is inconsistent.
    pub fn find_step(
        &self,
        grid: &TechniqueGrid,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        grid.check_consistency()?;
        for technique in &self.techniques {
            if let Some(step) = technique.find_step(grid)? {
                return Ok(Some(step));
            }
        }
        Ok(None)
    }

    /// Reports the cheapest available step whose pattern involves `target`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if the grid is inconsistent.
    pub fn find_step_at(
        &self,
        grid: &TechniqueGrid,
        target: Position,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        grid.check_consistency()?;
        for technique in &self.techniques {
            if let Some(step) = technique.find_step_at(grid, target)? {
                return Ok(Some(step));
            }
        }
        Ok(None)
    }

    /// Commits steps until the grid is solved or the catalogue runs dry.
    ///
    /// Returns the solved flag together with the step counts of the run.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if the grid becomes inconsistent
    /// during solving.
    ///
    /// # Examples
    ///
    /// ```
    /// use ninefold_solver::{TechniqueGrid, TechniqueSolver};
    ///
    /// let solver = TechniqueSolver::with_all_techniques();
    /// let mut grid = TechniqueGrid::new();
    ///
    /// let (solved, _stats) = solver.solve(&mut grid)?;
    /// assert!(!solved);
    /// # Ok::<(), ninefold_solver::SolverError>(())
    /// ```
    pub fn solve(
        &self,
        grid: &mut TechniqueGrid,
    ) -> Result<(bool, TechniqueSolverStats), SolverError> {
        let mut stats = TechniqueSolverStats::new();
        let solved = self.solve_with_stats(grid, &mut stats)?;
        Ok((solved, stats))
    }

    /// Like [`solve`](Self::solve), but records into an existing statistics
    /// object so counts can accumulate across several runs.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if the grid becomes inconsistent
    /// during solving.
    pub fn solve_with_stats(
        &self,
        grid: &mut TechniqueGrid,
        stats: &mut TechniqueSolverStats,
    ) -> Result<bool, SolverError> {
        while self.step(grid, stats)? {
            if grid.is_solved()? {
                return Ok(true);
            }
        }
        Ok(grid.is_solved()?)
    }
}
