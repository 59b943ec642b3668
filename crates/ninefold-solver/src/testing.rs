//! A harness for exercising technique implementations.
//!
//! [`TechniqueTester`] drives one technique over a prepared grid and offers
//! chained assertions on the outcome. Besides the explicit assertions, every
//! sweep is cross-checked against the technique's own `find_step`: a sweep
//! must change the grid exactly when a step is on offer, and the offered
//! step's applications must show up in the swept grid. Technique tests get
//! that invariant checked for free.

use std::str::FromStr as _;

use ninefold_core::{Digit, DigitGrid, DigitSet, Position};

use crate::{TechniqueApplication, TechniqueGrid, TechniqueStep, technique::Technique};

/// Drives a technique over a grid and checks the results.
///
/// The tester keeps the grid it started from, so assertions can compare
/// candidates before and after the applied sweeps. Every method consumes and
/// returns the tester for chaining, and assertion failures panic at the
/// calling test through `#[track_caller]`.
#[derive(Debug)]
pub struct TechniqueTester {
    start: TechniqueGrid,
    grid: TechniqueGrid,
    cross_check: bool,
}

impl TechniqueTester {
    /// Creates a tester over the given starting grid.
    pub fn new<T>(start: T) -> Self
    where
        T: Into<TechniqueGrid>,
    {
        let start = start.into();
        let grid = start.clone();
        Self {
            start,
            grid,
            cross_check: true,
        }
    }

    /// Creates a tester from a puzzle string in [`DigitGrid`] notation, where
    /// `1`-`9` are givens, `.`, `_`, and `0` are open cells, and whitespace
    /// is skipped.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a well-formed grid.
    #[track_caller]
    pub fn from_grid_str(s: &str) -> Self {
        Self::new(DigitGrid::from_str(s).unwrap())
    }

    /// Turns off the `find_step`/`apply` cross-check for this tester.
    #[must_use]
    pub fn without_find_step_consistency(mut self) -> Self {
        self.cross_check = false;
        self
    }

    /// Runs one sweep of the technique.
    ///
    /// # Panics
    ///
    /// Panics if the technique errors or fails the cross-check.
    #[track_caller]
    pub fn apply_once<T>(mut self, technique: &T) -> Self
    where
        T: Technique,
    {
        self.sweep(technique);
        self
    }

    /// Runs sweeps of the technique until one reports no change.
    ///
    /// # Panics
    ///
    /// Panics if the technique errors or fails the cross-check.
    #[track_caller]
    pub fn apply_until_stuck<T>(mut self, technique: &T) -> Self
    where
        T: Technique,
    {
        while self.sweep(technique) {}
        self
    }

    /// Runs a fixed number of sweeps of the technique.
    ///
    /// # Panics
    ///
    /// Panics if the technique errors or fails the cross-check.
    #[track_caller]
    pub fn apply_times<T>(mut self, technique: &T, times: usize) -> Self
    where
        T: Technique,
    {
        for _ in 0..times {
            self.sweep(technique);
        }
        self
    }

    #[track_caller]
    fn sweep<T>(&mut self, technique: &T) -> bool
    where
        T: Technique,
    {
        let before = self.grid.clone();
        let changed = technique.apply(&mut self.grid).unwrap();
        if self.cross_check {
            let name = technique.name();
            match technique.find_step(&before).unwrap() {
                Some(step) => {
                    assert!(
                        changed,
                        "{name} offered a step but its sweep left the grid alone"
                    );
                    self.assert_step_realized(&before, step.as_ref(), name);
                }
                None => {
                    assert!(!changed, "{name} swept changes without offering a step");
                    for digit in Digit::ALL {
                        assert_eq!(
                            before.digit_positions(digit),
                            self.grid.digit_positions(digit),
                            "{name} moved candidates for {digit} without offering a step"
                        );
                    }
                }
            }
        }
        changed
    }

    /// Checks that everything the step promised is visible in the swept grid.
    #[track_caller]
    fn assert_step_realized(&self, before: &TechniqueGrid, step: &dyn TechniqueStep, name: &str) {
        for application in step.application() {
            match application {
                TechniqueApplication::Placement { position, digit } => {
                    let candidates = self.grid.candidates_at(position);
                    assert_eq!(
                        candidates.as_single(),
                        Some(digit),
                        "{name} promised to place {digit} at {position}, \
                         but the cell holds {candidates:?} after the sweep"
                    );
                }
                TechniqueApplication::CandidateElimination { positions, digits } => {
                    for pos in positions {
                        let leftover = self.grid.candidates_at(pos)
                            & before.candidates_at(pos)
                            & digits;
                        assert!(
                            leftover.is_empty(),
                            "{name} promised to strike {digits:?} from {pos}, \
                             but {leftover:?} survived the sweep"
                        );
                    }
                }
            }
        }
    }

    /// Asserts that a previously open cell is now decided as `digit`.
    ///
    /// # Panics
    ///
    /// Panics if the cell started decided, is still open, or holds a
    /// different digit.
    #[track_caller]
    pub fn assert_placed(self, pos: Position, digit: Digit) -> Self {
        let start = self.start.candidates_at(pos);
        let current = self.grid.candidates_at(pos);

        assert!(
            start.len() > 1,
            "cell {pos} was already decided at the start: {start:?}"
        );
        assert_eq!(
            current.as_single(),
            Some(digit),
            "expected cell {pos} to be decided as {digit}, \
             but its candidates are {current:?}"
        );
        self
    }

    /// Asserts that the given candidates are gone from a cell. The cell must
    /// have held all of them at the start; other candidates may have been
    /// removed as well.
    ///
    /// # Panics
    ///
    /// Panics if a digit was missing at the start or survives now.
    #[track_caller]
    pub fn assert_removed_includes<C>(self, pos: Position, digits: C) -> Self
    where
        C: IntoIterator<Item = Digit>,
    {
        let digits = DigitSet::from_iter(digits);
        let start = self.start.candidates_at(pos);
        let current = self.grid.candidates_at(pos);
        assert_eq!(
            start & digits,
            digits,
            "cell {pos} never held all of {digits:?}; it started with {start:?}"
        );
        assert!(
            (current & digits).is_empty(),
            "expected {digits:?} gone from {pos}, but {:?} is still there",
            current & digits
        );
        self
    }

    /// Asserts that exactly the given candidates were removed from a cell,
    /// and nothing else.
    ///
    /// # Panics
    ///
    /// Panics if the removed set differs from `digits`.
    #[track_caller]
    pub fn assert_removed_exact<C>(self, pos: Position, digits: C) -> Self
    where
        C: IntoIterator<Item = Digit>,
    {
        let digits = DigitSet::from_iter(digits);
        let start = self.start.candidates_at(pos);
        let current = self.grid.candidates_at(pos);
        let removed = start.difference(current);
        assert_eq!(
            removed, digits,
            "expected exactly {digits:?} removed from {pos}, \
             but the removed set is {removed:?} (start {start:?}, now {current:?})"
        );
        self
    }

    /// Asserts that a cell's candidates are exactly what they started as.
    ///
    /// # Panics
    ///
    /// Panics if any candidate was added or removed.
    #[track_caller]
    pub fn assert_no_change(self, pos: Position) -> Self {
        let start = self.start.candidates_at(pos);
        let current = self.grid.candidates_at(pos);
        assert_eq!(
            start, current,
            "candidates at {pos} moved from {start:?} to {current:?}"
        );
        self
    }
}
