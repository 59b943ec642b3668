use ninefold_core::{Digit, DigitPositions, Position};
use ninefold_generator::Difficulty;
use ninefold_solver::{
    TechniqueApplication, TechniqueStep,
    technique::{self, TechniqueKind},
};

use crate::Board;

/// A single placement or candidate strike suggested by a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintMove {
    /// The cell the move acts on.
    pub position: Position,
    /// The digit placed or struck.
    pub digit: Digit,
}

/// A deduction found on the board, ready to present to the player.
///
/// A hint names the technique behind it, marks the cells that form the
/// pattern and its context, and carries the concrete moves applying it makes:
/// either one placement (a *solve* hint) or a batch of candidate strikes (an
/// *elimination* hint). [`Board::apply_hint`] commits the moves.
#[derive(Debug, Clone)]
pub struct Hint {
    kind: TechniqueKind,
    name: &'static str,
    primary_cells: DigitPositions,
    secondary_cells: DigitPositions,
    eliminations: Vec<HintMove>,
    solve: Option<HintMove>,
}

impl Hint {
    fn from_step(step: &dyn TechniqueStep) -> Self {
        let mut eliminations = vec![];
        let mut solve = None;
        for application in step.application() {
            match application {
                TechniqueApplication::Placement { position, digit } => {
                    solve.get_or_insert(HintMove { position, digit });
                }
                TechniqueApplication::CandidateElimination { positions, digits } => {
                    for position in positions {
                        for digit in digits {
                            eliminations.push(HintMove { position, digit });
                        }
                    }
                }
            }
        }
        Self {
            kind: step.kind(),
            name: step.technique_name(),
            primary_cells: step.condition_cells(),
            secondary_cells: step.secondary_cells(),
            eliminations,
            solve,
        }
    }

    #[cfg(test)]
    pub(crate) fn elimination_for_tests(eliminations: Vec<HintMove>) -> Self {
        Self {
            kind: TechniqueKind::XWing,
            name: TechniqueKind::XWing.name(),
            primary_cells: DigitPositions::EMPTY,
            secondary_cells: DigitPositions::EMPTY,
            eliminations,
            solve: None,
        }
    }

    /// Returns which technique produced the hint.
    #[must_use]
    pub const fn kind(&self) -> TechniqueKind {
        self.kind
    }

    /// Returns the display name of the technique, including its variant where
    /// the technique distinguishes them.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the cells that form the pattern itself.
    #[must_use]
    pub const fn primary_cells(&self) -> DigitPositions {
        self.primary_cells
    }

    /// Returns the cells that give the pattern its context.
    #[must_use]
    pub const fn secondary_cells(&self) -> DigitPositions {
        self.secondary_cells
    }

    /// Returns the candidate strikes applying the hint makes.
    #[must_use]
    pub fn eliminations(&self) -> &[HintMove] {
        &self.eliminations
    }

    /// Returns the placement applying the hint makes, if the hint solves a
    /// cell.
    #[must_use]
    pub const fn solve(&self) -> Option<HintMove> {
        self.solve
    }

    /// Returns whether applying the hint would change something the player
    /// can see.
    ///
    /// A solve hint always qualifies. An elimination hint qualifies only when
    /// at least one strike hits a note currently visible on the board; a
    /// strike against a candidate the player never wrote down teaches
    /// nothing.
    fn is_actionable(&self, board: &Board) -> bool {
        self.solve.is_some()
            || self.eliminations.iter().any(|strike| {
                board
                    .cell(strike.position)
                    .visible_notes()
                    .contains(strike.digit)
            })
    }
}

/// Finds the easiest actionable hint on the board.
///
/// Techniques are tried in catalogue order, capped at the
/// [tier](Difficulty::hint_tier) the difficulty allows, so the hint never
/// reveals a technique the puzzle was not rated for. With a `target`, only
/// patterns whose primary cells include that position are considered.
///
/// Returns `None` when the board is inconsistent (for example after a wrong
/// entry), when no allowed technique applies, or when every applicable
/// elimination lacks a visible note to strike.
#[must_use]
pub fn find_hint(board: &Board, difficulty: Difficulty, target: Option<Position>) -> Option<Hint> {
    let grid = board.deduction_grid();
    grid.check_consistency().ok()?;

    for technique in technique::techniques_up_to(difficulty.hint_tier()) {
        let found = match target {
            Some(pos) => technique.find_step_at(&grid, pos),
            None => technique.find_step(&grid),
        };
        // A technique that detects an invalid state has no hint to offer.
        let Ok(Some(step)) = found else {
            continue;
        };
        let hint = Hint::from_step(step.as_ref());
        if hint.is_actionable(board) {
            return Some(hint);
        }
    }
    None
}
