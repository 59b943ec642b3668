use ninefold_core::{
    Digit, DigitGrid, DigitSet, House, Position, containers::Array81, index::PositionSemantics,
};
use ninefold_generator::{Difficulty, GeneratedPuzzle, PuzzleGenerator};
use ninefold_solver::TechniqueGrid;

use crate::Hint;

/// One cell of a gameplay board.
///
/// A cell holds its decided digit (if any), the given and wrongness flags, and
/// three candidate annotations: notes the player wrote (`user_notes`), notes
/// the auto-fill feature computed (`auto_notes`), and candidates the hint
/// system has proven impossible (`eliminated_notes`). Eliminated notes are
/// kept apart from the other two so the player can see what a hint struck out.
///
/// Invariant: a cell with a value has no notes of any kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    value: Option<Digit>,
    is_initial: bool,
    is_wrong: bool,
    user_notes: DigitSet,
    auto_notes: DigitSet,
    eliminated_notes: DigitSet,
}

impl Cell {
    const EMPTY: Self = Self {
        value: None,
        is_initial: false,
        is_wrong: false,
        user_notes: DigitSet::EMPTY,
        auto_notes: DigitSet::EMPTY,
        eliminated_notes: DigitSet::EMPTY,
    };

    const fn given(digit: Digit) -> Self {
        Self {
            value: Some(digit),
            is_initial: true,
            is_wrong: false,
            user_notes: DigitSet::EMPTY,
            auto_notes: DigitSet::EMPTY,
            eliminated_notes: DigitSet::EMPTY,
        }
    }

    /// Returns the decided digit, or `None` if the cell is open.
    #[must_use]
    pub const fn value(&self) -> Option<Digit> {
        self.value
    }

    /// Returns `true` if the cell is one of the puzzle's givens.
    ///
    /// Givens are fixed at board creation and can never be modified.
    #[must_use]
    pub const fn is_initial(&self) -> bool {
        self.is_initial
    }

    /// Returns `true` if the cell's value disagrees with the solution.
    #[must_use]
    pub const fn is_wrong(&self) -> bool {
        self.is_wrong
    }

    /// Returns the notes the player entered by hand.
    #[must_use]
    pub const fn user_notes(&self) -> DigitSet {
        self.user_notes
    }

    /// Returns the notes the auto-fill feature computed.
    #[must_use]
    pub const fn auto_notes(&self) -> DigitSet {
        self.auto_notes
    }

    /// Returns the candidates the hint system has proven impossible.
    #[must_use]
    pub const fn eliminated_notes(&self) -> DigitSet {
        self.eliminated_notes
    }

    /// Returns the candidates currently visible to the player, user and auto
    /// notes combined.
    #[must_use]
    pub const fn visible_notes(&self) -> DigitSet {
        self.user_notes.union(self.auto_notes)
    }

    fn clear_notes(&mut self) {
        self.user_notes = DigitSet::EMPTY;
        self.auto_notes = DigitSet::EMPTY;
        self.eliminated_notes = DigitSet::EMPTY;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Errors raised by gameplay operations on a [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// The operation targeted one of the puzzle's givens.
    #[display("given cells cannot be modified")]
    CannotModifyGivenCell,
    /// A note operation targeted a cell that already holds a value.
    #[display("cells with a value cannot hold notes")]
    CannotNoteFilledCell,
}

/// A playable Sudoku board paired with its solution.
///
/// The board owns the gameplay state between engine calls: values the player
/// placed, their notes, and the eliminations hints have applied. It is created
/// from a [`GeneratedPuzzle`] and discarded on a new game. The solution from
/// the same generation pass stays attached so wrong entries can be flagged and
/// hints verified.
///
/// # Examples
///
/// ```no_run
/// use ninefold_game::{Board, Difficulty};
///
/// let board = Board::generate(Difficulty::Easy);
/// assert_eq!(board.given_count(), 41);
/// assert!(!board.is_solved());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Array81<Cell, PositionSemantics>,
    solution: DigitGrid,
}

impl Board {
    /// Creates a board from a generated puzzle.
    ///
    /// Every filled cell of the problem becomes a given; the rest start empty.
    #[must_use]
    pub fn new(puzzle: &GeneratedPuzzle) -> Self {
        Self::from_grids(&puzzle.problem, &puzzle.solution)
    }

    /// Creates a board from a problem grid and its solution.
    #[must_use]
    pub fn from_grids(problem: &DigitGrid, solution: &DigitGrid) -> Self {
        let mut cells = Array81::from_array([const { Cell::EMPTY }; 81]);
        for pos in Position::ALL {
            if let Some(digit) = problem.get(pos) {
                cells[pos] = Cell::given(digit);
            }
        }
        Self {
            cells,
            solution: *solution,
        }
    }

    /// Generates a new puzzle at the requested difficulty and wraps it in a
    /// playable board.
    ///
    /// This blocks until generation succeeds; see
    /// [`PuzzleGenerator::generate`] for the retry behavior.
    #[must_use]
    pub fn generate(difficulty: Difficulty) -> Self {
        Self::new(&PuzzleGenerator::new().generate(difficulty))
    }

    /// Returns the cell at a position.
    #[must_use]
    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[pos]
    }

    /// Returns the puzzle's solution.
    #[must_use]
    pub fn solution(&self) -> &DigitGrid {
        &self.solution
    }

    /// Returns the number of givens on the board.
    #[must_use]
    pub fn given_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_initial).count()
    }

    /// Extracts the decided digits, givens and player entries alike.
    #[must_use]
    pub fn to_digit_grid(&self) -> DigitGrid {
        let mut grid = DigitGrid::new();
        for pos in Position::ALL {
            grid.set(pos, self.cells[pos].value);
        }
        grid
    }

    /// Returns `true` if every cell is filled and every house holds each
    /// digit exactly once.
    ///
    /// Any valid completion counts, not just the stored solution.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        let grid = self.to_digit_grid();
        if !grid.is_complete() {
            return false;
        }
        House::ALL.into_iter().all(|house| {
            let digits: DigitSet = house
                .positions()
                .iter()
                .filter_map(|pos| grid.get(pos))
                .collect();
            digits == DigitSet::FULL
        })
    }

    /// Computes the candidates for a cell from the current placements.
    ///
    /// This is the arithmetic candidate set: all digits minus those decided
    /// in the cell's row, column, and box. It ignores notes and eliminations,
    /// so calling it twice on an unchanged board returns the same set. The UI
    /// uses it to populate auto-notes.
    #[must_use]
    pub fn candidates(&self, pos: Position) -> DigitSet {
        let mut set = DigitSet::FULL;
        for peer in pos.house_peers() {
            if let Some(digit) = self.cells[peer].value {
                set.remove(digit);
            }
        }
        set
    }

    /// Places a digit, flagging it as wrong if it disagrees with the
    /// solution.
    ///
    /// The cell's notes are cleared, and the digit is struck from the user
    /// and auto notes of every peer. Eliminated notes of peers are untouched:
    /// they record deductions, not bookkeeping.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotModifyGivenCell`] if the cell is a given.
    pub fn set_value(&mut self, pos: Position, digit: Digit) -> Result<(), GameError> {
        if self.cells[pos].is_initial {
            return Err(GameError::CannotModifyGivenCell);
        }
        let cell = &mut self.cells[pos];
        cell.value = Some(digit);
        cell.is_wrong = self.solution.get(pos) != Some(digit);
        cell.clear_notes();

        for peer in pos.house_peers() {
            let peer_cell = &mut self.cells[peer];
            peer_cell.user_notes.remove(digit);
            peer_cell.auto_notes.remove(digit);
        }
        Ok(())
    }

    /// Clears the player's digit from a cell.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotModifyGivenCell`] if the cell is a given.
    pub fn clear_value(&mut self, pos: Position) -> Result<(), GameError> {
        if self.cells[pos].is_initial {
            return Err(GameError::CannotModifyGivenCell);
        }
        let cell = &mut self.cells[pos];
        cell.value = None;
        cell.is_wrong = false;
        Ok(())
    }

    /// Toggles a digit in the cell's user notes.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotModifyGivenCell`] if the cell is a given,
    /// or [`GameError::CannotNoteFilledCell`] if it already holds a value.
    pub fn toggle_user_note(&mut self, pos: Position, digit: Digit) -> Result<(), GameError> {
        let cell = self.open_cell_mut(pos)?;
        if !cell.user_notes.remove(digit) {
            cell.user_notes.insert(digit);
        }
        Ok(())
    }

    /// Replaces the cell's auto notes with its computed candidates.
    ///
    /// Candidates the hint system has eliminated stay struck out: they are
    /// subtracted from the fresh set and remain in `eliminated_notes`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotModifyGivenCell`] if the cell is a given,
    /// or [`GameError::CannotNoteFilledCell`] if it already holds a value.
    pub fn fill_auto_notes(&mut self, pos: Position) -> Result<(), GameError> {
        let candidates = self.candidates(pos);
        let cell = self.open_cell_mut(pos)?;
        cell.auto_notes = candidates.difference(cell.eliminated_notes);
        Ok(())
    }

    /// Fills auto notes for every open cell.
    pub fn fill_all_auto_notes(&mut self) {
        for pos in Position::ALL {
            let candidates = self.candidates(pos);
            let cell = &mut self.cells[pos];
            if cell.value.is_none() {
                cell.auto_notes = candidates.difference(cell.eliminated_notes);
            }
        }
    }

    /// Applies a hint to the board.
    ///
    /// A solve hint places its digit through [`set_value`](Self::set_value).
    /// An elimination hint moves each struck digit out of the cell's user and
    /// auto notes into its eliminated notes, so the strike stays visible.
    /// Cells that already hold a value are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotModifyGivenCell`] if a solve hint targets a
    /// given, which a hint produced by [`find_hint`](crate::find_hint) on
    /// this board never does.
    pub fn apply_hint(&mut self, hint: &Hint) -> Result<(), GameError> {
        if let Some(solve) = hint.solve() {
            return self.set_value(solve.position, solve.digit);
        }
        for elimination in hint.eliminations() {
            let cell = &mut self.cells[elimination.position];
            if cell.value.is_some() {
                continue;
            }
            cell.user_notes.remove(elimination.digit);
            cell.auto_notes.remove(elimination.digit);
            cell.eliminated_notes.insert(elimination.digit);
        }
        Ok(())
    }

    /// Builds the deduction engine's view of the board.
    ///
    /// Decided cells enter as propagated placements; eliminated notes are
    /// subtracted from the remaining candidates, so the engine only reasons
    /// over candidates it has not already disproven.
    pub(crate) fn deduction_grid(&self) -> TechniqueGrid {
        let mut grid = TechniqueGrid::from_puzzle(&self.to_digit_grid());
        for pos in Position::ALL {
            let cell = &self.cells[pos];
            if cell.value.is_none() {
                for digit in cell.eliminated_notes {
                    grid.remove_candidate(pos, digit);
                }
            }
        }
        grid
    }

    fn open_cell_mut(&mut self, pos: Position) -> Result<&mut Cell, GameError> {
        let cell = &mut self.cells[pos];
        if cell.is_initial {
            return Err(GameError::CannotModifyGivenCell);
        }
        if cell.value.is_some() {
            return Err(GameError::CannotNoteFilledCell);
        }
        Ok(cell)
    }
}
