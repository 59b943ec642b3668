use std::{
    fmt::{self, Display},
    ops::Index,
    str::FromStr,
};

use crate::{Digit, Position, containers::Array81, index::PositionSemantics};

/// A 9×9 grid of decided digits, with empty cells represented as `None`.
///
/// This is the plain board representation: puzzle givens, user entries, and
/// full solutions are all `DigitGrid`s. Candidate bookkeeping lives in
/// [`CandidateGrid`](crate::CandidateGrid).
///
/// # Examples
///
/// ```
/// use ninefold_core::{Digit, DigitGrid, Position};
///
/// let mut grid = DigitGrid::new();
/// grid.set(Position::new(0, 0), Some(Digit::D5));
/// assert_eq!(grid[Position::new(0, 0)], Some(Digit::D5));
/// assert_eq!(grid.count_filled(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DigitGrid {
    cells: Array81<Option<Digit>, PositionSemantics>,
}

impl DigitGrid {
    /// Creates an empty grid.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: Array81::from_array([None; 81]),
        }
    }

    /// Returns the digit at the position, or `None` if the cell is empty.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Digit> {
        self.cells[pos]
    }

    /// Sets or clears the digit at the position.
    pub fn set(&mut self, pos: Position, digit: Option<Digit>) {
        self.cells[pos] = digit;
    }

    /// Returns the number of filled cells.
    #[must_use]
    pub fn count_filled(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Returns `true` if every cell is filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

impl Index<Position> for DigitGrid {
    type Output = Option<Digit>;

    fn index(&self, pos: Position) -> &Option<Digit> {
        &self.cells[pos]
    }
}

/// Error parsing a [`DigitGrid`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseDigitGridError {
    /// The string contains a character that is not a digit, a placeholder, or
    /// whitespace.
    #[display("invalid character in grid: {c:?}")]
    InvalidCharacter {
        /// The offending character.
        c: char,
    },
    /// The string does not describe exactly 81 cells.
    #[display("grid has {count} cells, expected 81")]
    WrongCellCount {
        /// The number of cells found.
        count: usize,
    },
}

impl FromStr for DigitGrid {
    type Err = ParseDigitGridError;

    /// Parses a grid from 81 cell characters.
    ///
    /// `1`-`9` are digits; `.`, `_`, and `0` are empty cells; whitespace is
    /// ignored, so both single-line and row-per-line layouts parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid = Self::new();
        let mut positions = Position::ALL.iter();
        let mut count = 0usize;
        for c in s.chars() {
            if c.is_whitespace() {
                continue;
            }
            let value = match c {
                '.' | '_' | '0' => None,
                '1'..='9' => {
                    #[expect(clippy::cast_possible_truncation)]
                    let value = c as u8 - b'0';
                    Some(Digit::from_value(value))
                }
                _ => return Err(ParseDigitGridError::InvalidCharacter { c }),
            };
            if let Some(&pos) = positions.next() {
                grid.set(pos, value);
            }
            count += 1;
        }
        if count != 81 {
            return Err(ParseDigitGridError::WrongCellCount { count });
        }
        Ok(grid)
    }
}

impl Display for DigitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..9u8 {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..9u8 {
                match self[Position::new(x, y)] {
                    Some(digit) => write!(f, "{digit}")?,
                    None => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_line() {
        let s = "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
        let grid: DigitGrid = s.parse().unwrap();
        assert_eq!(grid[Position::new(0, 0)], Some(Digit::D5));
        assert_eq!(grid[Position::new(1, 0)], Some(Digit::D3));
        assert_eq!(grid[Position::new(2, 0)], None);
        assert_eq!(grid[Position::new(8, 8)], Some(Digit::D9));
        assert_eq!(grid.count_filled(), 30);
    }

    #[test]
    fn test_parse_multi_line_with_placeholders() {
        let grid: DigitGrid = "
            123 456 789
            000 000 000
            ... ... ...
            ___ ___ ___
            000 000 000
            000 000 000
            000 000 000
            000 000 000
            987 654 321
        "
        .parse()
        .unwrap();
        assert_eq!(grid[Position::new(0, 0)], Some(Digit::D1));
        assert_eq!(grid[Position::new(4, 1)], None);
        assert_eq!(grid[Position::new(4, 3)], None);
        assert_eq!(grid[Position::new(0, 8)], Some(Digit::D9));
        assert_eq!(grid.count_filled(), 18);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "abc".parse::<DigitGrid>(),
            Err(ParseDigitGridError::InvalidCharacter { c: 'a' })
        );
        assert_eq!(
            "123".parse::<DigitGrid>(),
            Err(ParseDigitGridError::WrongCellCount { count: 3 })
        );
        let too_long = "0".repeat(82);
        assert_eq!(
            too_long.parse::<DigitGrid>(),
            Err(ParseDigitGridError::WrongCellCount { count: 82 })
        );
    }

    #[test]
    fn test_display_round_trip() {
        let s = "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
        let grid: DigitGrid = s.parse().unwrap();
        let rendered = grid.to_string();
        assert_eq!(rendered.lines().count(), 9);
        let reparsed: DigitGrid = rendered.parse().unwrap();
        assert_eq!(reparsed, grid);
    }

    #[test]
    fn test_is_complete() {
        let mut grid = DigitGrid::new();
        assert!(!grid.is_complete());
        for pos in Position::ALL {
            grid.set(pos, Some(Digit::D1));
        }
        assert!(grid.is_complete());
    }
}
