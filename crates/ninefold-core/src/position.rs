//! Board positions on the 9×9 grid.

use std::fmt::{self, Display};

use crate::{DigitPositions, House};

/// A cell position on the 9×9 board.
///
/// `x` is the column (0-8, left to right) and `y` is the row (0-8, top to
/// bottom). Cells are numbered row-major, so the linear index is `y * 9 + x`.
///
/// # Examples
///
/// ```
/// use ninefold_core::Position;
///
/// let pos = Position::new(4, 2); // column 4, row 2
/// assert_eq!(pos.x(), 4);
/// assert_eq!(pos.y(), 2);
/// assert_eq!(pos.index(), 22);
/// assert_eq!(pos.box_index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// All 81 positions in row-major order.
    pub const ALL: [Self; 81] = {
        let mut all = [Self { x: 0, y: 0 }; 81];
        let mut i = 0u8;
        while i < 81 {
            all[i as usize] = Self::from_index(i);
            i += 1;
        }
        all
    };

    /// Positions of each row, indexed by `y`.
    pub const ROWS: [[Self; 9]; 9] = {
        let mut rows = [[Self { x: 0, y: 0 }; 9]; 9];
        let mut y = 0u8;
        while y < 9 {
            let mut x = 0u8;
            while x < 9 {
                rows[y as usize][x as usize] = Self::new(x, y);
                x += 1;
            }
            y += 1;
        }
        rows
    };

    /// Positions of each column, indexed by `x`.
    pub const COLUMNS: [[Self; 9]; 9] = {
        let mut columns = [[Self { x: 0, y: 0 }; 9]; 9];
        let mut x = 0u8;
        while x < 9 {
            let mut y = 0u8;
            while y < 9 {
                columns[x as usize][y as usize] = Self::new(x, y);
                y += 1;
            }
            x += 1;
        }
        columns
    };

    /// Positions of each 3×3 box, indexed by box index.
    pub const BOXES: [[Self; 9]; 9] = {
        let mut boxes = [[Self { x: 0, y: 0 }; 9]; 9];
        let mut b = 0u8;
        while b < 9 {
            let mut i = 0u8;
            while i < 9 {
                boxes[b as usize][i as usize] = Self::from_box(b, i);
                i += 1;
            }
            b += 1;
        }
        boxes
    };

    /// Creates a position from column `x` and row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is not in the range 0-8.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        assert!(x < 9 && y < 9);
        Self { x, y }
    }

    /// Creates a position from a row-major linear index (0-80).
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in the range 0-80.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        assert!(index < 81);
        Self {
            x: index % 9,
            y: index / 9,
        }
    }

    /// Creates a position from a box index (0-8) and a cell index within the
    /// box (0-8, row-major inside the box).
    ///
    /// # Panics
    ///
    /// Panics if `box_index` or `i` is not in the range 0-8.
    #[must_use]
    pub const fn from_box(box_index: u8, i: u8) -> Self {
        assert!(box_index < 9 && i < 9);
        Self {
            x: (box_index % 3) * 3 + i % 3,
            y: (box_index / 3) * 3 + i / 3,
        }
    }

    /// Returns the column (0-8).
    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Returns the row (0-8).
    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Returns the row-major linear index (0-80).
    #[must_use]
    pub const fn index(self) -> u8 {
        self.y * 9 + self.x
    }

    /// Returns the index of the 3×3 box containing this position (0-8, left to
    /// right, top to bottom).
    #[must_use]
    pub const fn box_index(self) -> u8 {
        (self.y / 3) * 3 + self.x / 3
    }

    /// Returns the cell index within the containing box (0-8, row-major inside
    /// the box).
    #[must_use]
    pub const fn box_cell_index(self) -> u8 {
        (self.y % 3) * 3 + self.x % 3
    }

    /// Returns the top-left position of the box with the given index.
    ///
    /// # Panics
    ///
    /// Panics if `box_index` is not in the range 0-8.
    #[must_use]
    pub const fn box_origin(box_index: u8) -> Self {
        Self::from_box(box_index, 0)
    }

    /// Returns the three houses containing this position: its row, its column,
    /// and its box.
    #[must_use]
    pub const fn houses(self) -> [House; 3] {
        [
            House::Row { y: self.y },
            House::Column { x: self.x },
            House::Box {
                index: self.box_index(),
            },
        ]
    }

    /// Returns every position sharing a house with this one, excluding the
    /// position itself (20 peers).
    #[must_use]
    pub fn house_peers(self) -> DigitPositions {
        let mut peers = DigitPositions::ROW_POSITIONS[self.y]
            | DigitPositions::COLUMN_POSITIONS[self.x]
            | DigitPositions::BOX_POSITIONS[self.box_index()];
        peers.remove(self);
        peers
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, pos) in (0..).zip(Position::ALL) {
            assert_eq!(pos.index(), i);
            assert_eq!(Position::from_index(i), pos);
        }
    }

    #[test]
    fn test_box_layout() {
        assert_eq!(Position::new(0, 0).box_index(), 0);
        assert_eq!(Position::new(8, 0).box_index(), 2);
        assert_eq!(Position::new(4, 4).box_index(), 4);
        assert_eq!(Position::new(0, 8).box_index(), 6);
        assert_eq!(Position::new(8, 8).box_index(), 8);

        assert_eq!(Position::from_box(4, 0), Position::new(3, 3));
        assert_eq!(Position::from_box(4, 8), Position::new(5, 5));
        assert_eq!(Position::box_origin(4), Position::new(3, 3));
    }

    #[test]
    fn test_box_cell_index_round_trip() {
        for pos in Position::ALL {
            assert_eq!(
                Position::from_box(pos.box_index(), pos.box_cell_index()),
                pos
            );
            assert_eq!(
                Position::BOXES[pos.box_index() as usize][pos.box_cell_index() as usize],
                pos
            );
        }
    }

    #[test]
    fn test_rows_and_columns_tables() {
        for y in 0..9u8 {
            for x in 0..9u8 {
                assert_eq!(Position::ROWS[y as usize][x as usize], Position::new(x, y));
                assert_eq!(
                    Position::COLUMNS[x as usize][y as usize],
                    Position::new(x, y)
                );
            }
        }
    }

    #[test]
    fn test_house_peers_count() {
        for pos in Position::ALL {
            let peers = pos.house_peers();
            assert_eq!(peers.len(), 20);
            assert!(!peers.contains(pos));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Position::new(3, 7)), "(3, 7)");
    }

    proptest! {
        #[test]
        fn prop_from_box_round_trip(box_index in 0u8..9, i in 0u8..9) {
            let pos = Position::from_box(box_index, i);
            prop_assert_eq!(pos.box_index(), box_index);
        }
    }
}
