use std::fmt::{self, Display};

use crate::{DigitPositions, Position};

/// One of the 27 units a digit appears exactly once in: a row, a column, or
/// a 3×3 box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum House {
    /// The row at height `y`.
    Row {
        /// Row index (0-8, top to bottom).
        y: u8,
    },
    /// The column at offset `x`.
    Column {
        /// Column index (0-8, left to right).
        x: u8,
    },
    /// The 3×3 box numbered `index`.
    Box {
        /// Box index (0-8, row-major over the nine boxes).
        index: u8,
    },
}

impl House {
    /// The nine rows, top to bottom.
    pub const ROWS: [Self; 9] = {
        let mut rows = [Self::Row { y: 0 }; 9];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            rows[i] = Self::Row { y: i as u8 };
            i += 1;
        }
        rows
    };

    /// The nine columns, left to right.
    pub const COLUMNS: [Self; 9] = {
        let mut columns = [Self::Column { x: 0 }; 9];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            columns[i] = Self::Column { x: i as u8 };
            i += 1;
        }
        columns
    };

    /// The nine boxes, row-major.
    pub const BOXES: [Self; 9] = {
        let mut boxes = [Self::Box { index: 0 }; 9];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            boxes[i] = Self::Box { index: i as u8 };
            i += 1;
        }
        boxes
    };

    /// All 27 houses: rows first, then columns, then boxes.
    pub const ALL: [Self; 27] = {
        let mut all = [Self::Row { y: 0 }; 27];
        let mut i = 0;
        while i < 9 {
            all[i] = Self::ROWS[i];
            all[i + 9] = Self::COLUMNS[i];
            all[i + 18] = Self::BOXES[i];
            i += 1;
        }
        all
    };

    /// Maps a house-relative cell index (0-8) to the board [`Position`] it
    /// names. Row and column cells count along the line; box cells count
    /// row-major inside the box.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in the range 0-8.
    #[must_use]
    #[inline]
    pub fn position_from_cell_index(self, i: u8) -> Position {
        assert!(i < 9);
        match self {
            House::Row { y } => Position::new(i, y),
            House::Column { x } => Position::new(x, i),
            House::Box { index } => Position::from_box(index, i),
        }
    }

    /// Returns the nine positions the house covers.
    #[must_use]
    pub fn positions(self) -> DigitPositions {
        match self {
            House::Row { y } => DigitPositions::ROW_POSITIONS[y],
            House::Column { x } => DigitPositions::COLUMN_POSITIONS[x],
            House::Box { index } => DigitPositions::BOX_POSITIONS[index],
        }
    }
}

impl Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            House::Row { y } => write!(f, "row {y}"),
            House::Column { x } => write!(f, "column {x}"),
            House::Box { index } => write!(f, "box {index}"),
        }
    }
}
