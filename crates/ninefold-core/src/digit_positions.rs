use crate::{
    House,
    containers::{Array9, BitSet9, BitSet81},
    index::{CellIndexSemantics, PositionSemantics},
};

/// A set of board positions.
///
/// The solver keeps one of these per digit, holding every position where that
/// digit is still a candidate, but the type also serves as a general position
/// set (peers of a cell, cells of a deduction pattern).
pub type DigitPositions = BitSet81<PositionSemantics>;

/// A mask over the 9 cells of a single house.
///
/// Cell indices follow [`House::position_from_cell_index`]: left to right for
/// rows, top to bottom for columns, row-major within boxes.
pub type HouseMask = BitSet9<CellIndexSemantics>;

impl BitSet81<PositionSemantics> {
    /// Positions of each row, indexed by `y`.
    pub const ROW_POSITIONS: Array9<Self, CellIndexSemantics> = {
        let mut rows = [Self::EMPTY; 9];
        let mut y = 0;
        while y < 9 {
            rows[y] = Self::from_bits(0x1FFu128 << (9 * y));
            y += 1;
        }
        Array9::from_array(rows)
    };

    /// Positions of each column, indexed by `x`.
    pub const COLUMN_POSITIONS: Array9<Self, CellIndexSemantics> = {
        let mut columns = [Self::EMPTY; 9];
        let mut x = 0;
        while x < 9 {
            let mut bits = 0u128;
            let mut y = 0;
            while y < 9 {
                bits |= 1 << (9 * y + x);
                y += 1;
            }
            columns[x] = Self::from_bits(bits);
            x += 1;
        }
        Array9::from_array(columns)
    };

    /// Positions of each 3×3 box, indexed by box index.
    pub const BOX_POSITIONS: Array9<Self, CellIndexSemantics> = {
        let mut boxes = [Self::EMPTY; 9];
        let mut b = 0;
        while b < 9 {
            let origin = (b / 3) * 27 + (b % 3) * 3;
            let mut bits = 0u128;
            let mut r = 0;
            while r < 3 {
                let mut c = 0;
                while c < 3 {
                    bits |= 1 << (origin + 9 * r + c);
                    c += 1;
                }
                r += 1;
            }
            boxes[b] = Self::from_bits(bits);
            b += 1;
        }
        Array9::from_array(boxes)
    };

    /// Projects the set onto a house, returning which of the house's 9 cells
    /// are members.
    #[must_use]
    pub fn house_mask(self, house: House) -> HouseMask {
        let mut mask = HouseMask::EMPTY;
        for i in 0..9u8 {
            if self.contains(house.position_from_cell_index(i)) {
                mask.insert(i);
            }
        }
        mask
    }
}
