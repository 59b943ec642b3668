//! Index type and semantics for 9-element containers.

use crate::Digit;

/// An index into a 9-element container (range 0-8).
///
/// The range is checked at construction, so downstream container code can
/// index without further bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index9 {
    index: u8,
}

impl Index9 {
    /// Creates a new index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in the range 0-8.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(index < 9);
        Self { index }
    }

    /// Returns the underlying index value (0-8).
    #[must_use]
    pub const fn index(self) -> u8 {
        self.index
    }

    pub(crate) const fn bit(self) -> u16 {
        1 << self.index
    }

    /// Returns an iterator over all 9 indices in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..9).map(Self::new)
    }
}

/// Defines how values map onto indices in 9-element containers.
///
/// Implementors convert between a user-facing value type and [`Index9`];
/// containers use the conversion for indexing and iteration.
pub trait Index9Semantics {
    /// The user-facing value type.
    type Value;

    /// Converts a value to an index.
    ///
    /// # Panics
    ///
    /// Should panic if the value has no valid index.
    fn to_index(value: Self::Value) -> Index9;

    /// Converts an index back to a value.
    fn from_index(index: Index9) -> Self::Value;
}

/// Semantics mapping [`Digit`] 1-9 to indices 0-8.
#[derive(Debug)]
pub struct DigitSemantics;

impl Index9Semantics for DigitSemantics {
    type Value = Digit;

    fn to_index(value: Digit) -> Index9 {
        Index9::new(value.value() - 1)
    }

    fn from_index(index: Index9) -> Digit {
        Digit::from_value(index.index() + 1)
    }
}

/// Semantics mapping a cell index within a house (0-8) to itself.
///
/// Used for house-projection masks, where bit `i` stands for the `i`-th cell
/// of a row, column, or box.
#[derive(Debug)]
pub struct CellIndexSemantics;

impl Index9Semantics for CellIndexSemantics {
    type Value = u8;

    fn to_index(value: u8) -> Index9 {
        assert!(value < 9, "cell index must be 0-8, got {value}");
        Index9::new(value)
    }

    fn from_index(index: Index9) -> u8 {
        index.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_semantics_round_trip() {
        for digit in Digit::ALL {
            let index = DigitSemantics::to_index(digit);
            assert_eq!(DigitSemantics::from_index(index), digit);
        }
        assert_eq!(DigitSemantics::to_index(Digit::D1).index(), 0);
        assert_eq!(DigitSemantics::to_index(Digit::D9).index(), 8);
    }

    #[test]
    fn test_cell_index_semantics_identity() {
        for i in 0..9 {
            assert_eq!(CellIndexSemantics::to_index(i).index(), i);
            assert_eq!(CellIndexSemantics::from_index(Index9::new(i)), i);
        }
    }

    #[test]
    #[should_panic(expected = "cell index must be 0-8")]
    fn test_cell_index_semantics_rejects_nine() {
        let _ = CellIndexSemantics::to_index(9);
    }

    #[test]
    fn test_all_indices() {
        let indices: Vec<_> = Index9::all().collect();
        assert_eq!(indices.len(), 9);
        assert_eq!(indices[0].index(), 0);
        assert_eq!(indices[8].index(), 8);
    }
}
