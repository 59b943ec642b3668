//! Index type and semantics for 81-element containers.

use crate::Position;

/// An index into an 81-element container (board cells in row-major order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index81 {
    index: u8,
}

impl Index81 {
    /// Creates a new index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in the range 0-80.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(index < 81);
        Self { index }
    }

    /// Returns the underlying index value (0-80).
    #[must_use]
    pub const fn index(self) -> u8 {
        self.index
    }

    pub(crate) const fn bit(self) -> u128 {
        1 << self.index
    }

    /// Returns an iterator over all 81 indices in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..81).map(Self::new)
    }
}

/// Defines how values map onto indices in 81-element containers.
pub trait Index81Semantics {
    /// The user-facing value type.
    type Value;

    /// Converts a value to an index.
    ///
    /// # Panics
    ///
    /// Should panic if the value has no valid index.
    fn to_index(value: Self::Value) -> Index81;

    /// Converts an index back to a value.
    fn from_index(index: Index81) -> Self::Value;
}

/// Semantics mapping [`Position`] to row-major board indices (`y * 9 + x`).
#[derive(Debug)]
pub struct PositionSemantics;

impl Index81Semantics for PositionSemantics {
    type Value = Position;

    fn to_index(value: Position) -> Index81 {
        Index81::new(value.index())
    }

    fn from_index(index: Index81) -> Position {
        Position::from_index(index.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_semantics_round_trip() {
        for pos in Position::ALL {
            let index = PositionSemantics::to_index(pos);
            assert_eq!(index.index(), pos.index());
            assert_eq!(PositionSemantics::from_index(index), pos);
        }
    }

    #[test]
    fn test_position_semantics_is_row_major() {
        let index = PositionSemantics::to_index(Position::new(4, 4));
        assert_eq!(index.index(), 40);
    }
}
