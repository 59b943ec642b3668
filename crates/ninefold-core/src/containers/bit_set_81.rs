use std::{
    fmt,
    iter::FusedIterator,
    marker::PhantomData,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not},
};

use crate::index::{Index81, Index81Semantics};

/// A set over the 81 values of the semantics type `S`, stored as an 81-bit
/// mask.
///
/// With [`PositionSemantics`](crate::index::PositionSemantics) this is a set
/// of board positions.
///
/// # Examples
///
/// ```
/// use ninefold_core::{DigitPositions, Position};
///
/// let mut set = DigitPositions::EMPTY;
/// set.insert(Position::new(0, 0));
/// set.insert(Position::new(8, 8));
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(Position::new(8, 8)));
/// ```
pub struct BitSet81<S> {
    bits: u128,
    _semantics: PhantomData<S>,
}

impl<S> BitSet81<S> {
    const MASK: u128 = (1 << 81) - 1;

    /// The empty set.
    pub const EMPTY: Self = Self::from_bits(0);

    /// The set containing all 81 values.
    pub const FULL: Self = Self::from_bits(Self::MASK);

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    pub(crate) const fn from_bits(bits: u128) -> Self {
        debug_assert!(bits & !Self::MASK == 0);
        Self {
            bits,
            _semantics: PhantomData,
        }
    }

    pub(crate) const fn bits(self) -> u128 {
        self.bits
    }

    /// Returns the number of values in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if the set contains no values.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns the values in `self` that are not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self::from_bits(self.bits & !other.bits)
    }

    /// Returns the values in either `self` or `other`.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self::from_bits(self.bits | other.bits)
    }

    /// Returns the values in both `self` and `other`.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self::from_bits(self.bits & other.bits)
    }

    /// Returns `true` if every value in `self` is also in `other`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.bits & !other.bits == 0
    }

    /// Returns `true` if every value in `other` is also in `self`.
    #[must_use]
    pub const fn is_superset(self, other: Self) -> bool {
        other.is_subset(self)
    }
}

impl<S> BitSet81<S>
where
    S: Index81Semantics,
{
    /// Creates a set containing a single value.
    #[must_use]
    pub fn from_elem(value: S::Value) -> Self {
        Self::from_bits(S::to_index(value).bit())
    }

    /// Inserts a value, returning `true` if it was not already present.
    pub fn insert(&mut self, value: S::Value) -> bool {
        let bit = S::to_index(value).bit();
        let inserted = self.bits & bit == 0;
        self.bits |= bit;
        inserted
    }

    /// Removes a value, returning `true` if it was present.
    pub fn remove(&mut self, value: S::Value) -> bool {
        let bit = S::to_index(value).bit();
        let removed = self.bits & bit != 0;
        self.bits &= !bit;
        removed
    }

    /// Returns `true` if the set contains the value.
    #[must_use]
    pub fn contains(self, value: S::Value) -> bool {
        self.bits & S::to_index(value).bit() != 0
    }

    /// If the set contains exactly one value, returns it.
    #[must_use]
    pub fn as_single(self) -> Option<S::Value> {
        if self.bits.count_ones() != 1 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let index = self.bits.trailing_zeros() as u8;
        Some(S::from_index(Index81::new(index)))
    }

    /// Returns an iterator over the values in ascending index order.
    #[must_use]
    pub fn iter(self) -> BitSet81Iter<S> {
        BitSet81Iter {
            bits: self.bits,
            _semantics: PhantomData,
        }
    }
}

impl<S> FromIterator<S::Value> for BitSet81<S>
where
    S: Index81Semantics,
{
    fn from_iter<I: IntoIterator<Item = S::Value>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<S> IntoIterator for BitSet81<S>
where
    S: Index81Semantics,
{
    type Item = S::Value;
    type IntoIter = BitSet81Iter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S> BitAnd for BitSet81<S> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl<S> BitAndAssign for BitSet81<S> {
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits &= rhs.bits;
    }
}

impl<S> BitOr for BitSet81<S> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl<S> BitOrAssign for BitSet81<S> {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl<S> Not for BitSet81<S> {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_bits(!self.bits & Self::MASK)
    }
}

// Manual impls: deriving would put bounds on the phantom semantics parameter.

impl<S> Clone for BitSet81<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for BitSet81<S> {}

impl<S> PartialEq for BitSet81<S> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<S> Eq for BitSet81<S> {}

impl<S> Default for BitSet81<S> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<S> fmt::Debug for BitSet81<S>
where
    S: Index81Semantics,
    S::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the values of a [`BitSet81`] in ascending index order.
#[derive(Debug, Clone)]
pub struct BitSet81Iter<S> {
    bits: u128,
    _semantics: PhantomData<S>,
}

impl<S> Iterator for BitSet81Iter<S>
where
    S: Index81Semantics,
{
    type Item = S::Value;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let index = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some(S::from_index(Index81::new(index)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl<S> FusedIterator for BitSet81Iter<S> where S: Index81Semantics {}
impl<S> ExactSizeIterator for BitSet81Iter<S> where S: Index81Semantics {}
