use std::{
    fmt,
    iter::FusedIterator,
    marker::PhantomData,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not},
};

use crate::index::{Index9, Index9Semantics};

/// A set over the 9 values of the semantics type `S`, stored as a 9-bit mask.
///
/// With [`DigitSemantics`](crate::index::DigitSemantics) this is a set of
/// digits; with [`CellIndexSemantics`](crate::index::CellIndexSemantics) it is
/// a mask over the 9 cells of a house.
///
/// # Examples
///
/// ```
/// use ninefold_core::{Digit, DigitSet};
///
/// let mut set = DigitSet::EMPTY;
/// set.insert(Digit::D3);
/// set.insert(Digit::D7);
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.as_double(), Some((Digit::D3, Digit::D7)));
/// ```
pub struct BitSet9<S> {
    bits: u16,
    _semantics: PhantomData<S>,
}

impl<S> BitSet9<S> {
    const MASK: u16 = 0x1FF;

    /// The empty set.
    pub const EMPTY: Self = Self::from_bits(0);

    /// The set containing all 9 values.
    pub const FULL: Self = Self::from_bits(Self::MASK);

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    pub(crate) const fn from_bits(bits: u16) -> Self {
        debug_assert!(bits & !Self::MASK == 0);
        Self {
            bits,
            _semantics: PhantomData,
        }
    }

    /// Creates a set from a raw 9-bit mask, where bit `i` corresponds to
    /// index `i`.
    ///
    /// Returns `None` if any bit above the ninth is set.
    #[must_use]
    pub const fn try_from_bits(bits: u16) -> Option<Self> {
        if bits & !Self::MASK == 0 {
            Some(Self::from_bits(bits))
        } else {
            None
        }
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

impl<S> BitSet9<S>
where
    S: Index9Semantics,
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
        Some(S::from_index(Index9::new(index)))
    }

    /// If the set contains exactly two values, returns them in ascending index
    /// order.
    #[must_use]
    pub fn as_double(self) -> Option<(S::Value, S::Value)> {
        if self.bits.count_ones() != 2 {
            return None;
        }
        let mut iter = self.iter();
        let first = iter.next()?;
        let second = iter.next()?;
        Some((first, second))
    }

    /// Returns an iterator over the values in ascending index order.
    #[must_use]
    pub fn iter(self) -> BitSet9Iter<S> {
        BitSet9Iter {
            bits: self.bits,
            _semantics: PhantomData,
        }
    }

    /// Returns an iterator yielding each value together with the set of all
    /// strictly greater values.
    ///
    /// This enumerates every unordered pair (and, nested, every unordered
    /// triple) without repetition:
    ///
    /// ```
    /// use ninefold_core::{Digit, DigitSet};
    ///
    /// let set = DigitSet::from_iter([Digit::D2, Digit::D5, Digit::D8]);
    /// let pairs: Vec<_> = set
    ///     .pivots_with_following()
    ///     .flat_map(|(first, rest)| rest.iter().map(move |second| (first, second)))
    ///     .collect();
    /// assert_eq!(
    ///     pairs,
    ///     [
    ///         (Digit::D2, Digit::D5),
    ///         (Digit::D2, Digit::D8),
    ///         (Digit::D5, Digit::D8)
    ///     ]
    /// );
    /// ```
    #[must_use]
    pub fn pivots_with_following(self) -> BitSet9Pivots<S> {
        BitSet9Pivots {
            bits: self.bits,
            _semantics: PhantomData,
        }
    }
}

impl<S> FromIterator<S::Value> for BitSet9<S>
where
    S: Index9Semantics,
{
    fn from_iter<I: IntoIterator<Item = S::Value>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<S> IntoIterator for BitSet9<S>
where
    S: Index9Semantics,
{
    type Item = S::Value;
    type IntoIter = BitSet9Iter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S> BitAnd for BitSet9<S> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl<S> BitAndAssign for BitSet9<S> {
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits &= rhs.bits;
    }
}

impl<S> BitOr for BitSet9<S> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl<S> BitOrAssign for BitSet9<S> {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl<S> Not for BitSet9<S> {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_bits(!self.bits & Self::MASK)
    }
}

// Manual impls: deriving would put bounds on the phantom semantics parameter.

impl<S> Clone for BitSet9<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for BitSet9<S> {}

impl<S> PartialEq for BitSet9<S> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<S> Eq for BitSet9<S> {}

impl<S> Default for BitSet9<S> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<S> fmt::Debug for BitSet9<S>
where
    S: Index9Semantics,
    S::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the values of a [`BitSet9`] in ascending index order.
#[derive(Debug, Clone)]
pub struct BitSet9Iter<S> {
    bits: u16,
    _semantics: PhantomData<S>,
}

impl<S> Iterator for BitSet9Iter<S>
where
    S: Index9Semantics,
{
    type Item = S::Value;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let index = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some(S::from_index(Index9::new(index)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl<S> FusedIterator for BitSet9Iter<S> where S: Index9Semantics {}
impl<S> ExactSizeIterator for BitSet9Iter<S> where S: Index9Semantics {}

/// Iterator over `(value, following)` pairs of a [`BitSet9`], where
/// `following` contains the values strictly greater than `value`.
#[derive(Debug, Clone)]
pub struct BitSet9Pivots<S> {
    bits: u16,
    _semantics: PhantomData<S>,
}

impl<S> Iterator for BitSet9Pivots<S>
where
    S: Index9Semantics,
{
    type Item = (S::Value, BitSet9<S>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let index = self.bits.trailing_zeros() as u8;
        // Clearing the lowest bit leaves exactly the greater values.
        self.bits &= self.bits - 1;
        Some((
            S::from_index(Index9::new(index)),
            BitSet9::from_bits(self.bits),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl<S> FusedIterator for BitSet9Pivots<S> where S: Index9Semantics {}
impl<S> ExactSizeIterator for BitSet9Pivots<S> where S: Index9Semantics {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Digit, index::DigitSemantics};

    type DigitSet = BitSet9<DigitSemantics>;

    #[test]
    fn test_insert_remove() {
        let mut set = DigitSet::EMPTY;
        assert!(set.insert(Digit::D4));
        assert!(!set.insert(Digit::D4));
        assert!(set.contains(Digit::D4));
        assert!(set.remove(Digit::D4));
        assert!(!set.remove(Digit::D4));
        assert!(set.is_empty());
    }

    #[test]
    fn test_full_and_not() {
        assert_eq!(DigitSet::FULL.len(), 9);
        assert_eq!(!DigitSet::EMPTY, DigitSet::FULL);
        let set = DigitSet::from_iter([Digit::D1, Digit::D2]);
        let complement = !set;
        assert_eq!(complement.len(), 7);
        assert!(!complement.contains(Digit::D1));
        assert!(complement.contains(Digit::D9));
    }

    #[test]
    fn test_as_single_and_double() {
        assert_eq!(DigitSet::EMPTY.as_single(), None);
        assert_eq!(DigitSet::from_elem(Digit::D6).as_single(), Some(Digit::D6));
        assert_eq!(DigitSet::FULL.as_single(), None);

        let pair = DigitSet::from_iter([Digit::D9, Digit::D2]);
        assert_eq!(pair.as_double(), Some((Digit::D2, Digit::D9)));
        assert_eq!(DigitSet::from_elem(Digit::D1).as_double(), None);
    }

    #[test]
    fn test_subset_superset() {
        let small = DigitSet::from_iter([Digit::D1, Digit::D5]);
        let large = DigitSet::from_iter([Digit::D1, Digit::D5, Digit::D7]);
        assert!(small.is_subset(large));
        assert!(large.is_superset(small));
        assert!(!large.is_subset(small));
        assert!(small.is_subset(small));
    }

    #[test]
    fn test_set_operations() {
        let a = DigitSet::from_iter([Digit::D1, Digit::D2, Digit::D3]);
        let b = DigitSet::from_iter([Digit::D2, Digit::D3, Digit::D4]);
        assert_eq!(
            a.difference(b),
            DigitSet::from_elem(Digit::D1),
        );
        assert_eq!(a & b, DigitSet::from_iter([Digit::D2, Digit::D3]));
        assert_eq!(
            a | b,
            DigitSet::from_iter([Digit::D1, Digit::D2, Digit::D3, Digit::D4])
        );
    }

    #[test]
    fn test_iteration_order() {
        let set = DigitSet::from_iter([Digit::D8, Digit::D1, Digit::D5]);
        let digits: Vec<_> = set.iter().collect();
        assert_eq!(digits, [Digit::D1, Digit::D5, Digit::D8]);
        assert_eq!(set.iter().len(), 3);
    }

    #[test]
    fn test_try_from_bits() {
        let set = DigitSet::try_from_bits(0b1_0000_0001).unwrap();
        assert_eq!(set, DigitSet::from_iter([Digit::D1, Digit::D9]));
        assert_eq!(DigitSet::try_from_bits(0b10_0000_0000), None);
    }

    #[test]
    fn test_pivots_cover_all_pairs() {
        let set = DigitSet::FULL;
        let count: usize = set
            .pivots_with_following()
            .map(|(_, rest)| rest.len())
            .sum();
        assert_eq!(count, 36);
    }
}
