use std::{
    fmt,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use crate::index::Index9Semantics;

/// A fixed array of nine elements indexed by the value type of `S`.
///
/// The semantics parameter picks the indexing domain, for example
/// [`DigitSemantics`](crate::index::DigitSemantics) for per-digit tables or
/// [`CellIndexSemantics`](crate::index::CellIndexSemantics) for per-house-cell
/// tables. This prevents accidentally indexing a per-digit array with a house
/// cell index.
///
/// # Examples
///
/// ```
/// use ninefold_core::{Digit, containers::Array9, index::DigitSemantics};
///
/// let mut counts: Array9<usize, DigitSemantics> = Array9::from_array([0; 9]);
/// counts[Digit::D4] += 1;
/// assert_eq!(counts[Digit::D4], 1);
/// ```
pub struct Array9<T, S> {
    values: [T; 9],
    _semantics: PhantomData<S>,
}

impl<T, S> Array9<T, S> {
    /// Creates an array from elements in index order.
    #[must_use]
    pub const fn from_array(values: [T; 9]) -> Self {
        Self {
            values,
            _semantics: PhantomData,
        }
    }

    /// Returns an iterator over the elements in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// Returns a mutable iterator over the elements in index order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.values.iter_mut()
    }
}

impl<T, S> Index<S::Value> for Array9<T, S>
where
    S: Index9Semantics,
{
    type Output = T;

    fn index(&self, value: S::Value) -> &T {
        &self.values[usize::from(S::to_index(value).index())]
    }
}

impl<T, S> IndexMut<S::Value> for Array9<T, S>
where
    S: Index9Semantics,
{
    fn index_mut(&mut self, value: S::Value) -> &mut T {
        &mut self.values[usize::from(S::to_index(value).index())]
    }
}

impl<T, S> From<[T; 9]> for Array9<T, S> {
    fn from(values: [T; 9]) -> Self {
        Self::from_array(values)
    }
}

impl<T, S> IntoIterator for Array9<T, S> {
    type Item = T;
    type IntoIter = std::array::IntoIter<T, 9>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a, T, S> IntoIterator for &'a Array9<T, S> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<'a, T, S> IntoIterator for &'a mut Array9<T, S> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter_mut()
    }
}

// Manual impls: deriving would put bounds on the phantom semantics parameter.

impl<T: Clone, S> Clone for Array9<T, S> {
    fn clone(&self) -> Self {
        Self::from_array(self.values.clone())
    }
}

impl<T: Copy, S> Copy for Array9<T, S> {}

impl<T: PartialEq, S> PartialEq for Array9<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<T: Eq, S> Eq for Array9<T, S> {}

impl<T: Default, S> Default for Array9<T, S> {
    fn default() -> Self {
        Self::from_array(std::array::from_fn(|_| T::default()))
    }
}

impl<T: fmt::Debug, S> fmt::Debug for Array9<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.values).finish()
    }
}
