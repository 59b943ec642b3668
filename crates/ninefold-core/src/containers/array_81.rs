use std::{
    fmt,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use crate::index::Index81Semantics;

/// A fixed array of 81 elements indexed by the value type of `S`.
///
/// With [`PositionSemantics`](crate::index::PositionSemantics) this is a
/// board-shaped table addressed by [`Position`](crate::Position) in row-major
/// order.
///
/// # Examples
///
/// ```
/// use ninefold_core::{Position, containers::Array81, index::PositionSemantics};
///
/// let mut visits: Array81<bool, PositionSemantics> = Array81::from_array([false; 81]);
/// visits[Position::new(4, 2)] = true;
/// assert!(visits[Position::new(4, 2)]);
/// ```
pub struct Array81<T, S> {
    values: [T; 81],
    _semantics: PhantomData<S>,
}

impl<T, S> Array81<T, S> {
    /// Creates an array from elements in index order.
    #[must_use]
    pub const fn from_array(values: [T; 81]) -> Self {
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

impl<T, S> Index<S::Value> for Array81<T, S>
where
    S: Index81Semantics,
{
    type Output = T;

    fn index(&self, value: S::Value) -> &T {
        &self.values[usize::from(S::to_index(value).index())]
    }
}

impl<T, S> IndexMut<S::Value> for Array81<T, S>
where
    S: Index81Semantics,
{
    fn index_mut(&mut self, value: S::Value) -> &mut T {
        &mut self.values[usize::from(S::to_index(value).index())]
    }
}

impl<T, S> From<[T; 81]> for Array81<T, S> {
    fn from(values: [T; 81]) -> Self {
        Self::from_array(values)
    }
}

impl<T, S> IntoIterator for Array81<T, S> {
    type Item = T;
    type IntoIter = std::array::IntoIter<T, 81>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a, T, S> IntoIterator for &'a Array81<T, S> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<'a, T, S> IntoIterator for &'a mut Array81<T, S> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter_mut()
    }
}

// Manual impls: deriving would put bounds on the phantom semantics parameter.

impl<T: Clone, S> Clone for Array81<T, S> {
    fn clone(&self) -> Self {
        Self::from_array(self.values.clone())
    }
}

impl<T: Copy, S> Copy for Array81<T, S> {}

impl<T: PartialEq, S> PartialEq for Array81<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<T: Eq, S> Eq for Array81<T, S> {}

impl<T: Default, S> Default for Array81<T, S> {
    fn default() -> Self {
        Self::from_array(std::array::from_fn(|_| T::default()))
    }
}

impl<T: fmt::Debug, S> fmt::Debug for Array81<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.values).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, index::PositionSemantics};

    #[test]
    fn test_index_by_position() {
        let mut values: Array81<u32, PositionSemantics> = Array81::default();
        values[Position::new(0, 0)] = 1;
        values[Position::new(8, 8)] = 81;
        assert_eq!(values[Position::new(0, 0)], 1);
        assert_eq!(values[Position::new(8, 8)], 81);
        assert_eq!(values[Position::new(4, 4)], 0);
    }

    #[test]
    fn test_row_major_layout() {
        let mut values: Array81<u8, PositionSemantics> = Array81::default();
        for (i, pos) in (0..).zip(Position::ALL) {
            values[pos] = i;
        }
        let collected: Vec<_> = values.iter().copied().collect();
        let expected: Vec<u8> = (0..81).collect();
        assert_eq!(collected, expected);
    }
}
