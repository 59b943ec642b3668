//! The digits 1 through 9.

use std::fmt::{self, Display};

/// One of the nine Sudoku digits.
///
/// The enum makes invalid digits unrepresentable; an empty cell is an
/// `Option<Digit>` rather than a sentinel value.
///
/// # Examples
///
/// ```
/// use ninefold_core::Digit;
///
/// assert_eq!(Digit::from_value(5), Digit::D5);
/// assert_eq!(Digit::D5.value(), 5);
/// assert_eq!(Digit::ALL.len(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Digit {
    /// 1
    D1 = 1,
    /// 2
    D2 = 2,
    /// 3
    D3 = 3,
    /// 4
    D4 = 4,
    /// 5
    D5 = 5,
    /// 6
    D6 = 6,
    /// 7
    D7 = 7,
    /// 8
    D8 = 8,
    /// 9
    D9 = 9,
}

impl Digit {
    /// The nine digits in ascending order.
    pub const ALL: [Self; 9] = [
        Self::D1,
        Self::D2,
        Self::D3,
        Self::D4,
        Self::D5,
        Self::D6,
        Self::D7,
        Self::D8,
        Self::D9,
    ];

    /// Converts a numeric value in 1-9 into the digit.
    ///
    /// # Panics
    ///
    /// Panics when `value` is 0 or above 9.
    ///
    /// # Examples
    ///
    /// ```
    /// use ninefold_core::Digit;
    ///
    /// assert_eq!(Digit::from_value(9), Digit::D9);
    /// ```
    ///
    /// ```should_panic
    /// use ninefold_core::Digit;
    ///
    /// let _ = Digit::from_value(10);
    /// ```
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match value {
            1 => Self::D1,
            2 => Self::D2,
            3 => Self::D3,
            4 => Self::D4,
            5 => Self::D5,
            6 => Self::D6,
            7 => Self::D7,
            8 => Self::D8,
            9 => Self::D9,
            _ => panic!("digit value out of range: {value}"),
        }
    }

    /// Returns the digit as a number in 1-9.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

impl Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.value(), f)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> u8 {
        digit.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_cover_one_through_nine() {
        for (digit, value) in Digit::ALL.into_iter().zip(1u8..) {
            assert_eq!(digit.value(), value);
            assert_eq!(Digit::from_value(value), digit);
        }
    }

    #[test]
    fn test_formats_as_its_value() {
        assert_eq!(Digit::D2.to_string(), "2");
        assert_eq!(Digit::D8.to_string(), "8");
        assert_eq!(u8::from(Digit::D6), 6);
    }

    #[test]
    #[should_panic(expected = "digit value out of range: 0")]
    fn test_from_value_rejects_zero() {
        let _ = Digit::from_value(0);
    }

    #[test]
    #[should_panic(expected = "digit value out of range: 12")]
    fn test_from_value_rejects_large_values() {
        let _ = Digit::from_value(12);
    }
}
