use crate::{containers::BitSet9, index::DigitSemantics};

/// A set of digits 1-9.
///
/// Bit `i` of the underlying mask corresponds to digit `i + 1`, so
/// [`try_from_bits`](BitSet9::try_from_bits) accepts masks where bit 0 means
/// digit 1.
///
/// # Examples
///
/// ```
/// use ninefold_core::{Digit, DigitSet};
///
/// let mut candidates = DigitSet::FULL;
/// candidates.remove(Digit::D1);
/// candidates.remove(Digit::D2);
/// assert_eq!(candidates.len(), 7);
/// assert!(!candidates.contains(Digit::D1));
/// ```
pub type DigitSet = BitSet9<DigitSemantics>;
