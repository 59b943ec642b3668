//! Reproducible generation seeds.

use std::{fmt, str::FromStr};

use rand::{RngExt as _, SeedableRng as _};
use rand_pcg::Pcg64;
use sha2::{Digest as _, Sha256};

/// Number of bytes in a seed.
const SEED_BYTES: usize = 32;

/// Number of hex digits in a seed's textual form.
const SEED_HEX_DIGITS: usize = SEED_BYTES * 2;

/// A seed identifying one puzzle generation run.
///
/// A seed is 32 bytes, displayed and parsed as 64 hex digits. Replaying a
/// seed through [`PuzzleGenerator::generate_with_seed`] reproduces the exact
/// puzzle it originally produced, so seeds double as compact puzzle
/// identifiers.
///
/// [`PuzzleGenerator::generate_with_seed`]: crate::PuzzleGenerator::generate_with_seed
///
/// # Examples
///
/// ```
/// use ninefold_generator::PuzzleSeed;
///
/// let seed: PuzzleSeed =
///     "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1"
///         .parse()
///         .unwrap();
/// assert_eq!(
///     seed.to_string(),
///     "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1"
/// );
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuzzleSeed([u8; SEED_BYTES]);

impl PuzzleSeed {
    /// Creates a seed from its raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SEED_BYTES]) -> Self {
        Self(bytes)
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SEED_BYTES] {
        &self.0
    }

    /// Derives a seed from arbitrary input material via SHA-256.
    #[must_use]
    pub fn derive(material: &[u8]) -> Self {
        Self(Sha256::digest(material).into())
    }

    /// Draws a fresh random seed from the thread RNG.
    #[must_use]
    pub fn from_entropy() -> Self {
        let mut entropy = [0u8; SEED_BYTES];
        rand::rng().fill(&mut entropy[..]);
        Self::derive(&entropy)
    }

    /// Builds the RNG stream for one generation attempt.
    ///
    /// Each retry of the acceptance loop gets its own stream derived from the
    /// seed and the attempt counter, so rejected attempts stay reproducible
    /// without the streams overlapping.
    pub(crate) fn attempt_rng(self, attempt: u64) -> Pcg64 {
        let mut hasher = Sha256::new();
        hasher.update(self.0);
        hasher.update(attempt.to_le_bytes());
        Pcg64::from_seed(hasher.finalize().into())
    }
}

impl fmt::Display for PuzzleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for PuzzleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PuzzleSeed({self})")
    }
}

/// Error parsing a [`PuzzleSeed`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePuzzleSeedError {
    /// The string is not exactly 64 characters long.
    #[display("seed has {count} characters, expected {SEED_HEX_DIGITS}")]
    WrongLength {
        /// The number of characters found.
        count: usize,
    },
    /// The string contains a character that is not a hex digit.
    #[display("invalid hex digit in seed: {c:?}")]
    InvalidHexDigit {
        /// The offending character.
        c: char,
    },
}

impl FromStr for PuzzleSeed {
    type Err = ParsePuzzleSeedError;

    /// Parses a seed from 64 hex digits. Both cases are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s.chars().count();
        if count != SEED_HEX_DIGITS {
            return Err(ParsePuzzleSeedError::WrongLength { count });
        }
        let mut bytes = [0u8; SEED_BYTES];
        let mut chars = s.chars();
        for byte in &mut bytes {
            let (Some(hi), Some(lo)) = (chars.next(), chars.next()) else {
                break;
            };
            *byte = hex_digit(hi)? << 4 | hex_digit(lo)?;
        }
        Ok(Self(bytes))
    }
}

fn hex_digit(c: char) -> Result<u8, ParsePuzzleSeedError> {
    let Some(value) = c.to_digit(16) else {
        return Err(ParsePuzzleSeedError::InvalidHexDigit { c });
    };
    #[expect(clippy::cast_possible_truncation)]
    let value = value as u8;
    Ok(value)
}
