//! Difficulty levels and their acceptance criteria.

use std::{fmt, ops::RangeInclusive, str::FromStr};

use ninefold_solver::technique::TechniqueTier;

use crate::rating::PuzzleRating;

/// Minimum number of elite technique steps a professional puzzle must use.
const MIN_PROFESSIONAL_ELITE_STEPS: usize = 4;

/// A puzzle difficulty level.
///
/// Each level fixes how many cells the generator removes from the solution,
/// which [rating](crate::PuzzleRating) band it accepts, and the highest
/// [`TechniqueTier`] the hint system may draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    /// Solvable with singles; scores 45-60.
    Easy,
    /// Solvable with singles; scores 61-120.
    Medium,
    /// Brings in pairs and triples; scores 121-499.
    Hard,
    /// Requires elite techniques; scores 500-9998.
    Professional,
}

impl Difficulty {
    /// Every difficulty, from easiest to hardest.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Professional];

    /// Returns the display name of the difficulty.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Professional => "professional",
        }
    }

    /// Returns how many cells the generator removes from a full solution.
    #[must_use]
    pub const fn removal_target(self) -> usize {
        match self {
            Self::Easy => 40,
            Self::Medium => 48,
            Self::Hard => 54,
            Self::Professional => 62,
        }
    }

    /// Returns the rating band an acceptable puzzle must score within.
    ///
    /// The bands stay below [`UNSOLVED_SCORE`](crate::UNSOLVED_SCORE), so a
    /// puzzle the technique catalogue cannot finish is rejected everywhere.
    #[must_use]
    pub fn rating_band(self) -> RangeInclusive<usize> {
        match self {
            Self::Easy => 45..=60,
            Self::Medium => 61..=120,
            Self::Hard => 121..=499,
            Self::Professional => 500..=9998,
        }
    }

    /// Returns the highest technique tier hints may use at this difficulty.
    #[must_use]
    pub const fn hint_tier(self) -> TechniqueTier {
        match self {
            Self::Easy | Self::Medium => TechniqueTier::Basic,
            Self::Hard => TechniqueTier::Intermediate,
            Self::Professional => TechniqueTier::Advanced,
        }
    }

    /// Returns whether a rated puzzle qualifies for this difficulty.
    ///
    /// Professional additionally demands a minimum number of elite technique
    /// steps, so a lucky low-branch puzzle cannot sneak into the top tier on
    /// score alone.
    pub(crate) fn accepts(self, rating: PuzzleRating) -> bool {
        if !self.rating_band().contains(&rating.score()) {
            return false;
        }
        self != Self::Professional || rating.elite_steps() >= MIN_PROFESSIONAL_ELITE_STEPS
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a [`Difficulty`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown difficulty: {name:?}")]
pub struct ParseDifficultyError {
    /// The unrecognized name.
    name: String,
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    /// Parses a difficulty by its display name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDifficultyError {
                name: s.to_owned(),
            })
    }
}
