//! Sudoku deduction techniques.
//!
//! Each technique implements the [`Technique`] trait against a
//! [`TechniqueGrid`](crate::TechniqueGrid). [`TechniqueKind`] fixes the
//! catalogue: the order techniques are tried in, their display names, their
//! difficulty [tier](TechniqueTier), and the weight each applied step
//! contributes to a puzzle's rating.

use std::fmt;

use ninefold_core::{DigitPositions, House, HouseMask};

pub use self::{
    hidden_pair::HiddenPair,
    hidden_single::HiddenSingle,
    hidden_triple::HiddenTriple,
    intersection::Intersection,
    naked_pair::NakedPair,
    naked_single::NakedSingle,
    naked_triple::NakedTriple,
    swordfish::Swordfish,
    traits::{BoxedTechnique, Technique},
    x_wing::XWing,
};
pub use crate::technique_grid::TechniqueGrid;

mod hidden_pair;
mod hidden_single;
mod hidden_triple;
mod intersection;
mod naked_pair;
mod naked_single;
mod naked_triple;
mod swordfish;
mod traits;
mod x_wing;

/// Difficulty class of a technique.
///
/// Tiers scope hint searches: a puzzle's difficulty decides the highest tier
/// the hint system is allowed to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TechniqueTier {
    /// Naked and hidden singles.
    Basic,
    /// Naked and hidden pairs and triples.
    Intermediate,
    /// Intersection removal and fish patterns.
    Advanced,
}

/// The catalogue of deduction techniques, in the order they are tried.
///
/// The variant order is the solving order: easier techniques come first, and
/// solvers and hint searches always walk the catalogue front to back. Each
/// kind also carries its display [`name`](Self::name), its
/// [`tier`](Self::tier), and the [`weight`](Self::weight) one applied step
/// contributes to a puzzle's rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TechniqueKind {
    /// A cell with only one remaining candidate.
    NakedSingle,
    /// A digit with only one remaining cell within a house.
    HiddenSingle,
    /// Two cells of a house sharing the same two candidates.
    NakedPair,
    /// Two digits confined to the same two cells of a house.
    HiddenPair,
    /// Three cells of a house covered by three candidates.
    NakedTriple,
    /// Three digits confined to the same three cells of a house.
    HiddenTriple,
    /// A digit confined to a box/line intersection.
    Intersection,
    /// A digit forming a rectangle over two rows and two columns.
    XWing,
    /// A digit covered by three lines in each direction.
    Swordfish,
}

/// Rating weight at or above which a technique counts as elite.
const ELITE_WEIGHT: usize = 100;

impl TechniqueKind {
    /// Every technique, in catalogue order.
    pub const ALL: [Self; 9] = [
        Self::NakedSingle,
        Self::HiddenSingle,
        Self::NakedPair,
        Self::HiddenPair,
        Self::NakedTriple,
        Self::HiddenTriple,
        Self::Intersection,
        Self::XWing,
        Self::Swordfish,
    ];

    /// Number of catalogue entries.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the display name of the technique.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NakedSingle => "Naked Single",
            Self::HiddenSingle => "Hidden Single",
            Self::NakedPair => "Naked Pair",
            Self::HiddenPair => "Hidden Pair",
            Self::NakedTriple => "Naked Triple",
            Self::HiddenTriple => "Hidden Triple",
            Self::Intersection => "Intersection Removal",
            Self::XWing => "X-Wing",
            Self::Swordfish => "Swordfish",
        }
    }

    /// Returns the difficulty tier the technique belongs to.
    #[must_use]
    pub const fn tier(self) -> TechniqueTier {
        match self {
            Self::NakedSingle | Self::HiddenSingle => TechniqueTier::Basic,
            Self::NakedPair | Self::HiddenPair | Self::NakedTriple | Self::HiddenTriple => {
                TechniqueTier::Intermediate
            }
            Self::Intersection | Self::XWing | Self::Swordfish => TechniqueTier::Advanced,
        }
    }

    /// Returns the weight one applied step of this technique contributes to a
    /// puzzle's rating.
    #[must_use]
    pub const fn weight(self) -> usize {
        match self {
            Self::NakedSingle => 1,
            Self::HiddenSingle => 2,
            Self::NakedPair => 5,
            Self::HiddenPair => 8,
            Self::NakedTriple => 10,
            Self::HiddenTriple => 12,
            Self::Intersection => 15,
            Self::XWing => 100,
            Self::Swordfish => 200,
        }
    }

    /// Returns whether using this technique marks a puzzle as substantially
    /// harder.
    ///
    /// Professional-grade puzzles are required to use elite techniques a
    /// minimum number of times.
    #[must_use]
    pub const fn is_elite(self) -> bool {
        self.weight() >= ELITE_WEIGHT
    }

    /// Builds the technique implementing this catalogue entry.
    #[must_use]
    pub fn build(self) -> BoxedTechnique {
        match self {
            Self::NakedSingle => Box::new(NakedSingle::new()),
            Self::HiddenSingle => Box::new(HiddenSingle::new()),
            Self::NakedPair => Box::new(NakedPair::new()),
            Self::HiddenPair => Box::new(HiddenPair::new()),
            Self::NakedTriple => Box::new(NakedTriple::new()),
            Self::HiddenTriple => Box::new(HiddenTriple::new()),
            Self::Intersection => Box::new(Intersection::new()),
            Self::XWing => Box::new(XWing::new()),
            Self::Swordfish => Box::new(Swordfish::new()),
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TechniqueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns all techniques, in catalogue order.
///
/// # Examples
///
/// ```
/// use ninefold_solver::technique;
///
/// let techniques = technique::all_techniques();
/// assert_eq!(techniques.len(), 9);
/// assert_eq!(techniques[0].name(), "Naked Single");
/// ```
#[must_use]
pub fn all_techniques() -> Vec<BoxedTechnique> {
    TechniqueKind::ALL.iter().map(|kind| kind.build()).collect()
}

/// Returns the techniques up to and including a tier, in catalogue order.
///
/// # Examples
///
/// ```
/// use ninefold_solver::technique::{self, TechniqueTier};
///
/// let basic = technique::techniques_up_to(TechniqueTier::Basic);
/// assert_eq!(basic.len(), 2);
/// ```
#[must_use]
pub fn techniques_up_to(tier: TechniqueTier) -> Vec<BoxedTechnique> {
    TechniqueKind::ALL
        .iter()
        .filter(|kind| kind.tier() <= tier)
        .map(|kind| kind.build())
        .collect()
}

/// Expands a house-relative cell mask back into board positions.
pub(crate) fn positions_from_house_mask(house: House, mask: HouseMask) -> DigitPositions {
    mask.iter()
        .map(|i| house.position_from_cell_index(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_order_matches_weights() {
        let mut last = 0;
        for kind in TechniqueKind::ALL {
            assert!(
                kind.weight() > last,
                "{kind} breaks the ascending weight order"
            );
            last = kind.weight();
        }
    }

    #[test]
    fn test_tiers_partition_the_catalogue() {
        let basic = techniques_up_to(TechniqueTier::Basic);
        let intermediate = techniques_up_to(TechniqueTier::Intermediate);
        let advanced = techniques_up_to(TechniqueTier::Advanced);
        assert_eq!(basic.len(), 2);
        assert_eq!(intermediate.len(), 6);
        assert_eq!(advanced.len(), TechniqueKind::COUNT);
        assert_eq!(all_techniques().len(), advanced.len());
    }

    #[test]
    fn test_only_fish_are_elite() {
        for kind in TechniqueKind::ALL {
            assert_eq!(
                kind.is_elite(),
                matches!(kind, TechniqueKind::XWing | TechniqueKind::Swordfish),
                "unexpected elite flag for {kind}"
            );
        }
    }

    #[test]
    fn test_build_round_trips_kind() {
        for kind in TechniqueKind::ALL {
            assert_eq!(kind.build().kind(), kind);
        }
    }

    #[test]
    fn test_positions_from_house_mask() {
        let house = House::Row { y: 4 };
        let mask = HouseMask::from_iter([0, 8]);
        let positions = positions_from_house_mask(house, mask);
        assert_eq!(positions.len(), 2);
        assert!(positions.contains(ninefold_core::Position::new(0, 4)));
        assert!(positions.contains(ninefold_core::Position::new(8, 4)));
    }
}
