//! Index types and semantics for 9- and 81-element containers.
//!
//! Containers in this crate ([`Array9`], [`BitSet9`], [`Array81`],
//! [`BitSet81`]) are generic over a *semantics* type that defines how
//! user-facing values map onto internal indices. This keeps digit sets,
//! house-cell masks, and position sets distinct at the type level even though
//! they share a representation.
//!
//! - [`DigitSemantics`] maps [`Digit`] 1-9 to indices 0-8.
//! - [`CellIndexSemantics`] maps a cell index within a house (0-8) to itself.
//! - [`PositionSemantics`] maps [`Position`] to row-major indices 0-80.
//!
//! [`Array9`]: crate::containers::Array9
//! [`Array81`]: crate::containers::Array81
//! [`BitSet9`]: crate::containers::BitSet9
//! [`BitSet81`]: crate::containers::BitSet81
//! [`Digit`]: crate::Digit
//! [`Position`]: crate::Position

pub use self::{index_9::*, index_81::*};

mod index_81;
mod index_9;
