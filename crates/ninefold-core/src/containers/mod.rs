//! Generic containers indexed by semantic value types.
//!
//! All four containers are parameterized by a semantics type from
//! [`crate::index`], so an array of per-digit data cannot be indexed with a
//! house-cell index by accident:
//!
//! - [`Array9`] / [`Array81`] - fixed-size arrays indexed by semantic values
//! - [`BitSet9`] / [`BitSet81`] - sets of semantic values backed by a single
//!   integer

pub use self::{array_9::*, array_81::*, bit_set_9::*, bit_set_81::*};

mod array_81;
mod array_9;
mod bit_set_81;
mod bit_set_9;
