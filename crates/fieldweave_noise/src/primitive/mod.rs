//! Seeded noise primitives and shaping curves.
//!
//! These are the building blocks the composite generators call:
//!
//! - [`simplex`] - simplex-gradient noise, 2D to 6D
//! - [`value`] - value-lattice noise, 2D to 6D
//! - [`line_wobble`] - smooth 1D noise
//! - [`gain`] / [`squash`] - output renormalization
//!
//! All of them are pure functions of their inputs and the seed.

pub(crate) mod hash;
mod shape;
mod simplex;
mod value;
mod wobble;

pub use shape::{gain, squash};
pub use simplex::simplex;
pub use value::value;
pub use wobble::line_wobble;
