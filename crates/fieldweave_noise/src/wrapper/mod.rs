//! # Coordinate-Transform Wrappers
//!
//! Wrappers own another generator and reshape the coordinates (and the
//! output) before and after calling it.
//!
//! - [`NoiseWrapper`] - frequency scaling and fractal octave summation
//! - [`RadialNoiseWrapper`] - N-fold rotational symmetry around a center,
//!   with optional mirroring, followed by the fractal pass
//!
//! Wrappers nest freely: the wrapped generator may itself be a wrapper.
//! Serialization writes the wrapped generator as a tagged record inside the
//! wrapper's own record, so any tree round-trips through
//! [`crate::NoiseRegistry`].

mod fractal;
mod radial;

pub use fractal::{FractalMode, NoiseWrapper};
pub use radial::RadialNoiseWrapper;
