//! 1D seeded line wobble.

use super::hash::{fade, hash_coords, to_signed_unit};
use super::simplex::fast_floor;

/// Smooth 1D noise: hashed values at integers, quintic-faded in between.
///
/// # Returns
///
/// A value in the range [-1, 1].
#[inline]
#[must_use]
pub fn line_wobble(seed: i64, x: f32) -> f32 {
    let cell = fast_floor(x);
    let t = fade(x - cell as f32);
    let start = to_signed_unit(hash_coords(seed, &[cell]));
    let end = to_signed_unit(hash_coords(seed, &[cell + 1]));
    start + (end - start) * t
}
