//! Seeded value-lattice noise for 2 to 6 dimensions.
//!
//! Every lattice point gets a hashed value in `[-1, 1)`; the field is the
//! quintic-faded multilinear blend of the `2^N` surrounding corners. The blend
//! is a convex combination, so the output never leaves the corner range.

use super::hash::{fade, hash_coords, to_signed_unit};
use super::simplex::fast_floor;

/// Samples `N`-dimensional value noise.
///
/// # Returns
///
/// A value in the range [-1, 1].
#[must_use]
pub fn value<const N: usize>(point: [f32; N], seed: i64) -> f32 {
    let mut base = [0i64; N];
    let mut weight = [0.0f32; N];
    for i in 0..N {
        base[i] = fast_floor(point[i]);
        weight[i] = fade(point[i] - base[i] as f32);
    }

    let mut total = 0.0f32;
    let mut corner = [0i64; N];
    for mask in 0..(1usize << N) {
        let mut w = 1.0f32;
        for i in 0..N {
            if mask & (1 << i) == 0 {
                corner[i] = base[i];
                w *= 1.0 - weight[i];
            } else {
                corner[i] = base[i] + 1;
                w *= weight[i];
            }
        }
        if w != 0.0 {
            total += w * to_signed_unit(hash_coords(seed, &corner));
        }
    }
    total.clamp(-1.0, 1.0)
}
