//! # Seeded Simplex Noise
//!
//! Simplex-gradient noise for 2 to 6 dimensions, evaluated with an explicit
//! seed on every call.
//!
//! ## Why a hashed lattice?
//!
//! - Composite generators re-seed every sample, so a permutation table per
//!   seed would have to be rebuilt on the hot path
//! - One code path covers every dimension through const generics
//! - No allocations, no shared state
//!
//! ## Determinism Guarantee
//!
//! Given the same point and seed this returns exactly the same `f32` on any
//! platform: only IEEE add/mul/floor are involved.

use super::hash::hash_coords;

/// Skewing factor `(sqrt(N + 1) - 1) / N`, indexed by dimension.
const SKEW: [f32; 7] = [
    0.0,
    0.0,
    0.366_025_4,
    0.333_333_34,
    0.309_017,
    0.289_897_95,
    0.274_291_9,
];

/// Unskewing factor `(1 - 1 / sqrt(N + 1)) / N`, indexed by dimension.
const UNSKEW: [f32; 7] = [
    0.0,
    0.0,
    0.211_324_87,
    0.166_666_67,
    0.138_196_6,
    0.118_350_34,
    0.103_672_59,
];

/// Output normalization, indexed by dimension.
///
/// Measured maxima of the raw kernel sum; results are clamped afterwards.
const SCALE: [f32; 7] = [0.0, 0.0, 66.0, 58.0, 51.0, 47.0, 44.0];

/// Squared kernel radius. Equal to the squared simplex altitude in every
/// dimension, so a corner never contributes outside its own simplices.
const RADIUS_SQUARED: f32 = 0.5;

/// Samples `N`-dimensional simplex noise.
///
/// Supported for `N` in `2..=6`; other sizes are a compile-time misuse and
/// return 0.
///
/// # Returns
///
/// A value in the range [-1, 1].
#[must_use]
pub fn simplex<const N: usize>(point: [f32; N], seed: i64) -> f32 {
    if !(2..=6).contains(&N) {
        return 0.0;
    }
    let skew = SKEW[N];
    let unskew = UNSKEW[N];

    // Skew input coordinates to the simplex lattice
    let s = point.iter().sum::<f32>() * skew;
    let mut cell = [0i64; N];
    let mut cell_sum = 0i64;
    for (c, &p) in cell.iter_mut().zip(point.iter()) {
        *c = fast_floor(p + s);
        cell_sum += *c;
    }

    // Unskew to get the offset from the first corner
    let t = cell_sum as f32 * unskew;
    let mut offset = [0.0f32; N];
    for i in 0..N {
        offset[i] = point[i] - (cell[i] as f32 - t);
    }

    // Rank the axes: the simplex is walked by stepping along the
    // largest offset first
    let mut order: [usize; N] = core::array::from_fn(|i| i);
    order.sort_unstable_by(|&a, &b| offset[b].total_cmp(&offset[a]));

    let mut corner = cell;
    let mut total = 0.0f32;
    for k in 0..=N {
        if k > 0 {
            let axis = order[k - 1];
            corner[axis] += 1;
            offset[axis] -= 1.0;
        }
        let shift = k as f32 * unskew;
        let mut dist = [0.0f32; N];
        let mut falloff = RADIUS_SQUARED;
        for i in 0..N {
            dist[i] = offset[i] + shift;
            falloff -= dist[i] * dist[i];
        }
        if falloff > 0.0 {
            let falloff = falloff * falloff;
            total += falloff * falloff * gradient_dot(hash_coords(seed, &corner), &dist);
        }
    }

    (total * SCALE[N]).clamp(-1.0, 1.0)
}

/// Dot product of a hashed gradient with the offset vector.
///
/// Gradients have `±1` components; one axis (chosen by the hash, possibly
/// none) is zeroed so the set resembles the cube-edge gradients of
/// classic simplex noise.
#[inline]
fn gradient_dot<const N: usize>(hash: u64, dist: &[f32; N]) -> f32 {
    let zeroed = ((hash >> 8) % (N as u64 + 1)) as usize;
    let mut dot = 0.0;
    for (i, &d) in dist.iter().enumerate() {
        if i == zeroed {
            continue;
        }
        if (hash >> i) & 1 == 0 {
            dot += d;
        } else {
            dot -= d;
        }
    }
    dot
}

/// Fast floor function.
///
/// Faster than `f32::floor()` for our use case.
#[inline]
pub(crate) fn fast_floor(x: f32) -> i64 {
    let xi = x as i64;
    if x < xi as f32 {
        xi - 1
    } else {
        xi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        for i in 0..100 {
            let x = i as f32 * 0.1;
            let y = i as f32 * 0.17;
            assert_eq!(
                simplex([x, y], 12345).to_bits(),
                simplex([x, y], 12345).to_bits(),
                "Noise should be deterministic"
            );
        }
    }

    #[test]
    fn test_different_seeds_different_results() {
        let differing = (0..20)
            .filter(|&i| {
                let p = [i as f32 * 1.37 + 0.3, i as f32 * 0.71 + 0.2];
                simplex(p, 1) != simplex(p, 2)
            })
            .count();
        assert!(differing > 10, "Different seeds should produce different results");
    }

    #[test]
    fn test_range_all_dimensions() {
        for i in 0..2000 {
            let a = (i as f32 * 0.37) - 300.0;
            let b = (i as f32 * 0.53) - 400.0;
            let seed = i64::from(i) * 0x5851_F42D;
            let values = [
                simplex([a, b], seed),
                simplex([a, b, a * 0.5], seed),
                simplex([a, b, a * 0.5, b * 0.25], seed),
                simplex([a, b, a * 0.5, b * 0.25, a + b], seed),
                simplex([a, b, a * 0.5, b * 0.25, a + b, a - b], seed),
            ];
            for value in values {
                assert!((-1.0..=1.0).contains(&value), "Value {value} out of range");
            }
        }
    }

    #[test]
    fn test_continuity() {
        let delta = 0.001;
        for d in 0..10 {
            let x = 100.0 + d as f32 * 3.3;
            let y = 100.0 - d as f32 * 1.7;
            let v1 = simplex([x, y, 1.5], 42);
            let v2 = simplex([x + delta, y, 1.5], 42);
            let v3 = simplex([x, y + delta, 1.5], 42);
            assert!((v1 - v2).abs() < 0.05, "Noise should be continuous");
            assert!((v1 - v3).abs() < 0.05, "Noise should be continuous");
        }
    }

    #[test]
    fn test_spatial_variation() {
        let values: Vec<f32> = (0..50)
            .map(|i| simplex([i as f32 * 0.61, i as f32 * 0.37, 0.0, 0.0], 9))
            .collect();
        let min = values.iter().copied().fold(f32::INFINITY, f32::min);
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!(max - min > 0.05, "4D simplex should have spatial variation");
    }

    #[test]
    fn test_fast_floor() {
        assert_eq!(fast_floor(1.5), 1);
        assert_eq!(fast_floor(-1.5), -2);
        assert_eq!(fast_floor(-2.0), -2);
        assert_eq!(fast_floor(0.0), 0);
    }
}
