//! Lattice hashing shared by every seeded primitive.
//!
//! Noise here is evaluated with an explicit seed on every call, so there is
//! no per-seed permutation table. Each lattice point is hashed together with
//! the seed instead.

/// Per-axis multipliers. Large odd constants with well mixed bits.
const AXIS_MULTIPLIERS: [u64; 6] = [
    0xD1B5_4A32_D192_ED03,
    0xABC9_8388_FB8F_AC03,
    0x8CB9_2BA7_2F3D_8DD7,
    0xDB4F_0B91_75AE_2165,
    0xE19B_01AA_9D42_C633,
    0xC6D1_D6C8_ED0C_9631,
];

/// Golden-ratio increment, used to decorrelate seed 0 from the lattice.
pub(crate) const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// 64-bit finalizer (MurmurHash3 `fmix64`).
#[inline]
#[must_use]
pub(crate) const fn finalize(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    h ^= h >> 33;
    h = h.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    h ^= h >> 33;
    h
}

/// Hashes a seed together with up to six lattice coordinates.
#[inline]
#[must_use]
pub(crate) fn hash_coords(seed: i64, cell: &[i64]) -> u64 {
    let mut h = (seed as u64) ^ GOLDEN_GAMMA;
    for (&c, &mul) in cell.iter().zip(AXIS_MULTIPLIERS.iter()) {
        h = (h ^ c as u64).wrapping_mul(mul);
        h = h.rotate_left(29);
    }
    finalize(h)
}

/// Maps the top 24 bits of a hash to `[-1, 1)`.
#[inline]
#[must_use]
pub(crate) fn to_signed_unit(h: u64) -> f32 {
    (h >> 40) as f32 * (2.0 / 16_777_216.0) - 1.0
}

/// Maps the top 24 bits of a hash to `[0, 1)`.
#[inline]
#[must_use]
pub(crate) fn to_unit(h: u64) -> f32 {
    (h >> 40) as f32 * (1.0 / 16_777_216.0)
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
#[must_use]
pub(crate) fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_depends_on_every_axis() {
        let base = hash_coords(7, &[1, 2, 3, 4, 5, 6]);
        for axis in 0..6 {
            let mut cell = [1, 2, 3, 4, 5, 6];
            cell[axis] += 1;
            assert_ne!(base, hash_coords(7, &cell), "axis {axis} ignored");
        }
        assert_ne!(base, hash_coords(8, &[1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn test_unit_mappings_in_range() {
        for h in [0u64, 1, u64::MAX, 0x8000_0000_0000_0000, GOLDEN_GAMMA] {
            let s = to_signed_unit(h);
            assert!((-1.0..1.0).contains(&s), "{s}");
            let u = to_unit(h);
            assert!((0.0..1.0).contains(&u), "{u}");
        }
    }

    #[test]
    fn test_fade_endpoints() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert!((fade(0.5) - 0.5).abs() < 1e-6);
    }
}
