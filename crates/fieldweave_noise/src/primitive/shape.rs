//! Output shaping curves shared by the composite generators.

/// Rational gain curve `n / (sharpness * |n| + (1 - sharpness))`.
///
/// Preserves sign, maps 0 to 0 and ±1 to ±1. Larger `sharpness` pushes mid
/// values toward the extremes. `sharpness` must stay below 1: at exactly 1
/// the denominator is zero when `n` is zero.
#[inline]
#[must_use]
pub fn gain(n: f32, sharpness: f32) -> f32 {
    n / (sharpness * n.abs() + (1.0 - sharpness))
}

/// Exponential squash `(v - 1) / (v + 1)` with `v = (1 + sharpness)^result`.
///
/// For unbounded sums; always lands in [-1, 1] while `v` stays finite.
#[inline]
#[must_use]
pub fn squash(result: f32, sharpness: f32) -> f32 {
    let v = (1.0 + sharpness).powf(result);
    (v - 1.0) / (v + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gain_fixed_points() {
        for s in [0.1, 0.35, 0.5, 0.75, 0.99] {
            assert_eq!(gain(0.0, s), 0.0);
            assert!((gain(1.0, s) - 1.0).abs() < 1e-6);
            assert!((gain(-1.0, s) + 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_gain_is_monotonic() {
        let mut last = gain(-1.0, 0.6);
        for i in -99..=100 {
            let next = gain(i as f32 / 100.0, 0.6);
            assert!(next >= last);
            last = next;
        }
    }

    #[test]
    fn test_gain_sharpens_midrange() {
        assert!(gain(0.3, 0.8) > gain(0.3, 0.2));
    }

    #[test]
    fn test_squash_bounds() {
        assert_eq!(squash(0.0, 0.5), 0.0);
        for r in [-35.0, -3.0, 0.5, 12.0, 35.0] {
            let v = squash(r, 0.9);
            assert!((-1.0..=1.0).contains(&v), "{v}");
            assert_eq!(v.signum(), f32::signum(r));
        }
    }
}
