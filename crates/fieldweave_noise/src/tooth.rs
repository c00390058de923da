//! # Tooth Noise
//!
//! Seedless field built from nested sines.
//!
//! Cheap and smooth, with a sharp, repeating "tooth" texture. There is no
//! lattice and no hashing, so the output depends on the coordinates alone.
//! Only 2D and 3D are implemented; 4D to 6D return exactly 0 even though
//! [`Noise::max_dimension`] reports 6.

use crate::error::NoiseResult;
use crate::noise::{Noise, MAX_DIMENSION, MIN_DIMENSION};
use crate::registry::NoiseRegistry;
use crate::serial::{Cursor, RecordWriter};

/// Three sines deep: `sin(a + sin(b + sin(c)))`.
#[inline]
fn nest(a: f32, b: f32, c: f32) -> f32 {
    (a + (b + c.sin()).sin()).sin()
}

/// Stateless nested-sine noise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ToothNoise;

impl ToothNoise {
    /// Serialization tag.
    pub const TAG: &'static str = "TooN";

    fn tooth_2d(x: f32, y: f32) -> f32 {
        let a = nest(x, y * 1.7, x * 0.9);
        let b = nest(y, x * 1.3, y * 1.1);
        let c = nest((a + b) * 2.0, (a - b) * 3.0, a * b * 5.0);
        (a + b + c) / 3.0
    }

    fn tooth_3d(x: f32, y: f32, z: f32) -> f32 {
        let a = nest(x, y * 1.7, z * 0.9);
        let b = nest(y, z * 1.7, x * 0.9);
        let c = nest(z, x * 1.7, y * 0.9);

        let d = nest((a + b) * 2.0, c * 3.0, a - b);
        let e = nest((b + c) * 2.0, a * 3.0, b - c);
        let f = nest((c + a) * 2.0, b * 3.0, c - a);
        (d + e + f) / 3.0
    }
}

impl Noise for ToothNoise {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn min_dimension(&self) -> usize {
        MIN_DIMENSION
    }

    fn max_dimension(&self) -> usize {
        MAX_DIMENSION
    }

    fn can_use_seed(&self) -> bool {
        false
    }

    fn set_seed(&mut self, _: i64) {}

    fn seed(&self) -> i64 {
        0
    }

    fn noise_with_seed(&self, point: &[f32], _: i64) -> f32 {
        match *point {
            [x, y] => Self::tooth_2d(x, y),
            [x, y, z] => Self::tooth_3d(x, y, z),
            _ => 0.0,
        }
    }

    fn write_record(&self, out: &mut String) {
        RecordWriter::open(out).close();
    }

    fn read_record(&mut self, cursor: &mut Cursor<'_>, _: &NoiseRegistry) -> NoiseResult<()> {
        cursor.open()?;
        cursor.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_higher_dimensions_are_zero() {
        // 4D to 6D were never implemented; callers rely on the exact zero
        let noise = ToothNoise;
        assert_eq!(noise.max_dimension(), 6);
        assert_eq!(noise.noise_4d(1.2, 3.4, 5.6, 7.8).to_bits(), 0.0f32.to_bits());
        assert_eq!(noise.noise_5d(1.0, 2.0, 3.0, 4.0, 5.0).to_bits(), 0.0f32.to_bits());
        assert_eq!(
            noise.noise_6d(-1.0, 2.0, -3.0, 4.0, -5.0, 6.0).to_bits(),
            0.0f32.to_bits()
        );
    }

    #[test]
    fn test_range_and_variation() {
        let noise = ToothNoise;
        let mut distinct = std::collections::HashSet::new();
        for i in 0..400 {
            let x = i as f32 * 0.37 - 70.0;
            let y = i as f32 * -0.21 + 13.0;
            for v in [noise.noise_2d(x, y), noise.noise_3d(x, y, x * 0.5)] {
                assert!(v.is_finite() && (-1.0..=1.0).contains(&v), "{v}");
                distinct.insert(v.to_bits());
            }
        }
        assert!(distinct.len() > 100);
    }

    #[test]
    fn test_seed_is_ignored() {
        let mut noise = ToothNoise;
        assert!(!noise.can_use_seed());
        assert!(!noise.has_efficient_set_seed());
        noise.set_seed(99);
        assert_eq!(noise.seed(), 0);
        assert_eq!(
            noise.noise_2d_with_seed(0.4, 0.8, 1).to_bits(),
            noise.noise_2d_with_seed(0.4, 0.8, 2).to_bits()
        );
    }

    #[test]
    fn test_empty_record() {
        assert_eq!(ToothNoise.string_serialize(), "``");
        assert_eq!(ToothNoise::recreate_from_string("``").unwrap(), ToothNoise);
        assert!(ToothNoise::recreate_from_string("`1`").is_err());
    }
}
