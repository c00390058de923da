//! # Honey Noise
//!
//! Blend of value noise and simplex noise.
//!
//! Each primitive has its own artifacts: value noise shows its square
//! lattice, simplex noise its triangular one. Averaging the two at the same
//! point and seed hides both. The average is then passed through the
//! rational [`gain`] curve, where `sharpness` controls how hard mid-range
//! values are pushed toward ±1.

use std::hash::{Hash, Hasher};

use crate::error::NoiseResult;
use crate::noise::{fixed, Noise, MAX_DIMENSION, MIN_DIMENSION};
use crate::primitive::{gain, simplex, value};
use crate::registry::NoiseRegistry;
use crate::serial::{Cursor, RecordWriter};

/// Value and simplex noise averaged, then sharpened.
///
/// `sharpness` must stay strictly inside (0, 1). It is not validated: at 1
/// or above the gain denominator can reach zero and the output becomes
/// infinite or NaN.
#[derive(Clone, Copy, Debug)]
pub struct HoneyNoise {
    seed: i64,
    sharpness: f32,
}

impl HoneyNoise {
    /// Serialization tag.
    pub const TAG: &'static str = "HonN";

    /// Sharpness used by [`HoneyNoise::new`].
    pub const DEFAULT_SHARPNESS: f32 = 0.5;

    /// Creates a generator with the default sharpness.
    #[must_use]
    pub const fn new(seed: i64) -> Self {
        Self::with_sharpness(seed, Self::DEFAULT_SHARPNESS)
    }

    /// Creates a generator with an explicit sharpness.
    #[must_use]
    pub const fn with_sharpness(seed: i64, sharpness: f32) -> Self {
        Self { seed, sharpness }
    }

    /// Current sharpness.
    #[must_use]
    pub const fn sharpness(&self) -> f32 {
        self.sharpness
    }

    /// Replaces the sharpness. Keep it inside (0, 1).
    pub fn set_sharpness(&mut self, sharpness: f32) {
        self.sharpness = sharpness;
    }

    #[inline]
    fn blend<const N: usize>(point: [f32; N], seed: i64, sharpness: f32) -> f32 {
        let n = (value(point, seed) + simplex(point, seed)) * 0.5;
        gain(n, sharpness)
    }
}

impl Default for HoneyNoise {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PartialEq for HoneyNoise {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed && self.sharpness.to_bits() == other.sharpness.to_bits()
    }
}

impl Eq for HoneyNoise {}

impl Hash for HoneyNoise {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.seed.hash(state);
        self.sharpness.to_bits().hash(state);
    }
}

impl Noise for HoneyNoise {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn min_dimension(&self) -> usize {
        MIN_DIMENSION
    }

    fn max_dimension(&self) -> usize {
        MAX_DIMENSION
    }

    fn set_seed(&mut self, seed: i64) {
        self.seed = seed;
    }

    fn seed(&self) -> i64 {
        self.seed
    }

    fn noise_with_seed(&self, point: &[f32], seed: i64) -> f32 {
        let s = self.sharpness;
        match point.len() {
            2 => Self::blend(fixed::<2>(point), seed, s),
            3 => Self::blend(fixed::<3>(point), seed, s),
            4 => Self::blend(fixed::<4>(point), seed, s),
            5 => Self::blend(fixed::<5>(point), seed, s),
            6 => Self::blend(fixed::<6>(point), seed, s),
            _ => 0.0,
        }
    }

    fn write_record(&self, out: &mut String) {
        let mut record = RecordWriter::open(out);
        record.field(self.seed).reversed_bits(self.sharpness);
        record.close();
    }

    fn read_record(&mut self, cursor: &mut Cursor<'_>, _: &NoiseRegistry) -> NoiseResult<()> {
        cursor.open()?;
        let seed = cursor.parse("seed")?;
        cursor.separator()?;
        let sharpness = cursor.reversed_bits("sharpness")?;
        cursor.close()?;
        *self = Self::with_sharpness(seed, sharpness);
        Ok(())
    }
}
