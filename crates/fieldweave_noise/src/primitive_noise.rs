//! Plain primitive generators.
//!
//! [`SimplexNoise`] and [`ValueNoise`] expose the raw primitives through the
//! [`Noise`] contract, so they can be wrapped, serialized and configured like
//! any composite generator.

use crate::error::NoiseResult;
use crate::noise::{fixed, Noise, MAX_DIMENSION, MIN_DIMENSION};
use crate::primitive::{simplex, value};
use crate::registry::NoiseRegistry;
use crate::serial::{Cursor, RecordWriter};

/// Reads a record holding only a seed.
fn read_seed(cursor: &mut Cursor<'_>) -> NoiseResult<i64> {
    cursor.open()?;
    let seed = cursor.parse("seed")?;
    cursor.close()?;
    Ok(seed)
}

fn write_seed(seed: i64, out: &mut String) {
    let mut record = RecordWriter::open(out);
    record.field(seed);
    record.close();
}

/// Seeded simplex-gradient noise, 2D to 6D.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SimplexNoise {
    seed: i64,
}

impl SimplexNoise {
    /// Serialization tag.
    pub const TAG: &'static str = "SimN";

    /// Creates a generator.
    #[must_use]
    pub const fn new(seed: i64) -> Self {
        Self { seed }
    }
}

impl Noise for SimplexNoise {
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
        match point.len() {
            2 => simplex(fixed::<2>(point), seed),
            3 => simplex(fixed::<3>(point), seed),
            4 => simplex(fixed::<4>(point), seed),
            5 => simplex(fixed::<5>(point), seed),
            6 => simplex(fixed::<6>(point), seed),
            _ => 0.0,
        }
    }

    fn write_record(&self, out: &mut String) {
        write_seed(self.seed, out);
    }

    fn read_record(&mut self, cursor: &mut Cursor<'_>, _: &NoiseRegistry) -> NoiseResult<()> {
        self.seed = read_seed(cursor)?;
        Ok(())
    }
}

/// Seeded value-lattice noise, 2D to 6D.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ValueNoise {
    seed: i64,
}

impl ValueNoise {
    /// Serialization tag.
    pub const TAG: &'static str = "ValN";

    /// Creates a generator.
    #[must_use]
    pub const fn new(seed: i64) -> Self {
        Self { seed }
    }
}

impl Noise for ValueNoise {
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
        match point.len() {
            2 => value(fixed::<2>(point), seed),
            3 => value(fixed::<3>(point), seed),
            4 => value(fixed::<4>(point), seed),
            5 => value(fixed::<5>(point), seed),
            6 => value(fixed::<6>(point), seed),
            _ => 0.0,
        }
    }

    fn write_record(&self, out: &mut String) {
        write_seed(self.seed, out);
    }

    fn read_record(&mut self, cursor: &mut Cursor<'_>, _: &NoiseRegistry) -> NoiseResult<()> {
        self.seed = read_seed(cursor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_primitives() {
        let s = SimplexNoise::new(12);
        let v = ValueNoise::new(12);
        assert_eq!(
            s.noise_3d(0.3, 1.7, -2.2).to_bits(),
            simplex([0.3, 1.7, -2.2], 12).to_bits()
        );
        assert_eq!(
            v.noise_4d(0.3, 1.7, -2.2, 9.0).to_bits(),
            value([0.3, 1.7, -2.2, 9.0], 12).to_bits()
        );
    }

    #[test]
    fn test_seed_records() {
        let s = SimplexNoise::new(-40);
        assert_eq!(s.string_serialize(), "`-40`");
        assert_eq!(SimplexNoise::recreate_from_string("`-40`").unwrap(), s);
        assert_eq!(ValueNoise::recreate_from_string("`7`").unwrap(), ValueNoise::new(7));
        assert!(ValueNoise::recreate_from_string("`7~8`").is_err());
    }

    #[test]
    fn test_distinct_variants_never_equal() {
        let s: Box<dyn Noise> = Box::new(SimplexNoise::new(1));
        let v: Box<dyn Noise> = Box::new(ValueNoise::new(1));
        assert!(*s != *v);
    }
}
