//! # Radial Symmetry
//!
//! Folds the plane around a center so the wrapped field repeats
//! `divisions` times per turn, like a kaleidoscope.
//!
//! The polar angle (in turns) is multiplied by `divisions`, then turned back
//! into a point on a circle of radius `len / divisions`. Rotating the input
//! by one wedge adds a whole turn to that angle and lands on the same point.
//! With `mirror` set, odd wedges run their angle backwards, so each wedge is
//! the reflection of its neighbors.
//!
//! The distance from the center becomes an extra coordinate, which keeps
//! rings at different radii distinct.

use std::f32::consts::TAU;
use std::hash::{Hash, Hasher};

use crate::error::{NoiseError, NoiseResult};
use crate::noise::{Noise, MAX_DIMENSION, MIN_DIMENSION};
use crate::registry::NoiseRegistry;
use crate::serial::{Cursor, RecordWriter};

use super::NoiseWrapper;

/// N-fold rotational symmetry around `(center_x, center_y)`.
///
/// 2D input is evaluated as 3D `(rx, ry, len)`. For 3D and up, the third
/// coordinate becomes `len - z` and the rest pass through. The fractal pass
/// of the embedded [`NoiseWrapper`] then runs on that point.
#[derive(Clone, Debug)]
pub struct RadialNoiseWrapper {
    base: NoiseWrapper,
    center_x: f32,
    center_y: f32,
    divisions: u32,
    mirror: bool,
}

impl RadialNoiseWrapper {
    /// Serialization tag.
    pub const TAG: &'static str = "RadW";

    /// One division, no mirror, centered on the origin.
    #[must_use]
    pub fn new(wrapped: Box<dyn Noise>) -> Self {
        Self::from_base(NoiseWrapper::new(wrapped))
    }

    /// Adds radial symmetry on top of an already configured fractal wrapper.
    #[must_use]
    pub fn from_base(base: NoiseWrapper) -> Self {
        Self {
            base,
            center_x: 0.0,
            center_y: 0.0,
            divisions: 1,
            mirror: false,
        }
    }

    /// Builder: sets the symmetry center.
    #[must_use]
    pub fn with_center(mut self, center_x: f32, center_y: f32) -> Self {
        self.center_x = center_x;
        self.center_y = center_y;
        self
    }

    /// Builder: sets the number of wedges (0 is raised to 1).
    #[must_use]
    pub fn with_divisions(mut self, divisions: u32) -> Self {
        self.divisions = divisions.max(1);
        self
    }

    /// Builder: enables or disables mirroring of odd wedges.
    #[must_use]
    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    /// The fractal settings applied after the radial fold.
    #[must_use]
    pub const fn base(&self) -> &NoiseWrapper {
        &self.base
    }

    /// Mutable access to the fractal settings.
    pub fn base_mut(&mut self) -> &mut NoiseWrapper {
        &mut self.base
    }

    /// Symmetry center.
    #[must_use]
    pub const fn center(&self) -> (f32, f32) {
        (self.center_x, self.center_y)
    }

    /// Moves the symmetry center.
    pub fn set_center(&mut self, center_x: f32, center_y: f32) {
        self.center_x = center_x;
        self.center_y = center_y;
    }

    /// Number of wedges per turn.
    #[must_use]
    pub const fn divisions(&self) -> u32 {
        self.divisions
    }

    /// Sets the number of wedges. 0 is raised to 1.
    pub fn set_divisions(&mut self, divisions: u32) {
        self.divisions = divisions.max(1);
    }

    /// Whether odd wedges are mirrored.
    #[must_use]
    pub const fn mirror(&self) -> bool {
        self.mirror
    }

    /// Enables or disables mirroring.
    pub fn set_mirror(&mut self, mirror: bool) {
        self.mirror = mirror;
    }

    /// Folds `(x, y)` into the first wedge: returns `(rx, ry, len)`.
    fn fold(&self, x: f32, y: f32) -> (f32, f32, f32) {
        let x = x - self.center_x;
        let y = y - self.center_y;
        let len = x.hypot(y);

        let mut theta = y.atan2(x) / TAU;
        if theta < 0.0 {
            theta += 1.0;
        }
        let divisions = self.divisions as f32;
        theta *= divisions;
        if self.mirror && (theta as i32) & 1 == 1 {
            theta = -theta;
        }

        let radius = len / divisions;
        let (sin, cos) = (theta * TAU).sin_cos();
        (cos * radius, sin * radius, len)
    }
}

impl Default for RadialNoiseWrapper {
    fn default() -> Self {
        Self::from_base(NoiseWrapper::default())
    }
}

impl PartialEq for RadialNoiseWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
            && self.center_x.to_bits() == other.center_x.to_bits()
            && self.center_y.to_bits() == other.center_y.to_bits()
            && self.divisions == other.divisions
            && self.mirror == other.mirror
    }
}

impl Eq for RadialNoiseWrapper {}

impl Hash for RadialNoiseWrapper {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base.hash(state);
        self.center_x.to_bits().hash(state);
        self.center_y.to_bits().hash(state);
        self.divisions.hash(state);
        self.mirror.hash(state);
    }
}

impl Noise for RadialNoiseWrapper {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn min_dimension(&self) -> usize {
        MIN_DIMENSION
    }

    fn max_dimension(&self) -> usize {
        self.base.wrapped().max_dimension().min(MAX_DIMENSION)
    }

    fn can_use_seed(&self) -> bool {
        self.base.can_use_seed()
    }

    fn has_efficient_set_seed(&self) -> bool {
        self.base.has_efficient_set_seed()
    }

    fn set_seed(&mut self, seed: i64) {
        self.base.set_seed(seed);
    }

    fn seed(&self) -> i64 {
        self.base.seed()
    }

    fn noise_with_seed(&self, point: &[f32], seed: i64) -> f32 {
        let n = point.len();
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&n) {
            return 0.0;
        }

        let (rx, ry, len) = self.fold(point[0], point[1]);
        let mut folded = [0.0f32; MAX_DIMENSION];
        folded[0] = rx;
        folded[1] = ry;
        if n == 2 {
            folded[2] = len;
            return self.base.fractal(&folded[..3], seed);
        }
        folded[2] = len - point[2];
        folded[3..n].copy_from_slice(&point[3..n]);
        self.base.fractal(&folded[..n], seed)
    }

    fn write_record(&self, out: &mut String) {
        let mut record = RecordWriter::open(out);
        self.base.write_fields(&mut record);
        record
            .field(self.center_x)
            .field(self.center_y)
            .field(self.divisions)
            .flag(self.mirror);
        record.close();
    }

    fn read_record(&mut self, cursor: &mut Cursor<'_>, registry: &NoiseRegistry) -> NoiseResult<()> {
        cursor.open()?;
        let base = NoiseWrapper::read_fields(cursor, registry)?;
        cursor.separator()?;
        let center_x = cursor.parse("center_x")?;
        cursor.separator()?;
        let center_y = cursor.parse("center_y")?;
        cursor.separator()?;
        let divisions: u32 = cursor.parse("divisions")?;
        if divisions == 0 {
            return Err(NoiseError::InvalidValue {
                field: "divisions",
                value: divisions.to_string(),
            });
        }
        cursor.separator()?;
        let mirror = cursor.flag("mirror")?;
        cursor.close()?;

        *self = Self {
            base,
            center_x,
            center_y,
            divisions,
            mirror,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseObject;
    use crate::{FractalMode, HoneyNoise, SimplexNoise, ToothNoise};

    const TOLERANCE: f32 = 1e-3;

    fn rotate(x: f32, y: f32, turns: f32) -> (f32, f32) {
        let (sin, cos) = (turns * TAU).sin_cos();
        (x * cos - y * sin, x * sin + y * cos)
    }

    #[test]
    fn test_defaults() {
        let radial = RadialNoiseWrapper::default();
        assert_eq!(radial.divisions(), 1);
        assert!(!radial.mirror());
        assert_eq!(radial.center(), (0.0, 0.0));
        assert_eq!(radial.base().wrapped().tag(), HoneyNoise::TAG);
    }

    #[test]
    fn test_rotational_symmetry() {
        for divisions in [2, 3, 5, 8] {
            let radial = RadialNoiseWrapper::new(Box::new(SimplexNoise::new(17)))
                .with_divisions(divisions);
            for i in 0..40 {
                let x = i as f32 * 0.61 - 11.0;
                let y = i as f32 * -0.37 + 4.0;
                let (rx, ry) = rotate(x, y, 1.0 / divisions as f32);
                let a = radial.noise_2d(x, y);
                let b = radial.noise_2d(rx, ry);
                assert!((a - b).abs() < TOLERANCE, "{divisions}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn test_symmetry_around_offset_center() {
        let radial = RadialNoiseWrapper::new(Box::new(SimplexNoise::new(5)))
            .with_center(10.0, -4.0)
            .with_divisions(4);
        let (dx, dy) = (3.0, 1.5);
        let (rx, ry) = rotate(dx, dy, 0.25);
        let a = radial.noise_2d(10.0 + dx, -4.0 + dy);
        let b = radial.noise_2d(10.0 + rx, -4.0 + ry);
        assert!((a - b).abs() < TOLERANCE, "{a} vs {b}");
    }

    #[test]
    fn test_mirror_reflects_across_axis() {
        let radial = RadialNoiseWrapper::new(Box::new(SimplexNoise::new(23)))
            .with_divisions(2)
            .with_mirror(true);
        for i in 1..30 {
            let x = i as f32 * 0.7 - 10.0;
            let y = i as f32 * 0.3 + 0.2;
            let a = radial.noise_2d(x, y);
            let b = radial.noise_2d(x, -y);
            assert!((a - b).abs() < TOLERANCE, "{a} vs {b}");
        }
    }

    #[test]
    fn test_third_coordinate_is_offset_from_radius() {
        let radial = RadialNoiseWrapper::new(Box::new(SimplexNoise::new(2)));
        let (rx, ry, len) = radial.fold(3.0, 4.0);
        assert!((len - 5.0).abs() < 1e-6);
        for z in [-2.0, 0.0, 5.0, 11.5] {
            assert_eq!(
                radial.noise_3d(3.0, 4.0, z).to_bits(),
                SimplexNoise::new(2).noise_3d(rx, ry, len - z).to_bits()
            );
        }
        assert_eq!(
            radial.noise_2d(3.0, 4.0).to_bits(),
            SimplexNoise::new(2).noise_3d(rx, ry, len).to_bits()
        );
    }

    #[test]
    fn test_max_dimension_follows_wrapped() {
        let radial = RadialNoiseWrapper::new(Box::new(ToothNoise));
        assert_eq!(radial.min_dimension(), 2);
        assert_eq!(radial.max_dimension(), 6);
        let v = radial.noise(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_nested_roundtrip() {
        let inner = RadialNoiseWrapper::new(Box::new(HoneyNoise::with_sharpness(3, 0.6)))
            .with_divisions(5)
            .with_mirror(true);
        let middle = NoiseWrapper::new(Box::new(inner))
            .with_fractal(FractalMode::Ridged, 2)
            .with_frequency(0.25);
        let mut outer = RadialNoiseWrapper::new(Box::new(middle))
            .with_center(-1.5, 2.25)
            .with_divisions(3);
        outer.set_seed(77);

        let text = outer.string_serialize();
        let restored = RadialNoiseWrapper::recreate_from_string(&text).unwrap();
        assert_eq!(restored, outer);
        assert_eq!(restored.string_serialize(), text);
        assert_eq!(
            restored.noise_2d(0.7, -0.9).to_bits(),
            outer.noise_2d(0.7, -0.9).to_bits()
        );
    }

    #[test]
    fn test_rejects_zero_divisions() {
        let radial = RadialNoiseWrapper::default();
        let text = radial.string_serialize();
        let broken = text.replace("~0~0~1~0`", "~0~0~0~0`");
        assert_ne!(broken, text);
        let mut target = RadialNoiseWrapper::default().with_divisions(4);
        assert!(matches!(
            target.string_deserialize(&broken),
            Err(NoiseError::InvalidValue { field: "divisions", .. })
        ));
        assert_eq!(target.divisions(), 4);
    }

    #[test]
    fn test_copy_is_deep() {
        let radial = RadialNoiseWrapper::new(Box::new(SimplexNoise::new(1)));
        let mut copy = radial.copy();
        copy.set_seed(9);
        assert_eq!(radial.seed(), 1);
        assert_eq!(copy.seed(), 9);
    }
}
