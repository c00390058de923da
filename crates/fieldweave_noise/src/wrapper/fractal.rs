//! Frequency scaling and octave summation over any wrapped generator.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{NoiseError, NoiseResult};
use crate::honey::HoneyNoise;
use crate::noise::{Noise, MAX_DIMENSION, MIN_DIMENSION};
use crate::registry::NoiseRegistry;
use crate::serial::{Cursor, RecordWriter};

/// cos of the golden angle, π(3 − √5).
const GOLDEN_COS: f32 = -0.737_368_9;

/// sin of the golden angle.
const GOLDEN_SIN: f32 = 0.675_490_3;

/// Share of the previous octave added to the next octave's coordinates.
const WARP: f32 = 0.25;

/// How octaves are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractalMode {
    /// Plain sum of octaves.
    #[default]
    Fbm,
    /// Sum of `2|n| - 1`: rounded, cloud-like lobes.
    Billow,
    /// Sum of `(1 - |n|)²`: sharp crests.
    Ridged,
    /// Sum of octaves, each sampled at coordinates offset by the previous one.
    DomainWarp,
}

impl FractalMode {
    /// Integer used in serialized records.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Fbm => 0,
            Self::Billow => 1,
            Self::Ridged => 2,
            Self::DomainWarp => 3,
        }
    }

    /// Inverse of [`FractalMode::index`].
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Fbm),
            1 => Some(Self::Billow),
            2 => Some(Self::Ridged),
            3 => Some(Self::DomainWarp),
            _ => None,
        }
    }
}

impl fmt::Display for FractalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fbm => "fbm",
            Self::Billow => "billow",
            Self::Ridged => "ridged",
            Self::DomainWarp => "domain_warp",
        };
        f.write_str(name)
    }
}

/// Base wrapper: scales coordinates by `frequency` and sums `octaves`
/// samples of the wrapped generator.
///
/// With a single octave and [`FractalMode::Fbm`] this is a plain frequency
/// scale. Each further octave doubles the coordinates, halves the weight and
/// bumps the seed by one. Dimensions are those of the wrapped generator.
#[derive(Clone, Debug)]
pub struct NoiseWrapper {
    wrapped: Box<dyn Noise>,
    seed: i64,
    frequency: f32,
    mode: FractalMode,
    octaves: u32,
    fractal_spiral: bool,
}

impl NoiseWrapper {
    /// Serialization tag.
    pub const TAG: &'static str = "NoiW";

    /// Wraps `wrapped` with frequency 1, one FBM octave and no spiral.
    ///
    /// The wrapper's seed starts as the wrapped generator's seed.
    #[must_use]
    pub fn new(wrapped: Box<dyn Noise>) -> Self {
        let seed = wrapped.seed();
        Self {
            wrapped,
            seed,
            frequency: 1.0,
            mode: FractalMode::Fbm,
            octaves: 1,
            fractal_spiral: false,
        }
    }

    /// Builder: sets the frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: f32) -> Self {
        self.frequency = frequency;
        self
    }

    /// Builder: sets the mode and octave count.
    #[must_use]
    pub fn with_fractal(mut self, mode: FractalMode, octaves: u32) -> Self {
        self.mode = mode;
        self.octaves = octaves.max(1);
        self
    }

    /// Builder: enables or disables the per-octave spiral.
    #[must_use]
    pub fn with_spiral(mut self, fractal_spiral: bool) -> Self {
        self.fractal_spiral = fractal_spiral;
        self
    }

    /// Builder: sets the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    /// The wrapped generator.
    #[must_use]
    pub fn wrapped(&self) -> &dyn Noise {
        self.wrapped.as_ref()
    }

    /// Replaces the wrapped generator.
    pub fn set_wrapped(&mut self, wrapped: Box<dyn Noise>) {
        self.wrapped = wrapped;
    }

    /// Coordinate multiplier applied before the first octave.
    #[must_use]
    pub const fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Sets the coordinate multiplier.
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
    }

    /// Octave combination mode.
    #[must_use]
    pub const fn mode(&self) -> FractalMode {
        self.mode
    }

    /// Sets the octave combination mode.
    pub fn set_mode(&mut self, mode: FractalMode) {
        self.mode = mode;
    }

    /// Number of octaves, at least 1.
    #[must_use]
    pub const fn octaves(&self) -> u32 {
        self.octaves
    }

    /// Sets the octave count. 0 is raised to 1.
    pub fn set_octaves(&mut self, octaves: u32) {
        self.octaves = octaves.max(1);
    }

    /// Whether each octave is rotated by the golden angle.
    #[must_use]
    pub const fn fractal_spiral(&self) -> bool {
        self.fractal_spiral
    }

    /// Enables or disables the per-octave rotation.
    pub fn set_fractal_spiral(&mut self, fractal_spiral: bool) {
        self.fractal_spiral = fractal_spiral;
    }

    /// Runs the fractal pass on already-transformed coordinates.
    ///
    /// `point` must hold 2 to 6 coordinates.
    pub(crate) fn fractal(&self, point: &[f32], seed: i64) -> f32 {
        let n = point.len();
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&n) {
            return 0.0;
        }

        let mut p = [0.0f32; MAX_DIMENSION];
        for (scaled, &c) in p.iter_mut().zip(point) {
            *scaled = c * self.frequency;
        }

        let mut total = 0.0f32;
        let mut max_amplitude = 0.0f32;
        let mut amplitude = 1.0f32;
        let mut previous = 0.0f32;
        let mut octave_seed = seed;

        for _ in 0..self.octaves {
            let mut sample = p;
            if self.mode == FractalMode::DomainWarp {
                for c in &mut sample[..n] {
                    *c += previous * WARP;
                }
            }
            let noise = self.wrapped.noise_with_seed(&sample[..n], octave_seed);
            let contribution = match self.mode {
                FractalMode::Fbm | FractalMode::DomainWarp => noise,
                FractalMode::Billow => 2.0 * noise.abs() - 1.0,
                FractalMode::Ridged => {
                    let ridge = 1.0 - noise.abs();
                    ridge * ridge
                }
            };
            total += contribution * amplitude;
            max_amplitude += amplitude;
            previous = noise;

            amplitude *= 0.5;
            octave_seed = octave_seed.wrapping_add(1);
            for c in &mut p[..n] {
                *c *= 2.0;
            }
            if self.fractal_spiral {
                spiral(&mut p[..n]);
            }
        }

        let normalized = total / max_amplitude;
        if self.mode == FractalMode::Ridged {
            2.0 * normalized - 1.0
        } else {
            normalized
        }
    }

    /// Appends the wrapper fields (wrapped generator first) to `record`.
    pub(crate) fn write_fields(&self, record: &mut RecordWriter<'_>) {
        record
            .nested(self.wrapped.as_ref())
            .field(self.seed)
            .field(self.frequency)
            .field(self.mode.index())
            .field(self.octaves)
            .flag(self.fractal_spiral);
    }

    /// Reads the fields written by [`NoiseWrapper::write_fields`].
    pub(crate) fn read_fields(
        cursor: &mut Cursor<'_>,
        registry: &NoiseRegistry,
    ) -> NoiseResult<Self> {
        let wrapped = registry.read_tagged(cursor)?;
        cursor.separator()?;
        let seed = cursor.parse("seed")?;
        cursor.separator()?;
        let frequency = cursor.parse("frequency")?;
        cursor.separator()?;
        let index: u8 = cursor.parse("mode")?;
        let mode = FractalMode::from_index(index).ok_or_else(|| NoiseError::InvalidValue {
            field: "mode",
            value: index.to_string(),
        })?;
        cursor.separator()?;
        let octaves: u32 = cursor.parse("octaves")?;
        if octaves == 0 {
            return Err(NoiseError::InvalidValue {
                field: "octaves",
                value: octaves.to_string(),
            });
        }
        cursor.separator()?;
        let fractal_spiral = cursor.flag("fractal_spiral")?;

        Ok(Self {
            wrapped,
            seed,
            frequency,
            mode,
            octaves,
            fractal_spiral,
        })
    }
}

/// Rotates coordinate pairs (0,1), (2,3), (4,5) by the golden angle.
fn spiral(p: &mut [f32]) {
    for pair in p.chunks_exact_mut(2) {
        let (a, b) = (pair[0], pair[1]);
        pair[0] = a * GOLDEN_COS - b * GOLDEN_SIN;
        pair[1] = a * GOLDEN_SIN + b * GOLDEN_COS;
    }
}

impl Default for NoiseWrapper {
    fn default() -> Self {
        Self::new(Box::<HoneyNoise>::default())
    }
}

impl PartialEq for NoiseWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed
            && self.frequency.to_bits() == other.frequency.to_bits()
            && self.mode == other.mode
            && self.octaves == other.octaves
            && self.fractal_spiral == other.fractal_spiral
            && *self.wrapped == *other.wrapped
    }
}

impl Eq for NoiseWrapper {}

impl Hash for NoiseWrapper {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.wrapped.hash(state);
        self.seed.hash(state);
        self.frequency.to_bits().hash(state);
        self.mode.hash(state);
        self.octaves.hash(state);
        self.fractal_spiral.hash(state);
    }
}

impl Noise for NoiseWrapper {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn min_dimension(&self) -> usize {
        self.wrapped.min_dimension()
    }

    fn max_dimension(&self) -> usize {
        self.wrapped.max_dimension()
    }

    fn can_use_seed(&self) -> bool {
        self.wrapped.can_use_seed()
    }

    fn has_efficient_set_seed(&self) -> bool {
        self.wrapped.has_efficient_set_seed()
    }

    fn set_seed(&mut self, seed: i64) {
        self.seed = seed;
    }

    fn seed(&self) -> i64 {
        self.seed
    }

    fn noise_with_seed(&self, point: &[f32], seed: i64) -> f32 {
        self.fractal(point, seed)
    }

    fn write_record(&self, out: &mut String) {
        let mut record = RecordWriter::open(out);
        self.write_fields(&mut record);
        record.close();
    }

    fn read_record(&mut self, cursor: &mut Cursor<'_>, registry: &NoiseRegistry) -> NoiseResult<()> {
        cursor.open()?;
        let read = Self::read_fields(cursor, registry)?;
        cursor.close()?;
        *self = read;
        Ok(())
    }
}
