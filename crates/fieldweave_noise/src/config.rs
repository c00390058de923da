//! # Generator Configuration
//!
//! Describes a generator tree in TOML, loaded once at startup.
//!
//! ```toml
//! [generator]
//! kind = "radial"
//! divisions = 6
//! mirror = true
//!
//! [generator.wrapped]
//! kind = "wrapper"
//! mode = "ridged"
//! octaves = 4
//! frequency = 0.02
//!
//! [generator.wrapped.wrapped]
//! kind = "honey"
//! seed = 42
//! sharpness = 0.6
//! ```
//!
//! Omitted fields take the same defaults as the constructors.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NoiseError, NoiseResult};
use crate::flan::FlanNoise;
use crate::foamplex::FoamplexNoise;
use crate::honey::HoneyNoise;
use crate::noise::Noise;
use crate::primitive_noise::{SimplexNoise, ValueNoise};
use crate::tooth::ToothNoise;
use crate::wrapper::{FractalMode, NoiseWrapper, RadialNoiseWrapper};

/// Top-level configuration file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Root of the generator tree.
    pub generator: GeneratorConfig,
}

/// One node of a generator tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratorConfig {
    /// [`HoneyNoise`].
    Honey {
        /// Seed.
        #[serde(default)]
        seed: i64,
        /// Gain sharpness, inside (0, 1).
        #[serde(default = "default_sharpness")]
        sharpness: f32,
    },
    /// [`FoamplexNoise`].
    Foamplex {
        /// Seed.
        #[serde(default)]
        seed: i64,
    },
    /// [`FlanNoise`].
    Flan {
        /// Seed.
        #[serde(default)]
        seed: i64,
        /// Lattice dimension, clamped to 2..=6.
        #[serde(default = "default_flan_dimension")]
        dimension: usize,
        /// Squash sharpness.
        #[serde(default = "default_flan_sharpness")]
        sharpness: f32,
    },
    /// [`ToothNoise`].
    Tooth,
    /// [`SimplexNoise`].
    Simplex {
        /// Seed.
        #[serde(default)]
        seed: i64,
    },
    /// [`ValueNoise`].
    Value {
        /// Seed.
        #[serde(default)]
        seed: i64,
    },
    /// [`NoiseWrapper`].
    Wrapper {
        /// The wrapped generator.
        wrapped: Box<GeneratorConfig>,
        /// Wrapper seed; defaults to the wrapped generator's seed.
        #[serde(default)]
        seed: Option<i64>,
        /// Coordinate multiplier.
        #[serde(default = "default_frequency")]
        frequency: f32,
        /// Octave combination mode.
        #[serde(default)]
        mode: FractalMode,
        /// Octave count, at least 1.
        #[serde(default = "default_octaves")]
        octaves: u32,
        /// Rotate each octave by the golden angle.
        #[serde(default)]
        fractal_spiral: bool,
    },
    /// [`RadialNoiseWrapper`].
    Radial {
        /// The wrapped generator.
        wrapped: Box<GeneratorConfig>,
        /// Wrapper seed; defaults to the wrapped generator's seed.
        #[serde(default)]
        seed: Option<i64>,
        /// Coordinate multiplier.
        #[serde(default = "default_frequency")]
        frequency: f32,
        /// Octave combination mode.
        #[serde(default)]
        mode: FractalMode,
        /// Octave count, at least 1.
        #[serde(default = "default_octaves")]
        octaves: u32,
        /// Rotate each octave by the golden angle.
        #[serde(default)]
        fractal_spiral: bool,
        /// Symmetry center, x.
        #[serde(default)]
        center_x: f32,
        /// Symmetry center, y.
        #[serde(default)]
        center_y: f32,
        /// Wedges per turn, at least 1.
        #[serde(default = "default_divisions")]
        divisions: u32,
        /// Mirror odd wedges.
        #[serde(default)]
        mirror: bool,
    },
}

const fn default_sharpness() -> f32 {
    HoneyNoise::DEFAULT_SHARPNESS
}

const fn default_flan_sharpness() -> f32 {
    FlanNoise::DEFAULT_SHARPNESS
}

const fn default_flan_dimension() -> usize {
    3
}

const fn default_frequency() -> f32 {
    1.0
}

const fn default_octaves() -> u32 {
    1
}

const fn default_divisions() -> u32 {
    1
}

impl NoiseConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidConfig`] on malformed TOML or unknown
    /// generator kinds.
    pub fn from_toml_str(text: &str) -> NoiseResult<Self> {
        toml::from_str(text).map_err(|e| NoiseError::InvalidConfig(e.to_string()))
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidConfig`] if the file cannot be read or
    /// parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> NoiseResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| NoiseError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Renders the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidConfig`] if serialization fails.
    pub fn to_toml_string(&self) -> NoiseResult<String> {
        toml::to_string(self).map_err(|e| NoiseError::InvalidConfig(e.to_string()))
    }

    /// Builds the generator tree.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidConfig`] for zero octaves or divisions.
    pub fn build(&self) -> NoiseResult<Box<dyn Noise>> {
        let noise = self.generator.build()?;
        tracing::info!(
            tag = noise.tag(),
            seed = noise.seed(),
            "built noise generator from configuration"
        );
        Ok(noise)
    }
}

impl GeneratorConfig {
    /// Builds this node and everything below it.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidConfig`] for zero octaves or divisions.
    pub fn build(&self) -> NoiseResult<Box<dyn Noise>> {
        let noise: Box<dyn Noise> = match self {
            Self::Honey { seed, sharpness } => Box::new(HoneyNoise::with_sharpness(*seed, *sharpness)),
            Self::Foamplex { seed } => Box::new(FoamplexNoise::new(*seed)),
            Self::Flan {
                seed,
                dimension,
                sharpness,
            } => Box::new(FlanNoise::with_sharpness(*seed, *dimension, *sharpness)),
            Self::Tooth => Box::new(ToothNoise),
            Self::Simplex { seed } => Box::new(SimplexNoise::new(*seed)),
            Self::Value { seed } => Box::new(ValueNoise::new(*seed)),
            Self::Wrapper {
                wrapped,
                seed,
                frequency,
                mode,
                octaves,
                fractal_spiral,
            } => Box::new(build_wrapper(
                wrapped,
                *seed,
                *frequency,
                *mode,
                *octaves,
                *fractal_spiral,
            )?),
            Self::Radial {
                wrapped,
                seed,
                frequency,
                mode,
                octaves,
                fractal_spiral,
                center_x,
                center_y,
                divisions,
                mirror,
            } => {
                if *divisions == 0 {
                    return Err(NoiseError::InvalidConfig(
                        "radial divisions must be at least 1".into(),
                    ));
                }
                let base = build_wrapper(
                    wrapped,
                    *seed,
                    *frequency,
                    *mode,
                    *octaves,
                    *fractal_spiral,
                )?;
                Box::new(
                    RadialNoiseWrapper::from_base(base)
                        .with_center(*center_x, *center_y)
                        .with_divisions(*divisions)
                        .with_mirror(*mirror),
                )
            }
        };
        Ok(noise)
    }
}

fn build_wrapper(
    wrapped: &GeneratorConfig,
    seed: Option<i64>,
    frequency: f32,
    mode: FractalMode,
    octaves: u32,
    fractal_spiral: bool,
) -> NoiseResult<NoiseWrapper> {
    if octaves == 0 {
        return Err(NoiseError::InvalidConfig(
            "octaves must be at least 1".into(),
        ));
    }
    let mut wrapper = NoiseWrapper::new(wrapped.build()?)
        .with_frequency(frequency)
        .with_fractal(mode, octaves)
        .with_spiral(fractal_spiral);
    if let Some(seed) = seed {
        wrapper.set_seed(seed);
    }
    Ok(wrapper)
}
