//! # FIELDWEAVE Noise
//!
//! Deterministic, seedable continuous noise over 2 to 6 dimensions, with a
//! text format that persists arbitrarily nested generator trees exactly.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and coordinates always give the same value
//! 2. **Composable**: Wrappers own any other generator, including wrappers
//! 3. **Bit-exact**: Every float parameter survives a round-trip unchanged
//! 4. **Allocation-free evaluation**: Scratch space is fixed or reused
//!
//! ## Core Components
//!
//! - [`Noise`]: the capability contract every generator implements
//! - [`HoneyNoise`], [`FoamplexNoise`], [`FlanNoise`], [`ToothNoise`]:
//!   composite generators
//! - [`SimplexNoise`], [`ValueNoise`]: the raw primitives as generators
//! - [`NoiseWrapper`], [`RadialNoiseWrapper`]: coordinate-transform wrappers
//! - [`NoiseRegistry`]: tag dispatch for nested and top-level records
//! - [`NoiseConfig`]: generator trees described in TOML
//!
//! ## Example
//!
//! ```rust
//! use fieldweave_noise::{HoneyNoise, Noise, NoiseRegistry, RadialNoiseWrapper};
//!
//! let radial = RadialNoiseWrapper::new(Box::new(HoneyNoise::with_sharpness(42, 0.6)))
//!     .with_divisions(6)
//!     .with_mirror(true);
//! let value = radial.noise_2d(3.0, 4.0);
//! assert!((-1.0..=1.0).contains(&value));
//!
//! let text = NoiseRegistry::serialize(&radial);
//! let restored = NoiseRegistry::global().deserialize(&text).unwrap();
//! assert_eq!(restored.noise_2d(3.0, 4.0).to_bits(), value.to_bits());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod flan;
pub mod foamplex;
pub mod honey;
pub mod noise;
pub mod primitive;
pub mod primitive_noise;
pub mod registry;
pub mod serial;
pub mod tooth;
pub mod wrapper;

pub use config::{GeneratorConfig, NoiseConfig};
pub use error::{NoiseError, NoiseResult};
pub use flan::FlanNoise;
pub use foamplex::FoamplexNoise;
pub use honey::HoneyNoise;
pub use noise::{Noise, NoiseObject, MAX_DIMENSION, MIN_DIMENSION};
pub use primitive_noise::{SimplexNoise, ValueNoise};
pub use registry::{NoiseFactory, NoiseRegistry};
pub use serial::{float_to_reversed_bits, reversed_bits_to_float, Cursor, MAX_NESTING};
pub use tooth::ToothNoise;
pub use wrapper::{FractalMode, NoiseWrapper, RadialNoiseWrapper};
