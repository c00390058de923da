//! # Noise Capability Contract
//!
//! Every generator and every wrapper implements [`Noise`].
//!
//! ## Evaluation
//!
//! Implementors provide one method, [`Noise::noise_with_seed`], taking a
//! slice of 2 to 6 coordinates. The positional `noise_2d` .. `noise_6d`
//! overloads and their `_with_seed` forms all route through it. Slices whose
//! length falls outside `2..=6` evaluate to 0.
//!
//! ## Object safety
//!
//! Wrappers own their wrapped generator as `Box<dyn Noise>`, so copying,
//! equality and hashing go through [`NoiseObject`], which is implemented
//! automatically for every `Noise + Clone + Eq + Hash` type.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{NoiseError, NoiseResult};
use crate::registry::NoiseRegistry;
use crate::serial::Cursor;

/// Smallest dimension any generator evaluates.
pub const MIN_DIMENSION: usize = 2;

/// Largest dimension any generator evaluates.
pub const MAX_DIMENSION: usize = 6;

/// Object-safe copy, equality and hashing for `dyn Noise`.
///
/// Blanket-implemented; never implement this by hand.
pub trait NoiseObject {
    /// Upcast for downcasting in [`NoiseObject::dyn_eq`].
    fn as_any(&self) -> &dyn Any;

    /// Deep copy. Mutating the copy never affects the original.
    fn copy(&self) -> Box<dyn Noise>;

    /// Structural equality against any other generator.
    fn dyn_eq(&self, other: &dyn Noise) -> bool;

    /// Feeds the configuration into `state`.
    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl<T> NoiseObject for T
where
    T: Noise + Clone + Eq + Hash + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn copy(&self) -> Box<dyn Noise> {
        Box::new(self.clone())
    }

    fn dyn_eq(&self, other: &dyn Noise) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        self.tag().hash(&mut state);
        self.hash(&mut state);
    }
}

/// A deterministic, seedable continuous noise field over 2 to 6 dimensions.
///
/// # Thread safety
///
/// `Noise` requires `Send` but not `Sync`. Generators with scratch buffers
/// (see [`crate::FlanNoise`]) are `!Sync`, so a single instance cannot be
/// evaluated from two threads at once. Give each worker its own
/// [`NoiseObject::copy`].
#[allow(clippy::too_many_arguments)]
pub trait Noise: NoiseObject + fmt::Debug + Send {
    /// Fixed 4-character identifier used for serialization dispatch.
    fn tag(&self) -> &'static str;

    /// Smallest meaningful dimension (inclusive).
    fn min_dimension(&self) -> usize;

    /// Largest meaningful dimension (inclusive).
    fn max_dimension(&self) -> usize;

    /// Whether the stored seed influences the output.
    fn can_use_seed(&self) -> bool {
        true
    }

    /// Whether [`Noise::set_seed`] is cheap enough to call per sample.
    fn has_efficient_set_seed(&self) -> bool {
        self.can_use_seed()
    }

    /// Replaces the stored seed. No-op for stateless generators.
    fn set_seed(&mut self, seed: i64);

    /// The stored seed, or 0 for stateless generators.
    fn seed(&self) -> i64;

    /// Evaluates at `point` with an explicit seed.
    ///
    /// Pure in `point` and `seed`: no configuration is changed, and the
    /// stored seed is ignored except where construction already baked it
    /// in. [`crate::FlanNoise`] spins its basis with the stored seed, so
    /// there `seed` only drives the warp chain.
    fn noise_with_seed(&self, point: &[f32], seed: i64) -> f32;

    /// Evaluates at `point` with the stored seed.
    fn noise(&self, point: &[f32]) -> f32 {
        self.noise_with_seed(point, self.seed())
    }

    /// 2D evaluation with the stored seed.
    fn noise_2d(&self, x: f32, y: f32) -> f32 {
        self.noise(&[x, y])
    }

    /// 3D evaluation with the stored seed.
    fn noise_3d(&self, x: f32, y: f32, z: f32) -> f32 {
        self.noise(&[x, y, z])
    }

    /// 4D evaluation with the stored seed.
    fn noise_4d(&self, x: f32, y: f32, z: f32, w: f32) -> f32 {
        self.noise(&[x, y, z, w])
    }

    /// 5D evaluation with the stored seed.
    fn noise_5d(&self, x: f32, y: f32, z: f32, w: f32, u: f32) -> f32 {
        self.noise(&[x, y, z, w, u])
    }

    /// 6D evaluation with the stored seed.
    fn noise_6d(&self, x: f32, y: f32, z: f32, w: f32, u: f32, v: f32) -> f32 {
        self.noise(&[x, y, z, w, u, v])
    }

    /// 2D evaluation with an explicit seed.
    fn noise_2d_with_seed(&self, x: f32, y: f32, seed: i64) -> f32 {
        self.noise_with_seed(&[x, y], seed)
    }

    /// 3D evaluation with an explicit seed.
    fn noise_3d_with_seed(&self, x: f32, y: f32, z: f32, seed: i64) -> f32 {
        self.noise_with_seed(&[x, y, z], seed)
    }

    /// 4D evaluation with an explicit seed.
    fn noise_4d_with_seed(&self, x: f32, y: f32, z: f32, w: f32, seed: i64) -> f32 {
        self.noise_with_seed(&[x, y, z, w], seed)
    }

    /// 5D evaluation with an explicit seed.
    fn noise_5d_with_seed(&self, x: f32, y: f32, z: f32, w: f32, u: f32, seed: i64) -> f32 {
        self.noise_with_seed(&[x, y, z, w, u], seed)
    }

    /// 6D evaluation with an explicit seed.
    fn noise_6d_with_seed(
        &self,
        x: f32,
        y: f32,
        z: f32,
        w: f32,
        u: f32,
        v: f32,
        seed: i64,
    ) -> f32 {
        self.noise_with_seed(&[x, y, z, w, u, v], seed)
    }

    /// Appends this generator's record (without tag) to `out`.
    fn write_record(&self, out: &mut String);

    /// Reads this generator's record from `cursor`, replacing the current
    /// configuration.
    ///
    /// Must leave `self` unchanged when it fails. Nested generators are
    /// created through `registry`.
    fn read_record(&mut self, cursor: &mut Cursor<'_>, registry: &NoiseRegistry)
        -> NoiseResult<()>;

    /// Serializes the full configuration to a backtick-delimited record.
    fn string_serialize(&self) -> String {
        let mut out = String::new();
        self.write_record(&mut out);
        out
    }

    /// Replaces the configuration with the one in `data`.
    ///
    /// Nested generators are resolved through [`NoiseRegistry::global`].
    fn string_deserialize(&mut self, data: &str) -> NoiseResult<()> {
        self.string_deserialize_with(data, NoiseRegistry::global())
    }

    /// Like [`Noise::string_deserialize`] with an explicit registry.
    fn string_deserialize_with(&mut self, data: &str, registry: &NoiseRegistry) -> NoiseResult<()> {
        if data.is_empty() {
            return Err(NoiseError::Empty);
        }
        let mut cursor = Cursor::new(data);
        let mut staged = self.copy();
        staged.read_record(&mut cursor, registry)?;
        cursor.finish()?;
        self.read_record(&mut Cursor::new(data), registry)
    }

    /// Allocates a fresh generator from `data`.
    fn recreate_from_string(data: &str) -> NoiseResult<Self>
    where
        Self: Sized + Default,
    {
        let mut noise = Self::default();
        noise.string_deserialize(data)?;
        Ok(noise)
    }
}

impl PartialEq for dyn Noise + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other)
    }
}

impl Eq for dyn Noise + '_ {}

impl Hash for dyn Noise + '_ {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dyn_hash(state);
    }
}

impl Clone for Box<dyn Noise> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

/// Copies the first `N` coordinates of `point` into an array.
///
/// Callers match on `point.len()` first, so the slice is long enough.
#[inline]
pub(crate) fn fixed<const N: usize>(point: &[f32]) -> [f32; N] {
    core::array::from_fn(|i| point[i])
}
