//! # Flan Noise
//!
//! Layered 1D warps over a generalized simplex lattice.
//!
//! ## Construction
//!
//! Builds the `dim + 1` unit vertices of a regular simplex in `dim`
//! dimensions in closed form: every pair of vertices has dot product
//! `-1 / dim`. Each vertex is then spun in its first two coordinates by a
//! seeded angle, so the lattice never lines up with the axes.
//!
//! ## Evaluation
//!
//! The point (shifted by -5) is projected onto every vertex. Five layers then
//! walk the projections, each feeding `projection + warp` into a 1D wobble
//! and accumulating the result into `warp`. Layer sums add up into an
//! unbounded total, which [`squash`] maps into (-1, 1).
//!
//! ## Not reentrant
//!
//! The projection buffers are reused between calls. They live in `RefCell`s,
//! so `FlanNoise` is `Send` but not `Sync`.

use std::cell::RefCell;
use std::f32::consts::TAU;
use std::hash::{Hash, Hasher};

use crate::error::NoiseResult;
use crate::noise::{Noise, MAX_DIMENSION, MIN_DIMENSION};
use crate::primitive::hash::{hash_coords, to_unit, GOLDEN_GAMMA};
use crate::primitive::{line_wobble, squash};
use crate::registry::NoiseRegistry;
use crate::serial::{Cursor, RecordWriter};

/// Number of warp layers per evaluation.
const LAYERS: usize = 5;

/// Offset applied to every coordinate before projection.
const ORIGIN_SHIFT: f32 = 5.0;

/// Generalized-simplex layered warp noise.
#[derive(Debug, Clone)]
pub struct FlanNoise {
    seed: i64,
    dim: usize,
    /// `1 / sharpness`. This is the persisted form, so records round-trip
    /// bit for bit.
    inverse_sharpness: f32,
    /// Derived from `inverse_sharpness`; what evaluation uses.
    sharpness: f32,
    /// `dim + 1` vertices, `dim` components each, row-major.
    vertices: Vec<f32>,
    /// Shifted input coordinates; length `dim + 1`.
    working: RefCell<Vec<f32>>,
    /// Projections onto each vertex; length `dim + 1`.
    points: RefCell<Vec<f32>>,
}

impl FlanNoise {
    /// Serialization tag.
    pub const TAG: &'static str = "FlaN";

    /// Sharpness used by [`FlanNoise::new`].
    pub const DEFAULT_SHARPNESS: f32 = 0.5;

    /// Creates a generator with the default sharpness.
    ///
    /// `dimension` is clamped to `2..=6`.
    #[must_use]
    pub fn new(seed: i64, dimension: usize) -> Self {
        Self::with_sharpness(seed, dimension, Self::DEFAULT_SHARPNESS)
    }

    /// Creates a generator with an explicit sharpness.
    ///
    /// `dimension` is clamped to `2..=6`. The basis is built here, once.
    /// The sharpness is kept as its reciprocal, so [`FlanNoise::sharpness`]
    /// may differ from `sharpness` in the last bit.
    #[must_use]
    pub fn with_sharpness(seed: i64, dimension: usize, sharpness: f32) -> Self {
        Self::with_inverse_sharpness(seed, dimension, 1.0 / sharpness)
    }

    fn with_inverse_sharpness(seed: i64, dimension: usize, inverse_sharpness: f32) -> Self {
        let dim = dimension.clamp(MIN_DIMENSION, MAX_DIMENSION);
        let vertices = build_vertices(dim, seed);
        tracing::trace!(dim, seed, "built flan simplex basis");
        Self {
            seed,
            dim,
            inverse_sharpness,
            sharpness: 1.0 / inverse_sharpness,
            vertices,
            working: RefCell::new(vec![0.0; dim + 1]),
            points: RefCell::new(vec![0.0; dim + 1]),
        }
    }

    /// Lattice dimension.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dim
    }

    /// Current sharpness.
    #[must_use]
    pub const fn sharpness(&self) -> f32 {
        self.sharpness
    }

    /// Replaces the sharpness.
    pub fn set_sharpness(&mut self, sharpness: f32) {
        self.inverse_sharpness = 1.0 / sharpness;
        self.sharpness = 1.0 / self.inverse_sharpness;
    }

    /// Vertex `v` of the rotated basis.
    #[must_use]
    pub fn vertex(&self, v: usize) -> &[f32] {
        &self.vertices[v * self.dim..(v + 1) * self.dim]
    }
}

/// Regular simplex vertices, then a seeded spin of each vertex in the
/// first two coordinates.
fn build_vertices(dim: usize, seed: i64) -> Vec<f32> {
    let idv = -1.0 / dim as f64;
    let mut v = vec![vec![0.0f64; dim]; dim + 1];
    v[0][0] = 1.0;
    for row in v.iter_mut().skip(1) {
        row[0] = idv;
    }
    for d in 1..dim {
        let taken: f64 = v[d][..d].iter().map(|c| c * c).sum();
        let diagonal = (1.0 - taken).max(0.0).sqrt();
        v[d][d] = diagonal;
        for w in (d + 1)..=dim {
            let dot: f64 = (0..d).map(|i| v[d][i] * v[w][i]).sum();
            v[w][d] = (idv - dot) / diagonal;
        }
    }

    let mut vertices = Vec::with_capacity((dim + 1) * dim);
    for (index, row) in v.iter().enumerate() {
        let spin = f64::from(to_unit(hash_coords(seed, &[index as i64]))) * f64::from(TAU);
        let theta = row[1].atan2(row[0]) + spin;
        let dist = row[0].hypot(row[1]);
        vertices.push((theta.cos() * dist) as f32);
        vertices.push((theta.sin() * dist) as f32);
        vertices.extend(row[2..].iter().map(|&c| c as f32));
    }
    vertices
}

impl Default for FlanNoise {
    fn default() -> Self {
        Self::new(0, MIN_DIMENSION)
    }
}

impl PartialEq for FlanNoise {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed
            && self.dim == other.dim
            && self.inverse_sharpness.to_bits() == other.inverse_sharpness.to_bits()
    }
}

impl Eq for FlanNoise {}

impl Hash for FlanNoise {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.seed.hash(state);
        self.dim.hash(state);
        self.inverse_sharpness.to_bits().hash(state);
    }
}

impl Noise for FlanNoise {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn min_dimension(&self) -> usize {
        MIN_DIMENSION
    }

    fn max_dimension(&self) -> usize {
        MAX_DIMENSION
    }

    // The basis spin depends on the seed, so it is rebuilt here. Explicit
    // seeds passed to `noise_with_seed` drive only the warp chain.
    fn set_seed(&mut self, seed: i64) {
        self.seed = seed;
        self.vertices = build_vertices(self.dim, seed);
    }

    fn has_efficient_set_seed(&self) -> bool {
        false
    }

    fn seed(&self) -> i64 {
        self.seed
    }

    /// `seed` drives the warp chain only. The basis keeps the spin of the
    /// stored seed, so two generators with different stored seeds differ
    /// even when called with the same explicit seed.
    fn noise_with_seed(&self, point: &[f32], seed: i64) -> f32 {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&point.len()) {
            return 0.0;
        }
        let dim = self.dim;
        let mut working = self.working.borrow_mut();
        let mut points = self.points.borrow_mut();

        for (i, w) in working.iter_mut().take(dim).enumerate() {
            *w = point.get(i).copied().unwrap_or(0.0) - ORIGIN_SHIFT;
        }
        for (v, p) in points.iter_mut().enumerate() {
            *p = self
                .vertex(v)
                .iter()
                .zip(working.iter())
                .map(|(a, b)| a * b)
                .sum();
        }

        let mut state = seed;
        let mut result = 0.0f32;
        for layer in 0..LAYERS {
            let mut warp = 0.0f32;
            for j in 0..=dim {
                warp += line_wobble(state, points[j] + warp);
                state = state.rotate_left(23).wrapping_add(GOLDEN_GAMMA as i64);
                let nudge = layer as f32;
                for k in (j + 1)..=dim {
                    points[k] += nudge * self.vertices[k * dim + j % dim];
                }
            }
            result += warp;
        }

        squash(result, self.sharpness)
    }

    fn write_record(&self, out: &mut String) {
        let mut record = RecordWriter::open(out);
        record
            .field(self.seed)
            .field(self.dim)
            .reversed_bits(self.inverse_sharpness);
        record.close();
    }

    fn read_record(&mut self, cursor: &mut Cursor<'_>, _: &NoiseRegistry) -> NoiseResult<()> {
        cursor.open()?;
        let seed = cursor.parse("seed")?;
        cursor.separator()?;
        let dimension = cursor.parse("dimension")?;
        cursor.separator()?;
        let inverse = cursor.reversed_bits("sharpness")?;
        cursor.close()?;
        *self = Self::with_inverse_sharpness(seed, dimension, inverse);
        Ok(())
    }
}
