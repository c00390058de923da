//! # Foamplex Noise
//!
//! Rotated multi-sample resampling of simplex noise.
//!
//! For a `D`-dimensional point:
//!
//! 1. Project the point onto the `D + 1` vertices of a regular simplex,
//!    giving projections `p0 ..= pD`.
//! 2. Take `D + 1` samples. Sample `i` feeds simplex noise the `D`
//!    projections other than `p_i`, each shifted by a quarter of the
//!    previous sample (a feedback domain warp).
//! 3. Average the samples and sharpen with [`gain`].
//!
//! Averaging more samples narrows the spread, so the gain sharpness rises
//! with dimension to win back the full [-1, 1] range.

use crate::error::NoiseResult;
use crate::noise::{fixed, Noise, MAX_DIMENSION, MIN_DIMENSION};
use crate::primitive::{gain, simplex};
use crate::registry::NoiseRegistry;
use crate::serial::{Cursor, RecordWriter};

/// Unit vertices of a regular simplex, per dimension (index `D - 2`).
///
/// Rows past `D + 1` and columns past `D` are unused padding.
#[allow(clippy::excessive_precision)]
const PROJECTIONS: [[[f32; 6]; 7]; 5] = [
    [
        [1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [-0.5, 0.866_025_404, 0.0, 0.0, 0.0, 0.0],
        [-0.5, -0.866_025_404, 0.0, 0.0, 0.0, 0.0],
        [0.0; 6],
        [0.0; 6],
        [0.0; 6],
        [0.0; 6],
    ],
    [
        [1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [-0.333_333_333, 0.942_809_042, 0.0, 0.0, 0.0, 0.0],
        [-0.333_333_333, -0.471_404_521, 0.816_496_581, 0.0, 0.0, 0.0],
        [-0.333_333_333, -0.471_404_521, -0.816_496_581, 0.0, 0.0, 0.0],
        [0.0; 6],
        [0.0; 6],
        [0.0; 6],
    ],
    [
        [1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [-0.25, 0.968_245_837, 0.0, 0.0, 0.0, 0.0],
        [-0.25, -0.322_748_612, 0.912_870_929, 0.0, 0.0, 0.0],
        [-0.25, -0.322_748_612, -0.456_435_465, 0.790_569_415, 0.0, 0.0],
        [-0.25, -0.322_748_612, -0.456_435_465, -0.790_569_415, 0.0, 0.0],
        [0.0; 6],
        [0.0; 6],
    ],
    [
        [1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [-0.2, 0.979_795_897, 0.0, 0.0, 0.0, 0.0],
        [-0.2, -0.244_948_974, 0.948_683_298, 0.0, 0.0, 0.0],
        [-0.2, -0.244_948_974, -0.316_227_766, 0.894_427_191, 0.0, 0.0],
        [-0.2, -0.244_948_974, -0.316_227_766, -0.447_213_595, 0.774_596_669, 0.0],
        [-0.2, -0.244_948_974, -0.316_227_766, -0.447_213_595, -0.774_596_669, 0.0],
        [0.0; 6],
    ],
    [
        [1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [-0.166_666_667, 0.986_013_297, 0.0, 0.0, 0.0, 0.0],
        [-0.166_666_667, -0.197_202_659, 0.966_091_783, 0.0, 0.0, 0.0],
        [-0.166_666_667, -0.197_202_659, -0.241_522_946, 0.935_414_347, 0.0, 0.0],
        [
            -0.166_666_667,
            -0.197_202_659,
            -0.241_522_946,
            -0.311_804_782,
            0.881_917_104,
            0.0,
        ],
        [
            -0.166_666_667,
            -0.197_202_659,
            -0.241_522_946,
            -0.311_804_782,
            -0.440_958_552,
            0.763_762_616,
        ],
        [
            -0.166_666_667,
            -0.197_202_659,
            -0.241_522_946,
            -0.311_804_782,
            -0.440_958_552,
            -0.763_762_616,
        ],
    ],
];

/// Projection order per sample in 5D. Row `i` omits projection `i`.
const ORDER_5D: [[usize; 5]; 6] = [
    [3, 1, 5, 2, 4],
    [0, 4, 2, 5, 3],
    [5, 3, 0, 4, 1],
    [1, 5, 4, 0, 2],
    [2, 0, 3, 1, 5],
    [4, 2, 1, 3, 0],
];

/// Projection order per sample in 6D. Row `i` omits projection `i`.
const ORDER_6D: [[usize; 6]; 7] = [
    [4, 1, 6, 3, 5, 2],
    [0, 5, 2, 6, 4, 3],
    [6, 3, 0, 4, 1, 5],
    [2, 6, 5, 1, 0, 4],
    [5, 0, 3, 2, 6, 1],
    [1, 4, 6, 0, 2, 3],
    [3, 2, 4, 5, 1, 0],
];

/// Seed offsets per sample index, shared by every dimension.
const SAMPLE_SEEDS: [i64; 7] = [
    0x1B87_3593_4F1A_2B4D,
    0x4CF5_AD43_2745_937F,
    0x52DC_E729_DA3E_D7A1,
    0x2545_F491_4F6C_DD1D,
    0x6A09_E667_F3BC_C909,
    0x3C6E_F372_FE94_F82B,
    0x1F83_D9AB_FB41_BD6B,
];

/// Gain sharpness per dimension (index `D - 2`).
const SHARPNESS: [f32; 5] = [0.35, 0.45, 0.55, 0.65, 0.75];

/// Share of the previous sample added to the next sample's coordinates.
const WARP: f32 = 0.25;

/// Multi-sample resampled simplex noise, 2D to 6D.
///
/// Holds only a seed; every other coefficient is a fixed table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FoamplexNoise {
    seed: i64,
}

impl FoamplexNoise {
    /// Serialization tag.
    pub const TAG: &'static str = "FoPN";

    /// Creates a generator.
    #[must_use]
    pub const fn new(seed: i64) -> Self {
        Self { seed }
    }

    /// Projection index used by coordinate `j` of sample `i`.
    #[inline]
    fn projection_index<const D: usize>(sample: usize, coordinate: usize) -> usize {
        match D {
            5 => ORDER_5D[sample][coordinate],
            6 => ORDER_6D[sample][coordinate],
            _ => (sample + 1 + coordinate) % (D + 1),
        }
    }

    fn sample<const D: usize>(point: [f32; D], seed: i64) -> f32 {
        let vertices = &PROJECTIONS[D - 2];
        let mut projections = [0.0f32; 7];
        for (p, vertex) in projections.iter_mut().zip(vertices.iter()).take(D + 1) {
            *p = point.iter().zip(vertex.iter()).map(|(a, b)| a * b).sum();
        }

        let mut previous = 0.0f32;
        let mut total = 0.0f32;
        for (i, &offset) in SAMPLE_SEEDS.iter().enumerate().take(D + 1) {
            let shift = previous * WARP;
            let warped: [f32; D] = core::array::from_fn(|j| {
                projections[Self::projection_index::<D>(i, j)] + shift
            });
            previous = simplex(warped, seed.wrapping_add(offset));
            total += previous;
        }

        gain(total / (D + 1) as f32, SHARPNESS[D - 2])
    }
}

impl Noise for FoamplexNoise {
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
            2 => Self::sample(fixed::<2>(point), seed),
            3 => Self::sample(fixed::<3>(point), seed),
            4 => Self::sample(fixed::<4>(point), seed),
            5 => Self::sample(fixed::<5>(point), seed),
            6 => Self::sample(fixed::<6>(point), seed),
            _ => 0.0,
        }
    }

    fn write_record(&self, out: &mut String) {
        let mut record = RecordWriter::open(out);
        record.field(self.seed);
        record.close();
    }

    fn read_record(&mut self, cursor: &mut Cursor<'_>, _: &NoiseRegistry) -> NoiseResult<()> {
        cursor.open()?;
        let seed = cursor.parse("seed")?;
        cursor.close()?;
        self.seed = seed;
        Ok(())
    }
}
