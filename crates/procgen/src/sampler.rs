//! Deterministic 2D Perlin sampling in the unit range.
//!
//! The lattice is built once from a fixed seed. World seeds never reseed it;
//! they shift the sample coordinates instead, so terrain stays continuous when
//! the seed changes by small amounts.

use noise::{NoiseFn, Perlin};

/// Permutation seed of the shared lattice.
const LATTICE_SEED: u32 = 0;

/// Stateless Perlin sampler returning values in `[0, 1]`.
#[derive(Clone)]
pub struct NoiseSampler {
    perlin: Perlin,
}

impl Default for NoiseSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NoiseSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseSampler").field("lattice_seed", &LATTICE_SEED).finish()
    }
}

impl NoiseSampler {
    pub fn new() -> Self {
        Self {
            perlin: Perlin::new(LATTICE_SEED),
        }
    }

    /// Raw sample at continuous noise-space coordinates.
    #[inline]
    pub fn sample_raw(&self, u: f64, v: f64) -> f32 {
        let n = (self.perlin.get([u, v]) + 1.0) * 0.5;
        n.clamp(0.0, 1.0) as f32
    }

    /// Sample grid cell `(x, z)` with the seed added to both coordinates
    /// before scaling by `frequency`.
    #[inline]
    pub fn sample(&self, x: i32, z: i32, seed: i32, frequency: f32) -> f32 {
        let f = frequency as f64;
        let u = (x as f64 + seed as f64) * f;
        let v = (z as f64 + seed as f64) * f;
        self.sample_raw(u, v)
    }
}
