//! Height bands and noise-driven variant selection.

use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::sampler::NoiseSampler;

/// Surface band a cell falls into, ordered by height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Biome {
    /// Below the water level; floor is a sand bed.
    Water,
    /// Thin sand strip just above the water.
    Shore,
    /// Main grassland band; the only band that grows trees and flowers.
    Grass,
    /// Rocky high ground.
    Highland,
}

impl Biome {
    pub const ALL: [Biome; 4] = [Biome::Water, Biome::Shore, Biome::Grass, Biome::Highland];

    /// Category the floor block is drawn from.
    pub fn floor_category(self) -> Category {
        match self {
            Biome::Water | Biome::Shore => Category::Sand,
            Biome::Grass => Category::Grass,
            Biome::Highland => Category::Rocky,
        }
    }

    /// Single-character map glyph used by previews.
    pub fn glyph(self) -> char {
        match self {
            Biome::Water => '~',
            Biome::Shore => '.',
            Biome::Grass => '"',
            Biome::Highland => '^',
        }
    }
}

/// Band thresholds. `shore_top` is `water_level + shore_width`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomeBands {
    pub water_level: f32,
    pub shore_top: f32,
    pub highland_start: f32,
}

impl BiomeBands {
    pub fn new(water_level: f32, shore_width: f32, highland_start: f32) -> Self {
        Self {
            water_level,
            shore_top: water_level + shore_width,
            highland_start,
        }
    }

    /// Thresholds partition the height axis without overlap.
    pub fn is_ordered(&self) -> bool {
        self.water_level <= self.shore_top && self.shore_top <= self.highland_start
    }

    pub fn classify(&self, h: f32) -> Biome {
        if h < self.water_level {
            Biome::Water
        } else if h < self.shore_top {
            Biome::Shore
        } else if h < self.highland_start {
            Biome::Grass
        } else {
            Biome::Highland
        }
    }
}

/// Pick one of `len` interchangeable variants from a second noise channel.
///
/// Neighbouring cells sample nearby noise, so chosen variants form patches
/// instead of salt-and-pepper. Returns `None` when there is nothing to pick.
pub fn pick_variant(
    sampler: &NoiseSampler,
    len: usize,
    x: i32,
    z: i32,
    seed: i32,
    frequency: f32,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let m = sampler.sample(x, z, seed, frequency);
    let idx = (m * len as f32).floor() as usize;
    Some(idx.min(len - 1))
}

/// The variant/mask noise channel of one run: fixed seed, base frequency
/// `variation_frequency`.
#[derive(Debug, Clone, Copy)]
pub struct VariantChannel<'a> {
    sampler: &'a NoiseSampler,
    seed: i32,
    frequency: f32,
}

impl<'a> VariantChannel<'a> {
    pub fn new(sampler: &'a NoiseSampler, seed: i32, frequency: f32) -> Self {
        Self {
            sampler,
            seed,
            frequency,
        }
    }

    #[inline]
    pub fn pick(&self, len: usize, x: i32, z: i32) -> Option<usize> {
        pick_variant(self.sampler, len, x, z, self.seed, self.frequency)
    }

    /// Mask sampled at `frequency * scale`; distinct scales decorrelate categories.
    #[inline]
    pub fn mask(&self, x: i32, z: i32, scale: f32) -> f32 {
        self.sampler.sample(x, z, self.seed, self.frequency * scale)
    }
}
