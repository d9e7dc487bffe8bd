//! Four analog knobs mapped onto the generation parameters.

use procgen::GenerationConfig;
use serde::{Deserialize, Serialize};

/// Normalized knob positions, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlInputs {
    pub seed: f32,
    pub frequency: f32,
    /// Global density multiplier for trees, flowers and mushrooms.
    pub density: f32,
    pub map_size: f32,
}

pub const SEED_RANGE: (f32, f32) = (1.0, 100.0);
pub const FREQUENCY_RANGE: (f32, f32) = (0.0, 0.07);
pub const MAP_SIZE_RANGE: (f32, f32) = (1.0, 35.0);

#[inline]
fn lerp((a, b): (f32, f32), t: f32) -> f32 {
    a + (b - a) * t
}

/// NaN reads as zero.
#[inline]
fn unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

impl ControlInputs {
    pub fn new(seed: f32, frequency: f32, density: f32, map_size: f32) -> Self {
        Self {
            seed,
            frequency,
            density,
            map_size,
        }
    }

    pub fn clamped(self) -> Self {
        Self {
            seed: unit(self.seed),
            frequency: unit(self.frequency),
            density: unit(self.density),
            map_size: unit(self.map_size),
        }
    }

    /// `base` with the knob-driven fields overwritten. Integer results truncate.
    pub fn apply(&self, base: &GenerationConfig) -> GenerationConfig {
        let p = self.clamped();
        let mut config = base.clone();
        config.seed = lerp(SEED_RANGE, p.seed) as i32;
        config.frequency = lerp(FREQUENCY_RANGE, p.frequency);
        config.map_size = lerp(MAP_SIZE_RANGE, p.map_size) as u32;
        config.decoration.tree = base.decoration.tree * p.density;
        config.decoration.flower = base.decoration.flower * p.density;
        config.decoration.mushroom = base.decoration.mushroom * p.density;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_hit_range_ends() {
        let base = GenerationConfig::default();
        let lo = ControlInputs::new(0.0, 0.0, 0.0, 0.0).apply(&base);
        assert_eq!(lo.seed, 1);
        assert_eq!(lo.frequency, 0.0);
        assert_eq!(lo.map_size, 1);
        assert_eq!(lo.decoration.tree, 0.0);

        let hi = ControlInputs::new(1.0, 1.0, 1.0, 1.0).apply(&base);
        assert_eq!(hi.seed, 100);
        assert!((hi.frequency - 0.07).abs() < 1e-7);
        assert_eq!(hi.map_size, 35);
        assert_eq!(hi.decoration, base.decoration);
    }

    #[test]
    fn truncates_instead_of_rounding() {
        let base = GenerationConfig::default();
        // lerp(1, 100, 0.5) = 50.5, lerp(1, 35, 0.5) = 18
        let mid = ControlInputs::new(0.5, 0.5, 0.5, 0.5).apply(&base);
        assert_eq!(mid.seed, 50);
        assert_eq!(mid.map_size, 18);
        assert!((mid.decoration.flower - 0.175).abs() < 1e-6);
        // Rock, rare and fence are not on the density knob.
        assert_eq!(mid.decoration.rock, base.decoration.rock);
        assert_eq!(mid.decoration.rare, base.decoration.rare);
    }

    #[test]
    fn out_of_range_inputs_clamp() {
        let base = GenerationConfig::default();
        let wild = ControlInputs::new(-3.0, 9.0, f32::NAN, 2.0).apply(&base);
        assert_eq!(wild.seed, 1);
        assert!((wild.frequency - 0.07).abs() < 1e-7);
        assert_eq!(wild.decoration.tree, 0.0);
        assert_eq!(wild.map_size, 35);
        assert!(wild.validate().is_ok());
    }
}
