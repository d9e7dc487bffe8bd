//! Height field: noise sample → optional remap curve → scale → optional snapping.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GenerationConfig};
use crate::sampler::NoiseSampler;

/// Round `h` to the nearest multiple of `step` (ties to even, like the
/// editor tooling the layer heights were authored in).
///
/// A non-positive `step` leaves the height untouched.
#[inline]
pub fn quantize(h: f32, step: f32) -> f32 {
    if step > 0.0 {
        (h / step).round_ties_even() * step
    } else {
        h
    }
}

/// Piecewise-linear remap of the unit noise value.
///
/// Keys are `(t, value)` pairs with strictly increasing `t`. Outside the key
/// range the nearest end value is held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightCurve {
    pub keys: Vec<(f32, f32)>,
}

impl Default for HeightCurve {
    fn default() -> Self {
        Self::linear()
    }
}

impl HeightCurve {
    /// Identity on `[0, 1]`.
    pub fn linear() -> Self {
        Self {
            keys: vec![(0.0, 0.0), (1.0, 1.0)],
        }
    }

    pub fn new(keys: Vec<(f32, f32)>) -> Result<Self, ConfigError> {
        let curve = Self { keys };
        curve.validate()?;
        Ok(curve)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keys.is_empty() {
            return Err(ConfigError::InvalidCurve("curve has no keys".into()));
        }
        if self.keys.iter().any(|(t, v)| !t.is_finite() || !v.is_finite()) {
            return Err(ConfigError::InvalidCurve("curve key is not finite".into()));
        }
        if self.keys.windows(2).any(|w| w[1].0 <= w[0].0) {
            return Err(ConfigError::InvalidCurve(
                "curve keys must have strictly increasing t".into(),
            ));
        }
        Ok(())
    }

    pub fn evaluate(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return t,
        };
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        for w in self.keys.windows(2) {
            let (t0, v0) = w[0];
            let (t1, v1) = w[1];
            if t <= t1 {
                let s = (t - t0) / (t1 - t0);
                return v0 + (v1 - v0) * s;
            }
        }
        last.1
    }
}

/// Terrain heights for grid cells, before any flat-zone override.
#[derive(Debug, Clone, Copy)]
pub struct HeightField<'a> {
    sampler: &'a NoiseSampler,
    config: &'a GenerationConfig,
}

impl<'a> HeightField<'a> {
    pub fn new(sampler: &'a NoiseSampler, config: &'a GenerationConfig) -> Self {
        Self { sampler, config }
    }

    /// Unscaled, un-remapped noise in `[0, 1]`.
    #[inline]
    pub fn noise01(&self, x: i32, z: i32) -> f32 {
        self.sampler
            .sample(x, z, self.config.seed, self.config.frequency)
    }

    /// Final height before flat-zone overrides.
    pub fn height(&self, x: i32, z: i32) -> f32 {
        let mut n = self.noise01(x, z);
        if let Some(curve) = &self.config.height_curve {
            n = curve.evaluate(n).clamp(0.0, 1.0);
        }
        self.snap(n * self.config.height_scale)
    }

    /// Apply the configured quantization (no-op when snapping is off).
    #[inline]
    pub fn snap(&self, h: f32) -> f32 {
        match self.config.quantization_step() {
            Some(step) => quantize(h, step),
            None => h,
        }
    }
}
