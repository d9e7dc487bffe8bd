//! Local roughness from forward differences of the raw height noise.
//!
//! Measured on the unit noise, not the scaled height, so the gate does not
//! move when `height_scale` changes.

use crate::height::HeightField;

/// Largest forward difference toward +x or +z.
pub fn local_slope(field: &HeightField<'_>, x: i32, z: i32) -> f32 {
    let h = field.noise01(x, z);
    let hr = field.noise01(x + 1, z);
    let hu = field.noise01(x, z + 1);
    (h - hr).abs().max((h - hu).abs())
}

/// Whether props may be placed on a cell with this slope.
#[inline]
pub fn allows_props(slope: f32, max_slope: f32) -> bool {
    slope <= max_slope
}
