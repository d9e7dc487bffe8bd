//! Transform component and utilities for placing scene objects.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Number of 90° steps around the vertical axis (always in `0..4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QuarterTurns(u8);

impl QuarterTurns {
    pub const ZERO: Self = Self(0);

    /// Wraps any step count into `0..4`.
    pub fn new(steps: u32) -> Self {
        Self((steps % 4) as u8)
    }

    pub fn steps(self) -> u8 {
        self.0
    }

    pub fn degrees(self) -> f32 {
        self.0 as f32 * 90.0
    }

    pub fn radians(self) -> f32 {
        self.degrees().to_radians()
    }

    /// Rotation around +Y.
    pub fn to_quat(self) -> Quat {
        Quat::from_rotation_y(self.radians())
    }
}

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform at `position` turned by whole quarter turns around Y.
    pub fn from_position_yaw(position: Vec3, yaw: QuarterTurns) -> Self {
        Self {
            position,
            rotation: yaw.to_quat(),
            ..Default::default()
        }
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }
}

/// Raw transform data for instanced drawing by the rendering collaborator.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TransformRaw {
    pub model: [[f32; 4]; 4],
}

impl From<&Transform> for TransformRaw {
    fn from(transform: &Transform) -> Self {
        Self {
            model: transform.to_matrix().to_cols_array_2d(),
        }
    }
}

impl From<Transform> for TransformRaw {
    fn from(transform: Transform) -> Self {
        Self::from(&transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turns_wrap() {
        assert_eq!(QuarterTurns::new(5).steps(), 1);
        assert_eq!(QuarterTurns::new(4), QuarterTurns::ZERO);
        assert_eq!(QuarterTurns::new(3).degrees(), 270.0);
    }

    #[test]
    fn yaw_rotates_forward_vector() {
        let t = Transform::from_position_yaw(Vec3::ZERO, QuarterTurns::new(1));
        let f = t.forward();
        // -Z turned 90° around +Y points at -X.
        assert!((f - Vec3::NEG_X).length() < 1e-5, "forward was {f:?}");
    }

    #[test]
    fn raw_matrix_carries_translation() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let raw = TransformRaw::from(t);
        assert_eq!(raw.model[3][0], 1.0);
        assert_eq!(raw.model[3][1], 2.0);
        assert_eq!(raw.model[3][2], 3.0);
    }
}
