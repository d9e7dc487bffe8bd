//! Core engine types shared by the generator and the scene layer.
//!
//! This crate provides the foundational types used across the workspace:
//! - Transform with quarter-turn yaw and raw instance data
//! - Components stamped on instantiated scene objects
//! - Fixed-interval polling for regeneration loops

pub mod components;
pub mod time;
pub mod transform;

pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{IVec2, Mat4, Quat, Vec3};
pub use hecs::{Entity, World};
