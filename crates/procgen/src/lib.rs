//! Procedural voxel terrain: height field, biomes, decoration, cliffs, and plateaus.
//!
//! Generation is a pure function of a [`GenerationConfig`] and a
//! [`PrefabCatalog`]. It produces an ordered list of [`PlacementCommand`]s
//! that a scene layer turns into prefab instances.

pub mod biome;
pub mod catalog;
pub mod cliff;
pub mod config;
pub mod decoration;
pub mod flat_zone;
pub mod generator;
pub mod height;
pub mod placement;
pub mod sampler;
pub mod slope;

pub use biome::{Biome, BiomeBands};
pub use catalog::{Category, PrefabCatalog};
pub use config::{
    BuildingSettings, ConfigError, DecorationDensities, FlatZone, FlatZoneSettings,
    GenerationConfig, MAX_MAP_SIZE,
};
pub use generator::{summary, Cell, GenerateError, GenerationSummary, TerrainSynthesizer};
pub use height::{quantize, HeightCurve};
pub use placement::{PlacementCommand, PlacementGroup, PlacementKind, PrefabSelector};
pub use sampler::NoiseSampler;
