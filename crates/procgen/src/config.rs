//! Generation parameters and their validation.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::biome::BiomeBands;
use crate::height::HeightCurve;

/// Rejected generation parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("band thresholds out of order: water {water_level} <= shore top {shore_top} <= highland {highland_start} must hold")]
    InvalidBands {
        water_level: f32,
        shore_top: f32,
        highland_start: f32,
    },

    #[error("shore width must be non-negative, got {0}")]
    NegativeShoreWidth(f32),

    #[error("cell spacing must be positive, got {0}")]
    InvalidSpacing(f32),

    #[error("{name} density must be within [0, 1], got {value}")]
    DensityOutOfRange { name: &'static str, value: f32 },

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("invalid height curve: {0}")]
    InvalidCurve(String),

    #[error("flat zone {index} has a negative radius")]
    InvalidFlatZone { index: usize },

    #[error("map size {map_size} exceeds the maximum of {max}")]
    MapTooLarge { map_size: u32, max: u32 },
}

/// Largest accepted grid half-extent.
pub const MAX_MAP_SIZE: u32 = 1 << 14;

/// Per-category probability that a cell's mask clears the placement gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationDensities {
    pub tree: f32,
    pub flower: f32,
    pub rock: f32,
    pub mushroom: f32,
    /// Rare props (gravestones, chests, keys...).
    pub rare: f32,
    pub fence: f32,
}

impl Default for DecorationDensities {
    fn default() -> Self {
        Self {
            tree: 0.28,
            flower: 0.35,
            rock: 0.22,
            mushroom: 0.18,
            rare: 0.03,
            fence: 0.01,
        }
    }
}

impl DecorationDensities {
    /// Every category disabled.
    pub fn none() -> Self {
        Self {
            tree: 0.0,
            flower: 0.0,
            rock: 0.0,
            mushroom: 0.0,
            rare: 0.0,
            fence: 0.0,
        }
    }

    fn named(&self) -> [(&'static str, f32); 6] {
        [
            ("tree", self.tree),
            ("flower", self.flower),
            ("rock", self.rock),
            ("mushroom", self.mushroom),
            ("rare", self.rare),
            ("fence", self.fence),
        ]
    }
}

/// Circular plateau in grid coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatZone {
    pub center: IVec2,
    /// Radius in cells.
    pub radius: i32,
    /// Plateau height in the same units as `height_scale`.
    pub plateau_height: f32,
}

impl FlatZone {
    pub fn new(center: IVec2, radius: i32, plateau_height: f32) -> Self {
        Self {
            center,
            radius,
            plateau_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatZoneSettings {
    pub enabled: bool,
    pub zones: Vec<FlatZone>,
    /// Suppress ordinary decoration inside zones.
    pub block_decor_in_flats: bool,
}

impl Default for FlatZoneSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            zones: Vec::new(),
            block_decor_in_flats: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingSettings {
    pub enabled: bool,
    pub density: f32,
    /// Vertical correction for prefabs whose pivot is not at floor level.
    pub y_offset: f32,
}

impl Default for BuildingSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            density: 0.08,
            y_offset: 0.0,
        }
    }
}

/// Immutable parameter bundle for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Grid half-extent; the grid spans `[-map_size, map_size)` on both axes.
    pub map_size: u32,
    /// World distance between cell centers.
    pub spacing: f32,

    pub seed: i32,
    /// Perlin frequency of the height channel.
    pub frequency: f32,
    pub height_scale: f32,
    pub height_curve: Option<HeightCurve>,

    pub snap_heights: bool,
    /// Layer height. Non-positive disables snapping regardless of `snap_heights`.
    pub vertical_step: f32,
    /// Stack ground blocks under every snapped floor.
    pub fill_columns: bool,

    pub water_level: f32,
    pub shore_width: f32,
    pub highland_start: f32,

    /// Solid water blocks under the water level instead of a single surface sheet.
    pub fill_underwater: bool,
    pub surface_y_offset: f32,

    /// Frequency of the variant channel; decoration masks use multiples of it.
    pub variation_frequency: f32,
    pub decoration: DecorationDensities,
    pub max_slope_for_props: f32,

    pub fill_cliffs: bool,
    pub max_cliff_depth: u32,

    pub flat_zones: FlatZoneSettings,
    pub buildings: BuildingSettings,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            map_size: 20,
            spacing: 1.0,
            seed: 0,
            frequency: 0.1,
            height_scale: 3.0,
            height_curve: None,
            snap_heights: false,
            vertical_step: 1.0,
            fill_columns: false,
            water_level: 1.1,
            shore_width: 0.25,
            highland_start: 2.2,
            fill_underwater: false,
            surface_y_offset: 0.0,
            variation_frequency: 0.23,
            decoration: DecorationDensities::default(),
            max_slope_for_props: 0.22,
            fill_cliffs: false,
            max_cliff_depth: 12,
            flat_zones: FlatZoneSettings::default(),
            buildings: BuildingSettings::default(),
        }
    }
}

impl GenerationConfig {
    /// Blocky preset: snapped layers with cliff walls between them.
    pub fn stepped(seed: i32) -> Self {
        Self {
            seed,
            snap_heights: true,
            vertical_step: 1.0,
            fill_cliffs: true,
            ..Default::default()
        }
    }

    /// Village preset: stepped terrain with a plateau for buildings at the origin.
    pub fn village(seed: i32) -> Self {
        Self {
            flat_zones: FlatZoneSettings {
                enabled: true,
                zones: vec![FlatZone::new(IVec2::ZERO, 6, 1.6)],
                block_decor_in_flats: true,
            },
            buildings: BuildingSettings {
                enabled: true,
                ..Default::default()
            },
            ..Self::stepped(seed)
        }
    }

    /// Snapping step, if snapping is in effect.
    #[inline]
    pub fn quantization_step(&self) -> Option<f32> {
        (self.snap_heights && self.vertical_step > 0.0).then_some(self.vertical_step)
    }

    pub fn bands(&self) -> BiomeBands {
        BiomeBands::new(self.water_level, self.shore_width, self.highland_start)
    }

    /// Number of cells in one generation pass.
    pub fn cell_count(&self) -> usize {
        let side = (self.map_size as usize).saturating_mul(2);
        side.saturating_mul(side)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("spacing", self.spacing),
            ("frequency", self.frequency),
            ("height_scale", self.height_scale),
            ("vertical_step", self.vertical_step),
            ("water_level", self.water_level),
            ("shore_width", self.shore_width),
            ("highland_start", self.highland_start),
            ("surface_y_offset", self.surface_y_offset),
            ("variation_frequency", self.variation_frequency),
            ("max_slope_for_props", self.max_slope_for_props),
            ("buildings.y_offset", self.buildings.y_offset),
        ];
        if let Some((field, _)) = finite.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field });
        }

        if self.map_size > MAX_MAP_SIZE {
            return Err(ConfigError::MapTooLarge {
                map_size: self.map_size,
                max: MAX_MAP_SIZE,
            });
        }
        if self.spacing <= 0.0 {
            return Err(ConfigError::InvalidSpacing(self.spacing));
        }
        if self.shore_width < 0.0 {
            return Err(ConfigError::NegativeShoreWidth(self.shore_width));
        }
        let bands = self.bands();
        if !bands.is_ordered() {
            return Err(ConfigError::InvalidBands {
                water_level: bands.water_level,
                shore_top: bands.shore_top,
                highland_start: bands.highland_start,
            });
        }

        let densities = self
            .decoration
            .named()
            .into_iter()
            .chain(std::iter::once(("building", self.buildings.density)));
        for (name, value) in densities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::DensityOutOfRange { name, value });
            }
        }

        if let Some(curve) = &self.height_curve {
            curve.validate()?;
        }

        for (index, zone) in self.flat_zones.zones.iter().enumerate() {
            if zone.radius < 0 || !zone.plateau_height.is_finite() {
                return Err(ConfigError::InvalidFlatZone { index });
            }
        }

        Ok(())
    }
}
