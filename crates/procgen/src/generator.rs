//! Full-grid terrain synthesis.
//!
//! **Determinism:** the PRNG is seeded from `config.seed` at the start of every
//! run and consumed in scan order (x outer, z inner), so the same config and
//! catalog always yield the same command sequence. Noise is pure.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use glam::Vec3;
use rand::prelude::*;
use thiserror::Error;

use crate::biome::{Biome, VariantChannel};
use crate::catalog::{Category, PrefabCatalog};
use crate::cliff::CliffFiller;
use crate::config::{ConfigError, GenerationConfig};
use crate::decoration::DecorationPlacer;
use crate::flat_zone::{BuildingPlacer, FlatZones};
use crate::height::HeightField;
use crate::placement::{PlacementCommand, PlacementKind, PrefabSelector};
use crate::sampler::NoiseSampler;
use crate::slope::{allows_props, local_slope};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("generation cancelled after {rows_done} of {rows_total} rows")]
    Cancelled { rows_done: usize, rows_total: usize },
}

/// Everything the generator knows about one grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
    /// Raw height noise in `[0, 1]`.
    pub noise: f32,
    /// Final height, after snapping and any plateau override.
    pub height: f32,
    pub biome: Biome,
    pub slope: f32,
    /// Floor variant; `None` when the floor category has no options.
    pub variant: Option<usize>,
    pub in_flat_zone: bool,
}

impl Cell {
    /// Category of the floor block. Plateaus are always grass.
    pub fn floor_category(&self) -> Category {
        if self.in_flat_zone {
            Category::Grass
        } else {
            self.biome.floor_category()
        }
    }

    pub fn floor_selector(&self) -> Option<PrefabSelector> {
        self.variant
            .map(|variant| PrefabSelector::new(self.floor_category(), variant))
    }
}

/// Counts of one run's output, for logs and previews.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub total: usize,
    pub by_kind: BTreeMap<PlacementKind, usize>,
    pub by_category: BTreeMap<Category, usize>,
}

impl GenerationSummary {
    pub fn from_commands(commands: &[PlacementCommand]) -> Self {
        let mut summary = Self {
            total: commands.len(),
            ..Default::default()
        };
        for cmd in commands {
            *summary.by_kind.entry(cmd.kind).or_default() += 1;
            *summary.by_category.entry(cmd.prefab.category).or_default() += 1;
        }
        summary
    }

    pub fn count(&self, kind: PlacementKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn count_category(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}

/// Most stacked layers a column of height `extent` may hold.
#[inline]
fn layer_cap(extent: f32, step: f32) -> u32 {
    (extent.max(0.0) / step).ceil() as u32 + 1
}

#[inline]
pub fn summary(commands: &[PlacementCommand]) -> GenerationSummary {
    GenerationSummary::from_commands(commands)
}

/// Validated generator for one configuration and prefab catalog.
#[derive(Debug, Clone)]
pub struct TerrainSynthesizer {
    config: GenerationConfig,
    catalog: PrefabCatalog,
    sampler: NoiseSampler,
}

impl TerrainSynthesizer {
    pub fn new(config: GenerationConfig, catalog: PrefabCatalog) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            catalog,
            sampler: NoiseSampler::new(),
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PrefabCatalog {
        &self.catalog
    }

    /// Grid coordinates covered on each axis.
    pub fn grid_range(&self) -> Range<i32> {
        let m = self.config.map_size.min(i32::MAX as u32) as i32;
        -m..m
    }

    fn field(&self) -> HeightField<'_> {
        HeightField::new(&self.sampler, &self.config)
    }

    fn zones(&self) -> FlatZones<'_> {
        FlatZones::new(&self.config.flat_zones)
    }

    fn channel(&self) -> VariantChannel<'_> {
        VariantChannel::new(
            &self.sampler,
            self.config.seed,
            self.config.variation_frequency,
        )
    }

    /// Final height of any cell, inside the grid or not.
    pub fn height_at(&self, x: i32, z: i32) -> f32 {
        let field = self.field();
        match self.zones().plateau(x, z) {
            Some(plateau) => field.snap(plateau),
            None => field.height(x, z),
        }
    }

    pub fn cell(&self, x: i32, z: i32) -> Cell {
        let field = self.field();
        let plateau = self.zones().plateau(x, z);
        let height = match plateau {
            Some(p) => field.snap(p),
            None => field.height(x, z),
        };
        let biome = self.config.bands().classify(height);
        let in_flat_zone = plateau.is_some();
        let floor_category = if in_flat_zone {
            Category::Grass
        } else {
            biome.floor_category()
        };
        Cell {
            x,
            z,
            noise: field.noise01(x, z),
            height,
            biome,
            slope: local_slope(&field, x, z),
            variant: self.channel().pick(self.catalog.len(floor_category), x, z),
            in_flat_zone,
        }
    }

    fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.config.seed as u64)
    }

    /// Run the whole grid and return the ordered command list.
    pub fn generate(&self) -> Vec<PlacementCommand> {
        let started = Instant::now();
        let mut rng = self.rng();
        let mut out = Vec::new();
        for x in self.grid_range() {
            self.emit_row(x, &mut rng, &mut out);
        }
        self.log_run(&out, started);
        out
    }

    /// Like [`generate`](Self::generate), checking `cancel` before each row.
    /// A cancelled run returns no commands.
    pub fn generate_cancellable(
        &self,
        cancel: &AtomicBool,
    ) -> Result<Vec<PlacementCommand>, GenerateError> {
        let started = Instant::now();
        let mut rng = self.rng();
        let mut out = Vec::new();
        let rows = self.grid_range();
        let rows_total = rows.len();
        for (rows_done, x) in rows.enumerate() {
            if cancel.load(Ordering::Relaxed) {
                log::debug!("generation cancelled at row {rows_done}/{rows_total}");
                return Err(GenerateError::Cancelled {
                    rows_done,
                    rows_total,
                });
            }
            self.emit_row(x, &mut rng, &mut out);
        }
        self.log_run(&out, started);
        Ok(out)
    }

    fn log_run(&self, out: &[PlacementCommand], started: Instant) {
        let counts = summary(out);
        log::info!(
            "Generated {} placements over {} cells (seed {}) in {:.1} ms",
            counts.total,
            self.config.cell_count(),
            self.config.seed,
            started.elapsed().as_secs_f64() * 1000.0
        );
        for (kind, count) in &counts.by_kind {
            log::debug!("  {kind:?}: {count}");
        }
    }

    fn emit_row<R: Rng + ?Sized>(&self, x: i32, rng: &mut R, out: &mut Vec<PlacementCommand>) {
        for z in self.grid_range() {
            self.emit_cell(x, z, rng, out);
        }
    }

    fn emit_cell<R: Rng + ?Sized>(
        &self,
        x: i32,
        z: i32,
        rng: &mut R,
        out: &mut Vec<PlacementCommand>,
    ) {
        let config = &self.config;
        let cell = self.cell(x, z);
        let spacing = config.spacing;
        let base = Vec3::new(x as f32 * spacing, cell.height, z as f32 * spacing);
        let step = config.quantization_step();

        let floor = cell.floor_selector();
        if let Some(prefab) = floor {
            out.push(PlacementCommand::new(PlacementKind::Floor, prefab, base));
        }

        if let (true, Some(step), Some(prefab)) = (config.fill_columns, step, floor) {
            let max_layers = layer_cap(config.height_scale, step);
            for layer in 0..max_layers {
                let y = layer as f32 * step;
                if y >= cell.height - step * 0.5 {
                    break;
                }
                out.push(PlacementCommand::new(
                    PlacementKind::Column,
                    prefab,
                    Vec3::new(base.x, y, base.z),
                ));
            }
        }

        if !cell.in_flat_zone && cell.height < config.water_level {
            match (config.fill_columns, step) {
                (true, Some(step)) => self.emit_water_column(base, step, out),
                _ => self.emit_water(base, out),
            }
        }

        if allows_props(cell.slope, config.max_slope_for_props) {
            let zones = self.zones();
            if cell.in_flat_zone && config.buildings.enabled {
                BuildingPlacer::new(self.channel(), &self.catalog, &config.buildings)
                    .place(x, z, base, rng, out);
            }
            if !cell.in_flat_zone || !zones.blocks_decor() {
                DecorationPlacer::new(
                    self.channel(),
                    &self.catalog,
                    &config.decoration,
                    config.bands(),
                )
                .place(x, z, base, rng, out);
            }
        }

        if let (true, Some(step)) = (config.fill_cliffs, step) {
            CliffFiller::new(
                self.channel(),
                &self.catalog,
                config.bands(),
                step,
                config.max_cliff_depth,
                spacing,
            )
            .fill(x, z, cell.height, |nx, nz| self.height_at(nx, nz), out);
        }
    }

    /// Stack water blocks on the layers between the floor and the snapped
    /// water level.
    fn emit_water_column(&self, base: Vec3, step: f32, out: &mut Vec<PlacementCommand>) {
        let category = if self.catalog.has(Category::Water) {
            Category::Water
        } else if self.catalog.has(Category::WaterSurface) {
            Category::WaterSurface
        } else {
            return;
        };
        let config = &self.config;
        let floor_layer = (base.y / step).round_ties_even();
        let top_layer = (self.field().snap(config.water_level) / step).round_ties_even();
        let max_layers = layer_cap(config.height_scale.max(config.water_level), step);
        let mut layer = floor_layer + 1.0;
        let mut stacked = 0;
        while layer <= top_layer && stacked < max_layers {
            out.push(PlacementCommand::new(
                PlacementKind::WaterVolume,
                PrefabSelector::new(category, 0),
                Vec3::new(base.x, layer * step, base.z),
            ));
            layer += 1.0;
            stacked += 1;
        }
    }

    fn emit_water(&self, base: Vec3, out: &mut Vec<PlacementCommand>) {
        let config = &self.config;
        if config.fill_underwater {
            if self.catalog.has(Category::Water) {
                out.push(PlacementCommand::new(
                    PlacementKind::WaterVolume,
                    PrefabSelector::new(Category::Water, 0),
                    base,
                ));
            }
            return;
        }

        let category = if self.catalog.has(Category::WaterSurface) {
            Category::WaterSurface
        } else if self.catalog.has(Category::Water) {
            Category::Water
        } else {
            return;
        };
        let y = self.field().snap(config.water_level + config.surface_y_offset);
        out.push(PlacementCommand::new(
            PlacementKind::WaterSurface,
            PrefabSelector::new(category, 0),
            Vec3::new(base.x, y, base.z),
        ));
    }
}
