//! Wall segments that close the gaps between snapped layers.

use glam::Vec3;

use crate::biome::{BiomeBands, VariantChannel};
use crate::catalog::{Category, PrefabCatalog};
use crate::placement::{PlacementCommand, PlacementKind, PrefabSelector};

/// Neighbour offsets, in the order walls are emitted.
pub const NEIGHBOURS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

pub struct CliffFiller<'a> {
    channel: VariantChannel<'a>,
    catalog: &'a PrefabCatalog,
    bands: BiomeBands,
    step: f32,
    max_depth: u32,
    spacing: f32,
}

impl<'a> CliffFiller<'a> {
    /// `step` must be positive; callers only build a filler when snapping is on.
    pub fn new(
        channel: VariantChannel<'a>,
        catalog: &'a PrefabCatalog,
        bands: BiomeBands,
        step: f32,
        max_depth: u32,
        spacing: f32,
    ) -> Self {
        debug_assert!(step > 0.0);
        Self {
            channel,
            catalog,
            bands,
            step,
            max_depth,
            spacing,
        }
    }

    /// Wall material for a segment at height `y`.
    fn material(&self, y: f32, x: i32, z: i32) -> Option<PrefabSelector> {
        let category = if y < self.bands.shore_top {
            Category::Sand
        } else if self.catalog.has(Category::Cliff) {
            Category::Cliff
        } else {
            Category::Rocky
        };
        self.channel
            .pick(self.catalog.len(category), x, z)
            .map(|variant| PrefabSelector::new(category, variant))
    }

    /// Walk down from one layer below `top` toward `neighbour`, emitting at
    /// most `max_depth` segments. Returns the number of steps walked.
    pub fn fill_side(
        &self,
        x: i32,
        z: i32,
        top: f32,
        neighbour: f32,
        out: &mut Vec<PlacementCommand>,
    ) -> u32 {
        if neighbour >= top {
            return 0;
        }
        let mut y = top - self.step;
        let mut steps = 0;
        while y > neighbour && steps < self.max_depth {
            if let Some(prefab) = self.material(y, x, z) {
                let position = Vec3::new(x as f32 * self.spacing, y, z as f32 * self.spacing);
                out.push(PlacementCommand::new(PlacementKind::Cliff, prefab, position));
            }
            y -= self.step;
            steps += 1;
        }
        steps
    }

    /// Fill all four sides of `(x, z)`. `height_at` gives final neighbour heights.
    pub fn fill<F>(&self, x: i32, z: i32, top: f32, height_at: F, out: &mut Vec<PlacementCommand>) -> u32
    where
        F: Fn(i32, i32) -> f32,
    {
        NEIGHBOURS
            .iter()
            .map(|(dx, dz)| self.fill_side(x, z, top, height_at(x + dx, z + dz), out))
            .sum()
    }
}
