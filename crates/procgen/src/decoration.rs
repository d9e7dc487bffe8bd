//! Mask-gated prop placement.
//!
//! Every category reads a noise mask and places when `mask > 1 - density`.
//! Rare props pick their variant from the run's PRNG so they scatter; the
//! rest pick from the variant channel so neighbouring cells share variants.

use engine_core::QuarterTurns;
use glam::Vec3;
use rand::Rng;

use crate::biome::{BiomeBands, VariantChannel};
use crate::catalog::{Category, PrefabCatalog};
use crate::config::DecorationDensities;
use crate::placement::{PlacementCommand, PlacementKind, PrefabSelector};

/// Mask frequency multipliers.
pub const MASK_COMMON: f32 = 0.77;
pub const MASK_RARE: f32 = 0.53;
pub const MASK_FENCE: f32 = 0.61;
pub const MASK_BUILDING: f32 = 0.41;

const RARE_LIFT: f32 = 0.5;
const TREE_LIFT: f32 = 0.4;
const FLOWER_LIFT: f32 = 0.4;
const SMALL_PROP_LIFT: f32 = 0.35;

/// Density gate shared by every mask-driven category.
#[inline]
pub fn passes_density(mask: f32, density: f32) -> bool {
    mask > 1.0 - density
}

/// Random multiple of 90° around the vertical axis.
#[inline]
pub fn random_yaw<R: Rng + ?Sized>(rng: &mut R) -> QuarterTurns {
    QuarterTurns::new(rng.gen_range(0..4))
}

pub struct DecorationPlacer<'a> {
    channel: VariantChannel<'a>,
    catalog: &'a PrefabCatalog,
    densities: &'a DecorationDensities,
    bands: BiomeBands,
}

impl<'a> DecorationPlacer<'a> {
    pub fn new(
        channel: VariantChannel<'a>,
        catalog: &'a PrefabCatalog,
        densities: &'a DecorationDensities,
        bands: BiomeBands,
    ) -> Self {
        Self {
            channel,
            catalog,
            densities,
            bands,
        }
    }

    fn noise_pick(&self, category: Category, x: i32, z: i32) -> Option<PrefabSelector> {
        self.channel
            .pick(self.catalog.len(category), x, z)
            .map(|variant| PrefabSelector::new(category, variant))
    }

    /// Decorate cell `(x, z)` whose floor sits at `base`. Returns how many
    /// commands were pushed.
    ///
    /// A placed tree ends the cell; other categories stack.
    pub fn place<R: Rng + ?Sized>(
        &self,
        x: i32,
        z: i32,
        base: Vec3,
        rng: &mut R,
        out: &mut Vec<PlacementCommand>,
    ) -> usize {
        let h = base.y;
        if h < self.bands.water_level {
            return 0;
        }
        let start = out.len();

        let mask = self.channel.mask(x, z, MASK_COMMON);
        let mask_rare = self.channel.mask(x, z, MASK_RARE);
        let mask_fence = self.channel.mask(x, z, MASK_FENCE);

        let is_shore = h < self.bands.shore_top;
        let is_high = h >= self.bands.highland_start;
        let is_grass = !is_shore && !is_high;

        let d = self.densities;

        let rare_len = self.catalog.len(Category::Rare);
        if rare_len > 0 && passes_density(mask_rare, d.rare) {
            let variant = rng.gen_range(0..rare_len);
            let yaw = random_yaw(rng);
            out.push(decor(Category::Rare, variant, base + Vec3::Y * RARE_LIFT).with_yaw(yaw));
        }

        if (is_shore || is_grass) && passes_density(mask_fence, d.fence) {
            if let Some(sel) = self.noise_pick(Category::Fence, x, z) {
                let yaw = random_yaw(rng);
                out.push(decor(sel.category, sel.variant, base).with_yaw(yaw));
            }
        }

        if is_grass && passes_density(mask, d.tree) {
            if let Some(sel) = self.noise_pick(Category::Tree, x, z) {
                let yaw = random_yaw(rng);
                out.push(decor(sel.category, sel.variant, base + Vec3::Y * TREE_LIFT).with_yaw(yaw));
                return out.len() - start;
            }
        }

        if is_grass && passes_density(mask, d.flower) {
            if let Some(sel) = self.noise_pick(Category::Flower, x, z) {
                out.push(decor(sel.category, sel.variant, base + Vec3::Y * FLOWER_LIFT));
            }
        }

        if !is_high && passes_density(mask, d.mushroom) {
            if let Some(sel) = self.noise_pick(Category::Mushroom, x, z) {
                out.push(decor(sel.category, sel.variant, base + Vec3::Y * SMALL_PROP_LIFT));
            }
        }

        if is_high && passes_density(mask, d.rock) {
            if let Some(sel) = self.noise_pick(Category::Rock, x, z) {
                let yaw = random_yaw(rng);
                out.push(
                    decor(sel.category, sel.variant, base + Vec3::Y * SMALL_PROP_LIFT).with_yaw(yaw),
                );
            }
        }

        out.len() - start
    }
}

fn decor(category: Category, variant: usize, position: Vec3) -> PlacementCommand {
    PlacementCommand::new(
        PlacementKind::Decoration,
        PrefabSelector::new(category, variant),
        position,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::NoiseSampler;
    use rand::prelude::*;

    fn bands() -> BiomeBands {
        BiomeBands::new(1.1, 0.25, 2.2)
    }

    fn all_on() -> DecorationDensities {
        DecorationDensities {
            tree: 1.0,
            flower: 1.0,
            rock: 1.0,
            mushroom: 1.0,
            rare: 0.0,
            fence: 0.0,
        }
    }

    fn run(
        densities: &DecorationDensities,
        catalog: &PrefabCatalog,
        h: f32,
    ) -> Vec<PlacementCommand> {
        let sampler = NoiseSampler::new();
        let channel = VariantChannel::new(&sampler, 3, 0.23);
        let placer = DecorationPlacer::new(channel, catalog, densities, bands());
        let mut rng = StdRng::seed_from_u64(3);
        let mut out = Vec::new();
        placer.place(4, 7, Vec3::new(4.0, h, 7.0), &mut rng, &mut out);
        out
    }

    fn categories(out: &[PlacementCommand]) -> Vec<Category> {
        out.iter().map(|c| c.prefab.category).collect()
    }

    #[test]
    fn tree_ends_the_cell() {
        let out = run(&all_on(), &PrefabCatalog::voxel_pack(), 1.8);
        assert_eq!(categories(&out), vec![Category::Tree]);
    }

    #[test]
    fn without_trees_grass_stacks_flower_and_mushroom() {
        let mut catalog = PrefabCatalog::voxel_pack();
        catalog.tree.clear();
        let out = run(&all_on(), &catalog, 1.8);
        assert_eq!(categories(&out), vec![Category::Flower, Category::Mushroom]);
        assert!(out.iter().all(|c| c.yaw == 0));
    }

    #[test]
    fn highland_gets_rocks_only() {
        let out = run(&all_on(), &PrefabCatalog::voxel_pack(), 2.5);
        assert_eq!(categories(&out), vec![Category::Rock]);
        assert!((out[0].position.y - 2.85).abs() < 1e-5);
    }

    #[test]
    fn shore_gets_mushrooms() {
        let out = run(&all_on(), &PrefabCatalog::voxel_pack(), 1.2);
        assert_eq!(categories(&out), vec![Category::Mushroom]);
    }

    #[test]
    fn underwater_cells_are_bare() {
        let out = run(&all_on(), &PrefabCatalog::voxel_pack(), 0.5);
        assert!(out.is_empty());
    }

    #[test]
    fn zero_density_places_nothing() {
        let out = run(&DecorationDensities::none(), &PrefabCatalog::voxel_pack(), 1.8);
        assert!(out.is_empty());
    }

    #[test]
    fn rare_and_fence_stack_before_tree() {
        let densities = DecorationDensities {
            rare: 1.0,
            fence: 1.0,
            ..all_on()
        };
        let out = run(&densities, &PrefabCatalog::voxel_pack(), 1.8);
        assert_eq!(
            categories(&out),
            vec![Category::Rare, Category::Fence, Category::Tree]
        );
        assert_eq!(out[1].position.y, 1.8);
    }

    #[test]
    fn empty_rare_set_does_not_touch_rng() {
        let densities = DecorationDensities {
            rare: 1.0,
            ..DecorationDensities::none()
        };
        let mut catalog = PrefabCatalog::voxel_pack();
        catalog.rare.clear();
        let sampler = NoiseSampler::new();
        let channel = VariantChannel::new(&sampler, 0, 0.23);
        let placer = DecorationPlacer::new(channel, &catalog, &densities, bands());
        let mut rng = StdRng::seed_from_u64(9);
        let mut out = Vec::new();
        placer.place(0, 0, Vec3::new(0.0, 1.8, 0.0), &mut rng, &mut out);
        assert!(out.is_empty());
        let mut fresh = StdRng::seed_from_u64(9);
        assert_eq!(rng.gen::<u64>(), fresh.gen::<u64>());
    }
}
