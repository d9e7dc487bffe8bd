//! Circular plateau overlay and the buildings placed on it.

use glam::Vec3;
use rand::Rng;

use crate::biome::VariantChannel;
use crate::catalog::{Category, PrefabCatalog};
use crate::config::{BuildingSettings, FlatZone, FlatZoneSettings};
use crate::decoration::{passes_density, random_yaw, MASK_BUILDING};
use crate::placement::{PlacementCommand, PlacementKind, PrefabSelector};

/// Resolved flat-zone lookup for one run.
#[derive(Debug, Clone, Copy)]
pub struct FlatZones<'a> {
    settings: &'a FlatZoneSettings,
}

impl<'a> FlatZones<'a> {
    pub fn new(settings: &'a FlatZoneSettings) -> Self {
        Self { settings }
    }

    /// First zone whose disc contains the cell (squared grid distance).
    pub fn zone_at(&self, x: i32, z: i32) -> Option<&'a FlatZone> {
        if !self.settings.enabled {
            return None;
        }
        self.settings.zones.iter().find(|zone| {
            let dx = x as i64 - zone.center.x as i64;
            let dz = z as i64 - zone.center.y as i64;
            let r = zone.radius as i64;
            dx * dx + dz * dz <= r * r
        })
    }

    #[inline]
    pub fn contains(&self, x: i32, z: i32) -> bool {
        self.zone_at(x, z).is_some()
    }

    /// Plateau height for the cell, if it lies in a zone.
    pub fn plateau(&self, x: i32, z: i32) -> Option<f32> {
        self.zone_at(x, z).map(|zone| zone.plateau_height)
    }

    pub fn blocks_decor(&self) -> bool {
        self.settings.block_decor_in_flats
    }
}

/// Places rooms and corridors on plateau cells.
pub struct BuildingPlacer<'a> {
    channel: VariantChannel<'a>,
    catalog: &'a PrefabCatalog,
    settings: &'a BuildingSettings,
}

impl<'a> BuildingPlacer<'a> {
    pub fn new(
        channel: VariantChannel<'a>,
        catalog: &'a PrefabCatalog,
        settings: &'a BuildingSettings,
    ) -> Self {
        Self {
            channel,
            catalog,
            settings,
        }
    }

    /// Try one building on the plateau cell whose floor sits at `base`.
    pub fn place<R: Rng + ?Sized>(
        &self,
        x: i32,
        z: i32,
        base: Vec3,
        rng: &mut R,
        out: &mut Vec<PlacementCommand>,
    ) -> bool {
        let len = self.catalog.len(Category::Building);
        if !self.settings.enabled || len == 0 {
            return false;
        }
        let mask = self.channel.mask(x, z, MASK_BUILDING);
        if !passes_density(mask, self.settings.density) {
            return false;
        }
        let variant = rng.gen_range(0..len);
        let yaw = random_yaw(rng);
        out.push(
            PlacementCommand::new(
                PlacementKind::Building,
                PrefabSelector::new(Category::Building, variant),
                base + Vec3::Y * self.settings.y_offset,
            )
            .with_yaw(yaw),
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    fn settings(zones: Vec<FlatZone>) -> FlatZoneSettings {
        FlatZoneSettings {
            enabled: true,
            zones,
            block_decor_in_flats: true,
        }
    }

    #[test]
    fn disc_boundary_is_inclusive() {
        let s = settings(vec![FlatZone::new(IVec2::new(2, -1), 3, 1.6)]);
        let zones = FlatZones::new(&s);
        assert!(zones.contains(5, -1));
        assert!(zones.contains(2, 2));
        assert!(!zones.contains(5, 0));
        assert!(!zones.contains(6, -1));
    }

    #[test]
    fn disabled_zones_never_match() {
        let mut s = settings(vec![FlatZone::new(IVec2::ZERO, 10, 1.0)]);
        s.enabled = false;
        assert!(!FlatZones::new(&s).contains(0, 0));
    }

    #[test]
    fn first_zone_wins_overlap() {
        let s = settings(vec![
            FlatZone::new(IVec2::ZERO, 4, 1.0),
            FlatZone::new(IVec2::new(1, 0), 4, 2.0),
        ]);
        let zones = FlatZones::new(&s);
        assert_eq!(zones.plateau(1, 0), Some(1.0));
        assert_eq!(zones.plateau(5, 0), Some(2.0));
        assert_eq!(zones.plateau(9, 0), None);
    }

    #[test]
    fn buildings_need_density_and_options() {
        use crate::sampler::NoiseSampler;
        use rand::prelude::*;

        let sampler = NoiseSampler::new();
        let channel = VariantChannel::new(&sampler, 0, 0.23);
        let full = PrefabCatalog::voxel_pack();
        let empty = PrefabCatalog::default();
        let dense = BuildingSettings {
            enabled: true,
            density: 1.0,
            y_offset: 0.25,
        };
        let off = BuildingSettings {
            density: 0.0,
            ..dense.clone()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let mut out = Vec::new();

        let base = Vec3::new(1.0, 2.0, 3.0);
        assert!(BuildingPlacer::new(channel, &full, &dense).place(1, 3, base, &mut rng, &mut out));
        assert!(!BuildingPlacer::new(channel, &full, &off).place(1, 3, base, &mut rng, &mut out));
        assert!(!BuildingPlacer::new(channel, &empty, &dense).place(1, 3, base, &mut rng, &mut out));

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, PlacementKind::Building);
        assert_eq!(out[0].position, Vec3::new(1.0, 2.25, 3.0));
        assert!(out[0].prefab.variant < full.building.len());
    }

    #[test]
    fn zero_radius_covers_center_only() {
        let s = settings(vec![FlatZone::new(IVec2::new(3, 3), 0, 1.0)]);
        let zones = FlatZones::new(&s);
        assert!(zones.contains(3, 3));
        assert!(!zones.contains(3, 4));
    }
}
