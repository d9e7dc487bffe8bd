//! Scene layer: turns placement commands into hecs entities.
//!
//! Every rebuild despawns what the previous rebuild spawned before spawning the
//! new batch. Entities without a [`SpawnBatch`] (cameras, lights...) are left alone.

use std::collections::BTreeMap;

use engine_core::{Entity, Parent, PrefabRef, SpawnBatch, Transform, TransformRaw, World};
use procgen::{PlacementCommand, PrefabCatalog};

pub struct Scene {
    pub world: World,
    batch: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            batch: 0,
        }
    }

    /// Id of the last applied batch (0 before the first rebuild).
    pub fn batch(&self) -> u64 {
        self.batch
    }

    /// Despawn every generated entity. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let to_despawn: Vec<Entity> = self
            .world
            .query::<&SpawnBatch>()
            .iter()
            .map(|(e, _)| e)
            .collect();
        let n = to_despawn.len();
        for e in to_despawn {
            self.world.despawn(e).ok();
        }
        n
    }

    /// Replace the generated content with `commands`. Selectors the catalog
    /// cannot resolve are skipped. Returns the number of entities spawned.
    pub fn apply(&mut self, commands: &[PlacementCommand], catalog: &PrefabCatalog) -> usize {
        let removed = self.clear();
        self.batch += 1;
        let batch = SpawnBatch(self.batch);

        let mut spawned = 0;
        let mut skipped = 0;
        for cmd in commands {
            let Some(id) = catalog.resolve(cmd.prefab) else {
                skipped += 1;
                continue;
            };
            self.world.spawn((
                cmd.transform(),
                PrefabRef::new(id),
                Parent(cmd.group.name()),
                cmd.kind,
                batch,
            ));
            spawned += 1;
        }

        if skipped > 0 {
            log::warn!("{skipped} placements referenced prefabs missing from the catalog");
        }
        log::debug!(
            "Scene batch {}: removed {removed}, spawned {spawned}",
            self.batch
        );
        spawned
    }

    /// Number of generated entities currently alive.
    pub fn generated_count(&self) -> usize {
        self.world.query::<&SpawnBatch>().iter().count()
    }

    pub fn count_in_group(&self, group: &str) -> usize {
        self.world
            .query::<&Parent>()
            .iter()
            .filter(|(_, parent)| parent.0 == group)
            .count()
    }

    /// Per-prefab instance data, ready for instanced drawing.
    pub fn instance_batches(&self) -> BTreeMap<String, Vec<TransformRaw>> {
        let mut batches: BTreeMap<String, Vec<TransformRaw>> = BTreeMap::new();
        for (_, (transform, prefab)) in self.world.query::<(&Transform, &PrefabRef)>().iter() {
            batches
                .entry(prefab.id.clone())
                .or_default()
                .push(TransformRaw::from(transform));
        }
        batches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::Vec3;
    use procgen::{Category, PlacementKind, PrefabSelector};

    fn cmd(kind: PlacementKind, category: Category, variant: usize, x: f32) -> PlacementCommand {
        PlacementCommand::new(kind, PrefabSelector::new(category, variant), Vec3::new(x, 1.0, 0.0))
    }

    #[test]
    fn rebuild_replaces_previous_batch() {
        let catalog = PrefabCatalog::voxel_pack();
        let mut scene = Scene::new();
        let camera = scene.world.spawn((Transform::default(),));

        let first = vec![
            cmd(PlacementKind::Floor, Category::Grass, 0, 0.0),
            cmd(PlacementKind::Floor, Category::Grass, 1, 1.0),
            cmd(PlacementKind::Decoration, Category::Tree, 0, 1.0),
        ];
        assert_eq!(scene.apply(&first, &catalog), 3);
        assert_eq!(scene.generated_count(), 3);

        let second = vec![cmd(PlacementKind::Floor, Category::Sand, 0, 0.0)];
        assert_eq!(scene.apply(&second, &catalog), 1);
        assert_eq!(scene.generated_count(), 1);
        assert_eq!(scene.batch(), 2);
        assert_eq!(scene.count_in_group("decor"), 0);
        assert!(scene.world.contains(camera));
    }

    #[test]
    fn unresolvable_selectors_are_skipped() {
        let catalog = PrefabCatalog::voxel_pack();
        let mut scene = Scene::new();
        let commands = vec![
            cmd(PlacementKind::Floor, Category::Grass, 0, 0.0),
            cmd(PlacementKind::Floor, Category::Grass, 99, 1.0),
        ];
        assert_eq!(scene.apply(&commands, &catalog), 1);
    }

    #[test]
    fn entities_are_grouped_and_batched_by_prefab() {
        let catalog = PrefabCatalog::voxel_pack();
        let mut scene = Scene::new();
        let commands = vec![
            cmd(PlacementKind::Floor, Category::Grass, 0, 0.0),
            cmd(PlacementKind::Floor, Category::Grass, 0, 1.0),
            cmd(PlacementKind::WaterSurface, Category::WaterSurface, 0, 2.0),
        ];
        scene.apply(&commands, &catalog);
        assert_eq!(scene.count_in_group("terrain"), 2);
        assert_eq!(scene.count_in_group("water"), 1);

        let batches = scene.instance_batches();
        assert_eq!(batches.len(), 2);
        let grass = &batches[catalog.grass[0].as_str()];
        assert_eq!(grass.len(), 2);
        assert_eq!(grass[1].model[3], [1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn clear_removes_everything_generated() {
        let catalog = PrefabCatalog::voxel_pack();
        let mut scene = Scene::new();
        scene.apply(&[cmd(PlacementKind::Cliff, Category::Cliff, 0, 0.0)], &catalog);
        assert_eq!(scene.clear(), 1);
        assert_eq!(scene.generated_count(), 0);
    }
}
