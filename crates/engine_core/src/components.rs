//! Common ECS components attached to instantiated scene objects.

/// Which prefab an entity was instantiated from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrefabRef {
    /// Opaque prefab identifier from the asset catalog.
    pub id: String,
}

impl PrefabRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Named parent node an entity is grouped under (e.g. "terrain", "decor").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Parent(pub &'static str);

/// Batch counter stamped on every entity spawned by one scene rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpawnBatch(pub u64);
