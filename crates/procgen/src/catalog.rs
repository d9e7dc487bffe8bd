//! Prefab option sets per category.
//!
//! Identifiers are opaque to the generator; it only reads how many options a
//! category has and emits indices into that list.

use serde::{Deserialize, Serialize};

use crate::placement::PrefabSelector;

/// Interchangeable prefab family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Sand,
    Grass,
    Rocky,
    Cliff,
    /// Solid water block.
    Water,
    /// Thin water sheet; falls back to `Water` when empty.
    WaterSurface,
    Tree,
    Flower,
    Rock,
    Mushroom,
    Rare,
    Fence,
    Building,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::Sand,
        Category::Grass,
        Category::Rocky,
        Category::Cliff,
        Category::Water,
        Category::WaterSurface,
        Category::Tree,
        Category::Flower,
        Category::Rock,
        Category::Mushroom,
        Category::Rare,
        Category::Fence,
        Category::Building,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Sand => "sand",
            Category::Grass => "grass",
            Category::Rocky => "rocky",
            Category::Cliff => "cliff",
            Category::Water => "water",
            Category::WaterSurface => "water_surface",
            Category::Tree => "tree",
            Category::Flower => "flower",
            Category::Rock => "rock",
            Category::Mushroom => "mushroom",
            Category::Rare => "rare",
            Category::Fence => "fence",
            Category::Building => "building",
        }
    }
}

/// Prefab identifiers grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefabCatalog {
    pub sand: Vec<String>,
    pub grass: Vec<String>,
    pub rocky: Vec<String>,
    pub cliff: Vec<String>,
    pub water: Vec<String>,
    pub water_surface: Vec<String>,
    pub tree: Vec<String>,
    pub flower: Vec<String>,
    pub rock: Vec<String>,
    pub mushroom: Vec<String>,
    pub rare: Vec<String>,
    pub fence: Vec<String>,
    pub building: Vec<String>,
}

fn names(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

impl PrefabCatalog {
    /// The stylized voxel asset pack the demo scenes were built with.
    pub fn voxel_pack() -> Self {
        Self {
            sand: names(&["Ground_Sand_A", "Ground_Sand_B", "Ground_Mix_B"]),
            grass: names(&["Ground_Grass_D", "Ground_Mix_A"]),
            rocky: names(&["Ground_Rock_A", "Ground_Rock_B"]),
            cliff: names(&["Wall_Rock_A", "Wall_Rock_B"]),
            water: names(&["Water_A"]),
            water_surface: names(&["Water_Half_A"]),
            tree: names(&["Tree_A", "Tree_B"]),
            flower: names(&["Flower_A", "Flower_B", "Flower_C"]),
            rock: names(&["Rock_A", "Rock_B"]),
            mushroom: names(&["Mushroom_A"]),
            rare: names(&["Gravestone_A", "Gravestone_B", "Treasure_A", "Key_A"]),
            fence: names(&["Fence_Wood_A"]),
            building: names(&["Bedroom", "RoomSingleEmpty", "Corridor", "RoomDoubleEmpty"]),
        }
    }

    pub fn options(&self, category: Category) -> &[String] {
        match category {
            Category::Sand => &self.sand,
            Category::Grass => &self.grass,
            Category::Rocky => &self.rocky,
            Category::Cliff => &self.cliff,
            Category::Water => &self.water,
            Category::WaterSurface => &self.water_surface,
            Category::Tree => &self.tree,
            Category::Flower => &self.flower,
            Category::Rock => &self.rock,
            Category::Mushroom => &self.mushroom,
            Category::Rare => &self.rare,
            Category::Fence => &self.fence,
            Category::Building => &self.building,
        }
    }

    #[inline]
    pub fn len(&self, category: Category) -> usize {
        self.options(category).len()
    }

    #[inline]
    pub fn has(&self, category: Category) -> bool {
        !self.options(category).is_empty()
    }

    /// Identifier behind a selector, if the catalog still has it.
    pub fn resolve(&self, selector: PrefabSelector) -> Option<&str> {
        self.options(selector.category)
            .get(selector.variant)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voxel_pack_fills_every_category() {
        let catalog = PrefabCatalog::voxel_pack();
        for category in Category::ALL {
            assert!(catalog.has(category), "{} is empty", category.name());
        }
    }

    #[test]
    fn resolve_checks_bounds() {
        let catalog = PrefabCatalog::voxel_pack();
        assert_eq!(
            catalog.resolve(PrefabSelector::new(Category::Flower, 2)),
            Some("Flower_C")
        );
        assert_eq!(catalog.resolve(PrefabSelector::new(Category::Flower, 3)), None);
        assert_eq!(
            PrefabCatalog::default().resolve(PrefabSelector::new(Category::Sand, 0)),
            None
        );
    }
}
