//! Placement commands: the generator's only output.

use engine_core::{QuarterTurns, Transform};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::catalog::Category;

/// What a placement represents in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlacementKind {
    /// Top block of a cell.
    Floor,
    /// Ground block stacked below a snapped floor.
    Column,
    WaterSurface,
    WaterVolume,
    Decoration,
    /// Wall segment between a cell and a lower neighbour.
    Cliff,
    Building,
}

impl PlacementKind {
    pub const ALL: [PlacementKind; 7] = [
        PlacementKind::Floor,
        PlacementKind::Column,
        PlacementKind::WaterSurface,
        PlacementKind::WaterVolume,
        PlacementKind::Decoration,
        PlacementKind::Cliff,
        PlacementKind::Building,
    ];

    /// Parent grouping used when nothing more specific applies.
    pub fn default_group(self) -> PlacementGroup {
        match self {
            PlacementKind::Floor | PlacementKind::Column | PlacementKind::Cliff => {
                PlacementGroup::Terrain
            }
            PlacementKind::WaterSurface | PlacementKind::WaterVolume => PlacementGroup::Water,
            PlacementKind::Decoration => PlacementGroup::Decor,
            PlacementKind::Building => PlacementGroup::Structures,
        }
    }
}

/// Scene node the instantiated object is parented under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlacementGroup {
    Terrain,
    Water,
    Decor,
    Structures,
}

impl PlacementGroup {
    pub const ALL: [PlacementGroup; 4] = [
        PlacementGroup::Terrain,
        PlacementGroup::Water,
        PlacementGroup::Decor,
        PlacementGroup::Structures,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlacementGroup::Terrain => "terrain",
            PlacementGroup::Water => "water",
            PlacementGroup::Decor => "decor",
            PlacementGroup::Structures => "structures",
        }
    }
}

/// Category plus index into that category's option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrefabSelector {
    pub category: Category,
    pub variant: usize,
}

impl PrefabSelector {
    pub fn new(category: Category, variant: usize) -> Self {
        Self { category, variant }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementCommand {
    pub kind: PlacementKind,
    pub prefab: PrefabSelector,
    pub position: Vec3,
    /// Yaw in quarter turns.
    pub yaw: u8,
    pub group: PlacementGroup,
}

impl PlacementCommand {
    pub fn new(kind: PlacementKind, prefab: PrefabSelector, position: Vec3) -> Self {
        Self {
            kind,
            prefab,
            position,
            yaw: 0,
            group: kind.default_group(),
        }
    }

    pub fn with_yaw(mut self, yaw: QuarterTurns) -> Self {
        self.yaw = yaw.steps();
        self
    }

    pub fn yaw(&self) -> QuarterTurns {
        QuarterTurns::new(self.yaw as u32)
    }

    /// World transform for the scene layer.
    pub fn transform(&self) -> Transform {
        Transform::from_position_yaw(self.position, self.yaw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_follow_kind() {
        let cmd = PlacementCommand::new(
            PlacementKind::WaterSurface,
            PrefabSelector::new(Category::WaterSurface, 0),
            Vec3::new(0.0, 1.1, 0.0),
        );
        assert_eq!(cmd.group, PlacementGroup::Water);
        assert_eq!(PlacementKind::Cliff.default_group(), PlacementGroup::Terrain);
        assert_eq!(PlacementKind::Building.default_group(), PlacementGroup::Structures);
    }

    #[test]
    fn transform_applies_yaw() {
        let cmd = PlacementCommand::new(
            PlacementKind::Decoration,
            PrefabSelector::new(Category::Tree, 1),
            Vec3::new(2.0, 1.9, -3.0),
        )
        .with_yaw(QuarterTurns::new(2));
        let t = cmd.transform();
        assert_eq!(t.position, Vec3::new(2.0, 1.9, -3.0));
        assert!((t.forward() - Vec3::Z).length() < 1e-5);
        assert_eq!(cmd.yaw().degrees(), 180.0);
    }
}
