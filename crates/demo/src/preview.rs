//! ASCII map of a generated grid, one character per cell.

use procgen::{Biome, Category, GenerationConfig, PlacementCommand, PlacementKind};

/// Glyph for the most notable thing standing on a cell, if any.
fn prop_glyph(category: Category) -> Option<(u8, char)> {
    // Higher rank wins when several props share a cell.
    match category {
        Category::Building => Some((6, 'B')),
        Category::Tree => Some((5, 'T')),
        Category::Rare => Some((4, '?')),
        Category::Fence => Some((3, '#')),
        Category::Rock => Some((2, 'o')),
        Category::Flower => Some((1, '*')),
        Category::Mushroom => Some((0, 'm')),
        _ => None,
    }
}

fn floor_biome(cmd: &PlacementCommand, config: &GenerationConfig) -> Biome {
    match cmd.prefab.category {
        Category::Grass => Biome::Grass,
        Category::Rocky => Biome::Highland,
        _ => config.bands().classify(cmd.position.y),
    }
}

/// Render rows of increasing z, columns of increasing x. Cells without a
/// floor command show as a space.
pub fn render(commands: &[PlacementCommand], config: &GenerationConfig) -> String {
    let m = config.map_size as i64;
    let side = (2 * m) as usize;
    if side == 0 {
        return String::new();
    }
    let mut floors = vec![' '; side * side];
    let mut props: Vec<Option<(u8, char)>> = vec![None; side * side];

    let index = |cmd: &PlacementCommand| -> Option<usize> {
        let x = (cmd.position.x / config.spacing).round() as i64 + m;
        let z = (cmd.position.z / config.spacing).round() as i64 + m;
        let in_grid = (0..2 * m).contains(&x) && (0..2 * m).contains(&z);
        in_grid.then(|| z as usize * side + x as usize)
    };

    for cmd in commands {
        let Some(i) = index(cmd) else { continue };
        match cmd.kind {
            PlacementKind::Floor => floors[i] = floor_biome(cmd, config).glyph(),
            PlacementKind::Decoration | PlacementKind::Building => {
                if let Some(g) = prop_glyph(cmd.prefab.category) {
                    if props[i].map_or(true, |p| g.0 > p.0) {
                        props[i] = Some(g);
                    }
                }
            }
            _ => {}
        }
    }

    let mut out = String::with_capacity(side * (side + 1));
    for row in 0..side {
        for col in 0..side {
            let i = row * side + col;
            out.push(props[i].map_or(floors[i], |(_, c)| c));
        }
        out.push('\n');
    }
    out
}

pub fn legend() -> String {
    let biomes: Vec<String> = Biome::ALL
        .iter()
        .map(|b| format!("{} {:?}", b.glyph(), b))
        .collect();
    format!(
        "{}  |  B building  T tree  ? rare  # fence  o rock  * flower  m mushroom",
        biomes.join("  ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::Vec3;
    use procgen::PrefabSelector;

    fn at(kind: PlacementKind, category: Category, x: f32, y: f32, z: f32) -> PlacementCommand {
        PlacementCommand::new(kind, PrefabSelector::new(category, 0), Vec3::new(x, y, z))
    }

    #[test]
    fn draws_floors_and_props() {
        let config = GenerationConfig {
            map_size: 1,
            ..Default::default()
        };
        let commands = vec![
            at(PlacementKind::Floor, Category::Sand, -1.0, 0.5, -1.0),
            at(PlacementKind::Floor, Category::Sand, 0.0, 1.2, -1.0),
            at(PlacementKind::Floor, Category::Grass, -1.0, 1.8, 0.0),
            at(PlacementKind::Floor, Category::Rocky, 0.0, 2.5, 0.0),
            at(PlacementKind::Decoration, Category::Flower, -1.0, 2.2, 0.0),
            at(PlacementKind::Decoration, Category::Tree, -1.0, 2.2, 0.0),
            at(PlacementKind::Decoration, Category::Mushroom, -1.0, 2.2, 0.0),
        ];
        assert_eq!(render(&commands, &config), "~.\nT^\n");
    }

    #[test]
    fn plateau_floors_read_as_grass() {
        let config = GenerationConfig {
            map_size: 1,
            ..Default::default()
        };
        let commands = vec![at(PlacementKind::Floor, Category::Grass, 0.0, 0.0, 0.0)];
        assert_eq!(render(&commands, &config), "  \n \"\n");
    }

    #[test]
    fn off_grid_commands_are_ignored() {
        let config = GenerationConfig {
            map_size: 1,
            ..Default::default()
        };
        let commands = vec![at(PlacementKind::Floor, Category::Rocky, 5.0, 3.0, 0.0)];
        assert_eq!(render(&commands, &config), "  \n  \n");
    }
}
