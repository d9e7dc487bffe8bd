//! Demo configuration (generation parameters, prefab catalog, knobs). Loaded from config.ron at startup.

use std::path::{Path, PathBuf};

use anyhow::Context;
use procgen::{GenerationConfig, PrefabCatalog};
use serde::{Deserialize, Serialize};

use crate::controls::ControlInputs;

pub const CONFIG_FILE: &str = "config.ron";

/// Persistent demo settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Parameters handed to the synthesizer.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Prefab identifiers per category.
    #[serde(default = "PrefabCatalog::voxel_pack")]
    pub catalog: PrefabCatalog,
    /// When set, knob positions override seed, frequency, densities and map size.
    #[serde(default)]
    pub controls: Option<ControlInputs>,
    /// How often `watch` re-reads the config file.
    #[serde(default = "default_poll_ms")]
    pub poll_interval_ms: u64,
}

fn default_poll_ms() -> u64 {
    500
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            catalog: PrefabCatalog::voxel_pack(),
            controls: None,
            poll_interval_ms: default_poll_ms(),
        }
    }
}

impl DemoConfig {
    /// Load config from `path`. If the file is missing or invalid, returns default config.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(Some(c)) => c,
            Ok(None) => {
                log::debug!("No config at {:?}, using defaults", path);
                Self::default()
            }
            Err(e) => {
                log::warn!("Invalid config at {:?}: {:#}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// `Ok(None)` when the file does not exist.
    pub fn try_load(path: &Path) -> anyhow::Result<Option<Self>> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };
        let config = ron::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(config))
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        let s = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, s).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Generation parameters with any knob overrides applied.
    pub fn effective_generation(&self) -> GenerationConfig {
        match &self.controls {
            Some(controls) => controls.apply(&self.generation),
            None => self.generation.clone(),
        }
    }
}

pub fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_keeps_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut config = DemoConfig {
            generation: GenerationConfig::village(31),
            ..Default::default()
        };
        config.catalog.fence.clear();
        config.save_to(&path).unwrap();
        assert_eq!(DemoConfig::load_from(&path), config);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.ron");
        assert_eq!(DemoConfig::try_load(&path).unwrap(), None);
        assert_eq!(DemoConfig::load_from(&path), DemoConfig::default());
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "(generation: (map_size: \"big\"))").unwrap();
        assert!(DemoConfig::try_load(&path).is_err());
        assert_eq!(DemoConfig::load_from(&path), DemoConfig::default());
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "(generation: (seed: 7, snap_heights: true))").unwrap();
        let config = DemoConfig::load_from(&path);
        assert_eq!(config.generation.seed, 7);
        assert!(config.generation.snap_heights);
        assert_eq!(config.generation.map_size, 20);
        assert_eq!(config.catalog, PrefabCatalog::voxel_pack());
        assert_eq!(config.poll_interval_ms, 500);
    }

    #[test]
    fn knobs_override_generation() {
        let config = DemoConfig {
            controls: Some(ControlInputs::new(1.0, 0.0, 0.0, 0.0)),
            ..Default::default()
        };
        let effective = config.effective_generation();
        assert_eq!(effective.seed, 100);
        assert_eq!(effective.map_size, 1);
        assert_eq!(config.generation.seed, 0);
    }
}
