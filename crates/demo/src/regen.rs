//! Rebuild the scene whenever the effective configuration changes.

use procgen::{
    summary, ConfigError, GenerationConfig, GenerationSummary, PrefabCatalog, TerrainSynthesizer,
};

use crate::scene::Scene;

/// What one rebuild produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RegenReport {
    pub batch: u64,
    pub spawned: usize,
    pub summary: GenerationSummary,
}

/// Snapshot of the inputs of the last rebuild attempt.
#[derive(Debug, Default)]
pub struct Regenerator {
    last: Option<(GenerationConfig, PrefabCatalog)>,
}

impl Regenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_changed(&self, config: &GenerationConfig, catalog: &PrefabCatalog) -> bool {
        match &self.last {
            Some((c, p)) => c != config || p != catalog,
            None => true,
        }
    }

    fn snapshot(&mut self, config: &GenerationConfig, catalog: &PrefabCatalog) {
        self.last = Some((config.clone(), catalog.clone()));
    }

    /// Clear and rebuild `scene` from `config`.
    pub fn regenerate(
        &mut self,
        config: &GenerationConfig,
        catalog: &PrefabCatalog,
        scene: &mut Scene,
    ) -> Result<RegenReport, ConfigError> {
        // Snapshot first: a rejected config is reported once, not on every poll.
        self.snapshot(config, catalog);
        let synth = TerrainSynthesizer::new(config.clone(), catalog.clone())?;
        let commands = synth.generate();
        let spawned = scene.apply(&commands, catalog);
        Ok(RegenReport {
            batch: scene.batch(),
            spawned,
            summary: summary(&commands),
        })
    }

    /// Rebuild only if the inputs differ from the last attempt.
    pub fn poll(
        &mut self,
        config: &GenerationConfig,
        catalog: &PrefabCatalog,
        scene: &mut Scene,
    ) -> Result<Option<RegenReport>, ConfigError> {
        if !self.has_changed(config, catalog) {
            return Ok(None);
        }
        self.regenerate(config, catalog, scene).map(Some)
    }
}
