//! voxelbiome - procedural voxel biome terrain from a RON config.
//!
//! `generate` runs one pass and prints a summary (optionally an ASCII map or a
//! RON dump of the placement commands). `watch` polls the config file and
//! rebuilds the scene whenever its effective parameters change.

mod config;
mod controls;
mod preview;
mod regen;
mod scene;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use engine_core::PollClock;
use procgen::{
    summary, GenerationConfig, GenerationSummary, PlacementGroup, PlacementKind, TerrainSynthesizer,
};

use config::{config_path, DemoConfig};
use controls::ControlInputs;
use regen::Regenerator;
use scene::Scene;

/// Procedural voxel biome generator.
#[derive(Parser)]
#[command(name = "voxelbiome")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ./config.ron).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate once and report what was placed.
    Generate {
        /// Start from a built-in preset instead of the file's generation block.
        #[arg(long)]
        preset: Option<Preset>,

        /// Override the world seed.
        #[arg(short, long)]
        seed: Option<i32>,

        /// Override the grid half-extent.
        #[arg(short, long)]
        map_size: Option<u32>,

        /// Knob positions in [0, 1]: seed, frequency, density, map size.
        #[arg(long, value_delimiter = ',', num_args = 4)]
        controls: Option<Vec<f32>>,

        /// Print an ASCII map of the grid.
        #[arg(long)]
        preview: bool,

        /// Write the placement commands as RON.
        #[arg(long)]
        dump: Option<PathBuf>,
    },

    /// Re-read the config on an interval and rebuild when it changes.
    Watch {
        /// Poll interval in milliseconds (defaults to the config's value).
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Stop after this many polls.
        #[arg(long)]
        max_polls: Option<u64>,
    },

    /// Write a default config file.
    Init {
        #[arg(long)]
        preset: Option<Preset>,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// Continuous heights, no cliffs.
    Smooth,
    /// Snapped layers with cliff walls.
    Stepped,
    /// Stepped terrain with a building plateau at the origin.
    Village,
}

impl Preset {
    fn config(self, seed: i32) -> GenerationConfig {
        match self {
            Preset::Smooth => GenerationConfig {
                seed,
                ..Default::default()
            },
            Preset::Stepped => GenerationConfig::stepped(seed),
            Preset::Village => GenerationConfig::village(seed),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let path = cli.config.unwrap_or_else(config_path);

    match cli.command {
        Commands::Generate {
            preset,
            seed,
            map_size,
            controls,
            preview,
            dump,
        } => {
            let mut demo = DemoConfig::load_from(&path);
            if let Some(preset) = preset {
                demo.generation = preset.config(demo.generation.seed);
            }
            if let Some(seed) = seed {
                demo.generation.seed = seed;
            }
            if let Some(map_size) = map_size {
                demo.generation.map_size = map_size;
            }
            if let Some(v) = controls {
                let &[p1, p2, p3, p4] = v.as_slice() else {
                    bail!("--controls takes exactly four values");
                };
                demo.controls = Some(ControlInputs::new(p1, p2, p3, p4));
            }
            run_generate(&demo, preview, dump.as_deref())
        }
        Commands::Watch {
            interval_ms,
            max_polls,
        } => run_watch(&path, interval_ms, max_polls),
        Commands::Init { preset, force } => {
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            let mut demo = DemoConfig::default();
            if let Some(preset) = preset {
                demo.generation = preset.config(0);
            }
            demo.save_to(&path)?;
            log::info!("Wrote {}", path.display());
            Ok(())
        }
    }
}

fn run_generate(demo: &DemoConfig, show_preview: bool, dump: Option<&Path>) -> Result<()> {
    let generation = demo.effective_generation();
    let synth = TerrainSynthesizer::new(generation.clone(), demo.catalog.clone())
        .context("invalid generation config")?;
    let commands = synth.generate();

    let mut scene = Scene::new();
    let spawned = scene.apply(&commands, &demo.catalog);
    print_summary(&summary(&commands), spawned);
    for group in PlacementGroup::ALL {
        println!("  [{}] {}", group.name(), scene.count_in_group(group.name()));
    }
    log::debug!("{} distinct prefabs instanced", scene.instance_batches().len());

    if show_preview {
        println!();
        print!("{}", preview::render(&commands, &generation));
        println!("{}", preview::legend());
    }

    if let Some(dump) = dump {
        let s = ron::ser::to_string_pretty(&commands, ron::ser::PrettyConfig::default())?;
        std::fs::write(dump, s).with_context(|| format!("writing {}", dump.display()))?;
        log::info!("Wrote {} placements to {}", commands.len(), dump.display());
    }
    Ok(())
}

fn print_summary(summary: &GenerationSummary, spawned: usize) {
    println!("{} placements, {} instantiated", summary.total, spawned);
    for kind in PlacementKind::ALL {
        let n = summary.count(kind);
        if n > 0 {
            println!("  {:<14}{n}", format!("{kind:?}"));
        }
    }
    for (category, n) in &summary.by_category {
        println!("  - {:<12}{n}", category.name());
    }
}

fn run_watch(path: &Path, interval_ms: Option<u64>, max_polls: Option<u64>) -> Result<()> {
    let initial = DemoConfig::load_from(path);
    let mut clock = PollClock::new(Duration::from_millis(
        interval_ms.unwrap_or(initial.poll_interval_ms),
    ));
    let mut regen = Regenerator::new();
    let mut scene = Scene::new();

    log::info!("Watching {} every {:?}", path.display(), clock.interval());
    let mut demo = initial;
    rebuild(&mut regen, &demo, &mut scene);

    while max_polls.map_or(true, |max| clock.poll_count() < max) {
        std::thread::sleep(clock.remaining());
        if !clock.tick() {
            continue;
        }
        match DemoConfig::try_load(path) {
            Ok(Some(loaded)) => demo = loaded,
            Ok(None) => {}
            Err(e) => {
                log::warn!("Keeping previous config: {:#}", e);
                continue;
            }
        }
        rebuild(&mut regen, &demo, &mut scene);
    }
    Ok(())
}

fn rebuild(regen: &mut Regenerator, demo: &DemoConfig, scene: &mut Scene) {
    let generation = demo.effective_generation();
    match regen.poll(&generation, &demo.catalog, scene) {
        Ok(Some(report)) => log::info!(
            "Rebuilt scene (batch {}): {} entities from {} placements",
            report.batch,
            report.spawned,
            report.summary.total
        ),
        Ok(None) => {}
        Err(e) => log::warn!("Config rejected, scene unchanged: {}", e),
    }
}
