//! Terrain preview - generates a height field and prints it
//!
//! Run with:
//! ```
//! cargo run -p terrain-preview --bin preview -- --seed 42 --roughness 10
//! ```

use clap::Parser;
use rand::Rng;
use terrain::TracingSink;
use terrain::prelude::*;
use terrain_preview::{BandHistogram, Snapshot, render_ascii};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "preview")]
#[command(about = "Generate diamond-square terrain and print it as text")]
struct Args {
    /// Random seed (uses a random seed if not specified)
    #[arg(short, long, env = "TERRAIN_SEED")]
    seed: Option<u64>,

    /// Grid side is 2^pow + 1
    #[arg(short, long, env = "TERRAIN_POW", default_value = "4")]
    pow: u32,

    /// Perturbation half-range at the coarsest pass (0-20)
    #[arg(short, long, env = "TERRAIN_ROUGHNESS", default_value = "10")]
    roughness: u32,

    /// Upper bound for the corner seeds (5-20)
    #[arg(short = 'm', long, env = "TERRAIN_MAX_HEIGHT", default_value = "10")]
    max_height: i32,

    /// Heights below this become water
    #[arg(long, env = "TERRAIN_WATER_THRESHOLD", default_value = "3")]
    water_threshold: i32,

    /// Height given to water cells
    #[arg(long, env = "TERRAIN_WATER_FLOOR", default_value = "1")]
    water_floor: i32,

    /// Number of "randomize" presses to simulate; each one regenerates the grid
    #[arg(long, default_value = "1")]
    runs: u32,

    /// Print a JSON snapshot instead of the ASCII map
    #[arg(long)]
    json: bool,

    /// Log every cell write at trace level (needs RUST_LOG=trace)
    #[arg(long)]
    trace_cells: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
    tracing::info!("Using seed {}", seed);

    let base = TerrainConfig::default().with_water(args.water_threshold, args.water_floor);
    let mut generator = TerrainGenerator::new(base)?;
    let mut field = HeightField::with_power(args.pow)?;
    let mut rng = RngSource::seeded(seed);
    let mut trigger = RegenerationTrigger::new();

    let mut params = TerrainParams {
        initial_roughness: args.roughness,
        max_height: args.max_height,
        generation: 0,
    };

    let mut last = None;
    for press in 0..args.runs.max(1) {
        if press > 0 {
            params = params.bumped();
        }
        if !trigger.observe(params) {
            continue;
        }

        generator.set_config(params.apply_to(*generator.config()))?;
        let mut histogram =
            BandHistogram::new(field.len(), generator.classifier().category_count());
        let mut cells = TracingSink;
        let mut sink = |update: CellUpdate| {
            histogram.notify(update);
            if args.trace_cells {
                cells.notify(update);
            }
        };
        let summary = generator.generate(&mut field, &mut rng, &mut sink)?;

        tracing::info!("Run {} complete", press + 1);
        tracing::info!("  Passes: {}", summary.passes);
        tracing::info!("  Writes: {}", summary.writes);
        tracing::info!("  Height range: {}..={}", summary.min_height, summary.max_height);
        tracing::info!("  Cells per band: {:?}", histogram.counts());

        last = Some(summary);
    }

    let Some(summary) = last else {
        anyhow::bail!("no generation was triggered");
    };

    if args.json {
        let snapshot = Snapshot::new(
            seed,
            &field,
            *generator.config(),
            summary,
            generator.classifier(),
        );
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render_ascii(&field, generator.classifier()));
    }

    Ok(())
}
