//! Structure placement demo
//!
//! Builds an in-memory island (or sea floor) per structure kind, tries to
//! place structures on a square lattice of anchors, and reports how many
//! landed and why the rest were refused.
//!
//! Usage:
//!     place_features [OPTIONS]
//!
//! Options:
//!     -k, --kind <KIND>       palm, rainforest, seagrass, or all (default: all)
//!     -n, --count <N>         Anchors per kind (default: 64)
//!     --seed <SEED>           World seed (default: 12345)
//!     -c, --config <PATH>     Feature config JSON (default: built-in constants)
//!     -h, --help              Show this help message

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use glam::IVec3;
use rayon::prelude::*;

use canopy_gen::core::logging;
use canopy_gen::generation::{
    FeatureConfig, FeatureGenerator, LegacyRandom, NoiseCache, PalmTreeGenerator, PlacementError,
    RainforestTreeGenerator, SeagrassGenerator,
};
use canopy_gen::voxel::voxel::VoxelState;
use canopy_gen::voxel::world::{fill_ground, SparseGrid};

const MIN_Y: i32 = -64;
const MAX_Y: i32 = 320;
const GROUND_Y: i32 = 62;
const SEA_FLOOR_Y: i32 = 36;

fn print_help() {
    eprintln!("place_features - Structure placement demo");
    eprintln!();
    eprintln!("Usage: place_features [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    -k, --kind <KIND>       palm, rainforest, seagrass, or all (default: all)");
    eprintln!("    -n, --count <N>         Anchors per kind (default: 64)");
    eprintln!("    --seed <SEED>           World seed (default: 12345)");
    eprintln!("    -c, --config <PATH>     Feature config JSON (default: built-in constants)");
    eprintln!("    -h, --help              Show this help message");
    eprintln!();
    eprintln!("Example:");
    eprintln!("    place_features -k palm -n 100 --seed 42");
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Palm,
    Rainforest,
    Seagrass,
}

impl Kind {
    const ALL: [Kind; 3] = [Kind::Palm, Kind::Rainforest, Kind::Seagrass];

    fn name(self) -> &'static str {
        match self {
            Kind::Palm => "palm",
            Kind::Rainforest => "rainforest",
            Kind::Seagrass => "seagrass",
        }
    }

    /// Lattice spacing between anchors, wide enough that neighbours rarely touch
    fn spacing(self) -> i32 {
        match self {
            Kind::Palm => 10,
            Kind::Rainforest => 28,
            Kind::Seagrass => 24,
        }
    }
}

#[derive(Debug)]
struct Args {
    kind: Option<Kind>, // None means all kinds
    count: u32,
    seed: u64,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut kind: Option<Kind> = None;
    let mut count: u32 = 64;
    let mut seed: u64 = 12345;
    let mut config: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-k" | "--kind" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --kind".to_string());
                }
                kind = match args[i].to_lowercase().as_str() {
                    "palm" => Some(Kind::Palm),
                    "rainforest" => Some(Kind::Rainforest),
                    "seagrass" => Some(Kind::Seagrass),
                    "all" => None,
                    other => return Err(format!("Unknown kind: {}. Valid kinds: palm, rainforest, seagrass, all", other)),
                };
            }
            "-n" | "--count" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --count".to_string());
                }
                count = args[i].parse().map_err(|_| format!("Invalid count: {}", args[i]))?;
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --seed".to_string());
                }
                seed = args[i].parse().map_err(|_| format!("Invalid seed: {}", args[i]))?;
            }
            "-c" | "--config" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --config".to_string());
                }
                config = Some(PathBuf::from(&args[i]));
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(Args { kind, count, seed, config })
}

/// Outcome tally for one kind
struct Report {
    kind: Kind,
    placed: u32,
    refused: HashMap<PlacementError, u32>,
    voxels: usize,
    seconds: f64,
}

fn lattice_side(count: u32) -> i32 {
    (count as f64).sqrt().ceil().max(1.0) as i32
}

/// Flat ground (or flooded sea floor) covering the whole anchor lattice
fn build_terrain(kind: Kind, seed: u64, count: u32) -> SparseGrid {
    let side = lattice_side(count);
    let half = side * kind.spacing() / 2 + kind.spacing();
    let mut grid = SparseGrid::new(seed, MIN_Y, MAX_Y);

    match kind {
        Kind::Palm => fill_ground(&mut grid, IVec3::ZERO, half, GROUND_Y, VoxelState::Sand),
        Kind::Rainforest => fill_ground(&mut grid, IVec3::ZERO, half, GROUND_Y, VoxelState::GrassBlock),
        Kind::Seagrass => {
            fill_ground(&mut grid, IVec3::ZERO, half, SEA_FLOOR_Y, VoxelState::Sand);
            // Floor rises along x so clusters see both depth classes
            for x in -half..=half {
                let bed = SEA_FLOOR_Y + (x + half) * 12 / (2 * half).max(1);
                grid.fill(IVec3::new(x, SEA_FLOOR_Y, -half), IVec3::new(x, bed, half), VoxelState::Sand);
                grid.fill(IVec3::new(x, bed + 1, -half), IVec3::new(x, GROUND_Y, half), VoxelState::Water);
            }
        }
    }
    grid.clear_logs();
    grid
}

fn generator_for(
    kind: Kind,
    config: &FeatureConfig,
    noise: &Arc<NoiseCache>,
) -> canopy_gen::core::Result<Box<dyn FeatureGenerator>> {
    Ok(match kind {
        Kind::Palm => Box::new(PalmTreeGenerator::new(config.palm.clone())?),
        Kind::Rainforest => Box::new(RainforestTreeGenerator::new(config.rainforest.clone())?),
        Kind::Seagrass => Box::new(SeagrassGenerator::new(config.seagrass.clone(), Arc::clone(noise))?),
    })
}

fn run_kind(
    kind: Kind,
    args: &Args,
    config: &FeatureConfig,
    noise: &Arc<NoiseCache>,
) -> canopy_gen::core::Result<Report> {
    let start = Instant::now();
    let mut grid = build_terrain(kind, args.seed, args.count);
    let generator = generator_for(kind, config, noise)?;

    let side = lattice_side(args.count);
    let spacing = kind.spacing();
    let origin = -(side - 1) * spacing / 2;
    let anchor_y = match kind {
        Kind::Seagrass => SEA_FLOOR_Y + 1,
        _ => GROUND_Y + 1,
    };

    let mut placed = 0;
    let mut refused = HashMap::new();
    for i in 0..args.count {
        let (ix, iz) = (i as i32 % side, i as i32 / side);
        let anchor = IVec3::new(origin + ix * spacing, anchor_y, origin + iz * spacing);
        let seed = args.seed.wrapping_add(i as u64).wrapping_mul(0x517cc1b727220a95);
        let mut rng = LegacyRandom::new(seed as i64);

        match generator.place(&mut grid, anchor, &mut rng) {
            Ok(_) => placed += 1,
            Err(reason) => *refused.entry(reason).or_insert(0) += 1,
        }
    }

    Ok(Report {
        kind,
        placed,
        refused,
        voxels: grid.writes().len(),
        seconds: start.elapsed().as_secs_f64(),
    })
}

fn main() {
    logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    let config = match &args.config {
        Some(path) => match FeatureConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => FeatureConfig::default(),
    };

    let kinds: Vec<Kind> = match args.kind {
        Some(kind) => vec![kind],
        None => Kind::ALL.to_vec(),
    };
    log::info!(
        "Placing {} anchors per kind for {} kind(s), seed {}",
        args.count, kinds.len(), args.seed
    );

    let noise = Arc::new(NoiseCache::new(args.seed, config.seagrass.first_octave));
    let reports: Vec<Report> = match kinds
        .par_iter()
        .map(|kind| run_kind(*kind, &args, &config, &noise))
        .collect::<canopy_gen::core::Result<_>>()
    {
        Ok(reports) => reports,
        Err(e) => {
            log::error!("Invalid generator config: {}", e);
            std::process::exit(1);
        }
    };

    for report in &reports {
        log::info!(
            "{}: placed {}/{} ({} voxel writes) in {:.2}s",
            report.kind.name(), report.placed, args.count, report.voxels, report.seconds
        );
        for reason in PlacementError::ALL {
            if let Some(n) = report.refused.get(&reason) {
                log::info!("  {n} refused: {reason}");
            }
        }
    }
    log::info!("Noise fields built: {}", noise.built_count());
}
