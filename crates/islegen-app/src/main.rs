//! islegen: generate an island biome map and write it as a PNG.
//!
//! Configuration is loaded from `config.ron` (created with defaults on first
//! run) and can be overridden via CLI flags.
//! Run with `cargo run -p islegen-app -- --seed 42 --output island.png`.

mod export;
mod params;
mod platform;

use clap::Parser;
use islegen_config::{CliArgs, Config, ConfigError};
use islegen_terrain::{FractalFieldGenerator, TerrainError, elevation_image, generate_island_map};
use tracing::{error, info};

use crate::export::ExportError;
use crate::params::{Seeds, map_request};
use crate::platform::AppDirs;

/// Anything that can stop a run.
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terrain generation failed: {0}")]
    Terrain(#[from] TerrainError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

fn main() {
    let args = CliArgs::parse();

    let dirs = match AppDirs::resolve(args.config.as_deref()) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("{e}; pass --config <dir>");
            std::process::exit(1);
        }
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    islegen_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = run(&config) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), AppError> {
    config.validate()?;

    let seeds = Seeds::resolve(config, rand::random::<i64>);
    info!(
        elevation_seed = seeds.elevation,
        moisture_seed = seeds.moisture,
        width = config.map.width,
        height = config.map.height,
        "generating island map"
    );

    let request = map_request(config, seeds);
    let map = generate_island_map(&FractalFieldGenerator::new(), &request)?;

    export::write_png(&map.color_image()?, &config.map.output)?;
    if let Some(ref heightmap) = config.map.heightmap {
        export::write_png(&elevation_image(&map.elevation), heightmap)?;
    }

    Ok(())
}
