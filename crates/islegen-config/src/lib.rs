//! Configuration system for islegen.
//!
//! Map size, noise parameters, island blend and the biome table persist to
//! disk as a RON file. CLI flags parsed with clap override the loaded values.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BiomeConfig, Config, DebugConfig, IslandConfig, MapConfig, NoiseConfig, default_biomes,
};
pub use error::ConfigError;
