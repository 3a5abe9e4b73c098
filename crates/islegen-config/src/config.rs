//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of the config file inside the config directory.
const CONFIG_FILE: &str = "config.ron";

/// Top-level generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Output grid and file settings.
    pub map: MapConfig,
    /// Elevation field noise.
    pub elevation: NoiseConfig,
    /// Moisture field noise.
    pub moisture: NoiseConfig,
    /// Island reshaping.
    pub island: IslandConfig,
    /// Biome rule table. Order is irrelevant; rules are sorted by threshold.
    pub biomes: Vec<BiomeConfig>,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Output grid and file settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    /// Grid width in cells (one pixel per cell).
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Path of the biome color PNG.
    pub output: PathBuf,
    /// Optional path for a grayscale PNG of the reshaped elevation.
    pub heightmap: Option<PathBuf>,
}

/// Parameters for one fractal noise field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoiseConfig {
    /// Base frequency.
    pub frequency: f64,
    /// Octave weights; each divides the sample coordinate and weights its layer.
    pub octaves: Vec<f64>,
    /// Redistribution exponent.
    pub power: f64,
    /// Base seed. `None` draws a random seed on every run.
    pub seed: Option<i64>,
}

/// Island reshaping settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IslandConfig {
    /// Blend between raw elevation (0.0) and the island mask (1.0).
    pub mix: f64,
}

/// One biome rule as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BiomeConfig {
    /// Biome id written to the id field.
    pub id: u8,
    /// Display name.
    pub name: String,
    /// Inclusive upper elevation threshold.
    pub max_elevation: f64,
    /// Inclusive upper moisture threshold.
    pub max_moisture: f64,
    /// RGBA color.
    pub color: [u8; 4],
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter (e.g., "debug", "info,islegen_terrain=trace").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for Config {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            elevation: NoiseConfig::default(),
            moisture: NoiseConfig::default(),
            island: IslandConfig::default(),
            biomes: default_biomes(),
            debug: DebugConfig::default(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            output: PathBuf::from("image.png"),
            heightmap: None,
        }
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            frequency: 8.0,
            octaves: vec![1.0, 0.5, 0.25, 0.125],
            power: 1.2,
            seed: None,
        }
    }
}

impl Default for IslandConfig {
    fn default() -> Self {
        Self { mix: 0.4 }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

fn biome(id: u8, name: &str, max_elevation: f64, max_moisture: f64, rgb: [u8; 3]) -> BiomeConfig {
    BiomeConfig {
        id,
        name: name.to_string(),
        max_elevation,
        max_moisture,
        color: [rgb[0], rgb[1], rgb[2], 255],
    }
}

/// The stock ten-biome island table, from deep sea up to snow caps.
pub fn default_biomes() -> Vec<BiomeConfig> {
    vec![
        biome(0, "Deep Sea", 0.40, 1.0, [0x02, 0x2f, 0x8e]),
        biome(1, "Coastal Water", 0.5, 1.0, [0x1c, 0x70, 0xc8]),
        biome(2, "Beach", 0.52, 1.0, [0xc2, 0xb2, 0x80]),
        biome(3, "Desert", 0.75, 0.15, [0xfa, 0xd5, 0xa5]),
        biome(4, "Grassland", 0.75, 0.4, [0x3f, 0x9b, 0x0b]),
        biome(5, "Forest", 0.75, 1.0, [0x2e, 0x6f, 0x40]),
        biome(6, "Tundra", 0.85, 0.5, [0x8c, 0x9c, 0x5c]),
        biome(7, "Highlands", 0.85, 1.0, [0x7a, 0x94, 0x61]),
        biome(8, "Mountains", 1.0, 0.6, [0x40, 0x40, 0x40]),
        biome(9, "Snow", 1.0, 1.0, [0xff, 0xfa, 0xfa]),
    ]
}

// --- Validation ---

impl Config {
    /// Reject values that cannot drive the generator.
    ///
    /// Noise parameters are checked by the terrain crate itself; this only
    /// covers settings that have no meaning there.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map.width == 0 || self.map.height == 0 {
            return Err(ConfigError::Invalid {
                key: "map",
                reason: format!(
                    "dimensions must be positive, got {}x{}",
                    self.map.width, self.map.height
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.island.mix) {
            return Err(ConfigError::Invalid {
                key: "island.mix",
                reason: format!("must lie in [0, 1], got {}", self.island.mix),
            });
        }
        if self.biomes.is_empty() {
            return Err(ConfigError::Invalid {
                key: "biomes",
                reason: "at least one biome rule is required".to_string(),
            });
        }
        if !self
            .biomes
            .iter()
            .any(|b| b.max_elevation >= 1.0 && b.max_moisture >= 1.0)
        {
            log::warn!(
                "No biome covers elevation 1.0 / moisture 1.0; uncovered cells fall back to the highest rule"
            );
        }
        Ok(())
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::load(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Parse a config file.
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })?;
        Ok(())
    }
}
