//! Translate loaded configuration into a terrain [`MapRequest`].

use islegen_config::{BiomeConfig, Config, NoiseConfig};
use islegen_terrain::{BiomeRule, MapRequest, NoiseGeneratorParams, Rgba8};

/// The concrete seeds used for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seeds {
    /// Elevation base seed.
    pub elevation: i64,
    /// Moisture base seed.
    pub moisture: i64,
}

impl Seeds {
    /// Take configured seeds, drawing any unset one from `draw`.
    pub fn resolve(config: &Config, mut draw: impl FnMut() -> i64) -> Self {
        Self {
            elevation: config.elevation.seed.unwrap_or_else(&mut draw),
            moisture: config.moisture.seed.unwrap_or_else(&mut draw),
        }
    }
}

/// Noise parameters for one field.
pub fn noise_params(noise: &NoiseConfig, seed: i64) -> NoiseGeneratorParams {
    NoiseGeneratorParams {
        frequency: noise.frequency,
        octaves: noise.octaves.clone(),
        power: noise.power,
        seed,
    }
}

/// Biome rules in config order.
pub fn biome_rules(biomes: &[BiomeConfig]) -> Vec<BiomeRule> {
    biomes
        .iter()
        .map(|b| {
            BiomeRule::new(
                b.id,
                b.name.clone(),
                b.max_elevation,
                b.max_moisture,
                Rgba8::from(b.color),
            )
        })
        .collect()
}

/// The full pipeline request for `config` with the given seeds.
pub fn map_request(config: &Config, seeds: Seeds) -> MapRequest {
    MapRequest {
        width: config.map.width as usize,
        height: config.map.height as usize,
        elevation: noise_params(&config.elevation, seeds.elevation),
        moisture: noise_params(&config.moisture, seeds.moisture),
        mix: config.island.mix,
        rules: biome_rules(&config.biomes),
    }
}
