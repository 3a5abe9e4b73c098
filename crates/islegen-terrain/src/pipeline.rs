//! End-to-end island map synthesis: elevation, moisture, reshape, classify.

use tracing::{debug, debug_span};

use crate::TerrainError;
use crate::biome::{BiomeRule, Rgba8, biome_histogram, classify};
use crate::field::ScalarField;
use crate::fractal::{FractalFieldGenerator, NoiseGeneratorParams};
use crate::island::reshape_island;
use crate::noise_source::NoiseFactory;
use crate::raster::ColorImage;

/// Everything needed to synthesize one map.
#[derive(Clone, Debug, PartialEq)]
pub struct MapRequest {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Elevation field parameters.
    pub elevation: NoiseGeneratorParams,
    /// Moisture field parameters. Should use a seed independent of `elevation`.
    pub moisture: NoiseGeneratorParams,
    /// Island blend factor in `[0, 1]`.
    pub mix: f64,
    /// Biome rule table, in any order.
    pub rules: Vec<BiomeRule>,
}

/// Result of running every stage.
#[derive(Clone, Debug, PartialEq)]
pub struct IslandMap {
    /// Island-reshaped elevation.
    pub elevation: ScalarField,
    /// Moisture, as generated.
    pub moisture: ScalarField,
    /// Biome id per cell.
    pub biome_ids: Vec<u8>,
    /// Biome color per cell.
    pub colors: Vec<Rgba8>,
}

impl IslandMap {
    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.elevation.width()
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.elevation.height()
    }

    /// The color field as an RGBA raster.
    pub fn color_image(&self) -> Result<ColorImage, TerrainError> {
        ColorImage::from_colors(self.width(), self.height(), &self.colors)
    }
}

/// Run the full pipeline with the given field generator.
///
/// # Errors
///
/// Propagates the first precondition failure from any stage.
pub fn generate_island_map<F: NoiseFactory>(
    generator: &FractalFieldGenerator<F>,
    request: &MapRequest,
) -> Result<IslandMap, TerrainError> {
    let _span = debug_span!("island_map", width = request.width, height = request.height).entered();

    if request.rules.is_empty() {
        return Err(TerrainError::EmptyRuleTable);
    }

    let raw_elevation = generator.generate(request.width, request.height, &request.elevation)?;
    let elevation = reshape_island(&raw_elevation, request.mix)?;
    let moisture = generator.generate(request.width, request.height, &request.moisture)?;
    let classification = classify(&elevation, &moisture, &request.rules)?;

    for (id, cells) in biome_histogram(&classification.biome_ids) {
        let name = request
            .rules
            .iter()
            .find(|rule| rule.id == id)
            .map_or("?", |rule| rule.name.as_str());
        debug!(id, name, cells, "biome coverage");
    }

    Ok(IslandMap {
        elevation,
        moisture,
        biome_ids: classification.biome_ids,
        colors: classification.colors,
    })
}
