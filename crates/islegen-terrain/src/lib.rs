//! Procedural island terrain: fractal noise fields, island reshaping, and biome classification.
//!
//! The pipeline generates an elevation and a moisture field from layered
//! noise, pulls the elevation toward an island silhouette, then assigns each
//! cell a biome id and color from an ordered rule table.

mod error;
mod field;
mod island;
mod noise_source;
mod pipeline;
mod raster;

pub mod biome;
pub mod fractal;

pub use biome::{BiomeRule, Classification, Rgba8, biome_histogram, classify};
pub use error::TerrainError;
pub use field::ScalarField;
pub use fractal::{FractalFieldGenerator, NoiseGeneratorParams, generate};
pub use island::{island_mask, lerp, reshape_island, square_bump};
pub use noise_source::{NoiseFactory, NoiseSource, NormalizedOpenSimplex, OpenSimplexFactory};
pub use pipeline::{IslandMap, MapRequest, generate_island_map};
pub use raster::{ColorImage, elevation_image};
