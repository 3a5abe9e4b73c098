//! Per-cell biome assignment from elevation and moisture fields.

use tracing::debug;

use super::rule::{BiomeRule, Rgba8, sort_rules};
use crate::TerrainError;
use crate::field::ScalarField;

/// Output of [`classify`]: one biome id and one color per cell, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    /// Matched rule id per cell.
    pub biome_ids: Vec<u8>,
    /// Matched rule color per cell.
    pub colors: Vec<Rgba8>,
    /// Cells no rule covered, resolved with the last sorted rule.
    pub fallback_cells: usize,
}

/// Rescale a raw elevation sample against its field's bounds.
///
/// Computes `raw * (1 / (max - min)) - min`. The minimum is subtracted after
/// scaling, so the result only spans `[0, 1]` when `min == 0`; this is the
/// historical formula and biome tables are tuned against it.
#[inline]
pub fn rescale_elevation(raw: f64, min_value: f64, max_value: f64) -> f64 {
    let scale = 1.0 / (max_value - min_value);
    raw * scale - min_value
}

/// First rule in `sorted` whose thresholds enclose the cell.
pub fn pick_rule<'a>(
    elevation: f64,
    moisture: f64,
    sorted: &[&'a BiomeRule],
) -> Option<&'a BiomeRule> {
    sorted
        .iter()
        .copied()
        .find(|rule| rule.matches(elevation, moisture))
}

/// Assign a biome to every cell.
///
/// Elevation is rescaled with [`rescale_elevation`]; moisture is used as-is.
/// Rules are sorted with [`sort_rules`] before scanning, so declaration order
/// only matters between rules with identical thresholds. A cell matched by
/// no rule receives the last rule in sorted order.
///
/// # Errors
///
/// [`TerrainError::EmptyRuleTable`] if `rules` is empty and
/// [`TerrainError::DimensionMismatch`] if the fields cover different grids.
pub fn classify(
    elevation: &ScalarField,
    moisture: &ScalarField,
    rules: &[BiomeRule],
) -> Result<Classification, TerrainError> {
    if !elevation.same_shape(moisture) {
        return Err(TerrainError::DimensionMismatch {
            left_width: elevation.width(),
            left_height: elevation.height(),
            right_width: moisture.width(),
            right_height: moisture.height(),
        });
    }

    let sorted = sort_rules(rules);
    let fallback = *sorted.last().ok_or(TerrainError::EmptyRuleTable)?;

    let (min_value, max_value) = (elevation.min_value(), elevation.max_value());
    let cells = elevation.len();
    let mut biome_ids = Vec::with_capacity(cells);
    let mut colors = Vec::with_capacity(cells);
    let mut fallback_cells = 0;

    for (&raw, &wetness) in elevation.data().iter().zip(moisture.data()) {
        let height = rescale_elevation(raw, min_value, max_value);
        let rule = match pick_rule(height, wetness, &sorted) {
            Some(rule) => rule,
            None => {
                fallback_cells += 1;
                fallback
            }
        };
        biome_ids.push(rule.id);
        colors.push(rule.color);
    }

    if fallback_cells > 0 {
        debug!(
            fallback_cells,
            fallback = %fallback.name,
            "cells matched no biome rule; assigned last sorted rule"
        );
    }

    Ok(Classification {
        biome_ids,
        colors,
        fallback_cells,
    })
}

/// Count cells per biome id, ascending by id, omitting ids with no cells.
pub fn biome_histogram(biome_ids: &[u8]) -> Vec<(u8, usize)> {
    let mut counts = [0usize; 256];
    for &id in biome_ids {
        counts[id as usize] += 1;
    }
    counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(id, &count)| (id as u8, count))
        .collect()
}
