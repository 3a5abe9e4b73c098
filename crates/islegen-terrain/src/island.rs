//! Island reshaping: blend a field toward a square-bump radial mask.

use tracing::debug;

use crate::TerrainError;
use crate::field::{Extrema, ScalarField};

/// Square-bump distance: 0 at the center, rising to 1 along the edges.
///
/// `nx` and `ny` are centered coordinates in `[-1, 1]`.
#[inline]
pub fn square_bump(nx: f64, ny: f64) -> f64 {
    1.0 - (1.0 - nx * nx) * (1.0 - ny * ny)
}

/// Linear interpolation from `a` (t = 0) to `b` (t = 1).
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Centered coordinate of cell `i` on an axis of length `n`, in `[-1, 1)`.
#[inline]
fn centered(i: usize, n: usize) -> f64 {
    2.0 * i as f64 / n as f64 - 1.0
}

/// The island mask value `1 - d` at cell `(x, y)` of a `width x height` grid.
pub fn island_mask(x: usize, y: usize, width: usize, height: usize) -> f64 {
    1.0 - square_bump(centered(x, width), centered(y, height))
}

/// Blend `field` toward the island mask by `mix`.
///
/// `mix = 0` returns the samples unchanged and `mix = 1` replaces them with
/// the mask. The input is blended as-is: it is not rescaled into `[0, 1]`
/// first, so a field far outside the unit range will dominate or be swamped
/// by the mask.
///
/// # Errors
///
/// [`TerrainError::InvalidMix`] if `mix` is not within `[0, 1]`.
pub fn reshape_island(field: &ScalarField, mix: f64) -> Result<ScalarField, TerrainError> {
    if !(0.0..=1.0).contains(&mix) {
        return Err(TerrainError::InvalidMix(mix));
    }

    let (width, height) = (field.width(), field.height());
    let mut data = Vec::with_capacity(field.len());
    let mut extrema = Extrema::new();

    for (offset, &elevation) in field.data().iter().enumerate() {
        let (x, y) = (offset % width, offset / width);
        let value = lerp(elevation, island_mask(x, y, width, height), mix);
        extrema.observe(value);
        data.push(value);
    }

    let reshaped = ScalarField::from_generated(width, height, data, extrema);
    debug!(
        mix,
        min = reshaped.min_value(),
        max = reshaped.max_value(),
        "reshaped field toward island"
    );
    Ok(reshaped)
}
