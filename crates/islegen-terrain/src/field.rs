//! Row-major scalar grid with bounds tracked alongside the samples.

use crate::TerrainError;

/// Running minimum/maximum of a sample stream.
///
/// Stages feed every sample they write through [`Extrema::observe`] so the
/// resulting field's bounds are produced with the data instead of being
/// computed after the fact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Extrema {
    min: f64,
    max: f64,
}

impl Extrema {
    pub(crate) fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    #[inline]
    pub(crate) fn observe(&mut self, value: f64) {
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }
}

/// A continuous per-cell quantity (elevation, moisture) over a `width x height` grid.
///
/// Samples are stored row-major: the cell `(x, y)` lives at `y * width + x`.
/// A field is immutable once built; stages that transform a field allocate a
/// new one.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    data: Vec<f64>,
    width: usize,
    height: usize,
    min_value: f64,
    max_value: f64,
}

impl ScalarField {
    /// Build a field from raw samples, computing the exact bounds.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimensions`] for a zero-sized grid and
    /// [`TerrainError::DataLength`] if `data.len() != width * height`.
    pub fn from_data(width: usize, height: usize, data: Vec<f64>) -> Result<Self, TerrainError> {
        check_shape(width, height, data.len())?;
        let mut extrema = Extrema::new();
        for &value in &data {
            extrema.observe(value);
        }
        Ok(Self::from_generated(width, height, data, extrema))
    }

    /// Build a field whose declared bounds are supplied by the caller.
    ///
    /// The bounds only need to enclose the samples, which lets callers model
    /// a field that was rescaled against a wider reference range (a constant
    /// field declared over `[0, 1]`, for instance).
    ///
    /// # Errors
    ///
    /// Same shape errors as [`ScalarField::from_data`], plus
    /// [`TerrainError::InvalidBounds`] when `min_value > max_value` or a
    /// sample falls outside the declared range.
    pub fn with_bounds(
        width: usize,
        height: usize,
        data: Vec<f64>,
        min_value: f64,
        max_value: f64,
    ) -> Result<Self, TerrainError> {
        check_shape(width, height, data.len())?;
        let encloses = data.iter().all(|&v| v >= min_value && v <= max_value);
        if !(min_value <= max_value) || !encloses {
            return Err(TerrainError::InvalidBounds {
                min: min_value,
                max: max_value,
            });
        }
        Ok(Self {
            data,
            width,
            height,
            min_value,
            max_value,
        })
    }

    /// A field where every cell holds `value`.
    pub fn constant(width: usize, height: usize, value: f64) -> Result<Self, TerrainError> {
        Self::from_data(width, height, vec![value; width * height])
    }

    /// Assemble a field from samples whose extrema were tracked while writing them.
    pub(crate) fn from_generated(
        width: usize,
        height: usize,
        data: Vec<f64>,
        extrema: Extrema,
    ) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
            min_value: extrema.min,
            max_value: extrema.max,
        }
    }

    /// Row-major samples.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Smallest sample (or the declared lower bound).
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// Largest sample (or the declared upper bound).
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false` for a validly constructed field.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// `true` when both fields cover the same grid.
    pub fn same_shape(&self, other: &ScalarField) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Consume the field, returning its samples.
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }
}

/// Reject zero-sized grids.
pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<(), TerrainError> {
    if width == 0 || height == 0 {
        return Err(TerrainError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn check_shape(width: usize, height: usize, len: usize) -> Result<(), TerrainError> {
    check_dimensions(width, height)?;
    if len != width * height {
        return Err(TerrainError::DataLength { len, width, height });
    }
    Ok(())
}
