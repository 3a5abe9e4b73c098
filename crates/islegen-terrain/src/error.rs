//! Error types for the terrain pipeline.

/// Precondition violations detected before a pipeline stage does any work.
///
/// Every stage validates its inputs up front, so a returned error means no
/// partial output was produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// Width or height is zero.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions {
        /// Requested grid width.
        width: usize,
        /// Requested grid height.
        height: usize,
    },

    /// The octave weight list is empty.
    #[error("at least one octave weight is required")]
    NoOctaves,

    /// An octave weight is zero, negative or not finite.
    #[error("octave {index} has invalid weight {weight} (must be finite and > 0)")]
    InvalidOctaveWeight {
        /// Position of the offending weight in the octave list.
        index: usize,
        /// The rejected weight.
        weight: f64,
    },

    /// The redistribution exponent is zero, negative or not finite.
    #[error("redistribution power must be finite and > 0, got {0}")]
    InvalidPower(f64),

    /// The base frequency is not finite, or scales sample coordinates past
    /// [`MAX_SAMPLE_COORDINATE`](crate::fractal::MAX_SAMPLE_COORDINATE).
    #[error("noise frequency must be finite and keep sample coordinates in range, got {0}")]
    InvalidFrequency(f64),

    /// The island blend factor lies outside `[0, 1]`.
    #[error("island mix must lie in [0, 1], got {0}")]
    InvalidMix(f64),

    /// Two fields that must share a grid do not.
    #[error("field dimensions differ: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        /// Width of the first field.
        left_width: usize,
        /// Height of the first field.
        left_height: usize,
        /// Width of the second field.
        right_width: usize,
        /// Height of the second field.
        right_height: usize,
    },

    /// Sample count does not equal `width * height`.
    #[error("field has {len} samples but a {width}x{height} grid needs {}", .width * .height)]
    DataLength {
        /// Number of samples supplied.
        len: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// Declared bounds are inverted or do not enclose every sample.
    #[error("declared bounds [{min}, {max}] do not enclose the field data")]
    InvalidBounds {
        /// Declared minimum.
        min: f64,
        /// Declared maximum.
        max: f64,
    },

    /// The biome rule table has no entries.
    #[error("biome rule table is empty")]
    EmptyRuleTable,
}
