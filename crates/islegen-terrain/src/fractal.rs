//! Multi-octave fractal (fBm) field synthesis with power-curve redistribution.
//!
//! Each octave weight plays two roles: it divides the sample coordinate (so a
//! heavier octave spreads over a coarser spatial scale) and it weights that
//! octave's contribution to the sum. The weighted sum is normalized by the
//! total weight and raised to `power`.

use tracing::debug;

use crate::TerrainError;
use crate::field::{Extrema, ScalarField, check_dimensions};
use crate::noise_source::{NoiseFactory, NoiseSource, OpenSimplexFactory};

/// Octave weights used by [`NoiseGeneratorParams::new`].
pub const DEFAULT_OCTAVES: [f64; 4] = [1.0, 0.5, 0.25, 0.125];

/// Redistribution exponent used by [`NoiseGeneratorParams::new`].
pub const DEFAULT_POWER: f64 = 1.2;

/// Largest absolute coordinate handed to a noise source.
///
/// Centered grid coordinates lie in `[-0.5, 0.5)`, so the widest octave
/// reaches `|frequency| * 0.5 / min(octaves)`. Past 2^52 an `f64` no longer
/// resolves fractional lattice offsets and OpenSimplex's lattice cast to
/// `isize` can overflow.
pub const MAX_SAMPLE_COORDINATE: f64 = 4_503_599_627_370_496.0;

/// Parameters for one fractal field.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseGeneratorParams {
    /// Base frequency applied to the centered grid coordinate.
    pub frequency: f64,
    /// Octave weights. Octave `i` samples at `frequency * coord / octaves[i]`
    /// and contributes `octaves[i] * noise`.
    pub octaves: Vec<f64>,
    /// Redistribution exponent. Values above 1 flatten lows and sharpen peaks.
    pub power: f64,
    /// Base seed; octave `i` is seeded with `seed + i` (wrapping).
    ///
    /// OpenSimplex takes a 32-bit seed, so only the low 32 bits of each
    /// octave seed reach it: seeds differing by a multiple of 2^32 produce
    /// the same field.
    pub seed: i64,
}

impl NoiseGeneratorParams {
    /// Default octave ladder and power curve at the given frequency, seed 0.
    pub fn new(frequency: f64) -> Self {
        Self {
            frequency,
            octaves: DEFAULT_OCTAVES.to_vec(),
            power: DEFAULT_POWER,
            seed: 0,
        }
    }

    /// Same parameters with a different base seed.
    pub fn with_seed(self, seed: i64) -> Self {
        Self { seed, ..self }
    }

    /// Check the octave, frequency and power preconditions.
    ///
    /// # Errors
    ///
    /// [`TerrainError::NoOctaves`], [`TerrainError::InvalidOctaveWeight`],
    /// [`TerrainError::InvalidFrequency`] or [`TerrainError::InvalidPower`].
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.octaves.is_empty() {
            return Err(TerrainError::NoOctaves);
        }
        if let Some((index, &weight)) = self
            .octaves
            .iter()
            .enumerate()
            .find(|&(_, &w)| !(w.is_finite() && w > 0.0))
        {
            return Err(TerrainError::InvalidOctaveWeight { index, weight });
        }
        let finest = self.octaves.iter().copied().fold(f64::INFINITY, f64::min);
        let reach = self.frequency.abs() * 0.5 / finest;
        if !(self.frequency.is_finite() && reach <= MAX_SAMPLE_COORDINATE) {
            return Err(TerrainError::InvalidFrequency(self.frequency));
        }
        if !(self.power.is_finite() && self.power > 0.0) {
            return Err(TerrainError::InvalidPower(self.power));
        }
        Ok(())
    }

    /// Sum of all octave weights, the normalization divisor.
    pub fn weight_sum(&self) -> f64 {
        self.octaves.iter().sum()
    }
}

/// Produces [`ScalarField`]s by layering octaves of elementary noise.
///
/// Noise sources come from a [`NoiseFactory`], one per octave, so tests can
/// substitute analytic sources for OpenSimplex.
#[derive(Clone, Debug, Default)]
pub struct FractalFieldGenerator<F = OpenSimplexFactory> {
    factory: F,
}

impl FractalFieldGenerator {
    /// Generator backed by OpenSimplex noise.
    pub fn new() -> Self {
        Self {
            factory: OpenSimplexFactory,
        }
    }
}

impl<F: NoiseFactory> FractalFieldGenerator<F> {
    /// Generator backed by a custom noise factory.
    pub fn with_factory(factory: F) -> Self {
        Self { factory }
    }

    /// Synthesize a `width x height` field.
    ///
    /// Cell `(x, y)` is sampled at the centered coordinate
    /// `(x / width - 0.5, y / height - 0.5)`. The returned field's bounds
    /// are the exact extrema after the power curve.
    ///
    /// # Errors
    ///
    /// Any precondition failure from [`NoiseGeneratorParams::validate`], or
    /// [`TerrainError::InvalidDimensions`] for a zero-sized grid.
    pub fn generate(
        &self,
        width: usize,
        height: usize,
        params: &NoiseGeneratorParams,
    ) -> Result<ScalarField, TerrainError> {
        check_dimensions(width, height)?;
        params.validate()?;

        let sources: Vec<F::Source> = (0..params.octaves.len())
            .map(|i| self.factory.create(params.seed.wrapping_add(i as i64)))
            .collect();
        let weight_sum = params.weight_sum();

        let mut data = Vec::with_capacity(width * height);
        let mut extrema = Extrema::new();

        for y in 0..height {
            let ny = y as f64 / height as f64 - 0.5;
            for x in 0..width {
                let nx = x as f64 / width as f64 - 0.5;
                let mut e = 0.0;
                for (source, &octave) in sources.iter().zip(&params.octaves) {
                    e += octave
                        * source.eval(
                            params.frequency * nx / octave,
                            params.frequency * ny / octave,
                        );
                }
                let value = (e / weight_sum).powf(params.power);
                extrema.observe(value);
                data.push(value);
            }
        }

        let field = ScalarField::from_generated(width, height, data, extrema);
        debug!(
            width,
            height,
            octaves = params.octaves.len(),
            seed = params.seed,
            min = field.min_value(),
            max = field.max_value(),
            "generated fractal field"
        );
        Ok(field)
    }
}

/// Synthesize a field with the default OpenSimplex backend.
///
/// # Errors
///
/// See [`FractalFieldGenerator::generate`].
pub fn generate(
    width: usize,
    height: usize,
    params: &NoiseGeneratorParams,
) -> Result<ScalarField, TerrainError> {
    FractalFieldGenerator::new().generate(width, height, params)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Returns the same value everywhere regardless of seed.
    struct ConstantFactory(f64);

    struct ConstantSource(f64);

    impl NoiseSource for ConstantSource {
        fn eval(&self, _x: f64, _y: f64) -> f64 {
            self.0
        }
    }

    impl NoiseFactory for ConstantFactory {
        type Source = ConstantSource;
        fn create(&self, _seed: i64) -> ConstantSource {
            ConstantSource(self.0)
        }
    }

    /// Records requested seeds; sources echo the x coordinate they were asked for.
    #[derive(Default)]
    struct RecordingFactory {
        seeds: RefCell<Vec<i64>>,
    }

    struct EchoX;

    impl NoiseSource for EchoX {
        fn eval(&self, x: f64, _y: f64) -> f64 {
            x
        }
    }

    impl NoiseFactory for &RecordingFactory {
        type Source = EchoX;
        fn create(&self, seed: i64) -> EchoX {
            self.seeds.borrow_mut().push(seed);
            EchoX
        }
    }

    fn observed_bounds(field: &ScalarField) -> (f64, f64) {
        field
            .data()
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    #[test]
    fn test_default_params() {
        let params = NoiseGeneratorParams::new(8.0);
        assert_eq!(params.frequency, 8.0);
        assert_eq!(params.octaves, vec![1.0, 0.5, 0.25, 0.125]);
        assert_eq!(params.power, 1.2);
        assert_eq!(params.weight_sum(), 1.875);
    }

    #[test]
    fn test_determinism_bit_identical() {
        let params = NoiseGeneratorParams::new(8.0).with_seed(12345);
        let a = generate(32, 24, &params).unwrap();
        let b = generate(32, 24, &params).unwrap();

        let bits_a: Vec<u64> = a.data().iter().map(|v| v.to_bits()).collect();
        let bits_b: Vec<u64> = b.data().iter().map(|v| v.to_bits()).collect();
        assert_eq!(bits_a, bits_b, "Same params must reproduce identical samples");
        assert_eq!(a.min_value().to_bits(), b.min_value().to_bits());
        assert_eq!(a.max_value().to_bits(), b.max_value().to_bits());
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate(16, 16, &NoiseGeneratorParams::new(8.0).with_seed(1)).unwrap();
        let b = generate(16, 16, &NoiseGeneratorParams::new(8.0).with_seed(2)).unwrap();
        assert_ne!(a.data(), b.data());
    }

    #[test]
    fn test_seed_uses_low_32_bits() {
        let a = generate(8, 8, &NoiseGeneratorParams::new(8.0).with_seed(5)).unwrap();
        let b = generate(8, 8, &NoiseGeneratorParams::new(8.0).with_seed(5 + (1_i64 << 32))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bounds_match_data_exactly() {
        let field = generate(40, 30, &NoiseGeneratorParams::new(4.0).with_seed(99)).unwrap();
        let (lo, hi) = observed_bounds(&field);
        assert_eq!(field.min_value(), lo);
        assert_eq!(field.max_value(), hi);
        assert_eq!(field.len(), 40 * 30);
    }

    #[test]
    fn test_values_stay_in_unit_range() {
        let field = generate(32, 32, &NoiseGeneratorParams::new(8.0).with_seed(5)).unwrap();
        assert!(field.data().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_constant_noise_applies_power_curve() {
        let params = NoiseGeneratorParams {
            frequency: 8.0,
            octaves: vec![1.0, 0.5],
            power: 2.0,
            seed: 0,
        };
        let field = FractalFieldGenerator::with_factory(ConstantFactory(0.5))
            .generate(4, 4, &params)
            .unwrap();
        // (1.0*0.5 + 0.5*0.5) / 1.5 = 0.5, squared.
        for &v in field.data() {
            assert!((v - 0.25).abs() < 1e-12, "expected 0.25, got {v}");
        }
        assert_eq!(field.min_value(), field.max_value());
    }

    #[test]
    fn test_octave_seeds_are_offset_from_base() {
        let factory = RecordingFactory::default();
        let params = NoiseGeneratorParams::new(1.0).with_seed(40);
        FractalFieldGenerator::with_factory(&factory)
            .generate(2, 2, &params)
            .unwrap();
        assert_eq!(*factory.seeds.borrow(), vec![40, 41, 42, 43]);
    }

    #[test]
    fn test_octave_weight_divides_sample_coordinate() {
        let factory = RecordingFactory::default();
        let params = NoiseGeneratorParams {
            frequency: 2.0,
            octaves: vec![0.5],
            power: 1.0,
            seed: 0,
        };
        // Single octave: value = 0.5 * (2.0 * nx / 0.5) / 0.5 = 4 * nx.
        let field = FractalFieldGenerator::with_factory(&factory)
            .generate(4, 1, &params)
            .unwrap();
        let expected = [-2.0, -1.0, 0.0, 1.0];
        for (got, want) in field.data().iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "expected {want}, got {got}");
        }
        assert_eq!(field.min_value(), -2.0);
        assert_eq!(field.max_value(), 1.0);
    }

    #[test]
    fn test_empty_octaves_rejected() {
        let params = NoiseGeneratorParams {
            octaves: Vec::new(),
            ..NoiseGeneratorParams::new(8.0)
        };
        assert_eq!(generate(4, 4, &params), Err(TerrainError::NoOctaves));
    }

    #[test]
    fn test_non_positive_octave_rejected() {
        let params = NoiseGeneratorParams {
            octaves: vec![1.0, 0.0, 0.5],
            ..NoiseGeneratorParams::new(8.0)
        };
        assert_eq!(
            generate(4, 4, &params),
            Err(TerrainError::InvalidOctaveWeight {
                index: 1,
                weight: 0.0
            })
        );
    }

    #[test]
    fn test_non_positive_power_rejected() {
        let params = NoiseGeneratorParams {
            power: 0.0,
            ..NoiseGeneratorParams::new(8.0)
        };
        assert_eq!(generate(4, 4, &params), Err(TerrainError::InvalidPower(0.0)));
    }

    #[test]
    fn test_non_finite_frequency_rejected() {
        for frequency in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let params = NoiseGeneratorParams::new(frequency);
            assert!(
                matches!(generate(4, 4, &params), Err(TerrainError::InvalidFrequency(_))),
                "frequency {frequency} must be rejected"
            );
        }
    }

    #[test]
    fn test_oversized_frequency_rejected() {
        assert_eq!(
            generate(4, 4, &NoiseGeneratorParams::new(1e20)),
            Err(TerrainError::InvalidFrequency(1e20))
        );
        // A tiny octave weight stretches the finest octave past the limit.
        let params = NoiseGeneratorParams {
            octaves: vec![1.0, 1e-15],
            ..NoiseGeneratorParams::new(100.0)
        };
        assert_eq!(generate(4, 4, &params), Err(TerrainError::InvalidFrequency(100.0)));
    }

    #[test]
    fn test_zero_and_negative_frequency_accepted() {
        assert!(generate(4, 4, &NoiseGeneratorParams::new(0.0)).is_ok());
        assert!(generate(4, 4, &NoiseGeneratorParams::new(-8.0).with_seed(3)).is_ok());
    }

    #[test]
    fn test_zero_width_rejected() {
        let result = generate(0, 4, &NoiseGeneratorParams::new(8.0));
        assert!(matches!(result, Err(TerrainError::InvalidDimensions { .. })));
    }
}
