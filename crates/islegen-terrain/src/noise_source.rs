//! Elementary noise seam: a seeded, continuous 2D scalar function.
//!
//! The fractal generator only needs `seed -> source` and `source(x, y) -> value`,
//! so the concrete noise algorithm sits behind [`NoiseFactory`] and
//! [`NoiseSource`]. The default implementation wraps OpenSimplex from the
//! `noise` crate.

use noise::{NoiseFn, OpenSimplex};

/// A deterministic, continuous, bounded 2D noise function.
pub trait NoiseSource {
    /// Evaluate the noise at `(x, y)`.
    fn eval(&self, x: f64, y: f64) -> f64;
}

/// Builds one [`NoiseSource`] per seed.
pub trait NoiseFactory {
    /// The source type produced by this factory.
    type Source: NoiseSource;

    /// Create a source for `seed`. Equal seeds must yield sources that
    /// return identical values for identical coordinates.
    fn create(&self, seed: i64) -> Self::Source;
}

/// OpenSimplex noise remapped from `[-1, 1]` into `[0, 1]`.
///
/// The unit range keeps the fractal power curve well defined, since a
/// fractional exponent of a negative sum would produce NaN.
#[derive(Clone, Debug)]
pub struct NormalizedOpenSimplex {
    noise: OpenSimplex,
}

impl NormalizedOpenSimplex {
    /// Create a source from a 64-bit seed.
    ///
    /// `OpenSimplex` takes a 32-bit seed; the low 32 bits are used, so
    /// consecutive seeds stay distinct.
    pub fn new(seed: i64) -> Self {
        Self {
            noise: OpenSimplex::new(seed as u32),
        }
    }
}

/// Affine map from `[-1, 1]` onto `[0, 1]`.
#[inline]
fn to_unit_range(raw: f64) -> f64 {
    (raw + 1.0) * 0.5
}

impl NoiseSource for NormalizedOpenSimplex {
    #[inline]
    fn eval(&self, x: f64, y: f64) -> f64 {
        to_unit_range(self.noise.get([x, y])).clamp(0.0, 1.0)
    }
}

/// Factory for [`NormalizedOpenSimplex`] sources.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenSimplexFactory;

impl NoiseFactory for OpenSimplexFactory {
    type Source = NormalizedOpenSimplex;

    fn create(&self, seed: i64) -> Self::Source {
        NormalizedOpenSimplex::new(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_value() {
        let a = OpenSimplexFactory.create(42);
        let b = OpenSimplexFactory.create(42);
        for i in 0..50 {
            let x = i as f64 * 0.137;
            let y = i as f64 * -0.291;
            assert_eq!(
                a.eval(x, y).to_bits(),
                b.eval(x, y).to_bits(),
                "Same seed must reproduce bit-identical noise at ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_unit_range_map_endpoints() {
        assert_eq!(to_unit_range(-1.0), 0.0);
        assert_eq!(to_unit_range(0.0), 0.5);
        assert_eq!(to_unit_range(1.0), 1.0);
        assert_eq!(to_unit_range(-0.5), 0.25);
    }

    #[test]
    fn test_adjacent_seeds_decorrelate() {
        let a = OpenSimplexFactory.create(100);
        let b = OpenSimplexFactory.create(101);
        let differs = (0..20).any(|i| {
            let x = 0.3 + i as f64 * 0.41;
            a.eval(x, x * 0.5) != b.eval(x, x * 0.5)
        });
        assert!(differs, "Seeds 100 and 101 should not produce identical noise");
    }

    #[test]
    fn test_continuity_over_small_steps() {
        let source = OpenSimplexFactory.create(3);
        let step = 1e-3;
        for i in 0..1000 {
            let x = i as f64 * step;
            let delta = (source.eval(x + step, 0.25) - source.eval(x, 0.25)).abs();
            assert!(delta < 0.05, "Jump of {delta} at x={x}");
        }
    }
}
