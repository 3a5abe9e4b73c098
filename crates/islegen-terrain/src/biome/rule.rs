//! Biome rule definition and the two-key sort order that sets matching priority.

use std::cmp::Ordering;

/// An 8-bit-per-channel RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Build a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Channels as `[r, g, b, a]`.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

/// One threshold rule: cells with normalized elevation `<= max_elevation`
/// and moisture `<= max_moisture` may be assigned this biome.
///
/// A table should contain a rule with both thresholds at or above `1.0` so
/// every cell matches something.
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeRule {
    /// Identifier written to the biome-id field.
    pub id: u8,
    /// Human-readable name (e.g., "Coastal Water").
    pub name: String,
    /// Inclusive upper elevation threshold.
    pub max_elevation: f64,
    /// Inclusive upper moisture threshold.
    pub max_moisture: f64,
    /// Color written to the color field.
    pub color: Rgba8,
}

impl BiomeRule {
    /// Create a rule.
    pub fn new(
        id: u8,
        name: impl Into<String>,
        max_elevation: f64,
        max_moisture: f64,
        color: Rgba8,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            max_elevation,
            max_moisture,
            color,
        }
    }

    /// `true` if the cell lies within both thresholds.
    #[inline]
    pub fn matches(&self, elevation: f64, moisture: f64) -> bool {
        elevation <= self.max_elevation && moisture <= self.max_moisture
    }
}

/// Matching priority: ascending `max_elevation`, ties broken by ascending
/// `max_moisture`.
///
/// Thresholds compare numerically, so `-0.0` and `0.0` tie. NaN thresholds
/// fall back to IEEE total ordering, which keeps the comparator a total order.
pub fn compare_rules(a: &BiomeRule, b: &BiomeRule) -> Ordering {
    compare_threshold(a.max_elevation, b.max_elevation)
        .then_with(|| compare_threshold(a.max_moisture, b.max_moisture))
}

#[inline]
fn compare_threshold(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Stable sort of `rules` into matching priority order.
///
/// Rules with identical thresholds keep their declaration order.
pub fn sort_rules(rules: &[BiomeRule]) -> Vec<&BiomeRule> {
    let mut sorted: Vec<&BiomeRule> = rules.iter().collect();
    sorted.sort_by(|a, b| compare_rules(a, b));
    sorted
}
