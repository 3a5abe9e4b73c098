//! Biome classification: ordered threshold rules over (elevation, moisture).
//!
//! Rules are sorted ascending by `(max_elevation, max_moisture)` on every
//! classification pass and the first rule whose thresholds enclose a cell
//! wins. A cell no rule covers falls back to the last sorted rule.

mod classifier;
mod rule;

pub use classifier::{Classification, biome_histogram, classify, pick_rule, rescale_elevation};
pub use rule::{BiomeRule, Rgba8, compare_rules, sort_rules};
