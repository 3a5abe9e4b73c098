//! Command-line argument parsing for islegen.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// islegen command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "islegen", about = "Procedural island biome map generator")]
pub struct CliArgs {
    /// Map width in cells.
    #[arg(long)]
    pub width: Option<u32>,

    /// Map height in cells.
    #[arg(long)]
    pub height: Option<u32>,

    /// Output path for the biome color PNG.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Also write the reshaped elevation as a grayscale PNG.
    #[arg(long)]
    pub heightmap: Option<PathBuf>,

    /// Elevation noise seed.
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Moisture noise seed.
    #[arg(long, allow_negative_numbers = true)]
    pub moisture_seed: Option<i64>,

    /// Base noise frequency for both fields.
    #[arg(long)]
    pub frequency: Option<f64>,

    /// Island blend factor in [0, 1].
    #[arg(long)]
    pub mix: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.map.width = w;
        }
        if let Some(h) = args.height {
            self.map.height = h;
        }
        if let Some(ref output) = args.output {
            self.map.output = output.clone();
        }
        if let Some(ref heightmap) = args.heightmap {
            self.map.heightmap = Some(heightmap.clone());
        }
        if let Some(seed) = args.seed {
            self.elevation.seed = Some(seed);
        }
        if let Some(seed) = args.moisture_seed {
            self.moisture.seed = Some(seed);
        }
        if let Some(frequency) = args.frequency {
            self.elevation.frequency = frequency;
            self.moisture.frequency = frequency;
        }
        if let Some(mix) = args.mix {
            self.island.mix = mix;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(512),
            seed: Some(7),
            frequency: Some(4.0),
            output: Some(PathBuf::from("out/map.png")),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.map.width, 512);
        assert_eq!(config.elevation.seed, Some(7));
        assert_eq!(config.elevation.frequency, 4.0);
        assert_eq!(config.moisture.frequency, 4.0);
        assert_eq!(config.map.output, PathBuf::from("out/map.png"));
        // Non-overridden fields retain defaults
        assert_eq!(config.map.height, 1024);
        assert_eq!(config.moisture.seed, None);
        assert_eq!(config.island.mix, 0.4);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "islegen",
            "--width",
            "64",
            "--seed",
            "-3",
            "--moisture-seed",
            "12",
            "--mix",
            "0.25",
            "-o",
            "island.png",
        ])
        .unwrap();
        assert_eq!(args.width, Some(64));
        assert_eq!(args.seed, Some(-3));
        assert_eq!(args.moisture_seed, Some(12));
        assert_eq!(args.mix, Some(0.25));
        assert_eq!(args.output, Some(PathBuf::from("island.png")));
        assert_eq!(args.height, None);
    }
}
