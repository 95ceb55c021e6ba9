//! Command-line argument parsing for Exoscape.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Exoscape command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "exoscape", about = "Procedural exoplanet galaxy scene")]
pub struct CliArgs {
    /// Scene seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of galaxy stars.
    #[arg(long)]
    pub star_count: Option<u32>,

    /// Number of spiral arms.
    #[arg(long)]
    pub arms: Option<u32>,

    /// Fraction of galaxy stars that spawn haze.
    #[arg(long)]
    pub haze_ratio: Option<f64>,

    /// Number of featured exoplanets.
    #[arg(long)]
    pub featured: Option<usize>,

    /// Read the catalog from a local JSON file instead of the archive.
    #[arg(long)]
    pub catalog_file: Option<PathBuf>,

    /// Number of headless frames to simulate.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write a JSON summary of the generated scene to this path.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.galaxy.seed = seed;
        }
        if let Some(count) = args.star_count {
            self.galaxy.star_count = count;
        }
        if let Some(arms) = args.arms {
            self.galaxy.arm_count = arms;
        }
        if let Some(ratio) = args.haze_ratio {
            self.haze.ratio = ratio;
        }
        if let Some(featured) = args.featured {
            self.placement.featured_count = featured;
        }
        if let Some(ref path) = args.catalog_file {
            self.catalog.cache_file = Some(path.clone());
        }
        if let Some(frames) = args.frames {
            self.render.headless_frames = frames;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
