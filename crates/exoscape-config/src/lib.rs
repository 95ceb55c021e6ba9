//! Configuration system for Exoscape.
//!
//! Every effect-bearing constant of the galaxy scene lives here: generator
//! sizes, animation rates, haze and placement tuning, classifier thresholds
//! and bin steps. Settings persist to disk as RON, accept CLI overrides via
//! clap, and support hot-reload detection.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BackdropConfig, BinSteps, CONFIG_FILE, CatalogConfig, ClassifierConfig, Config, DebugConfig,
    GalaxyConfig, HazeConfig, PlacementConfig, RenderConfig, TemperatureThresholds,
    default_config_dir,
};
pub use error::ConfigError;
