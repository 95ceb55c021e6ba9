//! Deterministic exoplanet classification.
//!
//! Turns a [`PhysicalRecord`] of catalog measurements into a
//! [`VisualClassification`] (structural type, temperature band, atmosphere and
//! a stable texture key), resolves texture keys to asset paths, and derives
//! the render parameters of a planet body from the classification.
//!
//! Everything here is a pure function of its inputs: no randomness, no clocks,
//! no global state.

pub mod appearance;
pub mod bins;
pub mod classifier;
pub mod record;
pub mod textures;

pub use appearance::{AtmosphereShell, PlanetAppearance, SurfaceMaterial, base_color, star_tint};
pub use bins::{fnv1a_32, quantize};
pub use classifier::{
    Atmosphere, Classifier, PlanetType, TemperatureBand, VisualClassification, classify,
    estimate_equilibrium_temperature,
};
pub use record::PhysicalRecord;
pub use textures::{DEFAULT_TEXTURE_KEY, TextureAssets, texture_assets, texture_pool};
