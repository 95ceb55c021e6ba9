//! Procedural galaxy scene: spiral arm stars, background shell, haze
//! billboards, featured-planet layout, and the per-frame animation policy.

pub mod assets;
pub mod backdrop;
pub mod frame;
pub mod galaxy;
pub mod haze;
pub mod placement;
mod sampling;
pub mod scene;

pub use assets::AssetCache;
pub use backdrop::{BackdropField, BackdropGenerator, flicker_factor};
pub use frame::{
    PointSizing, WRITE_EPSILON, group_rotation, group_transform, haze_opacity, haze_transform,
    planet_spin, update_haze_opacity, update_point_sizes, zoom_factor,
};
pub use galaxy::{GalaxyGenerator, GalaxyStarData, StarBucket, StellarClass};
pub use haze::{HazeGenerator, HazePatch, patch_count};
pub use placement::{PlanetInstance, PlanetLayout, vertical_falloff};
pub use scene::{FrameState, GenerationStatus, SceneCache};
