//! Image preloading for sprites and planet texture sets.

use std::path::{Path, PathBuf};

use exoscape_config::RenderConfig;
use exoscape_space::{AssetCache, PlanetInstance};
use image::DynamicImage;
use tracing::{debug, warn};

/// Decoded images keyed by path.
pub type ImageCache = AssetCache<DynamicImage>;

/// Outcome of a preload pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AssetReport {
    /// Paths available in the cache after the pass.
    pub loaded: usize,
    /// Paths that could not be opened or decoded.
    pub missing: Vec<PathBuf>,
}

impl AssetReport {
    fn record(&mut self, cache: &mut ImageCache, path: &Path) {
        match cache.get_or_load(path, |p| image::open(p)) {
            Ok(_) => self.loaded += 1,
            Err(e) => {
                warn!("Missing asset {}: {e}", path.display());
                self.missing.push(path.to_path_buf());
            }
        }
    }
}

/// Load the star and haze sprites plus every featured planet's texture set.
///
/// Missing files are reported, not fatal: the renderer falls back to flat
/// colors for anything absent.
pub fn preload_scene_assets(
    cache: &mut ImageCache,
    render: &RenderConfig,
    planets: &[PlanetInstance],
) -> AssetReport {
    let root = render.texture_root.as_path();
    let mut report = AssetReport::default();

    for sprite in [&render.star_sprite, &render.haze_sprite] {
        report.record(cache, &root.join(sprite));
    }
    for planet in planets {
        let textures = planet.textures.rooted(root);
        for path in textures.paths() {
            report.record(cache, path);
        }
    }

    debug!(
        "Asset preload: {} loaded, {} missing, {} cached",
        report.loaded,
        report.missing.len(),
        cache.len()
    );
    report
}
