//! JSON snapshot of a finished headless run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use exoscape_classify::{PlanetAppearance, TextureAssets, VisualClassification};
use exoscape_config::Config;
use exoscape_space::{SceneCache, StellarClass};
use glam::Vec3;
use serde::Serialize;

use crate::error::AppError;

/// One galaxy bucket as drawn in the final frame.
#[derive(Debug, Serialize)]
pub struct BucketExport {
    /// Stellar class shared by every star in the bucket.
    pub class: StellarClass,
    /// Number of stars in the bucket.
    pub stars: usize,
    /// Per-class factor applied on top of the zoom scaling.
    pub size_multiplier: f32,
    /// Point size written by the last tick.
    pub point_size: f32,
}

/// One featured planet as drawn in the final frame.
#[derive(Debug, Serialize)]
pub struct PlanetExport<'a> {
    /// Catalog name of the planet.
    pub name: &'a str,
    /// Position after the group tilt and rotation of the last tick.
    pub world_position: [f32; 3],
    /// Uniform mesh scale.
    pub scale: f32,
    /// Body spin about its own axis, radians.
    pub spin: f32,
    /// Type, band, atmosphere and texture key.
    pub classification: &'a VisualClassification,
    /// Texture maps resolved for the classification.
    pub textures: &'a TextureAssets,
    /// Colors and material parameters.
    pub appearance: &'a PlanetAppearance,
}

/// Sprite parameters the renderer needs alongside the buffers.
#[derive(Debug, Serialize)]
pub struct SpriteExport {
    /// Core point size of background stars.
    pub backdrop_point_size: f32,
    /// Halo point size of background stars.
    pub backdrop_halo_size: f32,
    /// Halo layer opacity.
    pub backdrop_halo_opacity: f32,
    /// Linear RGB tint of haze sprites.
    pub haze_color: [f32; 3],
    /// Opacity ceiling of the haze distance fade.
    pub haze_max_opacity: f32,
}

impl SpriteExport {
    fn of(config: &Config) -> Self {
        Self {
            backdrop_point_size: config.backdrop.base_size,
            backdrop_halo_size: config.backdrop.halo_size,
            backdrop_halo_opacity: config.backdrop.halo_opacity,
            haze_color: config.haze.color,
            haze_max_opacity: config.haze.max_opacity,
        }
    }
}

/// Scene snapshot written by `--export`.
#[derive(Debug, Serialize)]
pub struct SceneExport<'a> {
    /// Scene seed the generators were derived from.
    pub seed: u64,
    /// Frames simulated before capture.
    pub frames: u64,
    /// Simulated seconds at capture.
    pub sim_time: f64,
    /// Galaxy group rotation about +Y, radians.
    pub group_rotation: f32,
    /// Galaxy buckets in generation order.
    pub buckets: Vec<BucketExport>,
    /// Number of haze patches.
    pub haze_patches: usize,
    /// Number of background stars.
    pub background_stars: usize,
    /// Render parameters of the sprite layers.
    pub sprites: SpriteExport,
    /// Featured planets in placement order.
    pub planets: Vec<PlanetExport<'a>>,
    /// Why the catalog could not be loaded, if it failed.
    pub catalog_error: Option<&'a str>,
}

impl<'a> SceneExport<'a> {
    /// Capture the scene as of its latest tick.
    pub fn capture(
        scene: &'a SceneCache,
        config: &Config,
        frames: u64,
        sim_time: f64,
        catalog_error: Option<&'a str>,
    ) -> Self {
        let frame = scene.frame();

        let buckets = scene
            .galaxy()
            .map(|galaxy| {
                galaxy
                    .buckets
                    .iter()
                    .zip(scene.point_sizes())
                    .map(|(bucket, size)| BucketExport {
                        class: bucket.class,
                        stars: bucket.len(),
                        size_multiplier: bucket.size_multiplier,
                        point_size: *size,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let planets = scene
            .planets()
            .iter()
            .map(|planet| PlanetExport {
                name: &planet.record.name,
                world_position: (frame.group * Vec3::from_array(planet.position)).to_array(),
                scale: planet.scale,
                spin: frame.planet_spin,
                classification: &planet.classification,
                textures: &planet.textures,
                appearance: &planet.appearance,
            })
            .collect();

        Self {
            seed: config.galaxy.seed,
            frames,
            sim_time,
            group_rotation: frame.rotation,
            buckets,
            haze_patches: scene.haze().map_or(0, |h| h.len()),
            background_stars: scene.backdrop().map_or(0, |b| b.len()),
            sprites: SpriteExport::of(config),
            planets,
            catalog_error,
        }
    }

    /// Write the snapshot as pretty JSON.
    pub fn write(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(AppError::ExportWrite)?;
        }
        let file = File::create(path).map_err(AppError::ExportWrite)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(AppError::ExportEncode)?;
        writer.flush().map_err(AppError::ExportWrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exoscape_classify::PhysicalRecord;

    fn config() -> Config {
        let mut config = Config::default();
        config.galaxy.seed = 7;
        config.galaxy.star_count = 500;
        config.backdrop.count = 50;
        config
    }

    fn scene() -> SceneCache {
        let mut scene = SceneCache::new(&config());
        scene.ensure_generated();
        scene.set_featured(&[PhysicalRecord::named("Kepler-22 b")]);
        scene.tick(1.0, Vec3::new(0.0, 18.0, 65.0));
        scene
    }

    #[test]
    fn test_capture_counts() {
        let scene = scene();
        let export = SceneExport::capture(&scene, &config(), 60, 1.0, None);
        assert_eq!(export.buckets.len(), StellarClass::ALL.len());
        assert_eq!(export.buckets.iter().map(|b| b.stars).sum::<usize>(), 500);
        assert_eq!(export.background_stars, 50);
        assert_eq!(export.planets.len(), 1);
        assert_eq!(export.planets[0].name, "Kepler-22 b");
        assert!(export.buckets.iter().all(|b| b.point_size > 0.0));
    }

    #[test]
    fn test_write_json() {
        let scene = scene();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("scene.json");
        let config = config();
        SceneExport::capture(&scene, &config, 60, 1.0, Some("offline"))
            .write(&path)
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["seed"], 7);
        assert_eq!(value["catalog_error"], "offline");
        let halo = value["sprites"]["backdrop_halo_size"].as_f64().unwrap();
        assert!((halo - 4.2).abs() < 1e-5, "halo size {halo}");
        assert_eq!(value["planets"][0]["classification"]["planet_type"], "rocky");
    }
}
