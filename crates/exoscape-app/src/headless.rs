//! Headless scene run.
//!
//! Generation is spread over the first frames, one stage per fixed step, the
//! way an interactive frontend would keep frames flowing while the scene
//! builds. Every step then applies the frame policy at the simulated time.

use std::path::Path;

use exoscape_classify::PhysicalRecord;
use exoscape_config::{CliArgs, Config};
use exoscape_space::{GenerationStatus, SceneCache};
use glam::Vec3;
use tracing::info;

use crate::assets::{AssetReport, ImageCache, preload_scene_assets};
use crate::error::AppError;
use crate::game_loop::FixedStepLoop;

/// Load `config.ron` from `config_dir` (writing defaults if absent), apply
/// CLI overrides, and validate the result.
pub fn load_config(config_dir: &Path, args: &CliArgs) -> Result<Config, AppError> {
    let mut config = Config::load_or_create(config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;
    Ok(config)
}

/// State left behind by [`run_headless`].
pub struct HeadlessRun {
    /// The generated and animated scene.
    pub scene: SceneCache,
    /// Step counters of the run.
    pub steps: FixedStepLoop,
    /// Sprite and texture preload outcome.
    pub assets: AssetReport,
}

/// Build the scene around `records` and animate it for
/// `config.render.headless_frames` frames.
pub fn run_headless(
    config: &Config,
    records: &[PhysicalRecord],
    images: &mut ImageCache,
) -> HeadlessRun {
    let camera = Vec3::from_array(config.render.camera_position);

    let mut scene = SceneCache::new(config);
    scene.set_featured(records);
    if config.debug.log_classifications {
        for planet in scene.planets() {
            let c = &planet.classification;
            info!(
                "{}: {} / {} / {} atmosphere, texture {}",
                planet.record.name, c.planet_type, c.temperature_band, c.atmosphere, c.texture_key
            );
        }
    }
    let assets = preload_scene_assets(images, &config.render, scene.planets());

    let mut steps = FixedStepLoop::new();
    steps.run_frames(config.render.headless_frames, |_, sim_time| {
        if scene.status() != GenerationStatus::Done {
            scene.advance();
        }
        scene.tick(sim_time as f32, camera);
    });

    // Fewer frames than generation stages.
    if scene.status() != GenerationStatus::Done {
        scene.ensure_generated();
        scene.tick(steps.total_sim_time() as f32, camera);
    }

    info!(
        "Simulated {} frames ({:.2}s), {} featured planets",
        steps.frame_count(),
        steps.total_sim_time(),
        scene.planets().len()
    );
    HeadlessRun {
        scene,
        steps,
        assets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exoscape_config::ConfigError;

    fn small_config(frames: u32) -> Config {
        let mut config = Config::default();
        config.galaxy.star_count = 1000;
        config.backdrop.count = 100;
        config.render.headless_frames = frames;
        config.render.texture_root = "does-not-exist".into();
        config
    }

    #[test]
    fn test_run_generates_and_animates() {
        let mut images = ImageCache::new();
        let records = vec![PhysicalRecord::named("a"), PhysicalRecord::named("b")];
        let run = run_headless(&small_config(60), &records, &mut images);

        assert_eq!(run.scene.status(), GenerationStatus::Done);
        assert_eq!(run.steps.frame_count(), 60);
        assert_eq!(run.scene.planets().len(), 2);

        let expected = run.steps.total_sim_time() as f32 * 0.025;
        assert!((run.scene.frame().rotation - expected).abs() < 1e-5);
        assert!(!run.assets.missing.is_empty(), "no textures exist under the root");
    }

    #[test]
    fn test_zero_frames_still_generates() {
        let mut images = ImageCache::new();
        let run = run_headless(&small_config(0), &[], &mut images);
        assert_eq!(run.scene.status(), GenerationStatus::Done);
        assert_eq!(run.steps.frame_count(), 0);
        assert!(run.scene.planets().is_empty());
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            star_count: Some(1234),
            ..Default::default()
        };
        let config = load_config(dir.path(), &args).unwrap();
        assert_eq!(config.galaxy.star_count, 1234);
        assert!(dir.path().join(exoscape_config::CONFIG_FILE).exists());
    }

    #[test]
    fn test_load_config_rejects_invalid_override() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            arms: Some(0),
            ..Default::default()
        };
        let err = load_config(dir.path(), &args).unwrap_err();
        assert!(
            matches!(err, AppError::Config(ConfigError::Invalid { field: "galaxy.arm_count", .. })),
            "unexpected error: {err}"
        );
    }
}
