//! Configuration structs with scene defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_NAME: &str = "exoscape";

/// Top-level scene configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Spiral galaxy point cloud.
    pub galaxy: GalaxyConfig,
    /// Distant background star shell.
    pub backdrop: BackdropConfig,
    /// Haze billboards sampled from galaxy stars.
    pub haze: HazeConfig,
    /// Featured exoplanet layout.
    pub placement: PlacementConfig,
    /// Planet classification tunables.
    pub classifier: ClassifierConfig,
    /// Exoplanet catalog source.
    pub catalog: CatalogConfig,
    /// Render-integration settings (asset roots, camera, headless frames).
    pub render: RenderConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Spiral galaxy generation and animation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GalaxyConfig {
    /// Scene seed. Generator stages derive their own seeds from it.
    pub seed: u64,
    /// Number of galaxy stars.
    pub star_count: u32,
    /// Number of spiral arms.
    pub arm_count: u32,
    /// Outer radius of the disk in scene units.
    pub radius: f32,
    /// Tilt of the galaxy plane about +X, in radians.
    pub tilt: f32,
    /// Group rotation rate about +Y, in radians per second.
    pub rotation_speed: f32,
    /// Base point size before camera and bucket scaling.
    pub core_base_size: f32,
    /// Camera distance at which points render at their base size.
    pub base_camera_distance: f32,
    /// Upper clamp of the camera-distance size multiplier.
    pub max_size_multiplier: f32,
}

/// Background star shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackdropConfig {
    /// Number of background stars.
    pub count: u32,
    /// Inner shell radius.
    pub min_radius: f32,
    /// Outer shell radius.
    pub max_radius: f32,
    /// Exponent of the radial draw; below 1 biases stars toward the outer edge.
    pub radial_exponent: f32,
    /// Vertical squash applied to directions before renormalizing (1.0 = sphere).
    pub vertical_flatten: f32,
    /// Point size of the colored star layer.
    pub base_size: f32,
    /// Point size of the white halo layer.
    pub halo_size: f32,
    /// Opacity of the halo layer.
    pub halo_opacity: f32,
}

/// Haze billboards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HazeConfig {
    /// Fraction of galaxy stars that spawn a haze patch.
    pub ratio: f64,
    /// Smallest billboard size.
    pub min_size: f32,
    /// Largest billboard size.
    pub max_size: f32,
    /// Opacity ceiling reached when the patch is far from the camera.
    pub max_opacity: f32,
    /// Billboard tint (linear RGB).
    pub color: [f32; 3],
}

/// Featured exoplanet placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlacementConfig {
    /// How many catalog entries are featured in the scene.
    pub featured_count: usize,
    /// Spiral radius of the first planet.
    pub base_radius: f32,
    /// Radius added per planet index.
    pub radius_step: f32,
    /// Uniform jitter applied to each radius (±).
    pub radius_jitter: f32,
    /// Uniform jitter applied to each angle in radians (±).
    pub angle_jitter: f32,
    /// Stretch of the X axis, giving an elliptical spiral.
    pub x_stretch: f32,
    /// Uniform height jitter (±) before falloff.
    pub height_jitter: f32,
    /// Radius at which the vertical falloff would reach zero.
    pub falloff_radius: f32,
    /// Smallest display scale.
    pub min_scale: f32,
    /// Largest display scale.
    pub max_scale: f32,
    /// Spin of each planet about its own axis, radians per second.
    pub spin_speed: f32,
}

/// Equilibrium temperature band boundaries in Kelvin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TemperatureThresholds {
    /// Below this a planet is cold.
    pub cold_below: f64,
    /// Below this (and not cold) a planet is temperate.
    pub temperate_below: f64,
    /// Below this (and not temperate) a planet is hot; otherwise inferno.
    pub hot_below: f64,
}

/// Quantization steps for the texture-key hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BinSteps {
    /// Planet radius, Earth radii.
    pub radius: f64,
    /// Planet mass, Earth masses.
    pub mass: f64,
    /// Bulk density, g/cm³.
    pub density: f64,
    /// Equilibrium temperature, K.
    pub equilibrium_temperature: f64,
    /// Semi-major axis, AU.
    pub semi_major_axis: f64,
    /// Insolation, Earth units.
    pub insolation: f64,
    /// Host effective temperature, K.
    pub star_temperature: f64,
    /// Host radius, solar radii.
    pub star_radius: f64,
    /// Host mass, solar masses.
    pub star_mass: f64,
    /// Host luminosity, solar units.
    pub star_luminosity: f64,
}

/// Classifier and planet appearance tunables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Temperature band boundaries.
    pub thresholds: TemperatureThresholds,
    /// Texture-key bin steps.
    pub bins: BinSteps,
    /// Multiplier applied to per-type displacement scales.
    pub displacement_multiplier: f32,
}

/// Exoplanet catalog source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// TAP sync endpoint of the exoplanet archive.
    pub endpoint: String,
    /// Maximum number of rows requested.
    pub row_limit: u32,
    /// HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Optional local JSON cache; read instead of fetching when present.
    pub cache_file: Option<PathBuf>,
}

/// Render-integration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Root directory for planet textures and sprites.
    pub texture_root: PathBuf,
    /// Star sprite, relative to `texture_root`.
    pub star_sprite: String,
    /// Haze sprite, relative to `texture_root`.
    pub haze_sprite: String,
    /// Initial camera position.
    pub camera_position: [f32; 3],
    /// Number of fixed-rate frames simulated by the headless driver.
    pub headless_frames: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log every planet classification at info level.
    pub log_classifications: bool,
}

// --- Default implementations ---

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed_ca1a,
            star_count: 20_000,
            arm_count: 5,
            radius: 95.0,
            tilt: 0.2,
            rotation_speed: 0.025,
            core_base_size: 0.1,
            base_camera_distance: 24.0,
            max_size_multiplier: 8.4,
        }
    }
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            count: 3200,
            min_radius: 300.0,
            max_radius: 480.0,
            radial_exponent: 0.55,
            vertical_flatten: 0.55,
            base_size: 2.6,
            halo_size: 4.2,
            halo_opacity: 0.16,
        }
    }
}

impl Default for HazeConfig {
    fn default() -> Self {
        Self {
            ratio: 0.005,
            min_size: 30.0,
            max_size: 60.0,
            max_opacity: 1.0,
            color: [0.0, 0.51, 1.0],
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            featured_count: 12,
            base_radius: 28.0,
            radius_step: 8.0,
            radius_jitter: 3.0,
            angle_jitter: 0.18,
            x_stretch: 1.5,
            height_jitter: 2.0,
            falloff_radius: 180.0,
            min_scale: 3.1,
            max_scale: 4.5,
            spin_speed: 0.1,
        }
    }
}

impl Default for TemperatureThresholds {
    fn default() -> Self {
        Self {
            cold_below: 200.0,
            temperate_below: 330.0,
            hot_below: 1000.0,
        }
    }
}

impl Default for BinSteps {
    fn default() -> Self {
        Self {
            radius: 0.25,
            mass: 1.0,
            density: 0.5,
            equilibrium_temperature: 50.0,
            semi_major_axis: 0.05,
            insolation: 0.25,
            star_temperature: 100.0,
            star_radius: 0.1,
            star_mass: 0.1,
            star_luminosity: 0.1,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            thresholds: TemperatureThresholds::default(),
            bins: BinSteps::default(),
            displacement_multiplier: 5.0,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://exoplanetarchive.ipac.caltech.edu/TAP/sync".to_string(),
            row_limit: 100,
            timeout_seconds: 30,
            cache_file: None,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            texture_root: PathBuf::from("assets"),
            star_sprite: "sprite120.png".to_string(),
            haze_sprite: "feathered60.png".to_string(),
            camera_position: [0.0, 18.0, 65.0],
            headless_frames: 600,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_classifications: false,
        }
    }
}

/// Platform configuration directory for Exoscape (`<os config dir>/exoscape`).
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Validation ---

impl Config {
    /// Reject values that parse but cannot produce a scene.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.galaxy.arm_count == 0 {
            return Err(ConfigError::Invalid {
                field: "galaxy.arm_count",
                reason: "a spiral needs at least one arm".to_string(),
            });
        }
        if !(self.galaxy.radius.is_finite() && self.galaxy.radius > 0.0) {
            return Err(ConfigError::Invalid {
                field: "galaxy.radius",
                reason: format!("must be finite and positive, got {}", self.galaxy.radius),
            });
        }
        if self.backdrop.min_radius > self.backdrop.max_radius {
            return Err(ConfigError::Invalid {
                field: "backdrop.min_radius",
                reason: format!(
                    "{} exceeds max_radius {}",
                    self.backdrop.min_radius, self.backdrop.max_radius
                ),
            });
        }
        if self.haze.min_size > self.haze.max_size {
            return Err(ConfigError::Invalid {
                field: "haze.min_size",
                reason: format!(
                    "{} exceeds max_size {}",
                    self.haze.min_size, self.haze.max_size
                ),
            });
        }
        if self.placement.min_scale > self.placement.max_scale {
            return Err(ConfigError::Invalid {
                field: "placement.min_scale",
                reason: format!(
                    "{} exceeds max_scale {}",
                    self.placement.min_scale, self.placement.max_scale
                ),
            });
        }
        let t = &self.classifier.thresholds;
        if !(t.cold_below < t.temperate_below && t.temperate_below < t.hot_below) {
            return Err(ConfigError::Invalid {
                field: "classifier.thresholds",
                reason: "band boundaries must be strictly increasing".to_string(),
            });
        }
        let b = &self.classifier.bins;
        let steps = [
            b.radius,
            b.mass,
            b.density,
            b.equilibrium_temperature,
            b.semi_major_axis,
            b.insolation,
            b.star_temperature,
            b.star_radius,
            b.star_mass,
            b.star_luminosity,
        ];
        if steps.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(ConfigError::Invalid {
                field: "classifier.bins",
                reason: "every bin step must be finite and positive".to_string(),
            });
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

/// File name of the persisted config inside a config directory.
pub const CONFIG_FILE: &str = "config.ron";

fn read_file(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
    ron::from_str(&text).map_err(ConfigError::ParseError)
}

impl Config {
    /// Read `config.ron` from `config_dir`. A missing file is replaced by the
    /// defaults, which are written back so the user has something to edit.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Wrote default scene config to {}", path.display());
            return Ok(config);
        }

        let config = read_file(&path)?;
        log::info!("Scene config read from {}", path.display());
        Ok(config)
    }

    /// Write this config to `config_dir/config.ron`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let style = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self, style).map_err(ConfigError::SerializeError)?;
        std::fs::write(config_dir.join(CONFIG_FILE), text).map_err(ConfigError::WriteError)
    }

    /// Re-read the file; `Some` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = read_file(&config_dir.join(CONFIG_FILE))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Scene config changed on disk");
        Ok(Some(fresh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("star_count: 20000"));
        assert!(ron_str.contains("arm_count: 5"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(galaxy: (star_count: 500))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.galaxy.star_count, 500);
        assert_eq!(config.galaxy.arm_count, 5);
        assert_eq!(config.haze, HazeConfig::default());
    }

    #[test]
    fn test_default_thresholds_match_band_edges() {
        let t = TemperatureThresholds::default();
        assert_eq!(t.cold_below, 200.0);
        assert_eq!(t.temperate_below, 330.0);
        assert_eq!(t.hot_below, 1000.0);
    }

    #[test]
    fn test_default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_backdrop_shell_rejected() {
        let mut config = Config::default();
        config.backdrop.min_radius = 600.0;
        let err = config.validate().unwrap_err();
        assert!(
            matches!(
                err,
                ConfigError::Invalid {
                    field: "backdrop.min_radius",
                    ..
                }
            ),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_zero_bin_step_rejected() {
        let mut config = Config::default();
        config.classifier.bins.mass = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_galaxy_radius_rejected() {
        for radius in [f32::NAN, f32::INFINITY, 0.0, -5.0] {
            let mut config = Config::default();
            config.galaxy.radius = radius;
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::Invalid { field: "galaxy.radius", .. })
                ),
                "radius {radius} accepted"
            );
        }
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let mut config = Config::default();
        config.classifier.thresholds.temperate_below = 150.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.galaxy.star_count = 4000;
        config.haze.ratio = 0.01;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.galaxy.rotation_speed = 0.05;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().galaxy.rotation_speed, 0.05);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }
}
