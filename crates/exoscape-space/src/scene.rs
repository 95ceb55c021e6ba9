//! Generated scene buffers and their lifecycle.
//!
//! [`SceneCache`] runs the generators in stages (galaxy, haze, backdrop) so a
//! frame-driven caller can spread generation over several frames, keeps the
//! outputs until the generation parameters change, and re-runs planet
//! placement when the featured list, the placement or classifier settings, or
//! the seed change. [`SceneCache::tick`] applies the frame policy to whatever
//! has been generated.
//!
//! Haze patches share the galaxy's tilt but not its spin: they are measured
//! from their tilted position, so their opacity only follows the camera.

use exoscape_classify::PhysicalRecord;
use exoscape_config::{
    BackdropConfig, ClassifierConfig, Config, GalaxyConfig, HazeConfig, PlacementConfig,
};
use glam::{Quat, Vec3};

use crate::backdrop::{BackdropField, BackdropGenerator};
use crate::frame::{
    PointSizing, group_rotation, group_transform, haze_transform, planet_spin,
    update_haze_opacity, update_point_sizes,
};
use crate::galaxy::{GalaxyGenerator, GalaxyStarData};
use crate::haze::{HazeGenerator, HazePatch};
use crate::placement::{PlanetInstance, PlanetLayout};

const HAZE_SEED_OFFSET: u64 = 1;
const BACKDROP_SEED_OFFSET: u64 = 2;
const PLACEMENT_SEED_OFFSET: u64 = 3;

/// Where scene generation stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationStatus {
    /// Nothing generated, or the last run was aborted or invalidated.
    NotStarted,
    /// At least one stage done, more to go.
    InProgress,
    /// Every buffer is available.
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Galaxy,
    Haze,
    Backdrop,
}

/// Parameters that invalidate the generated buffers when they change.
#[derive(Clone, Debug, PartialEq)]
struct GenerationParams {
    galaxy: GalaxyConfig,
    backdrop: BackdropConfig,
    haze: HazeConfig,
}

impl GenerationParams {
    fn of(config: &Config) -> Self {
        Self {
            galaxy: config.galaxy.clone(),
            backdrop: config.backdrop.clone(),
            haze: config.haze.clone(),
        }
    }
}

/// Animation state produced by the latest [`SceneCache::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameState {
    /// Group rotation about +Y, radians.
    pub rotation: f32,
    /// Tilted and rotated galaxy/planet group orientation.
    pub group: Quat,
    /// Spin of each planet body, radians.
    pub planet_spin: f32,
    /// Galaxy bucket sizes rewritten this tick.
    pub sizes_written: usize,
    /// Haze opacities rewritten this tick.
    pub haze_written: usize,
}

impl Default for FrameState {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            group: Quat::IDENTITY,
            planet_spin: 0.0,
            sizes_written: 0,
            haze_written: 0,
        }
    }
}

/// Owns every generated buffer of the scene.
pub struct SceneCache {
    params: GenerationParams,
    placement: PlacementConfig,
    classifier: ClassifierConfig,
    status: GenerationStatus,
    next_stage: Option<Stage>,

    galaxy: Option<GalaxyStarData>,
    haze: Option<Vec<HazePatch>>,
    backdrop: Option<BackdropField>,
    point_sizes: Vec<f32>,
    haze_opacity: Vec<f32>,

    candidates: Vec<PhysicalRecord>,
    featured_names: Vec<String>,
    planets: Vec<PlanetInstance>,
    frame: FrameState,
}

impl SceneCache {
    /// Create an empty cache; nothing is generated until [`advance`](Self::advance)
    /// or [`ensure_generated`](Self::ensure_generated).
    pub fn new(config: &Config) -> Self {
        Self {
            params: GenerationParams::of(config),
            placement: config.placement.clone(),
            classifier: config.classifier.clone(),
            status: GenerationStatus::NotStarted,
            next_stage: None,
            galaxy: None,
            haze: None,
            backdrop: None,
            point_sizes: Vec::new(),
            haze_opacity: Vec::new(),
            candidates: Vec::new(),
            featured_names: Vec::new(),
            planets: Vec::new(),
            frame: FrameState::default(),
        }
    }

    /// Current generation status.
    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    /// Run the next generation stage. Does nothing once generation is done.
    pub fn advance(&mut self) -> GenerationStatus {
        let stage = match (self.status, self.next_stage) {
            (GenerationStatus::Done, _) => return self.status,
            (_, Some(stage)) => stage,
            (_, None) => Stage::Galaxy,
        };

        let seed = self.params.galaxy.seed;
        match stage {
            Stage::Galaxy => {
                let galaxy = GalaxyGenerator::new(&self.params.galaxy, seed).generate();
                self.point_sizes = vec![0.0; galaxy.buckets.len()];
                self.galaxy = Some(galaxy);
                self.next_stage = Some(Stage::Haze);
                self.status = GenerationStatus::InProgress;
            }
            Stage::Haze => {
                let positions = self
                    .galaxy
                    .as_ref()
                    .map(|g| g.positions.as_slice())
                    .unwrap_or_default();
                let patches = HazeGenerator::new(
                    &self.params.haze,
                    seed.wrapping_add(HAZE_SEED_OFFSET),
                )
                .generate(positions, self.params.haze.ratio);
                self.haze_opacity = vec![0.0; patches.len()];
                self.haze = Some(patches);
                self.next_stage = Some(Stage::Backdrop);
            }
            Stage::Backdrop => {
                let field = BackdropGenerator::new(
                    &self.params.backdrop,
                    seed.wrapping_add(BACKDROP_SEED_OFFSET),
                )
                .generate();
                self.backdrop = Some(field);
                self.next_stage = None;
                self.status = GenerationStatus::Done;
                log::info!(
                    "Scene generated: {} galaxy stars, {} haze patches, {} background stars",
                    self.galaxy.as_ref().map_or(0, GalaxyStarData::len),
                    self.haze.as_ref().map_or(0, Vec::len),
                    self.backdrop.as_ref().map_or(0, BackdropField::len),
                );
            }
        }
        self.status
    }

    /// Run every remaining stage.
    pub fn ensure_generated(&mut self) {
        while self.advance() != GenerationStatus::Done {}
    }

    /// Discard partial output of an unfinished run. A finished scene is kept.
    pub fn abort(&mut self) {
        if self.status == GenerationStatus::InProgress {
            log::debug!("Scene generation aborted");
            self.clear_buffers();
        }
    }

    /// Adopt new settings. Generated buffers are dropped only if a generation
    /// parameter changed. Placement re-runs over the last candidate list when
    /// the placement or classifier settings or the seed changed, so the result
    /// matches a fresh cache built from the same settings and records.
    /// Returns whether the buffers were invalidated.
    pub fn reconfigure(&mut self, config: &Config) -> bool {
        let params = GenerationParams::of(config);
        let relayout = config.placement != self.placement
            || config.classifier != self.classifier
            || params.galaxy.seed != self.params.galaxy.seed;
        let invalidate = params != self.params;

        self.placement = config.placement.clone();
        self.classifier = config.classifier.clone();
        self.params = params;

        if relayout {
            self.arrange();
        }
        if invalidate {
            self.clear_buffers();
            log::debug!("Generation parameters changed, scene invalidated");
        }
        invalidate
    }

    /// Feature the first `featured_count` records. Placement re-runs only
    /// when the ordered list of names differs from the current one; returns
    /// whether it did. The whole slice is kept as candidates for later
    /// [`reconfigure`](Self::reconfigure) calls.
    pub fn set_featured(&mut self, records: &[PhysicalRecord]) -> bool {
        let featured = &records[..records.len().min(self.placement.featured_count)];
        let unchanged = featured.len() == self.featured_names.len()
            && featured
                .iter()
                .zip(&self.featured_names)
                .all(|(record, name)| record.name == *name);
        self.candidates = records.to_vec();
        if unchanged {
            return false;
        }
        self.arrange();
        true
    }

    /// Apply the frame policy for `elapsed` seconds with the camera at `camera`.
    pub fn tick(&mut self, elapsed: f32, camera: Vec3) -> FrameState {
        let galaxy_config = &self.params.galaxy;
        let rotation = group_rotation(elapsed, galaxy_config.rotation_speed);
        let group = group_transform(galaxy_config.tilt, rotation);
        let haze_frame = haze_transform(galaxy_config.tilt);

        if let Some(backdrop) = self.backdrop.as_mut() {
            backdrop.apply_flicker(elapsed);
        }

        let sizes_written = match self.galaxy.as_ref() {
            Some(galaxy) => {
                let sizing = PointSizing {
                    core_base_size: galaxy_config.core_base_size,
                    base_distance: galaxy_config.base_camera_distance,
                    max_multiplier: galaxy_config.max_size_multiplier,
                };
                update_point_sizes(&mut self.point_sizes, &galaxy.buckets, &sizing, camera.length())
            }
            None => 0,
        };

        let haze_written = match self.haze.as_ref() {
            Some(patches) => update_haze_opacity(
                &mut self.haze_opacity,
                patches,
                haze_frame,
                camera,
                self.params.haze.max_opacity,
            ),
            None => 0,
        };

        self.frame = FrameState {
            rotation,
            group,
            planet_spin: planet_spin(elapsed, self.placement.spin_speed),
            sizes_written,
            haze_written,
        };
        self.frame
    }

    /// Generated galaxy, if that stage has run.
    pub fn galaxy(&self) -> Option<&GalaxyStarData> {
        self.galaxy.as_ref()
    }

    /// Generated haze patches, if that stage has run.
    pub fn haze(&self) -> Option<&[HazePatch]> {
        self.haze.as_deref()
    }

    /// Generated background field, if that stage has run.
    pub fn backdrop(&self) -> Option<&BackdropField> {
        self.backdrop.as_ref()
    }

    /// Point size per galaxy bucket, in bucket order.
    pub fn point_sizes(&self) -> &[f32] {
        &self.point_sizes
    }

    /// Opacity per haze patch, in patch order.
    pub fn haze_opacity(&self) -> &[f32] {
        &self.haze_opacity
    }

    /// Placed featured planets.
    pub fn planets(&self) -> &[PlanetInstance] {
        &self.planets
    }

    /// Result of the latest tick.
    pub fn frame(&self) -> FrameState {
        self.frame
    }

    fn arrange(&mut self) {
        let count = self.candidates.len().min(self.placement.featured_count);
        let featured = &self.candidates[..count];
        let seed = self.params.galaxy.seed.wrapping_add(PLACEMENT_SEED_OFFSET);
        self.planets = PlanetLayout::new(&self.placement, &self.classifier, seed).arrange(featured);
        self.featured_names = featured.iter().map(|r| r.name.clone()).collect();
        log::debug!("Placed {} featured planets", self.planets.len());
    }

    fn clear_buffers(&mut self) {
        self.galaxy = None;
        self.haze = None;
        self.backdrop = None;
        self.point_sizes.clear();
        self.haze_opacity.clear();
        self.next_stage = None;
        self.status = GenerationStatus::NotStarted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.galaxy.star_count = 2000;
        config.backdrop.count = 300;
        config.haze.ratio = 0.01;
        config.placement.featured_count = 3;
        config
    }

    fn records(names: &[&str]) -> Vec<PhysicalRecord> {
        names.iter().map(|n| PhysicalRecord::named(*n)).collect()
    }

    #[test]
    fn test_stages_run_in_order() {
        let mut scene = SceneCache::new(&small_config());
        assert_eq!(scene.status(), GenerationStatus::NotStarted);

        assert_eq!(scene.advance(), GenerationStatus::InProgress);
        assert!(scene.galaxy().is_some());
        assert!(scene.haze().is_none());

        assert_eq!(scene.advance(), GenerationStatus::InProgress);
        assert_eq!(scene.haze().map(<[HazePatch]>::len), Some(20));
        assert!(scene.backdrop().is_none());

        assert_eq!(scene.advance(), GenerationStatus::Done);
        assert_eq!(scene.backdrop().map(BackdropField::len), Some(300));
        assert_eq!(scene.advance(), GenerationStatus::Done);
    }

    #[test]
    fn test_abort_discards_partial_output() {
        let mut scene = SceneCache::new(&small_config());
        scene.advance();
        scene.abort();
        assert_eq!(scene.status(), GenerationStatus::NotStarted);
        assert!(scene.galaxy().is_none());
        assert!(scene.point_sizes().is_empty());
    }

    #[test]
    fn test_abort_keeps_finished_scene() {
        let mut scene = SceneCache::new(&small_config());
        scene.ensure_generated();
        scene.abort();
        assert_eq!(scene.status(), GenerationStatus::Done);
        assert!(scene.backdrop().is_some());
    }

    #[test]
    fn test_parameter_change_invalidates() {
        let mut config = small_config();
        let mut scene = SceneCache::new(&config);
        scene.ensure_generated();

        assert!(!scene.reconfigure(&config), "identical settings keep buffers");
        assert_eq!(scene.status(), GenerationStatus::Done);

        config.galaxy.arm_count = 3;
        assert!(scene.reconfigure(&config));
        assert_eq!(scene.status(), GenerationStatus::NotStarted);
        assert!(scene.galaxy().is_none());
    }

    #[test]
    fn test_featured_identity_gates_placement() {
        let mut scene = SceneCache::new(&small_config());
        assert!(scene.set_featured(&records(&["a", "b", "c", "d"])));
        assert_eq!(scene.planets().len(), 3, "only featured_count are placed");

        let before = scene.planets().to_vec();
        assert!(!scene.set_featured(&records(&["a", "b", "c", "z"])));
        assert_eq!(scene.planets(), before.as_slice());

        assert!(scene.set_featured(&records(&["c", "b", "a"])));
        assert_eq!(scene.planets()[0].record.name, "c");
    }

    #[test]
    fn test_placement_change_rearranges_current_list() {
        let mut config = small_config();
        let mut scene = SceneCache::new(&config);
        scene.set_featured(&records(&["a", "b"]));
        let before = scene.planets()[0].position;

        config.placement.base_radius = 60.0;
        scene.reconfigure(&config);
        assert_eq!(scene.planets().len(), 2);
        assert_ne!(scene.planets()[0].position, before);
    }

    #[test]
    fn test_larger_featured_count_places_more_candidates() {
        let mut config = small_config();
        let mut scene = SceneCache::new(&config);
        scene.set_featured(&records(&["a", "b", "c", "d", "e", "f"]));
        assert_eq!(scene.planets().len(), 3);

        config.placement.featured_count = 5;
        scene.reconfigure(&config);
        let names: Vec<&str> = scene.planets().iter().map(|p| p.record.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "d", "e"]);

        assert!(
            !scene.set_featured(&records(&["a", "b", "c", "d", "e", "f"])),
            "the grown list is already placed"
        );
    }

    #[test]
    fn test_seed_change_matches_fresh_scene() {
        let list = records(&["a", "b", "c"]);
        let mut config = small_config();
        let mut scene = SceneCache::new(&config);
        scene.ensure_generated();
        scene.set_featured(&list);
        let before = scene.planets().to_vec();

        config.galaxy.seed = config.galaxy.seed.wrapping_add(99);
        assert!(scene.reconfigure(&config));
        scene.ensure_generated();

        let mut fresh = SceneCache::new(&config);
        fresh.ensure_generated();
        fresh.set_featured(&list);

        assert_ne!(scene.planets(), before.as_slice(), "layout follows the new seed");
        assert_eq!(scene.planets(), fresh.planets());
        assert_eq!(
            scene.galaxy().map(|g| g.positions.clone()),
            fresh.galaxy().map(|g| g.positions.clone())
        );
    }

    #[test]
    fn test_haze_opacity_ignores_group_spin() {
        let mut scene = SceneCache::new(&small_config());
        scene.ensure_generated();
        let camera = Vec3::new(0.0, 18.0, 65.0);

        scene.tick(0.0, camera);
        let opacity = scene.haze_opacity().to_vec();
        let later = scene.tick(60.0, camera);
        assert!(later.rotation > 1.0);
        assert_eq!(later.haze_written, 0, "haze does not spin with the galaxy");
        assert_eq!(scene.haze_opacity(), opacity.as_slice());
    }

    #[test]
    fn test_tick_updates_buffers_in_place() {
        let mut scene = SceneCache::new(&small_config());
        scene.ensure_generated();
        let camera = Vec3::new(0.0, 18.0, 65.0);

        let first = scene.tick(0.0, camera);
        assert_eq!(first.sizes_written, scene.point_sizes().len());
        assert!(scene.point_sizes().iter().all(|s| *s > 0.0));

        let second = scene.tick(0.0, camera);
        assert_eq!(second.sizes_written, 0);
        assert_eq!(second.haze_written, 0);
    }

    #[test]
    fn test_tick_rotates_and_spins() {
        let mut scene = SceneCache::new(&small_config());
        let state = scene.tick(40.0, Vec3::new(0.0, 18.0, 65.0));
        assert!((state.rotation - 1.0).abs() < 1e-5);
        assert!((state.planet_spin - 4.0).abs() < 1e-5);
        assert_eq!(state.sizes_written, 0, "nothing generated yet");
        assert_eq!(scene.frame(), state);
    }
}
