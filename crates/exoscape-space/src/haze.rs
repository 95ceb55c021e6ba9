//! Haze billboards: a small sample of galaxy stars, nudged off their source
//! positions and flattened toward the disk plane, drawn as large soft sprites.

use exoscape_config::HazeConfig;
use rand::SeedableRng;
use rand::seq::index;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::sampling::{between, gaussian};

const HORIZONTAL_JITTER: f32 = 2.4;
const VERTICAL_JITTER: f32 = 0.6;
const VERTICAL_SQUASH: f32 = 0.4;

/// One haze billboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HazePatch {
    /// Index of the galaxy star the patch was sampled from.
    pub source_index: usize,
    /// Position in galaxy-local space.
    pub position: [f32; 3],
    /// Billboard edge length.
    pub size: f32,
}

/// Number of patches for `star_count` stars at `ratio`.
///
/// Zero for no stars or a non-positive ratio; otherwise at least one and never
/// more than the star count.
pub fn patch_count(star_count: usize, ratio: f64) -> usize {
    if star_count == 0 || !(ratio > 0.0) {
        return 0;
    }
    let wanted = (star_count as f64 * ratio).floor();
    let wanted = if wanted.is_finite() {
        wanted as usize
    } else {
        star_count
    };
    wanted.max(1).min(star_count)
}

/// Samples haze patches from galaxy star positions.
pub struct HazeGenerator {
    min_size: f32,
    max_size: f32,
    seed: u64,
}

impl HazeGenerator {
    /// Create a generator from the haze settings and a stage seed.
    pub fn new(config: &HazeConfig, seed: u64) -> Self {
        Self {
            min_size: config.min_size,
            max_size: config.max_size,
            seed,
        }
    }

    /// Sample `ratio` of `positions` without replacement and perturb each one.
    pub fn generate(&self, positions: &[[f32; 3]], ratio: f64) -> Vec<HazePatch> {
        let count = patch_count(positions.len(), ratio);
        if count == 0 {
            return Vec::new();
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let sources = index::sample(&mut rng, positions.len(), count);

        let patches: Vec<HazePatch> = sources
            .into_iter()
            .map(|source_index| {
                let [x, y, z] = positions[source_index];
                let position = [
                    x + gaussian(&mut rng, HORIZONTAL_JITTER),
                    y * VERTICAL_SQUASH + gaussian(&mut rng, VERTICAL_JITTER),
                    z + gaussian(&mut rng, HORIZONTAL_JITTER),
                ];
                let size = between(&mut rng, self.min_size, self.max_size)
                    .clamp(self.min_size.min(self.max_size), self.max_size.max(self.min_size));
                HazePatch {
                    source_index,
                    position,
                    size,
                }
            })
            .collect();

        log::debug!(
            "Sampled {} haze patches from {} stars",
            patches.len(),
            positions.len()
        );
        patches
    }
}
