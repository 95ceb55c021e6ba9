//! Distant background stars on a flattened spherical shell, each with its own
//! flicker rate and phase.

use std::f32::consts::TAU;

use exoscape_classify::appearance::hex_rgb;
use exoscape_config::BackdropConfig;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::sampling::between;

const PALETTE: [u32; 6] = [0xfefefe, 0xfcd34d, 0xf97316, 0xfb7185, 0x60a5fa, 0xa855f7];

/// Center of the flicker oscillation.
pub const FLICKER_MIDLINE: f32 = 0.65;
const FLICKER_AMPLITUDE: f32 = 0.35;
/// Dimmest palette intensity a star is generated with.
const MIN_INTENSITY: f32 = 0.65;

/// Background star buffers. `colors` is the animated channel; everything else
/// is fixed at generation.
#[derive(Clone, Debug)]
pub struct BackdropField {
    /// Star positions.
    pub positions: Vec<[f32; 3]>,
    /// Current (flickered) colors.
    pub colors: Vec<[f32; 3]>,
    /// Colors at full flicker.
    pub base_colors: Vec<[f32; 3]>,
    /// Flicker angular rate per star, radians per second.
    pub flicker_speeds: Vec<f32>,
    /// Flicker phase per star, radians.
    pub flicker_offsets: Vec<f32>,
}

impl BackdropField {
    /// Number of stars.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the field holds no stars.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Recompute every animated color in place for `elapsed` seconds.
    pub fn apply_flicker(&mut self, elapsed: f32) {
        let per_star = self
            .colors
            .iter_mut()
            .zip(&self.base_colors)
            .zip(self.flicker_speeds.iter().zip(&self.flicker_offsets));
        for ((color, base), (speed, offset)) in per_star {
            let flicker = flicker_factor(elapsed, *speed, *offset);
            *color = base.map(|c| c * flicker);
        }
    }

    /// Positions as a flat slice.
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Animated colors as a flat slice.
    pub fn flat_colors(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }
}

/// Brightness multiplier in `[0.3, 1]`.
pub fn flicker_factor(elapsed: f32, speed: f32, offset: f32) -> f32 {
    FLICKER_MIDLINE + FLICKER_AMPLITUDE * (elapsed * speed + offset).sin()
}

/// Generates the background star shell. Deterministic for a given seed.
pub struct BackdropGenerator {
    config: BackdropConfig,
    seed: u64,
}

impl BackdropGenerator {
    /// Create a generator from the backdrop settings and a stage seed.
    pub fn new(config: &BackdropConfig, seed: u64) -> Self {
        Self {
            config: config.clone(),
            seed,
        }
    }

    /// Generate every background star.
    pub fn generate(&self) -> BackdropField {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let count = self.config.count as usize;
        let palette = PALETTE.map(hex_rgb);
        let range = self.config.max_radius - self.config.min_radius;

        let mut field = BackdropField {
            positions: Vec::with_capacity(count),
            colors: Vec::with_capacity(count),
            base_colors: Vec::with_capacity(count),
            flicker_speeds: Vec::with_capacity(count),
            flicker_offsets: Vec::with_capacity(count),
        };

        for _ in 0..count {
            let distance = self.config.min_radius
                + range * rng.random::<f32>().powf(self.config.radial_exponent);
            let theta = rng.random::<f32>() * TAU;
            let phi = (1.0 - 2.0 * rng.random::<f32>()).acos();

            // Squash the vertical axis, then renormalize so the point stays on the shell.
            let direction = Vec3::new(
                phi.sin() * theta.cos(),
                phi.cos() * self.config.vertical_flatten,
                phi.sin() * theta.sin(),
            )
            .normalize_or(Vec3::X);
            let position = direction * distance;

            let swatch = palette[rng.random_range(0..palette.len())];
            let intensity = between(&mut rng, MIN_INTENSITY, 1.0);
            let base = swatch.map(|c| c * intensity);

            field.positions.push(position.to_array());
            field.base_colors.push(base);
            field.colors.push(base);
            field.flicker_speeds.push(between(&mut rng, 0.6, 2.4));
            field.flicker_offsets.push(rng.random::<f32>() * TAU);
        }

        log::debug!("Generated {} background stars", field.len());
        field
    }
}
