//! Spiral galaxy point cloud: stars spread along evenly spaced arms, denser and
//! thicker toward the core, bucketed by spectral class for rendering.

use std::f32::consts::TAU;

use exoscape_config::GalaxyConfig;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::sampling::gaussian;

/// Power of the radial draw; above 1 concentrates stars toward the center.
const DISTANCE_EXPONENT: f32 = 1.8;
/// Spiral winding, radians per unit of distance.
const WINDING: f32 = 0.045;
/// Angular jitter of a star around its arm.
const ANGLE_JITTER_STD: f32 = 0.12;
const ANGLE_JITTER_LIMIT: f32 = 0.4;

/// Spectral class of a galaxy star, from most to least common.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum StellarClass {
    /// M-type: red dwarfs, the bulk of the disk.
    M,
    /// K-type: orange.
    K,
    /// G-type: yellow, Sol-like.
    G,
    /// F-type: yellow-white.
    F,
    /// A-type: white.
    A,
    /// B-type: blue-white, rare.
    B,
}

impl StellarClass {
    /// Classes in bucket order.
    pub const ALL: [StellarClass; 6] = [
        StellarClass::M,
        StellarClass::K,
        StellarClass::G,
        StellarClass::F,
        StellarClass::A,
        StellarClass::B,
    ];

    /// Share of the star population, in percent.
    pub fn share(self) -> f32 {
        match self {
            StellarClass::M => 76.45,
            StellarClass::K => 12.1,
            StellarClass::G => 7.6,
            StellarClass::F => 3.0,
            StellarClass::A => 0.6,
            StellarClass::B => 0.13,
        }
    }

    /// Canonical point color.
    pub fn color(self) -> [f32; 3] {
        let hex: u32 = match self {
            StellarClass::M => 0xffcc6f,
            StellarClass::K => 0xffd2a1,
            StellarClass::G => 0xfff4ea,
            StellarClass::F => 0xf8f7ff,
            StellarClass::A => 0xcad7ff,
            StellarClass::B => 0xaabfff,
        };
        exoscape_classify::appearance::hex_rgb(hex)
    }

    /// Point size relative to the galaxy base size.
    pub fn size_multiplier(self) -> f32 {
        match self {
            StellarClass::M | StellarClass::K => 0.7,
            StellarClass::G => 1.15,
            StellarClass::F => 1.48,
            StellarClass::A => 2.0,
            StellarClass::B => 2.5,
        }
    }
}

/// Stars of one spectral class.
#[derive(Clone, Debug)]
pub struct StarBucket {
    /// Class shared by every star in the bucket.
    pub class: StellarClass,
    /// Star positions in galaxy-local space.
    pub positions: Vec<[f32; 3]>,
    /// Brightness-scaled colors, one per position.
    pub colors: Vec<[f32; 3]>,
    /// Fixed size multiplier of the class.
    pub size_multiplier: f32,
}

impl StarBucket {
    fn new(class: StellarClass) -> Self {
        Self {
            class,
            positions: Vec::new(),
            colors: Vec::new(),
            size_multiplier: class.size_multiplier(),
        }
    }

    /// Number of stars in the bucket.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the bucket holds no stars.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions as a flat `x, y, z, ...` slice for upload.
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colors as a flat `r, g, b, ...` slice for upload.
    pub fn flat_colors(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }
}

/// Output of [`GalaxyGenerator::generate`].
#[derive(Clone, Debug)]
pub struct GalaxyStarData {
    /// One bucket per [`StellarClass`], in [`StellarClass::ALL`] order.
    pub buckets: Vec<StarBucket>,
    /// Every star position in generation order.
    pub positions: Vec<[f32; 3]>,
    /// Every star color in generation order.
    pub colors: Vec<[f32; 3]>,
}

impl GalaxyStarData {
    /// Total star count.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the galaxy has no stars.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// All positions as a flat slice.
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// All colors as a flat slice.
    pub fn flat_colors(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }
}

/// Generates a spiral galaxy point cloud. Deterministic for a given seed.
pub struct GalaxyGenerator {
    seed: u64,
    star_count: u32,
    arm_count: u32,
    radius: f32,
}

impl GalaxyGenerator {
    /// Create a generator from the galaxy settings and a stage seed.
    pub fn new(config: &GalaxyConfig, seed: u64) -> Self {
        Self {
            seed,
            star_count: config.star_count,
            arm_count: config.arm_count.max(1),
            radius: config.radius,
        }
    }

    /// Generate every star.
    pub fn generate(&self) -> GalaxyStarData {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let thresholds = class_thresholds();
        let count = self.star_count as usize;

        let mut buckets: Vec<StarBucket> =
            StellarClass::ALL.iter().map(|c| StarBucket::new(*c)).collect();
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);

        for i in 0..self.star_count {
            let arm = i % self.arm_count;
            let arm_angle = arm as f32 / self.arm_count as f32 * TAU;
            let distance = rng.random::<f32>().powf(DISTANCE_EXPONENT) * self.radius;

            let core_bias = (1.0 - distance / (self.radius * 0.9)).max(0.0);
            let arm_thickness = 6.0 + core_bias * 20.0;
            let jitter =
                gaussian(&mut rng, ANGLE_JITTER_STD).clamp(-ANGLE_JITTER_LIMIT, ANGLE_JITTER_LIMIT);
            let angle = arm_angle + distance * WINDING + jitter;

            let falloff = (1.0 - distance / self.radius).max(0.3);
            let spread = arm_thickness * falloff;
            let vertical_spread = (0.9 + core_bias * 3.4) * falloff;
            let compression = 1.0 - core_bias * 0.35;

            let x = angle.cos() * distance * compression + gaussian(&mut rng, spread / 2.0);
            let y = gaussian(&mut rng, vertical_spread / 2.0) * compression;
            let z = angle.sin() * distance * compression + gaussian(&mut rng, spread / 2.0);

            let pick = rng.random::<f32>();
            let bucket_index = thresholds
                .iter()
                .position(|t| pick <= *t)
                .unwrap_or(thresholds.len() - 1);
            let bucket = &mut buckets[bucket_index];

            let brightness = (1.1 - distance / self.radius * 0.85).clamp(0.35, 1.2);
            let color = bucket.class.color().map(|c| (c * brightness).clamp(0.0, 1.0));

            bucket.positions.push([x, y, z]);
            bucket.colors.push(color);
            positions.push([x, y, z]);
            colors.push(color);
        }

        log::debug!(
            "Generated galaxy: {} stars over {} arms, bucket sizes {:?}",
            positions.len(),
            self.arm_count,
            buckets.iter().map(StarBucket::len).collect::<Vec<_>>()
        );

        GalaxyStarData {
            buckets,
            positions,
            colors,
        }
    }
}

/// Cumulative class probabilities, normalized so the last entry is 1.
fn class_thresholds() -> [f32; 6] {
    let total: f32 = StellarClass::ALL.iter().map(|c| c.share()).sum();
    let mut acc = 0.0;
    StellarClass::ALL.map(|c| {
        acc += c.share() / total;
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(star_count: u32) -> GalaxyConfig {
        GalaxyConfig {
            star_count,
            ..Default::default()
        }
    }

    #[test]
    fn test_every_star_in_exactly_one_bucket() {
        let data = GalaxyGenerator::new(&config(5000), 42).generate();
        assert_eq!(data.len(), 5000);
        let bucketed: usize = data.buckets.iter().map(StarBucket::len).sum();
        assert_eq!(bucketed, 5000, "bucket sizes must add up to the star count");
        for bucket in &data.buckets {
            assert_eq!(bucket.positions.len(), bucket.colors.len());
        }
    }

    #[test]
    fn test_bucket_multipliers_are_fixed_per_class() {
        let data = GalaxyGenerator::new(&config(2000), 7).generate();
        for (bucket, class) in data.buckets.iter().zip(StellarClass::ALL) {
            assert_eq!(bucket.class, class);
            assert_eq!(bucket.size_multiplier, class.size_multiplier());
        }
    }

    #[test]
    fn test_class_distribution_follows_shares() {
        let data = GalaxyGenerator::new(&config(20_000), 1).generate();
        let m_share = data.buckets[0].len() as f32 / data.len() as f32;
        assert!(
            (0.74..0.79).contains(&m_share),
            "M share {m_share} should be near 0.7645"
        );
        assert!(
            data.buckets[5].len() < data.buckets[4].len(),
            "B stars should be rarer than A stars"
        );
    }

    #[test]
    fn test_thresholds_are_monotonic_and_end_at_one() {
        let t = class_thresholds();
        assert!(t.windows(2).all(|w| w[0] < w[1]));
        assert!((t[5] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_colors_are_valid_rgb() {
        let data = GalaxyGenerator::new(&config(3000), 9).generate();
        for (i, color) in data.colors.iter().enumerate() {
            for (ch, &val) in color.iter().enumerate() {
                assert!(
                    (0.0..=1.0).contains(&val),
                    "Star {i} color channel {ch} = {val} is outside [0, 1]"
                );
            }
        }
    }

    #[test]
    fn test_disk_is_flat_and_bounded() {
        let cfg = config(5000);
        let data = GalaxyGenerator::new(&cfg, 5).generate();
        let max_height = data.positions.iter().map(|p| p[1].abs()).fold(0.0, f32::max);
        let max_planar = data
            .positions
            .iter()
            .map(|p| (p[0] * p[0] + p[2] * p[2]).sqrt())
            .fold(0.0, f32::max);
        assert!(max_height < 15.0, "disk too thick: {max_height}");
        assert!(
            max_planar < cfg.radius * 1.6,
            "stars strayed too far: {max_planar}"
        );
    }

    #[test]
    fn test_core_is_denser_than_rim() {
        let cfg = config(10_000);
        let data = GalaxyGenerator::new(&cfg, 13).generate();
        let planar = |p: &[f32; 3]| (p[0] * p[0] + p[2] * p[2]).sqrt();
        let inner = data.positions.iter().filter(|p| planar(p) < cfg.radius * 0.25).count();
        let outer = data
            .positions
            .iter()
            .filter(|p| planar(p) > cfg.radius * 0.75)
            .count();
        assert!(inner > outer, "inner {inner} vs outer {outer}");
    }

    #[test]
    fn test_same_seed_produces_same_galaxy() {
        let a = GalaxyGenerator::new(&config(1000), 123).generate();
        let b = GalaxyGenerator::new(&config(1000), 123).generate();
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.colors, b.colors);
    }

    #[test]
    fn test_different_seed_produces_different_galaxy() {
        let a = GalaxyGenerator::new(&config(1000), 1).generate();
        let b = GalaxyGenerator::new(&config(1000), 9999).generate();
        let differences = a
            .positions
            .iter()
            .zip(&b.positions)
            .filter(|(p, q)| (p[0] - q[0]).abs() > 0.01)
            .count();
        assert!(differences > 500, "only {differences}/1000 differed");
    }

    #[test]
    fn test_flat_views_match_point_count() {
        let data = GalaxyGenerator::new(&config(100), 2).generate();
        assert_eq!(data.flat_positions().len(), 300);
        assert_eq!(data.flat_colors().len(), 300);
        assert_eq!(data.flat_positions()[3], data.positions[1][0]);
        for bucket in &data.buckets {
            assert_eq!(bucket.flat_positions().len(), bucket.len() * 3);
            assert_eq!(bucket.flat_colors().len(), bucket.len() * 3);
        }
    }

    #[test]
    fn test_zero_stars() {
        let data = GalaxyGenerator::new(&config(0), 2).generate();
        assert!(data.is_empty());
        assert!(data.buckets.iter().all(StarBucket::is_empty));
    }
}
