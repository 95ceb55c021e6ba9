//! Featured-planet layout on an expanding spiral around the galaxy core.

use std::f32::consts::TAU;

use exoscape_classify::{
    Classifier, PhysicalRecord, PlanetAppearance, TextureAssets, VisualClassification,
    texture_assets,
};
use exoscape_config::{ClassifierConfig, PlacementConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::sampling::between;

/// Lowest vertical falloff, reached at and beyond `falloff_radius`.
const MIN_FALLOFF: f32 = 0.3;

/// A placed, classified planet. Rebuilt wholesale when the featured list
/// changes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlanetInstance {
    /// Source record.
    pub record: PhysicalRecord,
    /// Position inside the planet group, before group rotation.
    pub position: [f32; 3],
    /// Base color of the planet type.
    pub base_color: [f32; 3],
    /// Display scale.
    pub scale: f32,
    /// Visual classification of the record.
    pub classification: VisualClassification,
    /// Texture set resolved from the classification's key.
    pub textures: TextureAssets,
    /// Material and atmosphere parameters.
    pub appearance: PlanetAppearance,
}

/// Height multiplier for a planet at radius `r`.
pub fn vertical_falloff(r: f32, falloff_radius: f32) -> f32 {
    if falloff_radius <= 0.0 {
        return MIN_FALLOFF;
    }
    (1.0 - r / falloff_radius).max(MIN_FALLOFF)
}

/// Arranges featured planets. The same seed and records always give the
/// same layout.
pub struct PlanetLayout {
    config: PlacementConfig,
    classifier: Classifier,
    seed: u64,
}

impl PlanetLayout {
    /// Create a layout from placement settings, classifier tunables and a
    /// stage seed.
    pub fn new(config: &PlacementConfig, classifier: &ClassifierConfig, seed: u64) -> Self {
        Self {
            config: config.clone(),
            classifier: Classifier::new(classifier.clone()),
            seed,
        }
    }

    /// Place and classify every record, in input order.
    pub fn arrange(&self, records: &[PhysicalRecord]) -> Vec<PlanetInstance> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let c = &self.config;
        let step_angle = TAU / records.len().max(1) as f32;

        records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let angle =
                    i as f32 * step_angle + between(&mut rng, -c.angle_jitter, c.angle_jitter);
                let radius = c.base_radius
                    + c.radius_step * i as f32
                    + between(&mut rng, -c.radius_jitter, c.radius_jitter);
                let falloff = vertical_falloff(radius, c.falloff_radius);
                let height = between(&mut rng, -c.height_jitter, c.height_jitter) * falloff;
                let scale = between(&mut rng, c.min_scale, c.max_scale);

                let classification = self.classifier.classify(record);
                let textures = texture_assets(&classification.texture_key);
                let appearance = PlanetAppearance::new(
                    record,
                    &classification,
                    Some(&textures),
                    self.classifier.config(),
                );

                PlanetInstance {
                    record: record.clone(),
                    position: [angle.cos() * radius * c.x_stretch, height, angle.sin() * radius],
                    base_color: appearance.base_color,
                    scale,
                    classification,
                    textures,
                    appearance,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exoscape_classify::base_color;

    fn records(n: usize) -> Vec<PhysicalRecord> {
        (0..n)
            .map(|i| {
                let mut r = PhysicalRecord::named(&format!("Planet {i}"));
                r.radius = Some(0.5 + i as f64);
                r.equilibrium_temperature = Some(150.0 + 120.0 * i as f64);
                r
            })
            .collect()
    }

    fn layout(seed: u64) -> PlanetLayout {
        PlanetLayout::new(&PlacementConfig::default(), &ClassifierConfig::default(), seed)
    }

    #[test]
    fn test_one_instance_per_record_in_order() {
        let input = records(12);
        let placed = layout(3).arrange(&input);
        assert_eq!(placed.len(), 12);
        for (instance, record) in placed.iter().zip(&input) {
            assert_eq!(instance.record.name, record.name);
        }
    }

    #[test]
    fn test_radius_grows_with_index() {
        let config = PlacementConfig::default();
        let placed = layout(9).arrange(&records(12));
        for (i, instance) in placed.iter().enumerate() {
            let [x, _, z] = instance.position;
            let r = ((x / config.x_stretch).powi(2) + z * z).sqrt();
            let expected = config.base_radius + config.radius_step * i as f32;
            assert!(
                (r - expected).abs() <= config.radius_jitter + 1e-3,
                "planet {i} at radius {r}, expected {expected} ± {}",
                config.radius_jitter
            );
        }
    }

    #[test]
    fn test_height_and_scale_ranges() {
        let config = PlacementConfig::default();
        for instance in layout(21).arrange(&records(12)) {
            assert!(instance.position[1].abs() <= config.height_jitter + 1e-4);
            assert!(
                (config.min_scale..=config.max_scale).contains(&instance.scale),
                "scale {} out of range",
                instance.scale
            );
        }
    }

    #[test]
    fn test_base_color_follows_type() {
        for instance in layout(1).arrange(&records(8)) {
            assert_eq!(instance.base_color, base_color(instance.classification.planet_type));
        }
    }

    #[test]
    fn test_textures_match_classification() {
        for instance in layout(1).arrange(&records(6)) {
            assert_eq!(instance.textures.key, instance.classification.texture_key);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let input = records(10);
        assert_eq!(layout(5).arrange(&input), layout(5).arrange(&input));
    }

    #[test]
    fn test_empty_list() {
        assert!(layout(5).arrange(&[]).is_empty());
    }

    #[test]
    fn test_single_planet_angle_near_zero() {
        let config = PlacementConfig::default();
        let placed = layout(2).arrange(&records(1));
        let [x, _, z] = placed[0].position;
        let angle = z.atan2(x / config.x_stretch);
        assert!(angle.abs() <= config.angle_jitter + 1e-4);
    }

    #[test]
    fn test_vertical_falloff_floor() {
        assert!((vertical_falloff(0.0, 180.0) - 1.0).abs() < 1e-6);
        assert!((vertical_falloff(90.0, 180.0) - 0.5).abs() < 1e-6);
        assert_eq!(vertical_falloff(500.0, 180.0), MIN_FALLOFF);
    }
}
