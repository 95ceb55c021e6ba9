//! Catalog records through classification, placement, generation and a few
//! animation ticks.

use exoscape_classify::{Atmosphere, PhysicalRecord, PlanetType, TemperatureBand};
use exoscape_config::Config;
use exoscape_space::{GenerationStatus, SceneCache, StellarClass};
use glam::Vec3;

fn record(name: &str, radius: f64, mass: f64, teq: f64) -> PhysicalRecord {
    let mut r = PhysicalRecord::named(name);
    r.radius = Some(radius);
    r.mass = Some(mass);
    r.equilibrium_temperature = Some(teq);
    r.star_temperature = Some(5600.0);
    r
}

fn catalog() -> Vec<PhysicalRecord> {
    vec![
        record("hot giant", 13.0, 300.0, 1400.0),
        record("temperate earth", 1.0, 1.0, 255.0),
        record("scorched rock", 1.2, 2.0, 1800.0),
        record("cold neptune", 4.0, 17.0, 60.0),
        record("spare", 2.0, 5.0, 300.0),
    ]
}

fn config() -> Config {
    let mut config = Config::default();
    config.galaxy.star_count = 4000;
    config.backdrop.count = 500;
    config.haze.ratio = 0.005;
    config.placement.featured_count = 4;
    config
}

#[test]
fn test_full_scene_pipeline() {
    let mut scene = SceneCache::new(&config());
    scene.ensure_generated();
    assert_eq!(scene.status(), GenerationStatus::Done);

    let galaxy = scene.galaxy().expect("galaxy generated");
    assert_eq!(galaxy.len(), 4000);
    let bucketed: usize = galaxy.buckets.iter().map(|b| b.len()).sum();
    assert_eq!(bucketed, 4000, "every star belongs to exactly one bucket");
    assert_eq!(galaxy.flat_positions().len(), 4000 * 3);
    assert_eq!(galaxy.buckets.len(), StellarClass::ALL.len());

    assert_eq!(scene.haze().map(|h| h.len()), Some(20));
    assert_eq!(scene.backdrop().map(|b| b.len()), Some(500));

    assert!(scene.set_featured(&catalog()));
    let planets = scene.planets();
    assert_eq!(planets.len(), 4);

    let giant = &planets[0].classification;
    assert_eq!(giant.planet_type, PlanetType::Gas);
    assert_eq!(giant.temperature_band, TemperatureBand::Inferno);
    assert_eq!(giant.atmosphere, Atmosphere::Thick);

    let earth = &planets[1].classification;
    assert_eq!(earth.planet_type, PlanetType::Rocky);
    assert_eq!(earth.temperature_band, TemperatureBand::Temperate);

    assert_eq!(planets[2].classification.planet_type, PlanetType::Lava);
    assert_eq!(planets[3].classification.planet_type, PlanetType::Ice);

    for planet in planets {
        assert!(planet.textures.color.ends_with("albedo.jpg"));
        assert_eq!(planet.textures.key, planet.classification.texture_key);
    }

    let camera = Vec3::new(0.0, 18.0, 65.0);
    let mut last = scene.tick(0.0, camera);
    assert_eq!(last.sizes_written, StellarClass::ALL.len());
    for frame in 1..=120 {
        last = scene.tick(frame as f32 / 60.0, camera);
    }
    assert!((last.rotation - 2.0 * 0.025).abs() < 1e-5);
    assert_eq!(last.sizes_written, 0, "camera did not move");

    let opacity = scene.haze_opacity();
    assert_eq!(opacity.len(), 20);
    assert!(opacity.iter().all(|o| (0.0..=1.0).contains(o)));
}

#[test]
fn test_same_seed_reproduces_scene() {
    let build = || {
        let mut scene = SceneCache::new(&config());
        scene.ensure_generated();
        scene.set_featured(&catalog());
        scene
    };
    let a = build();
    let b = build();

    assert_eq!(a.galaxy().map(|g| &g.positions), b.galaxy().map(|g| &g.positions));
    assert_eq!(a.haze(), b.haze());
    assert_eq!(a.backdrop().map(|f| &f.positions), b.backdrop().map(|f| &f.positions));
    assert_eq!(a.planets(), b.planets());
}
