//! Planet classification: temperature estimate, band, structural type,
//! atmosphere and texture key.

use std::fmt;

use exoscape_config::{BinSteps, ClassifierConfig, TemperatureThresholds};
use serde::Serialize;

use crate::bins::{fnv1a_32, planet_bins, star_bin};
use crate::record::{PhysicalRecord, finite};
use crate::textures::texture_pool;

/// Earth's equilibrium temperature for unit insolation, in Kelvin.
const EARTH_EQUILIBRIUM_K: f64 = 278.0;
/// Solar effective temperature used to scale host luminosity.
const SOLAR_TEFF_K: f64 = 5772.0;
/// Above this equilibrium temperature a rocky or ocean world keeps no air.
const ATMOSPHERE_LOSS_K: f64 = 1200.0;
/// Below this mass (Earth masses) a world cannot hold an atmosphere.
const ATMOSPHERE_MIN_MASS: f64 = 0.5;

/// Structural type of a planet body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanetType {
    /// Silicate surface.
    Rocky,
    /// Molten surface.
    Lava,
    /// Global liquid water.
    Ocean,
    /// Icy mantle or ice-giant envelope.
    Ice,
    /// Gas giant.
    Gas,
}

/// Equilibrium temperature band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureBand {
    /// Below 200 K by default.
    Cold,
    /// 200 K to 330 K, and the band of any planet whose temperature is unknown.
    Temperate,
    /// 330 K to 1000 K.
    Hot,
    /// 1000 K and above.
    Inferno,
}

/// Atmosphere thickness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Atmosphere {
    /// Bare surface.
    None,
    /// Thin envelope.
    Thin,
    /// Thick envelope.
    Thick,
}

impl PlanetType {
    /// All types in declaration order.
    pub const ALL: [PlanetType; 5] = [
        PlanetType::Rocky,
        PlanetType::Lava,
        PlanetType::Ocean,
        PlanetType::Ice,
        PlanetType::Gas,
    ];

    /// Lowercase name used in texture keys and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            PlanetType::Rocky => "rocky",
            PlanetType::Lava => "lava",
            PlanetType::Ocean => "ocean",
            PlanetType::Ice => "ice",
            PlanetType::Gas => "gas",
        }
    }
}

impl TemperatureBand {
    /// All bands from coldest to hottest.
    pub const ALL: [TemperatureBand; 4] = [
        TemperatureBand::Cold,
        TemperatureBand::Temperate,
        TemperatureBand::Hot,
        TemperatureBand::Inferno,
    ];

    /// Band for an equilibrium temperature; unknown temperatures are temperate.
    pub fn from_temperature(
        temperature_k: Option<f64>,
        thresholds: &TemperatureThresholds,
    ) -> Self {
        match temperature_k {
            None => TemperatureBand::Temperate,
            Some(t) if t < thresholds.cold_below => TemperatureBand::Cold,
            Some(t) if t < thresholds.temperate_below => TemperatureBand::Temperate,
            Some(t) if t < thresholds.hot_below => TemperatureBand::Hot,
            Some(_) => TemperatureBand::Inferno,
        }
    }

    /// Lowercase name used in texture keys and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            TemperatureBand::Cold => "cold",
            TemperatureBand::Temperate => "temperate",
            TemperatureBand::Hot => "hot",
            TemperatureBand::Inferno => "inferno",
        }
    }

    fn is_warm(self) -> bool {
        matches!(self, TemperatureBand::Hot | TemperatureBand::Inferno)
    }
}

impl Atmosphere {
    /// Lowercase name used in texture keys and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Atmosphere::None => "none",
            Atmosphere::Thin => "thin",
            Atmosphere::Thick => "thick",
        }
    }
}

impl fmt::Display for PlanetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Atmosphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The visual identity of a planet, a pure function of its [`PhysicalRecord`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisualClassification {
    /// Structural type.
    pub planet_type: PlanetType,
    /// Temperature band.
    pub temperature_band: TemperatureBand,
    /// Atmosphere thickness.
    pub atmosphere: Atmosphere,
    /// Texture chosen from the (type, band) pool.
    pub texture_key: String,
    /// Equilibrium temperature estimate in Kelvin, if any chain resolved.
    pub equilibrium_temperature: Option<f64>,
}

// ---------------------------------------------------------------------------
// Temperature estimate
// ---------------------------------------------------------------------------

fn temperature_from_flux(insolation: f64) -> Option<f64> {
    let t = EARTH_EQUILIBRIUM_K * insolation.powf(0.25);
    t.is_finite().then_some(t)
}

fn host_luminosity(record: &PhysicalRecord) -> Option<f64> {
    finite(record.star_luminosity).or_else(|| {
        let r = finite(record.star_radius)?;
        let t = finite(record.star_temperature)?;
        Some(r * r * (t / SOLAR_TEFF_K).powi(4))
    })
}

/// Best available equilibrium temperature estimate in Kelvin.
///
/// Tries, in order: the measured value, the insolation flux, and the flux
/// implied by host luminosity at the semi-major axis. Luminosity itself falls
/// back to the Stefan-Boltzmann estimate from host radius and temperature.
/// Returns `None` when no chain completes.
pub fn estimate_equilibrium_temperature(record: &PhysicalRecord) -> Option<f64> {
    finite(record.equilibrium_temperature)
        .or_else(|| finite(record.insolation).and_then(temperature_from_flux))
        .or_else(|| {
            let a = finite(record.semi_major_axis).filter(|a| *a > 0.0)?;
            let luminosity = host_luminosity(record)?;
            temperature_from_flux(luminosity / (a * a))
        })
}

// ---------------------------------------------------------------------------
// Structural type cascade
// ---------------------------------------------------------------------------

/// Inputs of the type cascade, with non-finite values already dropped.
#[derive(Clone, Copy, Debug)]
struct Features {
    radius: Option<f64>,
    density: Option<f64>,
    mass: Option<f64>,
    band: TemperatureBand,
}

impl Features {
    fn of(record: &PhysicalRecord, band: TemperatureBand) -> Self {
        Self {
            radius: finite(record.radius),
            density: finite(record.density),
            mass: finite(record.mass),
            band,
        }
    }

    fn inferno(&self) -> bool {
        self.band == TemperatureBand::Inferno
    }

    fn solid(&self) -> PlanetType {
        if self.inferno() {
            PlanetType::Lava
        } else {
            PlanetType::Rocky
        }
    }
}

/// One step of the cascade. Rules are evaluated top to bottom and the first
/// rule that returns `Some` decides the type; later rules rely on earlier ones
/// having already claimed the overlapping cases.
struct TypeRule {
    name: &'static str,
    decide: fn(&Features) -> Option<PlanetType>,
}

const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        name: "giant_radius",
        decide: giant_radius,
    },
    TypeRule {
        name: "neptune_radius",
        decide: neptune_radius,
    },
    TypeRule {
        name: "dense_body",
        decide: dense_body,
    },
    TypeRule {
        name: "light_cool_body",
        decide: light_cool_body,
    },
    TypeRule {
        name: "small_radius",
        decide: small_radius,
    },
    TypeRule {
        name: "sub_neptune_radius",
        decide: sub_neptune_radius,
    },
    TypeRule {
        name: "giant_mass",
        decide: giant_mass,
    },
    TypeRule {
        name: "neptune_mass",
        decide: neptune_mass,
    },
    TypeRule {
        name: "terrestrial_mass",
        decide: terrestrial_mass,
    },
    TypeRule {
        name: "super_earth_mass",
        decide: super_earth_mass,
    },
    TypeRule {
        name: "fallback",
        decide: fallback,
    },
];

fn giant_radius(f: &Features) -> Option<PlanetType> {
    f.radius.filter(|r| *r > 8.0).map(|_| PlanetType::Gas)
}

fn neptune_radius(f: &Features) -> Option<PlanetType> {
    f.radius.filter(|r| *r > 3.5 && *r <= 8.0).map(|_| {
        if f.band.is_warm() {
            PlanetType::Gas
        } else {
            PlanetType::Ice
        }
    })
}

fn dense_body(f: &Features) -> Option<PlanetType> {
    f.density.filter(|d| *d >= 5.0).map(|_| f.solid())
}

fn light_cool_body(f: &Features) -> Option<PlanetType> {
    f.density
        .filter(|d| *d > 1.0 && *d < 3.0 && !f.band.is_warm())
        .map(|_| PlanetType::Ocean)
}

fn small_radius(f: &Features) -> Option<PlanetType> {
    f.radius.filter(|r| *r <= 1.5).map(|_| f.solid())
}

fn sub_neptune_radius(f: &Features) -> Option<PlanetType> {
    let r = f.radius?;
    if !(r > 1.5 && r <= 3.5) {
        return None;
    }
    if let Some(d) = f.density {
        if d >= 4.0 {
            return Some(f.solid());
        }
        if (1.0..=3.0).contains(&d) && !f.inferno() {
            return Some(PlanetType::Ocean);
        }
    }
    Some(if f.band.is_warm() {
        PlanetType::Ice
    } else {
        PlanetType::Ocean
    })
}

fn giant_mass(f: &Features) -> Option<PlanetType> {
    f.mass.filter(|m| *m > 50.0).map(|_| PlanetType::Gas)
}

fn neptune_mass(f: &Features) -> Option<PlanetType> {
    f.mass.filter(|m| *m > 10.0).map(|_| {
        if f.band.is_warm() {
            PlanetType::Gas
        } else {
            PlanetType::Ice
        }
    })
}

fn terrestrial_mass(f: &Features) -> Option<PlanetType> {
    f.mass.filter(|m| *m <= 5.0).map(|_| f.solid())
}

fn super_earth_mass(f: &Features) -> Option<PlanetType> {
    f.mass.filter(|m| *m > 5.0 && *m <= 10.0).map(|_| {
        if f.band.is_warm() {
            PlanetType::Rocky
        } else {
            PlanetType::Ocean
        }
    })
}

fn fallback(f: &Features) -> Option<PlanetType> {
    Some(f.solid())
}

/// Run the cascade; returns the type and the name of the deciding rule.
fn resolve_type(features: &Features) -> (PlanetType, &'static str) {
    TYPE_RULES
        .iter()
        .find_map(|rule| (rule.decide)(features).map(|t| (t, rule.name)))
        .unwrap_or((features.solid(), "fallback"))
}

// ---------------------------------------------------------------------------
// Atmosphere
// ---------------------------------------------------------------------------

fn resolve_atmosphere(
    planet_type: PlanetType,
    temperature_k: Option<f64>,
    mass: Option<f64>,
) -> Atmosphere {
    match planet_type {
        PlanetType::Gas | PlanetType::Ice => return Atmosphere::Thick,
        PlanetType::Lava => return Atmosphere::None,
        _ => {}
    }
    if temperature_k.is_some_and(|t| t > ATMOSPHERE_LOSS_K) {
        return Atmosphere::None;
    }
    if mass.is_some_and(|m| m < ATMOSPHERE_MIN_MASS) {
        return Atmosphere::None;
    }
    if planet_type == PlanetType::Ocean {
        Atmosphere::Thick
    } else {
        Atmosphere::Thin
    }
}

// ---------------------------------------------------------------------------
// Texture key
// ---------------------------------------------------------------------------

fn feature_key(
    record: &PhysicalRecord,
    steps: &BinSteps,
    planet_type: PlanetType,
    band: TemperatureBand,
    atmosphere: Atmosphere,
) -> String {
    format!(
        "{planet_type}|{band}|{atmosphere}|{}|{}",
        planet_bins(record, steps),
        star_bin(record, steps)
    )
}

fn select_texture(pool: &[&'static str], key: &str) -> &'static str {
    let hash = fnv1a_32(key) as usize;
    pool[hash % pool.len()]
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Classifier bound to a set of thresholds and bin steps.
#[derive(Clone, Debug, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    /// Create a classifier with the given tunables.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// The tunables this classifier was built with.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one record. Total over every combination of absent fields.
    pub fn classify(&self, record: &PhysicalRecord) -> VisualClassification {
        let temperature = estimate_equilibrium_temperature(record);
        let band = TemperatureBand::from_temperature(temperature, &self.config.thresholds);
        let features = Features::of(record, band);
        let (planet_type, rule) = resolve_type(&features);
        let atmosphere = resolve_atmosphere(planet_type, temperature, features.mass);

        let key = feature_key(record, &self.config.bins, planet_type, band, atmosphere);
        let texture_key = select_texture(texture_pool(planet_type, band), &key);

        log::trace!(
            "classified {}: {planet_type}/{band}/{atmosphere} via {rule}, texture {texture_key}",
            record.name
        );

        VisualClassification {
            planet_type,
            temperature_band: band,
            atmosphere,
            texture_key: texture_key.to_string(),
            equilibrium_temperature: temperature,
        }
    }
}

/// Classify with the default thresholds and bin steps.
pub fn classify(record: &PhysicalRecord) -> VisualClassification {
    Classifier::default().classify(record)
}
