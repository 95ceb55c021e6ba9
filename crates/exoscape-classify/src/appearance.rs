//! Render parameters of a classified planet: base color, atmosphere shell and
//! surface material.
//!
//! Colors are RGB triples in `[0, 1]`, converted from hex by plain division.

use exoscape_config::ClassifierConfig;
use glam::Vec3;
use serde::Serialize;

use crate::classifier::{Atmosphere, PlanetType, TemperatureBand, VisualClassification};
use crate::record::{PhysicalRecord, finite};
use crate::textures::TextureAssets;

const NEUTRAL_TINT: u32 = 0xcbd5f5;
const HEAT_TINT: u32 = 0xfde68a;
const FLUX_TINT: u32 = 0xf97316;

const HEAT_MIN_K: f64 = 160.0;
const HEAT_MAX_K: f64 = 1300.0;
const STAR_TINT_WEIGHT: f32 = 0.35;

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
const BLACK: [f32; 3] = [0.0, 0.0, 0.0];

/// Convert `0xRRGGBB` into an RGB triple.
pub const fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Surface color of an untextured planet of the given type.
pub fn base_color(planet_type: PlanetType) -> [f32; 3] {
    hex_rgb(match planet_type {
        PlanetType::Rocky => 0xa8a29e,
        PlanetType::Lava => 0xef4444,
        PlanetType::Ocean => 0x38bdf8,
        PlanetType::Ice => 0xe0f2fe,
        PlanetType::Gas => 0xfbbf24,
    })
}

fn band_color(band: TemperatureBand) -> [f32; 3] {
    hex_rgb(match band {
        TemperatureBand::Cold => 0x60a5fa,
        TemperatureBand::Temperate => 0x38bdf8,
        TemperatureBand::Hot => 0xfb923c,
        TemperatureBand::Inferno => 0xef4444,
    })
}

/// Color of the host star as seen in the planet's sky.
///
/// Uses the spectral class letter when known, then effective temperature,
/// then a neutral blue-grey.
pub fn star_tint(record: &PhysicalRecord) -> [f32; 3] {
    let by_class = record.spectral_class().and_then(|class| match class {
        'O' => Some(0x38bdf8),
        'B' => Some(0x60a5fa),
        'A' => Some(0xe0f2fe),
        'F' => Some(0xfde68a),
        'G' => Some(0xfbbf24),
        'K' => Some(0xfb923c),
        'M' => Some(0xf97316),
        _ => None,
    });
    let hex = by_class.unwrap_or_else(|| match finite(record.star_temperature) {
        None => NEUTRAL_TINT,
        Some(t) if t < 3800.0 => 0xf97316,
        Some(t) if t < 5200.0 => 0xfb923c,
        Some(t) if t < 6000.0 => 0xfacc15,
        Some(t) if t < 7500.0 => 0xe0f2fe,
        Some(_) => 0x60a5fa,
    });
    hex_rgb(hex)
}

// ---------------------------------------------------------------------------
// Color helpers
// ---------------------------------------------------------------------------

fn lerp(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    Vec3::from_array(a).lerp(Vec3::from_array(b), t).to_array()
}

fn rgb_to_hsl([r, g, b]: [f32; 3]) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if max == min {
        return (0.0, 0.0, l);
    }
    let d = max - min;
    let s = if l <= 0.5 {
        d / (max + min)
    } else {
        d / (2.0 - max - min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    (h / 6.0, s, l)
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        return [l, l, l];
    }
    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

/// Shift hue, saturation and lightness; saturation and lightness clamp to [0, 1].
fn offset_hsl(color: [f32; 3], dh: f32, ds: f32, dl: f32) -> [f32; 3] {
    let (h, s, l) = rgb_to_hsl(color);
    hsl_to_rgb(h + dh, s + ds, l + dl)
}

// ---------------------------------------------------------------------------
// Atmosphere
// ---------------------------------------------------------------------------

/// Translucent shell drawn around a planet with an atmosphere.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AtmosphereShell {
    /// Additive tint.
    pub color: [f32; 3],
    /// Shell opacity.
    pub opacity: f32,
    /// Shell radius relative to the planet.
    pub scale: f32,
}

fn heat_factor(temperature_k: Option<f64>) -> f32 {
    temperature_k
        .filter(|t| t.is_finite())
        .map(|t| ((t - HEAT_MIN_K) / (HEAT_MAX_K - HEAT_MIN_K)).clamp(0.0, 1.0) as f32)
        .unwrap_or(0.0)
}

fn density_factor(density: Option<f64>) -> f32 {
    finite(density)
        .map(|d| ((d - 1.0) / 6.0).clamp(0.0, 1.0) as f32)
        .unwrap_or(0.5)
}

fn insolation_factor(insolation: Option<f64>) -> f32 {
    finite(insolation)
        .filter(|s| *s > 0.0)
        .map(|s| ((s + 1.0).log10() / 60f64.log10()).clamp(0.0, 1.0) as f32)
        .unwrap_or(0.0)
}

/// Atmosphere shell for a classified record, `None` for airless planets.
pub fn atmosphere_shell(
    record: &PhysicalRecord,
    classification: &VisualClassification,
) -> Option<AtmosphereShell> {
    let thick = match classification.atmosphere {
        Atmosphere::None => return None,
        Atmosphere::Thin => false,
        Atmosphere::Thick => true,
    };

    let mut color = lerp(
        band_color(classification.temperature_band),
        star_tint(record),
        STAR_TINT_WEIGHT,
    );

    let heat = heat_factor(classification.equilibrium_temperature);
    if heat > 0.0 {
        color = lerp(color, hex_rgb(HEAT_TINT), heat * 0.25);
        color = offset_hsl(color, 0.0, heat * 0.08, heat * 0.12);
    }

    let density = density_factor(record.density);
    color = offset_hsl(color, 0.0, (density - 0.5) * 0.12, (0.3 - density) * 0.08);

    let flux = insolation_factor(record.insolation);
    if flux > 0.0 {
        color = lerp(color, hex_rgb(FLUX_TINT), flux * 0.18);
    }

    let (base_opacity, scale) = if thick { (0.32, 1.2) } else { (0.18, 1.15) };
    Some(AtmosphereShell {
        color: color.map(|c| c.clamp(0.0, 1.0)),
        opacity: base_opacity + heat * 0.08 + flux * 0.05,
        scale,
    })
}

// ---------------------------------------------------------------------------
// Surface material
// ---------------------------------------------------------------------------

/// Physically based material parameters of the planet body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SurfaceMaterial {
    /// Albedo multiplier; white when a color map is bound.
    pub color: [f32; 3],
    /// Texture set, if the planet is textured.
    pub textures: Option<TextureAssets>,
    /// Vertex displacement; zero without a displacement map.
    pub displacement_scale: f32,
    /// Width and height segments of the sphere mesh.
    pub sphere_segments: u32,
    /// Roughness factor.
    pub roughness: f32,
    /// Metalness factor.
    pub metalness: f32,
    /// Emissive color.
    pub emissive: [f32; 3],
    /// Emissive intensity.
    pub emissive_intensity: f32,
}

fn displacement_base(planet_type: PlanetType) -> f32 {
    match planet_type {
        PlanetType::Rocky => 0.028,
        PlanetType::Lava => 0.022,
        PlanetType::Ocean => 0.018,
        PlanetType::Ice => 0.02,
        PlanetType::Gas => 0.012,
    }
}

/// Material for a planet body. `textures` is `None` for the untextured path.
pub fn surface_material(
    planet_type: PlanetType,
    textures: Option<&TextureAssets>,
    displacement_multiplier: f32,
) -> SurfaceMaterial {
    let base = base_color(planet_type);
    let has_map = |pick: fn(&TextureAssets) -> bool| textures.is_some_and(pick);

    let (emissive, emissive_intensity) = if has_map(|t| t.emissive.is_some()) {
        (WHITE, 0.35)
    } else if textures.is_some() {
        (BLACK, 0.08)
    } else {
        (base, 0.35)
    };

    SurfaceMaterial {
        color: if textures.is_some() { WHITE } else { base },
        textures: textures.cloned(),
        displacement_scale: if has_map(|t| t.displacement.is_some()) {
            displacement_base(planet_type) * displacement_multiplier
        } else {
            0.0
        },
        sphere_segments: if planet_type == PlanetType::Gas { 120 } else { 180 },
        roughness: if has_map(|t| t.roughness.is_some()) {
            1.0
        } else {
            0.42
        },
        metalness: 0.25,
        emissive,
        emissive_intensity,
    }
}

/// Everything the renderer needs to draw one planet body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlanetAppearance {
    /// Untextured surface color.
    pub base_color: [f32; 3],
    /// Atmosphere shell, absent for airless planets.
    pub atmosphere: Option<AtmosphereShell>,
    /// Body material.
    pub material: SurfaceMaterial,
}

impl PlanetAppearance {
    /// Derive the appearance of a classified record.
    pub fn new(
        record: &PhysicalRecord,
        classification: &VisualClassification,
        textures: Option<&TextureAssets>,
        config: &ClassifierConfig,
    ) -> Self {
        Self {
            base_color: base_color(classification.planet_type),
            atmosphere: atmosphere_shell(record, classification),
            material: surface_material(
                classification.planet_type,
                textures,
                config.displacement_multiplier,
            ),
        }
    }
}
