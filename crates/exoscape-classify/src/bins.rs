//! Quantization and hashing for stable texture selection.
//!
//! Continuous measurements are floored into fixed-width bins and joined into a
//! key string. The key is hashed with 32-bit FNV-1a, so two records that land
//! in the same bins always hash to the same value on every run and platform.

use exoscape_config::BinSteps;

use crate::record::{PhysicalRecord, finite};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Token used for a measurement that is absent or not a finite number.
pub const MISSING: &str = "na";

/// Floor `value / step` into a bin index.
///
/// Returns `None` for absent or non-finite input and for a non-positive step.
pub fn quantize(value: Option<f64>, step: f64) -> Option<i64> {
    let value = finite(value)?;
    if !(step.is_finite() && step > 0.0) {
        return None;
    }
    let bin = (value / step).floor();
    bin.is_finite().then_some(bin as i64)
}

/// 32-bit FNV-1a over the UTF-8 bytes of `key`.
pub fn fnv1a_32(key: &str) -> u32 {
    key.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

fn token(value: Option<f64>, step: f64) -> String {
    match quantize(value, step) {
        Some(bin) => bin.to_string(),
        None => MISSING.to_string(),
    }
}

/// Bin tokens of the planet's own measurements, joined with `|`.
///
/// The temperature bin uses the measured equilibrium temperature only; a
/// derived estimate would let records inside one insolation bin straddle two
/// temperature bins.
pub fn planet_bins(record: &PhysicalRecord, steps: &BinSteps) -> String {
    format!(
        "r{}|m{}|d{}|t{}|a{}|s{}",
        token(record.radius, steps.radius),
        token(record.mass, steps.mass),
        token(record.density, steps.density),
        token(record.equilibrium_temperature, steps.equilibrium_temperature),
        token(record.semi_major_axis, steps.semi_major_axis),
        token(record.insolation, steps.insolation),
    )
}

/// Compound host-star bin: temperature, radius, mass, luminosity, class letter.
pub fn star_bin(record: &PhysicalRecord, steps: &BinSteps) -> String {
    let class = record
        .spectral_class()
        .map(String::from)
        .unwrap_or_else(|| MISSING.to_string());
    format!(
        "{}/{}/{}/{}/{}",
        token(record.star_temperature, steps.star_temperature),
        token(record.star_radius, steps.star_radius),
        token(record.star_mass, steps.star_mass),
        token(record.star_luminosity, steps.star_luminosity),
        class,
    )
}
