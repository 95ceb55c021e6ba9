//! Coercion of loosely typed archive rows into [`PhysicalRecord`]s.
//!
//! The archive mixes numbers, numeric strings, empty strings and nulls in the
//! same column. Every measurement is coerced to `Option<f64>`: anything that
//! is not a finite number becomes `None`.

use exoscape_classify::PhysicalRecord;
use serde_json::Value;

use crate::error::CatalogError;

/// Name given to rows without a usable `pl_name`.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Coerce a JSON value to a finite number.
///
/// Null, empty or blank strings, non-numeric strings, non-finite values and
/// non-scalar values all yield `None`. Numeric strings are parsed.
pub fn to_nullable_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Coerce a JSON value to a string. Null and empty strings yield `None`;
/// numbers and booleans are rendered as text.
pub fn to_nullable_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Build a record from one archive row.
pub fn record_from_row(row: &Value) -> PhysicalRecord {
    let num = |key: &str| to_nullable_number(row.get(key));
    let text = |key: &str| to_nullable_string(row.get(key));

    PhysicalRecord {
        name: text("pl_name").unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        host_name: text("hostname"),
        discovery_method: text("discoverymethod"),
        discovery_year: num("disc_year"),
        orbital_period: num("pl_orbper"),
        radius: num("pl_rade"),
        mass: num("pl_bmasse"),
        insolation: num("pl_insol"),
        density: num("pl_dens"),
        equilibrium_temperature: num("pl_eqt"),
        semi_major_axis: num("pl_orbsmax"),
        spectral_type: text("st_spectype"),
        star_temperature: num("st_teff"),
        star_radius: num("st_rad"),
        star_mass: num("st_mass"),
        star_luminosity: num("st_lum"),
    }
}

/// Decode a JSON array of archive rows.
pub fn parse_records(json: &str) -> Result<Vec<PhysicalRecord>, CatalogError> {
    let payload: Value = serde_json::from_str(json).map_err(CatalogError::DecodeError)?;
    let rows = payload.as_array().ok_or(CatalogError::NotAnArray)?;
    Ok(rows.iter().map(record_from_row).collect())
}
