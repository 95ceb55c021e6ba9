//! The physical measurements of one catalog exoplanet.

use serde::{Deserialize, Serialize};

/// One exoplanet as measured, keyed by name.
///
/// Every measurement is optional. A missing value stays `None` all the way
/// through classification; it is never read as zero. Serde names follow the
/// exoplanet archive column names so cached catalogs round-trip unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicalRecord {
    /// Planet name, unique within a catalog.
    #[serde(rename = "pl_name")]
    pub name: String,
    /// Host star name.
    #[serde(rename = "hostname", default)]
    pub host_name: Option<String>,
    /// How the planet was discovered (transit, radial velocity, ...).
    #[serde(rename = "discoverymethod", default)]
    pub discovery_method: Option<String>,
    /// Discovery year.
    #[serde(rename = "disc_year", default)]
    pub discovery_year: Option<f64>,
    /// Orbital period in days.
    #[serde(rename = "pl_orbper", default)]
    pub orbital_period: Option<f64>,
    /// Planet radius in Earth radii.
    #[serde(rename = "pl_rade", default)]
    pub radius: Option<f64>,
    /// Planet mass in Earth masses.
    #[serde(rename = "pl_bmasse", default)]
    pub mass: Option<f64>,
    /// Insolation flux in Earth units.
    #[serde(rename = "pl_insol", default)]
    pub insolation: Option<f64>,
    /// Bulk density in g/cm³.
    #[serde(rename = "pl_dens", default)]
    pub density: Option<f64>,
    /// Equilibrium temperature in Kelvin.
    #[serde(rename = "pl_eqt", default)]
    pub equilibrium_temperature: Option<f64>,
    /// Orbital semi-major axis in AU.
    #[serde(rename = "pl_orbsmax", default)]
    pub semi_major_axis: Option<f64>,
    /// Host spectral type, e.g. "G2 V".
    #[serde(rename = "st_spectype", default)]
    pub spectral_type: Option<String>,
    /// Host effective temperature in Kelvin.
    #[serde(rename = "st_teff", default)]
    pub star_temperature: Option<f64>,
    /// Host radius in solar radii.
    #[serde(rename = "st_rad", default)]
    pub star_radius: Option<f64>,
    /// Host mass in solar masses.
    #[serde(rename = "st_mass", default)]
    pub star_mass: Option<f64>,
    /// Host luminosity in solar units.
    #[serde(rename = "st_lum", default)]
    pub star_luminosity: Option<f64>,
}

impl PhysicalRecord {
    /// A record with the given name and no measurements.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Leading spectral class letter (O, B, A, F, G, K, M, ...) in upper case.
    pub fn spectral_class(&self) -> Option<char> {
        self.spectral_type
            .as_deref()
            .and_then(|s| s.trim().chars().next())
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_uppercase())
    }
}

/// `Some(v)` only when `v` is a finite number.
pub(crate) fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
