//! Texture pools and the texture asset table.
//!
//! A pool lists the texture keys a planet of a given (type, band) may wear.
//! The asset table maps each key to the image files that make up its surface
//! material. Both are static; lookups never fail.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::classifier::{PlanetType, TemperatureBand};

/// Key used when a pool is empty everywhere or a key is unknown.
pub const DEFAULT_TEXTURE_KEY: &str = "rock_cracked_01";

const DEFAULT_POOL: &[&str] = &[DEFAULT_TEXTURE_KEY];

// ---------------------------------------------------------------------------
// Pools
// ---------------------------------------------------------------------------

/// Raw pool for a (type, band) pair. May be empty.
///
/// No texture set is authored for the inferno band; those pairs resolve
/// through the fallback chain of [`texture_pool`].
fn raw_pool(planet_type: PlanetType, band: TemperatureBand) -> &'static [&'static str] {
    use PlanetType as P;
    use TemperatureBand as B;
    match (planet_type, band) {
        (P::Rocky, B::Cold) => &["frozen_rock_01", "ice_patch_03"],
        (P::Rocky, B::Temperate) => &["rock_cracked_01", "soil_dry_02"],
        (P::Rocky, B::Hot) => &["lava_rock_02", "volcanic_ash_01"],
        (P::Rocky, B::Inferno) => &[],

        (P::Lava, B::Cold | B::Temperate) => &[],
        (P::Lava, B::Hot) => &["lava_surface_01", "basalt_glow_02"],
        (P::Lava, B::Inferno) => &[],

        (P::Ocean, B::Cold) => &["frozen_ocean_01"],
        (P::Ocean, B::Temperate) => &["blue_ocean_02", "wet_rock_01"],
        (P::Ocean, B::Hot) => &["boiling_ocean_01"],
        (P::Ocean, B::Inferno) => &[],

        (P::Ice, B::Cold) => &["snow_field_01", "ice_crust_03"],
        (P::Ice, B::Temperate) => &["glacier_surface_02"],
        (P::Ice, B::Hot) => &["melting_ice_01"],
        (P::Ice, B::Inferno) => &[],

        (P::Gas, B::Cold) => &["blue_giant_01"],
        (P::Gas, B::Temperate) => &["saturn_bands_01"],
        (P::Gas, B::Hot) => &["jupiter_bands_01", "brown_swirl_02"],
        (P::Gas, B::Inferno) => &[],
    }
}

/// Texture pool for a (type, band) pair, never empty.
///
/// An empty pool falls back to the type's temperate pool, then to the type's
/// first non-empty pool in band order, then to [`DEFAULT_TEXTURE_KEY`].
pub fn texture_pool(planet_type: PlanetType, band: TemperatureBand) -> &'static [&'static str] {
    let exact = raw_pool(planet_type, band);
    if !exact.is_empty() {
        return exact;
    }
    let temperate = raw_pool(planet_type, TemperatureBand::Temperate);
    if !temperate.is_empty() {
        return temperate;
    }
    TemperatureBand::ALL
        .iter()
        .map(|b| raw_pool(planet_type, *b))
        .find(|pool| !pool.is_empty())
        .unwrap_or(DEFAULT_POOL)
}

// ---------------------------------------------------------------------------
// Asset table
// ---------------------------------------------------------------------------

/// Which optional maps a texture set ships with.
struct AssetEntry {
    key: &'static str,
    normal: bool,
    roughness: bool,
    emissive: bool,
    displacement: bool,
}

const fn solid(key: &'static str) -> AssetEntry {
    AssetEntry {
        key,
        normal: true,
        roughness: true,
        emissive: false,
        displacement: true,
    }
}

const fn glowing(key: &'static str) -> AssetEntry {
    AssetEntry {
        key,
        normal: true,
        roughness: true,
        emissive: true,
        displacement: true,
    }
}

const fn liquid(key: &'static str) -> AssetEntry {
    AssetEntry {
        key,
        normal: true,
        roughness: true,
        emissive: false,
        displacement: false,
    }
}

const fn banded(key: &'static str, emissive: bool) -> AssetEntry {
    AssetEntry {
        key,
        normal: false,
        roughness: false,
        emissive,
        displacement: false,
    }
}

const ASSET_TABLE: &[AssetEntry] = &[
    solid("frozen_rock_01"),
    solid("ice_patch_03"),
    solid("rock_cracked_01"),
    solid("soil_dry_02"),
    glowing("lava_rock_02"),
    solid("volcanic_ash_01"),
    glowing("lava_surface_01"),
    glowing("basalt_glow_02"),
    liquid("frozen_ocean_01"),
    liquid("blue_ocean_02"),
    solid("wet_rock_01"),
    liquid("boiling_ocean_01"),
    solid("snow_field_01"),
    solid("ice_crust_03"),
    solid("glacier_surface_02"),
    liquid("melting_ice_01"),
    banded("blue_giant_01", false),
    banded("saturn_bands_01", false),
    banded("jupiter_bands_01", false),
    banded("brown_swirl_02", false),
];

/// Image files of one surface texture set.
///
/// Paths are relative to the texture root until [`TextureAssets::rooted`] is
/// applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextureAssets {
    /// Key the set was resolved for (the default key after a fallback).
    pub key: String,
    /// Base color map.
    pub color: PathBuf,
    /// Tangent-space normal map.
    pub normal: Option<PathBuf>,
    /// Roughness map.
    pub roughness: Option<PathBuf>,
    /// Emissive map.
    pub emissive: Option<PathBuf>,
    /// Height map for vertex displacement.
    pub displacement: Option<PathBuf>,
}

impl TextureAssets {
    fn from_entry(entry: &AssetEntry) -> Self {
        let dir = Path::new("textures").join(entry.key);
        let map = |present: bool, file: &str| present.then(|| dir.join(file));
        Self {
            key: entry.key.to_string(),
            color: dir.join("albedo.jpg"),
            normal: map(entry.normal, "normal.jpg"),
            roughness: map(entry.roughness, "roughness.jpg"),
            emissive: map(entry.emissive, "emissive.jpg"),
            displacement: map(entry.displacement, "displacement.jpg"),
        }
    }

    /// The same set with every path prefixed by `root`.
    pub fn rooted(&self, root: &Path) -> Self {
        let join = |p: &Option<PathBuf>| p.as_ref().map(|p| root.join(p));
        Self {
            key: self.key.clone(),
            color: root.join(&self.color),
            normal: join(&self.normal),
            roughness: join(&self.roughness),
            emissive: join(&self.emissive),
            displacement: join(&self.displacement),
        }
    }

    /// Every path in the set, color map first.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.color.as_path()).chain(
            [
                &self.normal,
                &self.roughness,
                &self.emissive,
                &self.displacement,
            ]
            .into_iter()
            .filter_map(|p| p.as_deref()),
        )
    }
}

fn find_entry(key: &str) -> Option<&'static AssetEntry> {
    ASSET_TABLE.iter().find(|e| e.key == key)
}

/// Resolve a texture key to its asset set. Unknown keys resolve to the
/// default key's set.
pub fn texture_assets(key: &str) -> TextureAssets {
    match find_entry(key).or_else(|| find_entry(DEFAULT_TEXTURE_KEY)) {
        Some(entry) => TextureAssets::from_entry(entry),
        None => TextureAssets::from_entry(&solid(DEFAULT_TEXTURE_KEY)),
    }
}
