//! Local JSON copy of the catalog.
//!
//! The file holds the same array-of-rows shape the archive returns, so a raw
//! archive dump can be used as a cache directly.

use std::path::Path;

use exoscape_classify::PhysicalRecord;

use crate::coerce::parse_records;
use crate::error::CatalogError;

/// Read records from a cache file.
pub fn load_cache(path: &Path) -> Result<Vec<PhysicalRecord>, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(CatalogError::ReadError)?;
    let records = parse_records(&contents)?;
    log::info!("Loaded {} planets from {}", records.len(), path.display());
    Ok(records)
}

/// Write records to a cache file, creating parent directories as needed.
pub fn save_cache(path: &Path, records: &[PhysicalRecord]) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(CatalogError::WriteError)?;
    }
    let json = serde_json::to_string_pretty(records).map_err(CatalogError::EncodeError)?;
    std::fs::write(path, json).map_err(CatalogError::WriteError)?;
    log::debug!("Cached {} planets at {}", records.len(), path.display());
    Ok(())
}
