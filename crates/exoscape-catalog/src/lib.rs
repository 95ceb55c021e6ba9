//! Exoplanet catalog input boundary.
//!
//! Fetches planet rows from the NASA Exoplanet Archive (or a local JSON
//! cache), coerces them into [`PhysicalRecord`]s, and tracks the load
//! lifecycle. Nothing downstream ever sees a partial list: a load either
//! yields every row or fails with a [`CatalogError`].

pub mod cache;
pub mod client;
pub mod coerce;
pub mod error;
pub mod state;
pub mod summary;

pub use cache::{load_cache, save_cache};
pub use client::{CatalogClient, TAP_COLUMNS, tap_query};
pub use coerce::{
    UNKNOWN_NAME, parse_records, record_from_row, to_nullable_number, to_nullable_string,
};
pub use error::CatalogError;
pub use state::CatalogState;
pub use summary::{Metric, NOT_AVAILABLE, PlanetSummary, format_metric};

use exoscape_classify::PhysicalRecord;
use exoscape_config::CatalogConfig;

/// Load the catalog the way `config` asks.
///
/// An existing cache file is read instead of the network. Otherwise the
/// archive is queried, and the result written to the cache file if one is
/// configured. A failed cache write is logged, not returned.
pub fn load_catalog(config: &CatalogConfig) -> Result<Vec<PhysicalRecord>, CatalogError> {
    if let Some(path) = config.cache_file.as_deref()
        && path.exists()
    {
        return load_cache(path);
    }

    let records = CatalogClient::new(config).fetch()?;

    if let Some(path) = config.cache_file.as_deref()
        && let Err(e) = save_cache(path, &records)
    {
        log::warn!("Could not cache catalog at {}: {e}", path.display());
    }
    Ok(records)
}
