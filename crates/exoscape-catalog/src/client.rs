//! Blocking HTTP client for the exoplanet archive's TAP service.

use std::time::Duration;

use exoscape_classify::PhysicalRecord;
use exoscape_config::CatalogConfig;

use crate::coerce::parse_records;
use crate::error::CatalogError;

/// Archive columns requested for every planet.
pub const TAP_COLUMNS: &[&str] = &[
    "pl_name",
    "hostname",
    "discoverymethod",
    "disc_year",
    "pl_orbper",
    "pl_rade",
    "pl_bmasse",
    "st_spectype",
    "st_teff",
    "st_rad",
    "st_mass",
    "pl_insol",
    "pl_dens",
    "pl_eqt",
    "pl_orbsmax",
    "st_lum",
];

/// ADQL query for the newest `row_limit` default-parameter planets.
pub fn tap_query(row_limit: u32) -> String {
    format!(
        "SELECT TOP {row_limit} {} FROM ps WHERE default_flag=1 ORDER BY disc_year DESC, pl_name",
        TAP_COLUMNS.join(", ")
    )
}

/// Fetches planet rows from a TAP `sync` endpoint.
pub struct CatalogClient {
    agent: ureq::Agent,
    endpoint: String,
    row_limit: u32,
}

impl CatalogClient {
    /// Create a client for the endpoint, row limit and timeout in `config`.
    pub fn new(config: &CatalogConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build();
        Self {
            agent,
            endpoint: config.endpoint.clone(),
            row_limit: config.row_limit,
        }
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run the query and coerce every returned row.
    ///
    /// Non-success statuses become [`CatalogError::Http`]; the caller never
    /// receives a partial list.
    pub fn fetch(&self) -> Result<Vec<PhysicalRecord>, CatalogError> {
        let query = tap_query(self.row_limit);
        log::info!("Fetching up to {} planets from {}", self.row_limit, self.endpoint);

        let response = self
            .agent
            .get(&self.endpoint)
            .query("query", &query)
            .query("format", "json")
            .call()?;

        let body = response.into_string().map_err(CatalogError::ReadError)?;
        let records = parse_records(&body)?;
        log::info!("Fetched {} planets", records.len());
        Ok(records)
    }
}
