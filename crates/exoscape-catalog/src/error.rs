//! Catalog error types.

/// Errors raised while fetching, decoding or caching the exoplanet catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The archive answered with a non-success status.
    #[error("failed to load exoplanets: {status} {status_text}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Reason phrase sent with the status.
        status_text: String,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("failed to reach the exoplanet archive: {0}")]
    Transport(String),

    /// The response body or cache file could not be read.
    #[error("failed to read catalog: {0}")]
    ReadError(#[source] std::io::Error),

    /// The cache file could not be written.
    #[error("failed to write catalog cache: {0}")]
    WriteError(#[source] std::io::Error),

    /// The payload is not JSON.
    #[error("failed to decode catalog: {0}")]
    DecodeError(#[source] serde_json::Error),

    /// Records could not be serialized for the cache.
    #[error("failed to encode catalog cache: {0}")]
    EncodeError(#[source] serde_json::Error),

    /// The payload is JSON but not an array of rows.
    #[error("catalog payload is not a JSON array of rows")]
    NotAnArray,
}

impl From<ureq::Error> for CatalogError {
    fn from(error: ureq::Error) -> Self {
        match error {
            ureq::Error::Status(status, response) => CatalogError::Http {
                status,
                status_text: response.status_text().to_string(),
            },
            ureq::Error::Transport(transport) => CatalogError::Transport(transport.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message() {
        let err = CatalogError::Http {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load exoplanets: 503 Service Unavailable"
        );
    }
}
