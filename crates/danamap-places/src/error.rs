use thiserror::Error;

/// Errors returned by the place repository client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The district record carries no boundary geometry.
    #[error("district '{district}' has no boundary geometry")]
    MissingGeometry { district: String },

    /// The district's `geom` field is not parseable GeoJSON geometry.
    #[error("malformed boundary geometry for district '{district}': {reason}")]
    BadGeometry { district: String, reason: String },

    /// A request URL could not be built from the configured base URL.
    #[error("invalid URL: {0}")]
    Url(String),
}

impl PlacesError {
    /// `true` when the failure is a malformed-response class (zero results
    /// plus a visible notice) rather than a network-level one.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::Deserialize { .. } | Self::MissingGeometry { .. } | Self::BadGeometry { .. }
        )
    }
}
