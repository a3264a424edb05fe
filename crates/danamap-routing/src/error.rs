use thiserror::Error;

/// Errors returned by the routing client.
#[derive(Debug, Error)]
pub enum RoutingError {
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

    /// The service answered with a non-`Ok` code.
    #[error("routing service error {code}: {message}")]
    Api { code: String, message: String },

    /// No route exists between the requested waypoints.
    #[error("no route found between the requested waypoints")]
    NoRoute,

    /// A route needs at least an origin and a destination.
    #[error("route request needs at least 2 waypoints, got {got}")]
    NotEnoughWaypoints { got: usize },
}
