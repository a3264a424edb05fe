//! OSRM HTTP adapter for driving routes.

use std::time::Duration;

use danamap_core::Coordinate;
use reqwest::Client;

use crate::error::RoutingError;
use crate::types::{OsrmRouteResponse, Route};

/// Connection settings for the routing client.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 30,
            user_agent: "danamap/0.1 (map-explorer)".to_string(),
        }
    }
}

/// Client for the OSRM `route/v1` API.
#[derive(Debug, Clone)]
pub struct RoutingClient {
    client: Client,
    config: RoutingConfig,
}

impl RoutingClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: RoutingConfig) -> Result<Self, RoutingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default settings pointed at `base_url`
    /// (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same conditions as [`RoutingClient::new`].
    pub fn with_base_url(base_url: &str) -> Result<Self, RoutingError> {
        Self::new(RoutingConfig {
            base_url: base_url.to_string(),
            ..RoutingConfig::default()
        })
    }

    /// Requests a route visiting `waypoints` in order.
    ///
    /// Returns the first (best) route with full geometry and turn steps.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::NotEnoughWaypoints`] below 2 waypoints.
    /// - [`RoutingError::NoRoute`] when the service finds no path.
    /// - [`RoutingError::Api`] for other non-`Ok` service codes.
    /// - [`RoutingError::Http`] / [`RoutingError::Deserialize`] on transport
    ///   or body-shape failures.
    pub async fn route(&self, waypoints: &[Coordinate]) -> Result<Route, RoutingError> {
        if waypoints.len() < 2 {
            return Err(RoutingError::NotEnoughWaypoints {
                got: waypoints.len(),
            });
        }

        // OSRM takes coordinates as lng,lat pairs joined by semicolons.
        let coords = waypoints
            .iter()
            .map(|c| format!("{:.6},{:.6}", c.lng, c.lat))
            .collect::<Vec<_>>()
            .join(";");
        let url = format!(
            "{}/route/v1/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        );

        tracing::debug!(%url, "routing request");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("overview", "full"),
                ("geometries", "geojson"),
                ("steps", "true"),
            ])
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        let parsed: OsrmRouteResponse =
            serde_json::from_str(&body).map_err(|e| RoutingError::Deserialize {
                context: url.clone(),
                source: e,
            })?;

        if parsed.code != "Ok" {
            if parsed.code == "NoRoute" {
                return Err(RoutingError::NoRoute);
            }
            return Err(RoutingError::Api {
                code: parsed.code,
                message: parsed.message.unwrap_or_default(),
            });
        }

        parsed
            .routes
            .into_iter()
            .next()
            .map(Route::from)
            .ok_or(RoutingError::NoRoute)
    }
}
