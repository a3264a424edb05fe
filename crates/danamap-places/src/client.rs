//! HTTP client for the place repository REST API.
//!
//! All list endpoints go through [`PlacesClient::request_json`], which
//! retries transient failures with back-off and surfaces typed errors.
//! Construct with [`PlacesClient::with_base_url`] to point at a mock server
//! in tests.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use danamap_core::{AppConfig, Category, Coordinate, DistrictBoundary, DistrictInfo, Place, Suggestion};

use crate::error::PlacesError;
use crate::normalize;
use crate::retry::retry_with_backoff;
use crate::types::{ListResponse, RawDistrictDetail, RawPlace};

/// Connection settings for the repository client.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Maximum number of retry attempts after the first failure.
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            user_agent: "danamap/0.1 (map-explorer)".to_string(),
            max_retries: 3,
            retry_backoff_base_ms: 1_000,
        }
    }
}

impl PlacesConfig {
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            base_url: config.places_base_url.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_retries: config.max_retries,
            retry_backoff_base_ms: config.retry_backoff_base_ms,
        }
    }
}

/// Client for the place repository REST API.
pub struct PlacesClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl PlacesClient {
    /// Creates a new client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::Url`] if `base_url` is not a
    /// valid URL.
    pub fn new(config: PlacesConfig) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // path joins append segments instead of replacing the last one.
        let normalised = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| PlacesError::Url(format!("'{}': {e}", config.base_url)))?;

        Ok(Self {
            client,
            base_url,
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
        })
    }

    /// Creates a client with default settings pointed at `base_url`
    /// (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same conditions as [`PlacesClient::new`].
    pub fn with_base_url(base_url: &str) -> Result<Self, PlacesError> {
        Self::new(PlacesConfig {
            base_url: base_url.to_string(),
            ..PlacesConfig::default()
        })
    }

    /// Free-text suggestion query.
    ///
    /// The caller is responsible for the minimum-length rule; this method
    /// always issues the request.
    ///
    /// # Errors
    ///
    /// [`PlacesError::Http`] on network failure or non-2xx status,
    /// [`PlacesError::Deserialize`] on an unexpected body shape.
    pub async fn suggest(&self, text: &str, limit: u32) -> Result<Vec<Suggestion>, PlacesError> {
        let url = self.locations_url(&[("search", text), ("limit", &limit.to_string())])?;
        let raw = self.get_place_list(&url).await?;
        Ok(raw.into_iter().map(normalize::normalize_suggestion).collect())
    }

    /// Places of one category, annotated with distance from `near`.
    ///
    /// # Errors
    ///
    /// [`PlacesError::Http`] on network failure or non-2xx status,
    /// [`PlacesError::Deserialize`] on an unexpected body shape.
    pub async fn find_by_category(
        &self,
        category: Category,
        near: Coordinate,
    ) -> Result<Vec<Place>, PlacesError> {
        let url = self.locations_url(&[
            ("tourism_type", category.as_wire()),
            ("nearby", "true"),
            ("lat", &near.lat.to_string()),
            ("lng", &near.lng.to_string()),
            ("all", "true"),
        ])?;
        self.get_places(&url).await
    }

    /// Places within the named district.
    ///
    /// # Errors
    ///
    /// [`PlacesError::Http`] on network failure or non-2xx status,
    /// [`PlacesError::Deserialize`] on an unexpected body shape.
    pub async fn find_in_district(&self, district: &str) -> Result<Vec<Place>, PlacesError> {
        let url = self.locations_url(&[("district", district), ("all", "true")])?;
        self.get_places(&url).await
    }

    /// Places within `radius_km` of `near`, annotated with distance.
    ///
    /// # Errors
    ///
    /// [`PlacesError::Http`] on network failure or non-2xx status,
    /// [`PlacesError::Deserialize`] on an unexpected body shape.
    pub async fn find_within_radius(
        &self,
        near: Coordinate,
        radius_km: u32,
    ) -> Result<Vec<Place>, PlacesError> {
        let url = self.locations_url(&[
            ("nearby", "true"),
            ("lat", &near.lat.to_string()),
            ("lng", &near.lng.to_string()),
            ("radius", &radius_km.to_string()),
            ("all", "true"),
        ])?;
        self.get_places(&url).await
    }

    /// The district catalog for the picker.
    ///
    /// # Errors
    ///
    /// [`PlacesError::Http`] on network failure or non-2xx status,
    /// [`PlacesError::Deserialize`] on an unexpected body shape.
    pub async fn districts(&self) -> Result<Vec<DistrictInfo>, PlacesError> {
        let url = self.endpoint(&["api", "districts"])?;
        let body = self.request_json(&url).await?;
        let list: ListResponse<DistrictInfo> = decode(body, url.as_str())?;
        Ok(list.into_results())
    }

    /// The boundary polygon of a named district.
    ///
    /// # Errors
    ///
    /// [`PlacesError::MissingGeometry`] when the record has no `geom`,
    /// [`PlacesError::BadGeometry`] when the GeoJSON does not parse, plus the
    /// usual HTTP/deserialization failures.
    pub async fn district_boundary(&self, name: &str) -> Result<DistrictBoundary, PlacesError> {
        let url = self.endpoint(&["api", "districts", name])?;
        let body = self.request_json(&url).await?;
        let detail: RawDistrictDetail = decode(body, url.as_str())?;
        let geom = detail
            .geom
            .filter(|g| !g.trim().is_empty())
            .ok_or_else(|| PlacesError::MissingGeometry {
                district: name.to_owned(),
            })?;
        normalize::parse_boundary(&detail.name, &geom)
    }

    /// Full record for one place.
    ///
    /// # Errors
    ///
    /// [`PlacesError::Http`] on network failure or non-2xx status,
    /// [`PlacesError::Deserialize`] on an unexpected body shape.
    pub async fn place_detail(&self, id: i64) -> Result<Place, PlacesError> {
        let url = self.endpoint(&["api", "locations", &id.to_string()])?;
        let body = self.request_json(&url).await?;
        let raw: RawPlace = decode(body, url.as_str())?;
        Ok(normalize::normalize_place(raw))
    }

    async fn get_places(&self, url: &Url) -> Result<Vec<Place>, PlacesError> {
        let raw = self.get_place_list(url).await?;
        Ok(raw.into_iter().map(normalize::normalize_place).collect())
    }

    async fn get_place_list(&self, url: &Url) -> Result<Vec<RawPlace>, PlacesError> {
        let body = self.request_json(url).await?;
        let list: ListResponse<RawPlace> = decode(body, url.as_str())?;
        Ok(list.into_results())
    }

    /// `/api/locations/` with query parameters, percent-encoded.
    fn locations_url(&self, params: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self.endpoint(&["api", "locations"])?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Builds `{base}/{segments.join('/')}/`, encoding each segment. The
    /// repository routes all carry a trailing slash.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, PlacesError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| PlacesError::Url(format!("cannot-be-a-base URL: {}", self.base_url)))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
            path.push("");
        }
        Ok(url)
    }

    /// Sends a GET request with retry, asserts a 2xx status, and parses the
    /// body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, PlacesError> {
        tracing::debug!(%url, "place repository request");
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self.client.get(url.clone()).send().await?;
            let response = response.error_for_status()?;
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: url.to_string(),
                source: e,
            })
        })
        .await
    }
}

fn decode<T: DeserializeOwned>(body: serde_json::Value, context: &str) -> Result<T, PlacesError> {
    serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}
