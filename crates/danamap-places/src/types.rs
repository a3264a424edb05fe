//! Wire types mirroring the place repository's JSON output.

use serde::Deserialize;

/// `geom` object of a location record. Components may be independently
/// absent; a partial position normalizes to no coordinate at all.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGeom {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub image_order: Option<i32>,
}

/// A location record as serialized by the repository.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlace {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub name_vi: Option<String>,
    #[serde(default)]
    pub tourism_type: Option<String>,
    #[serde(default)]
    pub geom: Option<RawGeom>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    #[serde(default)]
    pub images: Vec<RawImage>,
    #[serde(default)]
    pub embed_url: Option<String>,
    /// Present only on proximity queries.
    #[serde(default)]
    pub distance: Option<f64>,
}

/// District detail record; `geom` is GeoJSON-as-string.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDistrictDetail {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub geom: Option<String>,
}

/// List endpoints answer either paginated or as a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated { results: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn into_results(self) -> Vec<T> {
        match self {
            Self::Paginated { results } | Self::Bare(results) => results,
        }
    }
}
