//! Administrative district types.

use serde::{Deserialize, Serialize};

use crate::geo::{self, BoundingBox};

/// One entry of the district picker, from `GET /api/districts/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictInfo {
    pub id: i64,
    pub name: String,
}

/// A district boundary polygon.
///
/// Fetched on demand, one at a time; a district change supersedes (never
/// merges) the previous boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictBoundary {
    pub name: String,
    pub geometry: geo_types::Geometry<f64>,
}

impl DistrictBoundary {
    /// Envelope of the boundary polygon, for camera fitting.
    pub fn bounds(&self) -> Option<BoundingBox> {
        geo::bounds_for_geometry(&self.geometry)
    }
}
