//! Route domain types and OSRM wire shapes.

use danamap_core::Coordinate;
use serde::Deserialize;

/// A driving route as decoded coordinates plus turn instructions.
///
/// Geometry is stored as decoded lat/lng points; polyline encoding stays at
/// the API boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub points: Vec<Coordinate>,
    pub distance_meters: f64,
    pub duration_secs: f64,
    pub turns: Vec<Turn>,
}

/// One turn instruction along a route.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    /// Road name, possibly empty for unnamed segments.
    pub road: String,
    /// Maneuver kind from the service (`depart`, `turn`, `arrive`, ...).
    pub maneuver: String,
    /// Maneuver direction (`left`, `right`, ...), when the kind has one.
    pub modifier: Option<String>,
    pub distance_meters: f64,
}

// --- OSRM wire shapes -------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmRouteResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmRoute {
    pub distance: f64,
    pub duration: f64,
    pub geometry: OsrmGeometry,
    #[serde(default)]
    pub legs: Vec<OsrmLeg>,
}

/// GeoJSON LineString geometry; coordinates arrive `[lng, lat]`.
#[derive(Debug, Deserialize)]
pub(crate) struct OsrmGeometry {
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmLeg {
    #[serde(default)]
    pub steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmStep {
    #[serde(default)]
    pub name: String,
    pub distance: f64,
    pub maneuver: OsrmManeuver,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmManeuver {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub modifier: Option<String>,
}

impl From<OsrmRoute> for Route {
    fn from(raw: OsrmRoute) -> Self {
        let points = raw
            .geometry
            .coordinates
            .into_iter()
            .filter_map(|[lng, lat]| Coordinate::new(lat, lng))
            .collect();
        let turns = raw
            .legs
            .into_iter()
            .flat_map(|leg| leg.steps)
            .map(|step| Turn {
                road: step.name,
                maneuver: step.maneuver.kind,
                modifier: step.maneuver.modifier,
                distance_meters: step.distance,
            })
            .collect();
        Self {
            points,
            distance_meters: raw.distance,
            duration_secs: raw.duration,
            turns,
        }
    }
}
