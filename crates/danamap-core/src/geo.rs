//! Geospatial utilities: great-circle distance and bounds computation.
//!
//! Every distance used for display or sorting funnels through this module,
//! including the absent-coordinate-to-infinity rule, so sort behavior stays
//! uniform across all call sites.

use geo::BoundingRect;

use crate::place::Coordinate;

/// Mean Earth radius in meters, as used by the repository's distance
/// annotations.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine great-circle distance between two coordinates, in meters.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Distance in meters, `+∞` when either side is absent.
///
/// Sorting by this value pushes places without a coordinate to the end of a
/// list instead of crashing or interleaving them.
pub fn distance_meters_opt(a: Option<Coordinate>, b: Option<Coordinate>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => distance_meters(a, b),
        _ => f64::INFINITY,
    }
}

/// A geographic bounding box in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn from_point(c: Coordinate) -> Self {
        Self {
            south: c.lat,
            west: c.lng,
            north: c.lat,
            east: c.lng,
        }
    }

    /// Grows the box to include `c`.
    pub fn extend(&mut self, c: Coordinate) {
        self.south = self.south.min(c.lat);
        self.west = self.west.min(c.lng);
        self.north = self.north.max(c.lat);
        self.east = self.east.max(c.lng);
    }

    pub fn center(&self) -> Coordinate {
        Coordinate {
            lat: (self.south + self.north) / 2.0,
            lng: (self.west + self.east) / 2.0,
        }
    }
}

/// Bounds containing every coordinate in `points`, or `None` when the input
/// is empty — callers fall back to the default view.
pub fn bounds_for<I>(points: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = Coordinate>,
{
    let mut bounds: Option<BoundingBox> = None;
    for point in points {
        match bounds.as_mut() {
            Some(b) => b.extend(point),
            None => bounds = Some(BoundingBox::from_point(point)),
        }
    }
    bounds
}

/// Envelope of a polygon (or any geometry), or `None` for empty geometry.
pub fn bounds_for_geometry(geometry: &geo_types::Geometry<f64>) -> Option<BoundingBox> {
    geometry.bounding_rect().map(|rect| BoundingBox {
        south: rect.min().y,
        west: rect.min().x,
        north: rect.max().y,
        east: rect.max().x,
    })
}

/// Human-readable distance: meters below 1 km, otherwise one-decimal
/// kilometers. Non-finite values (absent coordinate) render as a dash.
pub fn format_distance(meters: f64) -> String {
    if !meters.is_finite() {
        return "—".to_owned();
    }
    if meters < 1000.0 {
        format!("{} m", meters.round() as i64)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}
