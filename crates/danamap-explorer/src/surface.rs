//! The shared map surface: one typed slot per overlay class.
//!
//! Layer discipline: markers, boundary, and circle are written by the view
//! sync, the route slot only by the route controller, the panorama slot only
//! by the selection sync. Each writer removes exactly what it previously
//! added — setting a slot replaces its previous content, so at most one
//! layer per class ever exists.

use danamap_core::{Coordinate, DistrictBoundary};

/// A rendered place marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub place_id: i64,
    pub coordinate: Coordinate,
    /// Markers for places with a panorama embed get the custom icon.
    pub has_panorama: bool,
}

/// The radius overlay drawn around the fixed origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusCircle {
    pub center: Coordinate,
    pub radius_meters: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapSurface {
    markers: Vec<Marker>,
    boundary: Option<DistrictBoundary>,
    circle: Option<RadiusCircle>,
    route: Option<Vec<Coordinate>>,
    panorama: Option<String>,
}

impl MapSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn set_markers(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
    }

    pub fn clear_markers(&mut self) {
        self.markers.clear();
    }

    pub fn boundary(&self) -> Option<&DistrictBoundary> {
        self.boundary.as_ref()
    }

    pub fn set_boundary(&mut self, boundary: DistrictBoundary) {
        self.boundary = Some(boundary);
    }

    pub fn clear_boundary(&mut self) {
        self.boundary = None;
    }

    pub fn circle(&self) -> Option<&RadiusCircle> {
        self.circle.as_ref()
    }

    pub fn set_circle(&mut self, circle: RadiusCircle) {
        self.circle = Some(circle);
    }

    pub fn clear_circle(&mut self) {
        self.circle = None;
    }

    pub fn route(&self) -> Option<&[Coordinate]> {
        self.route.as_deref()
    }

    pub fn set_route(&mut self, points: Vec<Coordinate>) {
        self.route = Some(points);
    }

    pub fn clear_route(&mut self) {
        self.route = None;
    }

    pub fn panorama(&self) -> Option<&str> {
        self.panorama.as_deref()
    }

    pub fn set_panorama(&mut self, embed_url: String) {
        self.panorama = Some(embed_url);
    }

    pub fn clear_panorama(&mut self) {
        self.panorama = None;
    }
}
