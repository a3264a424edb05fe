//! Camera computation and surface-layer sync.
//!
//! Camera precedence, evaluated on every result-set or overlay change:
//! district polygon fit, then marker-list fit, then single-place focus,
//! then the default origin view. A radius selection draws its circle
//! independently of which camera rule fired.

use danamap_core::{geo, BoundingBox, Coordinate};

use crate::selection::{SelectionMode, SelectionState};
use crate::surface::{MapSurface, Marker, RadiusCircle};

pub const DEFAULT_ZOOM: u8 = 13;
pub const FOCUS_ZOOM: u8 = 15;
pub const FIT_PADDING_PX: u32 = 50;
pub const FIT_MAX_ZOOM: u8 = 15;

/// A camera target for the map surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Camera {
    FitBounds {
        bounds: BoundingBox,
        padding_px: u32,
        max_zoom: u8,
    },
    Center {
        target: Coordinate,
        zoom: u8,
    },
}

/// Computes the camera for the current state.
pub fn camera_for(state: &SelectionState, origin: Coordinate) -> Camera {
    // 1. An active district boundary wins.
    if let Some(bounds) = state.active_boundary().and_then(|b| b.bounds()) {
        return Camera::FitBounds {
            bounds,
            padding_px: FIT_PADDING_PX,
            max_zoom: FIT_MAX_ZOOM,
        };
    }

    // 2. Fit the marker list when at least one result has a coordinate.
    let coords = state.results().places().iter().filter_map(|p| p.coordinate);
    if let Some(bounds) = geo::bounds_for(coords) {
        return Camera::FitBounds {
            bounds,
            padding_px: FIT_PADDING_PX,
            max_zoom: FIT_MAX_ZOOM,
        };
    }

    // 3. Focus an explicitly picked place.
    if let Some(target) = state.results().single().and_then(|p| p.coordinate) {
        return Camera::Center {
            target,
            zoom: FOCUS_ZOOM,
        };
    }

    // 4. Default view over the fixed origin.
    Camera::Center {
        target: origin,
        zoom: DEFAULT_ZOOM,
    }
}

/// Rewrites the view-owned surface layers (markers, boundary, circle) from
/// the current state. The route and panorama slots belong to other owners.
pub fn sync_layers(state: &SelectionState, origin: Coordinate, surface: &mut MapSurface) {
    let mut markers: Vec<Marker> = state
        .results()
        .places()
        .iter()
        .filter_map(marker_for)
        .collect();
    if let Some(marker) = state.results().single().and_then(marker_for) {
        markers.push(marker);
    }
    surface.set_markers(markers);

    match state.active_boundary() {
        Some(boundary) => surface.set_boundary(boundary.clone()),
        None => surface.clear_boundary(),
    }

    match state.mode() {
        SelectionMode::Radius { km } => surface.set_circle(RadiusCircle {
            center: origin,
            radius_meters: f64::from(*km) * 1000.0,
        }),
        _ => surface.clear_circle(),
    }
}

fn marker_for(place: &danamap_core::Place) -> Option<Marker> {
    place.coordinate.map(|coordinate| Marker {
        place_id: place.id,
        coordinate,
        has_panorama: place.has_panorama(),
    })
}
