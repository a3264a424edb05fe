//! The derived result set and the response half of the state machine.
//!
//! Each `apply_*` method is the single point where a network response may
//! mutate state, and each starts with the same guard: a response whose token
//! is no longer current belongs to a superseded query and is dropped without
//! any effect.

use danamap_core::{Category, Coordinate, DistrictBoundary, Place, Suggestion};
use danamap_places::PlacesError;

use crate::notice::Notice;
use crate::selection::{BoundaryState, QueryToken, SelectionState};

/// The currently displayable outcome of the active selection mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultSet {
    #[default]
    Empty,
    /// Free-text suggestions; no coordinates, never rendered as markers.
    Suggestions(Vec<Suggestion>),
    /// Filter results, in display order.
    Places(Vec<Place>),
    /// An explicitly picked place.
    Single(Place),
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Suggestions(s) => s.is_empty(),
            Self::Places(p) => p.is_empty(),
            Self::Single(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Suggestions(s) => s.len(),
            Self::Places(p) => p.len(),
            Self::Single(_) => 1,
        }
    }

    /// Places eligible for list rendering (filter results only).
    pub fn places(&self) -> &[Place] {
        match self {
            Self::Places(p) => p,
            _ => &[],
        }
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        match self {
            Self::Suggestions(s) => s,
            _ => &[],
        }
    }

    pub fn single(&self) -> Option<&Place> {
        match self {
            Self::Single(p) => Some(p),
            _ => None,
        }
    }

    /// Finds a place by id across list and single shapes (map-pin lookup).
    pub fn find(&self, id: i64) -> Option<&Place> {
        match self {
            Self::Places(p) => p.iter().find(|place| place.id == id),
            Self::Single(p) => (p.id == id).then_some(p),
            _ => None,
        }
    }
}

/// Annotates each place with its distance from `origin` and sorts ascending.
///
/// The sort is stable and funnels through the GeoMath missing-coordinate
/// rule: places without a resolvable distance compare as `+∞`, land at the
/// end, and keep their relative order.
pub fn sort_by_distance(places: &mut [Place], origin: Coordinate) {
    for place in places.iter_mut() {
        let d = place.distance_from(origin);
        place.distance = d.is_finite().then_some(d);
    }
    places.sort_by(|a, b| {
        a.distance_from(origin)
            .partial_cmp(&b.distance_from(origin))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

impl SelectionState {
    /// Applies a suggestion response. Returns `false` when dropped as stale.
    pub fn apply_suggestions(
        &mut self,
        token: QueryToken,
        result: Result<Vec<Suggestion>, PlacesError>,
    ) -> bool {
        if !self.is_current(token) {
            tracing::debug!("dropping stale suggestion response");
            return false;
        }
        self.finish_loading();
        match result {
            Ok(suggestions) => self.set_results(ResultSet::Suggestions(suggestions)),
            Err(err) => {
                self.set_results(ResultSet::Empty);
                // Suggestion failures stay quiet in the dropdown; log only.
                tracing::debug!(error = %err, "suggestion query failed");
            }
        }
        true
    }

    /// Applies a category query response, sorted by distance from `origin`.
    pub fn apply_category_places(
        &mut self,
        token: QueryToken,
        origin: Coordinate,
        category: Category,
        result: Result<Vec<Place>, PlacesError>,
    ) -> bool {
        if !self.is_current(token) {
            tracing::debug!(%category, "dropping stale category response");
            return false;
        }
        self.finish_loading();
        match result {
            Ok(mut places) => {
                sort_by_distance(&mut places, origin);
                self.set_results(ResultSet::Places(places));
            }
            Err(err) => {
                self.set_results(ResultSet::Empty);
                if err.is_malformed() {
                    self.push_notice(Notice::NoPlacesForCategory { category });
                } else {
                    self.push_notice(Notice::from_places_error(&err, "locations"));
                }
            }
        }
        true
    }

    /// Applies a radius query response, sorted by distance from `origin`.
    /// An empty result surfaces a notice (the circle is drawn regardless).
    pub fn apply_radius_places(
        &mut self,
        token: QueryToken,
        origin: Coordinate,
        km: u32,
        result: Result<Vec<Place>, PlacesError>,
    ) -> bool {
        if !self.is_current(token) {
            tracing::debug!(km, "dropping stale radius response");
            return false;
        }
        self.finish_loading();
        match result {
            Ok(places) if places.is_empty() => {
                self.set_results(ResultSet::Empty);
                self.push_notice(Notice::NoPlacesWithinRadius { km });
            }
            Ok(mut places) => {
                sort_by_distance(&mut places, origin);
                self.set_results(ResultSet::Places(places));
            }
            Err(err) => {
                self.set_results(ResultSet::Empty);
                self.push_notice(Notice::from_places_error(&err, "locations"));
            }
        }
        true
    }

    /// Applies the boundary half of the district flow.
    ///
    /// Returns `true` when the flow should continue with the places query.
    /// On failure the mode stays District with the boundary marked missing,
    /// an empty result set, and a surfaced error — never a silent fallback
    /// to all places.
    pub fn apply_district_boundary(
        &mut self,
        token: QueryToken,
        district: &str,
        result: Result<DistrictBoundary, PlacesError>,
    ) -> bool {
        if !self.is_current(token) {
            tracing::debug!(district, "dropping stale boundary response");
            return false;
        }
        match result {
            Ok(boundary) => {
                self.set_boundary(BoundaryState::Loaded(boundary));
                true
            }
            Err(err) => {
                self.set_boundary(BoundaryState::Missing);
                self.set_results(ResultSet::Empty);
                self.finish_loading();
                match err {
                    PlacesError::MissingGeometry { .. } | PlacesError::BadGeometry { .. } => {
                        self.push_notice(Notice::BoundaryUnavailable {
                            district: district.to_owned(),
                        });
                    }
                    other => self.push_notice(Notice::from_places_error(&other, "districts")),
                }
                false
            }
        }
    }

    /// Applies the places half of the district flow.
    ///
    /// A failure here clears the already-loaded boundary too: the district
    /// view renders both the boundary and its places, or neither.
    pub fn apply_district_places(
        &mut self,
        token: QueryToken,
        district: &str,
        result: Result<Vec<Place>, PlacesError>,
    ) -> bool {
        if !self.is_current(token) {
            tracing::debug!(district, "dropping stale district places response");
            return false;
        }
        self.finish_loading();
        match result {
            Ok(places) if places.is_empty() => {
                self.set_results(ResultSet::Empty);
                self.push_notice(Notice::NoPlacesInDistrict {
                    district: district.to_owned(),
                });
            }
            Ok(places) => self.set_results(ResultSet::Places(places)),
            Err(err) => {
                self.set_boundary(BoundaryState::Missing);
                self.set_results(ResultSet::Empty);
                self.push_notice(Notice::from_places_error(&err, "locations"));
            }
        }
        true
    }

    /// Applies a place-detail response after a suggestion pick.
    ///
    /// Success completes the transition into single-place mode; failure
    /// surfaces a notice and leaves the mode unchanged.
    pub fn apply_place_detail(
        &mut self,
        token: QueryToken,
        id: i64,
        result: Result<Place, PlacesError>,
    ) -> bool {
        if !self.is_current(token) {
            tracing::debug!(id, "dropping stale place detail response");
            return false;
        }
        self.finish_loading();
        match result {
            Ok(place) => self.select_place(place),
            Err(err) => {
                tracing::debug!(id, error = %err, "place detail fetch failed");
                self.push_notice(Notice::PlaceDetailUnavailable { id });
            }
        }
        true
    }
}
