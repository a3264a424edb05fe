//! The explorer facade.
//!
//! [`ExplorerCore`] is the deterministic half: it owns the selection state,
//! the route controller, and the map surface, and enforces the full-reset
//! contract — every mode transition tears down the previous mode's results,
//! route, and overlays before the new query even starts. [`Explorer`] wires
//! the core to the repository and routing clients.

use danamap_core::{AppConfig, Category, Coordinate, DistrictInfo, Place};
use danamap_places::{PlacesClient, PlacesConfig, PlacesError};
use danamap_routing::{Route, RoutingClient, RoutingConfig, RoutingError};
use thiserror::Error;

use crate::notice::Notice;
use crate::panel::{self, PanelView};
use crate::results::ResultSet;
use crate::route::{RouteController, RouteState, RouteToken};
use crate::selection::{
    QueryPlan, QueryToken, SelectionMode, SelectionState, Transition, SUGGESTION_LIMIT,
};
use crate::surface::MapSurface;
use crate::view::{self, Camera};

/// Construction-time failures. Operational failures never bubble out of the
/// explorer — they surface as [`Notice`]s and the state recovers locally.
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error(transparent)]
    Places(#[from] PlacesError),
    #[error(transparent)]
    Routing(#[from] RoutingError),
}

/// The I/O-free exploration state machine.
#[derive(Debug)]
pub struct ExplorerCore {
    state: SelectionState,
    route: RouteController,
    surface: MapSurface,
    origin: Coordinate,
}

impl ExplorerCore {
    pub fn new(origin: Coordinate) -> Self {
        Self {
            state: SelectionState::new(),
            route: RouteController::new(),
            surface: MapSurface::new(),
            origin,
        }
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn surface(&self) -> &MapSurface {
        &self.surface
    }

    pub fn route_state(&self) -> &RouteState {
        self.route.state()
    }

    pub fn camera(&self) -> Camera {
        view::camera_for(&self.state, self.origin)
    }

    pub fn panel(&self) -> PanelView {
        panel::panel_for(&self.state, self.origin)
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.state.take_notices()
    }

    pub(crate) fn push_notice(&mut self, notice: Notice) {
        self.state.push_notice(notice);
    }

    // --- transitions --------------------------------------------------------

    /// Full reset to no selection: results, route, and overlays all go.
    pub fn clear_selection(&mut self) {
        self.state.clear();
        self.route.clear(&mut self.surface);
        self.sync();
    }

    pub fn begin_text_search(&mut self, query: &str) -> Transition {
        self.transition(|state| state.set_text_search(query))
    }

    pub fn begin_category(&mut self, category: Category) -> Transition {
        self.transition(|state| state.set_category(category))
    }

    pub fn begin_district(&mut self, name: &str) -> Transition {
        self.transition(|state| state.set_district(name))
    }

    pub fn begin_radius(&mut self, km: u32) -> Transition {
        self.transition(|state| state.set_radius(km))
    }

    /// Issues the detail fetch for a picked suggestion. Not yet a mode
    /// transition — the route and current view survive until the detail
    /// arrives (or fails).
    pub fn begin_suggestion_pick(&mut self, id: i64) -> Transition {
        self.state.begin_suggestion_pick(id)
    }

    /// Map-pin click on a currently displayed place. Unknown ids are an
    /// invalid selection and are silently ignored.
    pub fn select_pin(&mut self, id: i64) -> bool {
        let Some(place) = self.state.results().find(id).cloned() else {
            return false;
        };
        self.select_place(place);
        true
    }

    /// Direct transition into single-place mode with a known record.
    pub fn select_place(&mut self, place: Place) {
        self.state.select_place(place);
        self.route.clear(&mut self.surface);
        self.sync();
    }

    fn transition(&mut self, f: impl FnOnce(&mut SelectionState) -> Transition) -> Transition {
        let transition = f(&mut self.state);
        self.route.clear(&mut self.surface);
        self.sync();
        transition
    }

    // --- response application ----------------------------------------------

    pub fn apply_suggestions(
        &mut self,
        token: QueryToken,
        result: Result<Vec<danamap_core::Suggestion>, PlacesError>,
    ) -> bool {
        let applied = self.state.apply_suggestions(token, result);
        if applied {
            self.sync();
        }
        applied
    }

    pub fn apply_category_places(
        &mut self,
        token: QueryToken,
        category: Category,
        result: Result<Vec<Place>, PlacesError>,
    ) -> bool {
        let applied = self
            .state
            .apply_category_places(token, self.origin, category, result);
        if applied {
            self.sync();
        }
        applied
    }

    pub fn apply_radius_places(
        &mut self,
        token: QueryToken,
        km: u32,
        result: Result<Vec<Place>, PlacesError>,
    ) -> bool {
        let applied = self.state.apply_radius_places(token, self.origin, km, result);
        if applied {
            self.sync();
        }
        applied
    }

    /// Returns `true` when the district flow should continue with the
    /// places query.
    pub fn apply_district_boundary(
        &mut self,
        token: QueryToken,
        district: &str,
        result: Result<danamap_core::DistrictBoundary, PlacesError>,
    ) -> bool {
        let proceed = self.state.apply_district_boundary(token, district, result);
        self.sync();
        proceed
    }

    pub fn apply_district_places(
        &mut self,
        token: QueryToken,
        district: &str,
        result: Result<Vec<Place>, PlacesError>,
    ) -> bool {
        let applied = self.state.apply_district_places(token, district, result);
        if applied {
            self.sync();
        }
        applied
    }

    pub fn apply_place_detail(
        &mut self,
        token: QueryToken,
        id: i64,
        result: Result<Place, PlacesError>,
    ) -> bool {
        let succeeded = result.is_ok();
        let applied = self.state.apply_place_detail(token, id, result);
        if applied {
            if succeeded {
                // The pick completed a mode transition; the route goes with
                // the rest of the previous mode's state.
                self.route.clear(&mut self.surface);
            }
            self.sync();
        }
        applied
    }

    // --- routing ------------------------------------------------------------

    /// Starts a route request to `destination`; `None` for a destination
    /// without a coordinate (silent no-op).
    pub fn begin_route(&mut self, destination: &Place) -> Option<(RouteToken, [Coordinate; 2])> {
        self.route.begin(&mut self.surface, self.origin, destination)
    }

    pub fn apply_route(&mut self, token: RouteToken, result: Result<Route, RoutingError>) -> bool {
        match result {
            Ok(route) => self.route.apply(&mut self.surface, token, route),
            Err(err) => {
                tracing::warn!(error = %err, "route request failed");
                let failed = self.route.fail(&mut self.surface, token);
                if failed {
                    self.state.push_notice(Notice::RouteUnavailable);
                }
                failed
            }
        }
    }

    pub fn clear_route(&mut self) {
        self.route.clear(&mut self.surface);
    }

    /// Re-derives the view-owned surface layers and the panorama slot.
    fn sync(&mut self) {
        view::sync_layers(&self.state, self.origin, &mut self.surface);
        match self.state.mode() {
            SelectionMode::SinglePlace { place } if place.has_panorama() => {
                if let Some(url) = place.embed_url.clone() {
                    self.surface.set_panorama(url);
                }
            }
            _ => self.surface.clear_panorama(),
        }
    }
}

/// The explorer wired to live services.
pub struct Explorer {
    core: ExplorerCore,
    places: PlacesClient,
    routing: RoutingClient,
    districts: Vec<DistrictInfo>,
}

impl Explorer {
    /// Builds clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError`] when either HTTP client cannot be
    /// constructed.
    pub fn new(config: &AppConfig) -> Result<Self, ExplorerError> {
        let places = PlacesClient::new(PlacesConfig::from_app(config))?;
        let routing = RoutingClient::new(RoutingConfig {
            base_url: config.routing_base_url.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            ..RoutingConfig::default()
        })?;
        Ok(Self::from_parts(places, routing, config.origin))
    }

    /// Assembles an explorer from prebuilt clients (tests point these at
    /// mock servers).
    pub fn from_parts(places: PlacesClient, routing: RoutingClient, origin: Coordinate) -> Self {
        Self {
            core: ExplorerCore::new(origin),
            places,
            routing,
            districts: Vec::new(),
        }
    }

    /// Populates the district picker. Failure is a surfaced, non-blocking
    /// notice; the picker stays empty and the call is retryable.
    pub async fn load_districts(&mut self) {
        match self.places.districts().await {
            Ok(districts) => self.districts = districts,
            Err(err) => {
                tracing::warn!(error = %err, "district catalog fetch failed");
                self.core.push_notice(Notice::DistrictCatalogUnavailable);
            }
        }
    }

    pub fn districts(&self) -> &[DistrictInfo] {
        &self.districts
    }

    /// Free-text search; below the minimum length this is synchronous.
    pub async fn search(&mut self, query: &str) {
        let Transition { token, plan } = self.core.begin_text_search(query);
        if let QueryPlan::Suggestions { query } = plan {
            let result = self.places.suggest(&query, SUGGESTION_LIMIT).await;
            self.core.apply_suggestions(token, result);
        }
    }

    /// Picks a suggestion: fetches the full record, then enters
    /// single-place mode.
    pub async fn pick_suggestion(&mut self, id: i64) {
        let Transition { token, plan } = self.core.begin_suggestion_pick(id);
        if let QueryPlan::PlaceDetail { id } = plan {
            let result = self.places.place_detail(id).await;
            self.core.apply_place_detail(token, id, result);
        }
    }

    pub async fn set_category(&mut self, category: Category) {
        let Transition { token, plan } = self.core.begin_category(category);
        if let QueryPlan::CategoryNearOrigin { category } = plan {
            let result = self
                .places
                .find_by_category(category, self.core.origin())
                .await;
            self.core.apply_category_places(token, category, result);
        }
    }

    /// Category by user-supplied identifier (wire name or Vietnamese
    /// label). An unmapped identifier clears the selection.
    pub async fn set_category_named(&mut self, name: &str) {
        match Category::parse(name) {
            Some(category) => self.set_category(category).await,
            None => self.core.clear_selection(),
        }
    }

    /// District flow: boundary first, then places within it.
    pub async fn set_district(&mut self, name: &str) {
        let Transition { token, plan } = self.core.begin_district(name);
        if let QueryPlan::DistrictFlow { name } = plan {
            let boundary = self.places.district_boundary(&name).await;
            if self.core.apply_district_boundary(token, &name, boundary) {
                let places = self.places.find_in_district(&name).await;
                self.core.apply_district_places(token, &name, places);
            }
        }
    }

    pub async fn set_radius(&mut self, km: u32) {
        let Transition { token, plan } = self.core.begin_radius(km);
        if let QueryPlan::WithinRadius { km } = plan {
            let result = self
                .places
                .find_within_radius(self.core.origin(), km)
                .await;
            self.core.apply_radius_places(token, km, result);
        }
    }

    /// Map-pin click on a displayed place.
    pub fn select_pin(&mut self, id: i64) -> bool {
        self.core.select_pin(id)
    }

    /// Requests a driving route from the fixed origin to `destination`.
    /// A destination without a coordinate is a silent no-op.
    pub async fn route_to(&mut self, destination: &Place) {
        let Some((token, waypoints)) = self.core.begin_route(destination) else {
            return;
        };
        let result = self.routing.route(&waypoints).await;
        self.core.apply_route(token, result);
    }

    /// Panel intent: route to a currently displayed place by id.
    pub async fn route_to_id(&mut self, id: i64) {
        let Some(place) = self.core.state().results().find(id).cloned() else {
            return;
        };
        self.route_to(&place).await;
    }

    pub fn clear_route(&mut self) {
        self.core.clear_route();
    }

    /// Panel intent: close/clear everything back to the default view.
    pub fn clear_selection(&mut self) {
        self.core.clear_selection();
    }

    pub fn results(&self) -> &ResultSet {
        self.core.state().results()
    }

    pub fn is_loading(&self) -> bool {
        self.core.state().is_loading()
    }

    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    pub fn surface(&self) -> &MapSurface {
        self.core.surface()
    }

    pub fn panel(&self) -> PanelView {
        self.core.panel()
    }

    pub fn route_state(&self) -> &RouteState {
        self.core.route_state()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.core.take_notices()
    }
}
