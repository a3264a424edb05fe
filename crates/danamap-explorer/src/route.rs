//! The route controller: `Idle → Requesting → Rendered → (Idle | Requesting)`.
//!
//! Owns the surface's route slot exclusively. A new request removes the
//! currently rendered route synchronously, before the routing service is
//! even called, so at most one route layer exists at any time — including
//! across failing requests.

use danamap_core::{Coordinate, Place};
use danamap_routing::Route;

use crate::surface::MapSurface;

/// Identity of one route request; a stale response is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteToken(u64);

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RouteState {
    #[default]
    Idle,
    Requesting {
        destination: i64,
    },
    Rendered {
        destination: i64,
        route: Route,
    },
}

#[derive(Debug, Default)]
pub struct RouteController {
    state: RouteState,
    epoch: u64,
}

impl RouteController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RouteState {
        &self.state
    }

    /// The rendered route, when one exists.
    pub fn rendered(&self) -> Option<&Route> {
        match &self.state {
            RouteState::Rendered { route, .. } => Some(route),
            _ => None,
        }
    }

    /// Starts a route request from `origin` to `destination`.
    ///
    /// A destination without a coordinate is an invalid selection: no-op,
    /// no notice. Otherwise the previous route layer is removed here,
    /// synchronously, and the returned waypoints go to the routing service.
    pub fn begin(
        &mut self,
        surface: &mut MapSurface,
        origin: Coordinate,
        destination: &Place,
    ) -> Option<(RouteToken, [Coordinate; 2])> {
        let target = destination.coordinate?;
        surface.clear_route();
        self.epoch += 1;
        self.state = RouteState::Requesting {
            destination: destination.id,
        };
        Some((RouteToken(self.epoch), [origin, target]))
    }

    /// Renders a successful response. Returns `false` when dropped as stale.
    pub fn apply(&mut self, surface: &mut MapSurface, token: RouteToken, route: Route) -> bool {
        if !self.is_current(token) {
            tracing::debug!("dropping stale route response");
            return false;
        }
        let RouteState::Requesting { destination } = &self.state else {
            return false;
        };
        let destination = *destination;
        surface.set_route(route.points.clone());
        self.state = RouteState::Rendered { destination, route };
        true
    }

    /// Records a failed request: back to idle, no stale layer left behind.
    pub fn fail(&mut self, surface: &mut MapSurface, token: RouteToken) -> bool {
        if !self.is_current(token) || !matches!(self.state, RouteState::Requesting { .. }) {
            return false;
        }
        surface.clear_route();
        self.state = RouteState::Idle;
        true
    }

    /// Removes the route layer and returns to idle. Idempotent, and
    /// invalidates any in-flight request.
    pub fn clear(&mut self, surface: &mut MapSurface) {
        self.epoch += 1;
        surface.clear_route();
        self.state = RouteState::Idle;
    }

    fn is_current(&self, token: RouteToken) -> bool {
        token == RouteToken(self.epoch)
    }
}

#[cfg(test)]
mod tests {
    use danamap_core::Category;

    use super::*;

    fn origin() -> Coordinate {
        Coordinate::new(16.054, 108.247).unwrap()
    }

    fn destination(id: i64, coordinate: Option<Coordinate>) -> Place {
        Place {
            id,
            name: format!("place {id}"),
            coordinate,
            category: Category::Attraction,
            images: Vec::new(),
            details: serde_json::Value::Null,
            embed_url: None,
            distance: None,
        }
    }

    fn route(points: Vec<Coordinate>) -> Route {
        Route {
            points,
            distance_meters: 1000.0,
            duration_secs: 120.0,
            turns: Vec::new(),
        }
    }

    #[test]
    fn destination_without_coordinate_is_a_no_op() {
        let mut controller = RouteController::new();
        let mut surface = MapSurface::new();
        let result = controller.begin(&mut surface, origin(), &destination(7, None));
        assert!(result.is_none());
        assert_eq!(*controller.state(), RouteState::Idle);
        assert!(surface.route().is_none());
    }

    #[test]
    fn begin_removes_previous_route_synchronously() {
        let mut controller = RouteController::new();
        let mut surface = MapSurface::new();
        let dest = destination(1, Coordinate::new(16.1, 108.28));

        let (t1, _) = controller.begin(&mut surface, origin(), &dest).unwrap();
        assert!(controller.apply(&mut surface, t1, route(vec![origin()])));
        assert!(surface.route().is_some());

        let (_t2, _) = controller
            .begin(&mut surface, origin(), &destination(2, Coordinate::new(16.0, 108.2)))
            .unwrap();
        assert!(
            surface.route().is_none(),
            "old layer must be gone before the new request resolves"
        );
    }

    #[test]
    fn failed_request_leaves_idle_and_no_layer() {
        let mut controller = RouteController::new();
        let mut surface = MapSurface::new();
        let dest = destination(1, Coordinate::new(16.1, 108.28));
        let (t, _) = controller.begin(&mut surface, origin(), &dest).unwrap();
        assert!(controller.fail(&mut surface, t));
        assert_eq!(*controller.state(), RouteState::Idle);
        assert!(surface.route().is_none());
    }

    #[test]
    fn stale_route_response_is_dropped() {
        let mut controller = RouteController::new();
        let mut surface = MapSurface::new();
        let (t1, _) = controller
            .begin(&mut surface, origin(), &destination(1, Coordinate::new(16.1, 108.28)))
            .unwrap();
        let (t2, _) = controller
            .begin(&mut surface, origin(), &destination(2, Coordinate::new(16.0, 108.2)))
            .unwrap();

        assert!(!controller.apply(&mut surface, t1, route(vec![origin()])));
        assert!(surface.route().is_none(), "stale response must not render");

        assert!(controller.apply(&mut surface, t2, route(vec![origin()])));
        assert!(matches!(controller.state(), RouteState::Rendered { destination: 2, .. }));
    }

    #[test]
    fn clear_is_idempotent_and_invalidates_in_flight() {
        let mut controller = RouteController::new();
        let mut surface = MapSurface::new();
        let (t, _) = controller
            .begin(&mut surface, origin(), &destination(1, Coordinate::new(16.1, 108.28)))
            .unwrap();
        controller.clear(&mut surface);
        controller.clear(&mut surface);
        assert!(!controller.apply(&mut surface, t, route(vec![origin()])));
        assert_eq!(*controller.state(), RouteState::Idle);
        assert!(surface.route().is_none());
    }

    #[test]
    fn at_most_one_route_layer_across_any_sequence() {
        let mut controller = RouteController::new();
        let mut surface = MapSurface::new();
        let a = destination(1, Coordinate::new(16.1, 108.28));
        let b = destination(2, Coordinate::new(16.0, 108.2));

        let (t1, _) = controller.begin(&mut surface, origin(), &a).unwrap();
        controller.apply(&mut surface, t1, route(vec![origin()]));
        let (t2, _) = controller.begin(&mut surface, origin(), &b).unwrap();
        controller.fail(&mut surface, t2);
        let (t3, _) = controller.begin(&mut surface, origin(), &a).unwrap();
        controller.apply(&mut surface, t3, route(vec![origin()]));

        assert!(surface.route().is_some());
        assert!(matches!(controller.state(), RouteState::Rendered { destination: 1, .. }));
    }
}
