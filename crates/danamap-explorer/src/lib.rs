//! The map exploration state machine.
//!
//! One shared view, five mutually exclusive selection modes (free search,
//! category, district, radius, explicit pick), and an orthogonal route
//! overlay. A user action mutates [`SelectionState`] → the result set
//! re-derives (async, token-guarded) → the [`view`] module recomputes the
//! camera and surface layers → the [`panel`] view model re-renders.
//!
//! The sync core ([`ExplorerCore`]) is free of I/O and fully deterministic;
//! [`Explorer`] wires it to the repository and routing clients.

pub mod explorer;
pub mod notice;
pub mod panel;
pub mod results;
pub mod route;
pub mod selection;
pub mod surface;
pub mod view;

pub use explorer::{Explorer, ExplorerCore, ExplorerError};
pub use notice::Notice;
pub use panel::{PanelView, PlaceCard, PlaceSummary};
pub use results::ResultSet;
pub use route::{RouteController, RouteState, RouteToken};
pub use selection::{
    BoundaryState, QueryPlan, QueryToken, SelectionMode, SelectionState, Transition,
    RADIUS_OPTIONS_KM,
};
pub use surface::{MapSurface, Marker, RadiusCircle};
pub use view::Camera;
