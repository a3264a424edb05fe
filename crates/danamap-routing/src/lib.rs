//! HTTP client for the OSRM routing service.
//!
//! One operation: a sequence of waypoints in, a driving route out — decoded
//! polyline geometry plus per-step turn instructions. Route failures are
//! non-fatal to the caller by design; the explorer surfaces them as a notice
//! and the route simply does not appear.

pub mod client;
pub mod error;
pub mod types;

pub use client::{RoutingClient, RoutingConfig};
pub use error::RoutingError;
pub use types::{Route, Turn};
