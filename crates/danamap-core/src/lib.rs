//! Core domain types, geospatial utilities, and configuration for danamap.
//!
//! Everything in this crate is pure: no I/O, no async. The HTTP clients
//! (`danamap-places`, `danamap-routing`) and the exploration state machine
//! (`danamap-explorer`) build on these types.

pub mod app_config;
pub mod config;
pub mod district;
pub mod geo;
pub mod place;

pub use app_config::{AppConfig, ConfigError};
pub use config::{load_app_config, load_app_config_from_env};
pub use district::{DistrictBoundary, DistrictInfo};
pub use geo::BoundingBox;
pub use place::{Category, Coordinate, Place, PlaceImage, Suggestion};
