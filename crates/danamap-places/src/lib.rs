//! HTTP client for the danamap place repository.
//!
//! Wraps `reqwest` with repository-specific error handling, retry with
//! backoff for transient failures, and normalization of the wire records
//! into [`danamap_core::Place`]. The repository may answer list endpoints
//! either paginated (`{"results": [...]}`) or as a bare array; both shapes
//! are accepted.

pub mod client;
pub mod error;
pub mod normalize;
mod retry;
pub mod types;

pub use client::{PlacesClient, PlacesConfig};
pub use error::PlacesError;
