//! Application configuration shape and defaults.

use thiserror::Error;

use crate::place::Coordinate;

/// Default fixed origin: Khách sạn Mường Thanh, Đà Nẵng.
pub const DEFAULT_ORIGIN_LAT: f64 = 16.054_054_614_098_437;
pub const DEFAULT_ORIGIN_LNG: f64 = 108.247_137_195_153_04;
pub const DEFAULT_ORIGIN_NAME: &str = "Khách sạn Mường Thanh";

/// Runtime configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the place repository service.
    pub places_base_url: String,
    /// Base URL of the OSRM routing service.
    pub routing_base_url: String,
    /// Fixed origin all proximity queries and routes start from.
    pub origin: Coordinate,
    pub origin_name: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub user_agent: String,
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
