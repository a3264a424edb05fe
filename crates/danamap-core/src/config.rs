use crate::app_config::{
    AppConfig, DEFAULT_ORIGIN_LAT, DEFAULT_ORIGIN_LNG, DEFAULT_ORIGIN_NAME,
};
use crate::place::Coordinate;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so configuration can only fail on an invalid
/// value, never on absence. Decoupled from the real environment so tests can
/// drive it with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_f64 = |var: &str, default: f64| -> Result<f64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let places_base_url = or_default("DANAMAP_PLACES_BASE_URL", "http://localhost:8000");
    let routing_base_url = or_default("DANAMAP_OSRM_BASE_URL", "https://router.project-osrm.org");

    let origin_lat = parse_f64("DANAMAP_ORIGIN_LAT", DEFAULT_ORIGIN_LAT)?;
    let origin_lng = parse_f64("DANAMAP_ORIGIN_LNG", DEFAULT_ORIGIN_LNG)?;
    let origin =
        Coordinate::new(origin_lat, origin_lng).ok_or_else(|| ConfigError::InvalidEnvVar {
            var: "DANAMAP_ORIGIN_LAT/DANAMAP_ORIGIN_LNG".to_string(),
            reason: format!("({origin_lat}, {origin_lng}) is outside WGS84 range"),
        })?;
    let origin_name = or_default("DANAMAP_ORIGIN_NAME", DEFAULT_ORIGIN_NAME);

    let request_timeout_secs = parse_u64("DANAMAP_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("DANAMAP_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("DANAMAP_RETRY_BACKOFF_BASE_MS", "1000")?;
    let user_agent = or_default("DANAMAP_USER_AGENT", "danamap/0.1 (map-explorer)");
    let log_level = or_default("DANAMAP_LOG_LEVEL", "info");

    Ok(AppConfig {
        places_base_url,
        routing_base_url,
        origin,
        origin_name,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        user_agent,
        log_level,
    })
}
