use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::geo::Coordinate;
use crate::ConfigError;

const DEFAULT_LATITUDE: &str = "11.247689";
const DEFAULT_LONGITUDE: &str = "75.803559";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can feed a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("LOCPICK_ENV", "development"))?;
    let log_level = or_default("LOCPICK_LOG_LEVEL", "info");
    let google_maps_api_key = lookup("LOCPICK_GOOGLE_MAPS_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());

    let country = parse_country(&or_default("LOCPICK_COUNTRY", "in"))?;

    let latitude = parse_degrees(
        "LOCPICK_DEFAULT_LATITUDE",
        &or_default("LOCPICK_DEFAULT_LATITUDE", DEFAULT_LATITUDE),
        90.0,
    )?;
    let longitude = parse_degrees(
        "LOCPICK_DEFAULT_LONGITUDE",
        &or_default("LOCPICK_DEFAULT_LONGITUDE", DEFAULT_LONGITUDE),
        180.0,
    )?;
    let default_center = Coordinate::new(latitude, longitude);

    let default_zoom = parse_zoom("LOCPICK_DEFAULT_ZOOM", &or_default("LOCPICK_DEFAULT_ZOOM", "12"))?;
    let search_zoom = parse_zoom("LOCPICK_SEARCH_ZOOM", &or_default("LOCPICK_SEARCH_ZOOM", "15"))?;
    let current_location_zoom = parse_zoom(
        "LOCPICK_CURRENT_LOCATION_ZOOM",
        &or_default("LOCPICK_CURRENT_LOCATION_ZOOM", "15"),
    )?;

    let request_timeout_secs = match lookup("LOCPICK_REQUEST_TIMEOUT_SECS") {
        Ok(raw) if !raw.trim().is_empty() => {
            Some(parse_var::<u64>("LOCPICK_REQUEST_TIMEOUT_SECS", &raw)?)
        }
        _ => None,
    };

    Ok(AppConfig {
        env,
        log_level,
        google_maps_api_key,
        country,
        default_center,
        default_zoom,
        search_zoom,
        current_location_zoom,
        request_timeout_secs,
    })
}

fn parse_var<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

fn parse_degrees(var: &str, raw: &str, limit: f64) -> Result<f64, ConfigError> {
    let degrees: f64 = parse_var(var, raw)?;
    if !degrees.is_finite() || degrees.abs() > limit {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("{degrees} is outside [-{limit}, {limit}]"),
        });
    }
    Ok(degrees)
}

/// Map zoom levels run from 0 (whole world) to 22 (building level).
fn parse_zoom(var: &str, raw: &str) -> Result<u8, ConfigError> {
    let zoom: u8 = parse_var(var, raw)?;
    if zoom > 22 {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("zoom {zoom} is above the maximum of 22"),
        });
    }
    Ok(zoom)
}

fn parse_country(raw: &str) -> Result<String, ConfigError> {
    let code = raw.trim().to_ascii_lowercase();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ConfigError::InvalidEnvVar {
            var: "LOCPICK_COUNTRY".to_string(),
            reason: format!("expected a two-letter country code, got '{raw}'"),
        });
    }
    Ok(code)
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LOCPICK_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
