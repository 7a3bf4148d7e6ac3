pub mod app_config;
pub mod config;
pub mod form;
pub mod geo;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use form::{FormPatch, LocationForm, LocationType};
pub use geo::{
    AddressComponent, AddressKind, Coordinate, GeoError, GeoProvider, GeocodeResult, Suggestion,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
