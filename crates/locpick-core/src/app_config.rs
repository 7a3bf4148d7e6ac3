use crate::geo::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub google_maps_api_key: Option<String>,
    /// ISO 3166-1 alpha-2 code autocomplete queries are restricted to.
    pub country: String,
    /// Map center used when the form has no coordinate yet.
    pub default_center: Coordinate,
    pub default_zoom: u8,
    pub search_zoom: u8,
    pub current_location_zoom: u8,
    /// `None` leaves provider calls without a client-side timeout.
    pub request_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "google_maps_api_key",
                &self.google_maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("country", &self.country)
            .field("default_center", &self.default_center)
            .field("default_zoom", &self.default_zoom)
            .field("search_zoom", &self.search_zoom)
            .field("current_location_zoom", &self.current_location_zoom)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
