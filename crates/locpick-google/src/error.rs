use locpick_core::GeoError;
use thiserror::Error;

/// Errors returned by the Google Maps client.
#[derive(Debug, Error)]
pub enum GoogleMapsError {
    /// Network or TLS failure from the underlying HTTP client. The request
    /// URL is stripped because it carries the API key.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The envelope `status` was neither `OK` nor `ZERO_RESULTS`.
    #[error("Google Maps API error {status}: {message}")]
    Api { status: String, message: String },

    /// The envelope reported `ZERO_RESULTS` for a lookup that needs one.
    #[error("no results for {context}")]
    ZeroResults { context: String },

    /// The Geolocation API could not place the caller (HTTP 404).
    #[error("current location could not be determined")]
    LocationNotFound,

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl From<reqwest::Error> for GoogleMapsError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl From<GoogleMapsError> for GeoError {
    fn from(err: GoogleMapsError) -> Self {
        match err {
            GoogleMapsError::Http(e) => GeoError::Transport(e.to_string()),
            GoogleMapsError::Api { status, message } => GeoError::Api { status, message },
            GoogleMapsError::ZeroResults { .. } | GoogleMapsError::LocationNotFound => {
                GeoError::NoResults
            }
            GoogleMapsError::Deserialize { context, source } => {
                GeoError::Deserialize { context, source }
            }
            GoogleMapsError::InvalidBaseUrl { .. } => GeoError::NotLoaded,
        }
    }
}
