//! Provider-agnostic geographic types and the [`GeoProvider`] seam.
//!
//! The selector never talks to a mapping SDK directly. Everything it needs
//! from the outside world (autocomplete, place lookups, reverse geocoding,
//! device location) goes through [`GeoProvider`], so tests can swap in a
//! scripted fake and production code can plug in an HTTP client.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `true` when both components are finite and inside the
    /// valid latitude/longitude ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// One autocomplete candidate for the current search text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Opaque provider identifier, resolved later via
    /// [`GeoProvider::place_details`].
    pub place_id: String,
    pub primary_text: String,
    pub secondary_text: String,
}

/// The address component kinds the selector cares about. Anything else the
/// provider reports is kept verbatim in [`AddressKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressKind {
    Locality,
    AdministrativeAreaLevel1,
    AdministrativeAreaLevel2,
    Country,
    PostalCode,
    Other(String),
}

impl AddressKind {
    /// Maps a provider type tag (e.g. `"administrative_area_level_1"`) to a kind.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "locality" => Self::Locality,
            "administrative_area_level_1" => Self::AdministrativeAreaLevel1,
            "administrative_area_level_2" => Self::AdministrativeAreaLevel2,
            "country" => Self::Country,
            "postal_code" => Self::PostalCode,
            other => Self::Other(other.to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    pub kinds: Vec<AddressKind>,
}

impl AddressComponent {
    #[must_use]
    pub fn is(&self, kind: &AddressKind) -> bool {
        self.kinds.contains(kind)
    }
}

/// Outcome of a reverse-geocoding lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub components: Vec<AddressComponent>,
}

impl GeocodeResult {
    /// Returns the long name of the first non-empty component of `kind`.
    #[must_use]
    pub fn component(&self, kind: &AddressKind) -> Option<&str> {
        self.components
            .iter()
            .filter(|c| c.is(kind))
            .map(|c| c.long_name.trim())
            .find(|name| !name.is_empty())
    }
}

/// Errors surfaced by a [`GeoProvider`] implementation.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Network or TLS failure talking to the provider.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("provider returned {status}: {message}")]
    Api { status: String, message: String },

    /// The lookup succeeded but matched nothing.
    #[error("no results")]
    NoResults,

    #[error("deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The mapping primitive backing this call has not been initialized.
    #[error("mapping service not loaded")]
    NotLoaded,

    /// The device refused to share its location.
    #[error("location permission denied")]
    PermissionDenied,

    /// The capability is not available on this device or provider.
    #[error("capability not supported")]
    Unsupported,
}

/// Mapping and geocoding collaborator injected into the selector.
pub trait GeoProvider {
    /// Autocomplete place candidates for `input`, restricted to the
    /// ISO 3166-1 alpha-2 `country` code.
    fn autocomplete(
        &self,
        input: &str,
        country: &str,
    ) -> impl Future<Output = Result<Vec<Suggestion>, GeoError>> + Send;

    /// Resolves a suggestion's `place_id` to a single coordinate.
    fn place_details(
        &self,
        place_id: &str,
    ) -> impl Future<Output = Result<Coordinate, GeoError>> + Send;

    fn reverse_geocode(
        &self,
        at: Coordinate,
    ) -> impl Future<Output = Result<GeocodeResult, GeoError>> + Send;

    /// The device's current position. Providers without the capability
    /// should return [`GeoError::Unsupported`].
    fn current_location(&self) -> impl Future<Output = Result<Coordinate, GeoError>> + Send;
}
