//! Google Maps web-service response types.
//!
//! The Places and Geocoding endpoints wrap every payload in an envelope with a
//! `status` string (`"OK"`, `"ZERO_RESULTS"`, `"REQUEST_DENIED"`, ...) and an
//! optional `error_message`. The Geolocation endpoint is a plain JSON object.

use locpick_core::{AddressComponent, AddressKind, Coordinate, GeocodeResult, Suggestion};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for Coordinate {
    fn from(value: LatLng) -> Self {
        Coordinate::new(value.lat, value.lng)
    }
}

// ---------------------------------------------------------------------------
// place/autocomplete
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AutocompleteResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
pub struct Prediction {
    pub place_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub structured_formatting: Option<StructuredFormatting>,
}

#[derive(Debug, Deserialize)]
pub struct StructuredFormatting {
    pub main_text: String,
    #[serde(default)]
    pub secondary_text: String,
}

impl From<Prediction> for Suggestion {
    /// Predictions without structured formatting fall back to the full
    /// description as the primary label.
    fn from(p: Prediction) -> Self {
        let (primary_text, secondary_text) = match p.structured_formatting {
            Some(sf) => (sf.main_text, sf.secondary_text),
            None => (p.description, String::new()),
        };
        Suggestion {
            place_id: p.place_id,
            primary_text,
            secondary_text,
        }
    }
}

// ---------------------------------------------------------------------------
// place/details
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsResult {
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

// ---------------------------------------------------------------------------
// geocode (reverse)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeEntry>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeEntry {
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub address_components: Vec<WireAddressComponent>,
}

#[derive(Debug, Deserialize)]
pub struct WireAddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl From<GeocodeEntry> for GeocodeResult {
    fn from(entry: GeocodeEntry) -> Self {
        GeocodeResult {
            formatted_address: entry.formatted_address,
            components: entry
                .address_components
                .into_iter()
                .map(|c| AddressComponent {
                    kinds: c.types.iter().map(|t| AddressKind::from_tag(t)).collect(),
                    long_name: c.long_name,
                    short_name: c.short_name,
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// geolocation/v1/geolocate
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeolocateRequest {
    pub consider_ip: bool,
}

#[derive(Debug, Deserialize)]
pub struct GeolocateResponse {
    pub location: LatLng,
    /// Accuracy radius in meters.
    #[serde(default)]
    pub accuracy: f64,
}
