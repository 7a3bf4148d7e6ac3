//! HTTP client for the Google Maps web services.
//!
//! Covers the four calls the location selector needs: Places Autocomplete,
//! Place Details, reverse Geocoding and Geolocation. Envelope-style endpoints
//! are checked for their `"status"` field; anything other than `OK` or
//! `ZERO_RESULTS` surfaces as [`GoogleMapsError::Api`]. Nothing is retried.

use std::time::Duration;

use locpick_core::{Coordinate, GeoError, GeoProvider, GeocodeResult, Suggestion};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::GoogleMapsError;
use crate::types::{
    AutocompleteResponse, DetailsResponse, GeocodeResponse, GeolocateRequest, GeolocateResponse,
};

const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com/";
const DEFAULT_GEOLOCATION_BASE_URL: &str = "https://www.googleapis.com/";

const AUTOCOMPLETE_PATH: &str = "maps/api/place/autocomplete/json";
const DETAILS_PATH: &str = "maps/api/place/details/json";
const GEOCODE_PATH: &str = "maps/api/geocode/json";
const GEOLOCATE_PATH: &str = "geolocation/v1/geolocate";

/// Client for the Google Maps web services.
///
/// Use [`GoogleMapsClient::new`] for production or
/// [`GoogleMapsClient::with_base_urls`] to point at a mock server in tests.
pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
    maps_base_url: Url,
    geolocation_base_url: Url,
}

impl GoogleMapsClient {
    /// Creates a new client pointed at the production Google endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`GoogleMapsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: Option<u64>) -> Result<Self, GoogleMapsError> {
        Self::with_base_urls(
            api_key,
            timeout_secs,
            DEFAULT_MAPS_BASE_URL,
            DEFAULT_GEOLOCATION_BASE_URL,
        )
    }

    /// Creates a new client with custom base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GoogleMapsError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`GoogleMapsError::InvalidBaseUrl`] if either base URL
    /// does not parse.
    pub fn with_base_urls(
        api_key: &str,
        timeout_secs: Option<u64>,
        maps_base_url: &str,
        geolocation_base_url: &str,
    ) -> Result<Self, GoogleMapsError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent("locpick/0.1 (marketplace-admin)");
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            maps_base_url: parse_base_url(maps_base_url)?,
            geolocation_base_url: parse_base_url(geolocation_base_url)?,
        })
    }

    /// Autocompletes `input` into place suggestions within `country`.
    ///
    /// `ZERO_RESULTS` yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// - [`GoogleMapsError::Api`] if the envelope status is not a success.
    /// - [`GoogleMapsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GoogleMapsError::Deserialize`] if the response has an unexpected shape.
    pub async fn autocomplete_places(
        &self,
        input: &str,
        country: &str,
    ) -> Result<Vec<Suggestion>, GoogleMapsError> {
        let components = format!("country:{country}");
        let url = self.build_url(
            &self.maps_base_url,
            AUTOCOMPLETE_PATH,
            &[("input", input), ("components", &components)],
        )?;
        let body = self.get_json(&url).await?;
        Self::check_status(&body)?;

        let response: AutocompleteResponse =
            decode(body, || format!("autocomplete(input={input})"))?;
        Ok(response
            .predictions
            .into_iter()
            .map(Suggestion::from)
            .collect())
    }

    /// Resolves a place id to the coordinate of its geometry.
    ///
    /// # Errors
    ///
    /// - [`GoogleMapsError::ZeroResults`] if the place has no geometry.
    /// - [`GoogleMapsError::Api`] if the envelope status is not a success.
    /// - [`GoogleMapsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GoogleMapsError::Deserialize`] if the response has an unexpected shape.
    pub async fn place_location(&self, place_id: &str) -> Result<Coordinate, GoogleMapsError> {
        let url = self.build_url(
            &self.maps_base_url,
            DETAILS_PATH,
            &[("place_id", place_id), ("fields", "geometry")],
        )?;
        let body = self.get_json(&url).await?;
        Self::check_status(&body)?;

        let response: DetailsResponse =
            decode(body, || format!("place_details(place_id={place_id})"))?;
        response
            .result
            .map(|r| Coordinate::from(r.geometry.location))
            .ok_or_else(|| GoogleMapsError::ZeroResults {
                context: format!("place_details(place_id={place_id})"),
            })
    }

    /// Reverse-geocodes a coordinate, returning the first (most specific)
    /// result.
    ///
    /// # Errors
    ///
    /// - [`GoogleMapsError::ZeroResults`] if nothing is found at `at`.
    /// - [`GoogleMapsError::Api`] if the envelope status is not a success.
    /// - [`GoogleMapsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GoogleMapsError::Deserialize`] if the response has an unexpected shape.
    pub async fn reverse_geocode_latlng(
        &self,
        at: Coordinate,
    ) -> Result<GeocodeResult, GoogleMapsError> {
        let latlng = format!("{},{}", at.latitude, at.longitude);
        let url = self.build_url(&self.maps_base_url, GEOCODE_PATH, &[("latlng", &latlng)])?;
        let body = self.get_json(&url).await?;
        Self::check_status(&body)?;

        let response: GeocodeResponse = decode(body, || format!("geocode(latlng={latlng})"))?;
        response
            .results
            .into_iter()
            .next()
            .map(GeocodeResult::from)
            .ok_or_else(|| GoogleMapsError::ZeroResults {
                context: format!("geocode(latlng={latlng})"),
            })
    }

    /// Asks the Geolocation API where the caller is, based on its IP address.
    ///
    /// # Errors
    ///
    /// - [`GoogleMapsError::LocationNotFound`] on HTTP 404.
    /// - [`GoogleMapsError::Http`] on network failure or any other non-2xx status.
    /// - [`GoogleMapsError::Deserialize`] if the response has an unexpected shape.
    pub async fn geolocate(&self) -> Result<Coordinate, GoogleMapsError> {
        let url = self.build_url(&self.geolocation_base_url, GEOLOCATE_PATH, &[])?;
        let response = self
            .client
            .post(url.clone())
            .json(&GeolocateRequest { consider_ip: true })
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GoogleMapsError::LocationNotFound);
        }
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let parsed: GeolocateResponse =
            serde_json::from_str(&body).map_err(|e| GoogleMapsError::Deserialize {
                context: "geolocate".to_owned(),
                source: e,
            })?;
        tracing::debug!(accuracy_m = parsed.accuracy, "geolocation resolved");
        Ok(parsed.location.into())
    }

    /// Builds the full request URL: joins `path` onto `base` and appends `key`
    /// followed by `extra`, percent-encoding every value.
    fn build_url(
        &self,
        base: &Url,
        path: &str,
        extra: &[(&str, &str)],
    ) -> Result<Url, GoogleMapsError> {
        let mut url = base
            .join(path)
            .map_err(|e| GoogleMapsError::InvalidBaseUrl {
                url: base.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the body as JSON.
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, GoogleMapsError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GoogleMapsError::Deserialize {
            context: redact_key(url),
            source: e,
        })
    }

    /// Checks the envelope `"status"` field. `OK` and `ZERO_RESULTS` pass.
    fn check_status(body: &serde_json::Value) -> Result<(), GoogleMapsError> {
        let status = body
            .get("status")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("UNKNOWN_ERROR");
        if matches!(status, "OK" | "ZERO_RESULTS") {
            return Ok(());
        }
        let message = body
            .get("error_message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("no error message")
            .to_owned();
        Err(GoogleMapsError::Api {
            status: status.to_owned(),
            message,
        })
    }
}

impl GeoProvider for GoogleMapsClient {
    async fn autocomplete(&self, input: &str, country: &str) -> Result<Vec<Suggestion>, GeoError> {
        Ok(self.autocomplete_places(input, country).await?)
    }

    async fn place_details(&self, place_id: &str) -> Result<Coordinate, GeoError> {
        Ok(self.place_location(place_id).await?)
    }

    async fn reverse_geocode(&self, at: Coordinate) -> Result<GeocodeResult, GeoError> {
        Ok(self.reverse_geocode_latlng(at).await?)
    }

    async fn current_location(&self) -> Result<Coordinate, GeoError> {
        Ok(self.geolocate().await?)
    }
}

/// Normalises a base URL so it ends with exactly one slash; otherwise
/// `Url::join` would replace the last path segment.
fn parse_base_url(raw: &str) -> Result<Url, GoogleMapsError> {
    let normalised = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| GoogleMapsError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

fn decode<T, C>(body: serde_json::Value, context: C) -> Result<T, GoogleMapsError>
where
    T: DeserializeOwned,
    C: FnOnce() -> String,
{
    serde_json::from_value(body).map_err(|e| GoogleMapsError::Deserialize {
        context: context(),
        source: e,
    })
}

/// Renders a request URL for error context without leaking the API key.
fn redact_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "[redacted]".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
