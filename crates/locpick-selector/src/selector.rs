//! The location selector controller.
//!
//! Every way of picking a point (suggestion, map click, marker drag, device
//! location) funnels into the same commit sequence: move the marker, write
//! `latitude`/`longitude` into the form, re-center the map, then reverse
//! geocode in the background and write the resulting place label.
//!
//! Provider calls are split into a `begin_*` step that mutates local state and
//! hands out a ticket, a `resolve` step that only borrows the provider, and an
//! `apply_*` step. Each ticket carries a sequence number; only the response
//! to the most recently issued request is applied, so a slow autocomplete or
//! geocode response can never overwrite a newer one.

use locpick_core::{
    AppConfig, Coordinate, FormPatch, GeoError, GeoProvider, GeocodeResult, LocationForm,
    LocationType, Suggestion,
};

use crate::host::{Diagnostic, Notice, SelectorHost};
use crate::label::place_label;
use crate::radius::{RadiusOverlay, RadiusState};

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorConfig {
    /// ISO 3166-1 alpha-2 code autocomplete is restricted to.
    pub country: String,
    pub default_center: Coordinate,
    pub default_zoom: u8,
    /// Zoom applied after picking a search suggestion.
    pub search_zoom: u8,
    pub current_location_zoom: u8,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            country: "in".to_owned(),
            default_center: Coordinate::new(11.247_689, 75.803_559),
            default_zoom: 12,
            search_zoom: 15,
            current_location_zoom: 15,
        }
    }
}

impl SelectorConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            country: config.country.clone(),
            default_center: config.default_center,
            default_zoom: config.default_zoom,
            search_zoom: config.search_zoom,
            current_location_zoom: config.current_location_zoom,
        }
    }
}

/// An issued autocomplete request.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    seq: u64,
    query: String,
    country: String,
}

impl SearchTicket {
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub async fn resolve<P: GeoProvider>(self, provider: &P) -> SearchOutcome {
        let result = provider.autocomplete(&self.query, &self.country).await;
        SearchOutcome {
            seq: self.seq,
            query: self.query,
            result,
        }
    }
}

#[derive(Debug)]
pub struct SearchOutcome {
    pub seq: u64,
    pub query: String,
    pub result: Result<Vec<Suggestion>, GeoError>,
}

/// An issued reverse-geocoding request for a committed coordinate.
#[derive(Debug, Clone, Copy)]
pub struct GeocodeTicket {
    seq: u64,
    at: Coordinate,
}

impl GeocodeTicket {
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    #[must_use]
    pub fn at(&self) -> Coordinate {
        self.at
    }

    pub async fn resolve<P: GeoProvider>(self, provider: &P) -> GeocodeOutcome {
        let result = provider.reverse_geocode(self.at).await;
        GeocodeOutcome {
            seq: self.seq,
            at: self.at,
            result,
        }
    }
}

#[derive(Debug)]
pub struct GeocodeOutcome {
    pub seq: u64,
    pub at: Coordinate,
    pub result: Result<GeocodeResult, GeoError>,
}

pub struct LocationSelector<P, H> {
    provider: P,
    host: H,
    config: SelectorConfig,
    selected: Option<Coordinate>,
    center: Coordinate,
    zoom: u8,
    search_text: String,
    suggestions: Vec<Suggestion>,
    suggestions_visible: bool,
    searching: bool,
    radius: RadiusState,
    search_seq: u64,
    geocode_seq: u64,
}

impl<P, H> LocationSelector<P, H>
where
    P: GeoProvider,
    H: SelectorHost,
{
    /// Mounts the selector on the host's current form state.
    ///
    /// The map starts on the form's coordinate when both halves are present
    /// and valid, otherwise on `config.default_center` with nothing selected.
    /// The location-type transition runs once here, so a `point` form gets
    /// `radius_km = 0` pushed immediately.
    pub fn new(provider: P, host: H, form: &LocationForm, config: SelectorConfig) -> Self {
        let selected = form.coordinate().filter(Coordinate::is_valid);
        let center = selected.unwrap_or(config.default_center);
        let zoom = config.default_zoom;
        let incoming_radius = form.radius_km.unwrap_or(0.0);
        let radius = RadiusState::new(form.location_type, incoming_radius);

        let mut selector = Self {
            provider,
            host,
            config,
            selected,
            center,
            zoom,
            search_text: form.place_name.clone(),
            suggestions: Vec::new(),
            suggestions_visible: false,
            searching: false,
            radius,
            search_seq: 0,
            geocode_seq: 0,
        };

        selector.host.recenter_map(center, Some(zoom));
        if form.location_type.uses_radius()
            && (radius.radius_km() - incoming_radius).abs() > f64::EPSILON
        {
            selector.host.patch_form(FormPatch::radius(radius.radius_km()));
        }
        selector.set_location_type(form.location_type);
        selector
    }

    // -----------------------------------------------------------------------
    // accessors
    // -----------------------------------------------------------------------

    /// The committed coordinate, `None` until the operator picks something.
    #[must_use]
    pub fn selected(&self) -> Option<Coordinate> {
        self.selected
    }

    #[must_use]
    pub fn center(&self) -> Coordinate {
        self.center
    }

    #[must_use]
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    #[must_use]
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    #[must_use]
    pub fn suggestions_visible(&self) -> bool {
        self.suggestions_visible
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    #[must_use]
    pub fn location_type(&self) -> LocationType {
        self.radius.location_type()
    }

    #[must_use]
    pub fn radius_km(&self) -> f64 {
        self.radius.radius_km()
    }

    /// Whether the radius slider is shown.
    #[must_use]
    pub fn radius_visible(&self) -> bool {
        self.radius.controls_visible()
    }

    #[must_use]
    pub fn radius_overlay(&self) -> Option<RadiusOverlay> {
        self.radius.overlay(self.selected)
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    // -----------------------------------------------------------------------
    // search
    // -----------------------------------------------------------------------

    /// Records a keystroke in the search box.
    ///
    /// Blank input clears and hides the suggestions without a provider call
    /// and returns `None`. Either way, every in-flight autocomplete request is
    /// invalidated.
    pub fn begin_search(&mut self, text: &str) -> Option<SearchTicket> {
        text.clone_into(&mut self.search_text);
        self.search_seq += 1;

        let query = text.trim();
        if query.is_empty() {
            self.suggestions.clear();
            self.suggestions_visible = false;
            self.searching = false;
            return None;
        }

        self.searching = true;
        tracing::debug!(seq = self.search_seq, query, "autocomplete issued");
        Some(SearchTicket {
            seq: self.search_seq,
            query: query.to_owned(),
            country: self.config.country.clone(),
        })
    }

    /// Applies an autocomplete response. Returns `false` if it was stale.
    pub fn apply_search(&mut self, outcome: SearchOutcome) -> bool {
        if outcome.seq != self.search_seq {
            tracing::debug!(
                seq = outcome.seq,
                latest = self.search_seq,
                "discarding stale autocomplete response"
            );
            self.host.diagnostic(&Diagnostic::StaleAutocomplete {
                seq: outcome.seq,
                latest: self.search_seq,
            });
            return false;
        }

        self.searching = false;
        match outcome.result {
            Ok(suggestions) => {
                tracing::debug!(
                    seq = outcome.seq,
                    count = suggestions.len(),
                    "autocomplete applied"
                );
                self.suggestions_visible = !suggestions.is_empty();
                self.suggestions = suggestions;
            }
            Err(err) => {
                tracing::warn!(query = %outcome.query, error = %err, "autocomplete failed");
                self.host.diagnostic(&Diagnostic::AutocompleteFailed {
                    query: outcome.query,
                    error: err.to_string(),
                });
                self.suggestions.clear();
                self.suggestions_visible = false;
            }
        }
        true
    }

    /// Keystroke handler: issues the query and applies its response.
    pub async fn search(&mut self, text: &str) {
        if let Some(ticket) = self.begin_search(text) {
            let outcome = ticket.resolve(&self.provider).await;
            self.apply_search(outcome);
        }
    }

    /// Re-opens the overlay when the box regains focus with results pending.
    pub fn focus_search(&mut self) {
        if !self.suggestions.is_empty() {
            self.suggestions_visible = true;
        }
    }

    /// Leaving an emptied search box dismisses the overlay.
    pub fn blur_search(&mut self) {
        if self.search_text.trim().is_empty() {
            self.suggestions.clear();
            self.suggestions_visible = false;
        }
    }

    /// Picks the suggestion at `index`, resolves it to a coordinate and
    /// commits it at the search zoom level.
    ///
    /// A failed place lookup is logged and leaves the selection untouched.
    pub async fn select_suggestion(&mut self, index: usize) {
        let Some(suggestion) = self.suggestions.get(index).cloned() else {
            tracing::warn!(
                index,
                available = self.suggestions.len(),
                "suggestion index out of range"
            );
            return;
        };

        self.search_seq += 1;
        self.searching = false;
        self.suggestions.clear();
        self.suggestions_visible = false;
        self.search_text.clone_from(&suggestion.primary_text);

        let details = self.provider.place_details(&suggestion.place_id).await;
        match details {
            Ok(at) => {
                let zoom = self.config.search_zoom;
                self.commit_position(at, Some(zoom)).await;
            }
            Err(err) => {
                tracing::warn!(
                    place_id = %suggestion.place_id,
                    error = %err,
                    "place details lookup failed"
                );
                self.host.diagnostic(&Diagnostic::PlaceDetailsFailed {
                    place_id: suggestion.place_id,
                    error: err.to_string(),
                });
            }
        }
    }

    // -----------------------------------------------------------------------
    // map interaction
    // -----------------------------------------------------------------------

    /// A click on the map commits the clicked point without changing zoom.
    pub async fn click_map(&mut self, at: Coordinate) {
        self.commit_position(at, None).await;
    }

    /// Dropping the marker commits its new position without changing zoom.
    pub async fn drag_marker(&mut self, at: Coordinate) {
        self.commit_position(at, None).await;
    }

    /// Asks the provider for the device position and commits it.
    ///
    /// Failures raise a [`Notice`] and leave the current selection as it was.
    pub async fn use_current_location(&mut self) {
        let located = self.provider.current_location().await;
        match located {
            Ok(at) if at.is_valid() => {
                let zoom = self.config.current_location_zoom;
                self.commit_position(at, Some(zoom)).await;
            }
            Ok(at) => {
                tracing::warn!(%at, "device reported an invalid coordinate");
                self.host
                    .show_notice(Notice::new("Unable to fetch your current location."));
            }
            Err(err) => {
                tracing::warn!(error = %err, "current location unavailable");
                self.host.show_notice(Notice::new(geolocation_message(&err)));
            }
        }
    }

    // -----------------------------------------------------------------------
    // commit-position
    // -----------------------------------------------------------------------

    /// Runs the synchronous half of the commit sequence and returns the
    /// reverse-geocoding ticket for the new point.
    ///
    /// Invalid coordinates are rejected with a warning and `None`.
    pub fn begin_commit(&mut self, at: Coordinate, zoom: Option<u8>) -> Option<GeocodeTicket> {
        if !at.is_valid() {
            tracing::warn!(%at, "ignoring out-of-range coordinate");
            return None;
        }

        self.selected = Some(at);
        self.center = at;
        if let Some(zoom) = zoom {
            self.zoom = zoom;
        }
        self.host.patch_form(FormPatch::position(at));
        self.host.recenter_map(at, zoom);
        self.render_radius();

        self.geocode_seq += 1;
        tracing::debug!(seq = self.geocode_seq, %at, "position committed");
        Some(GeocodeTicket {
            seq: self.geocode_seq,
            at,
        })
    }

    /// Applies a reverse-geocoding response. Returns `false` if it was stale.
    ///
    /// Failures are soft: the place name and search text stay as they were.
    pub fn apply_geocode(&mut self, outcome: GeocodeOutcome) -> bool {
        if outcome.seq != self.geocode_seq {
            tracing::debug!(
                seq = outcome.seq,
                latest = self.geocode_seq,
                "discarding stale reverse-geocode response"
            );
            self.host.diagnostic(&Diagnostic::StaleReverseGeocode {
                seq: outcome.seq,
                latest: self.geocode_seq,
            });
            return false;
        }

        match outcome.result {
            Ok(result) => {
                let label = place_label(&result);
                if label.is_empty() {
                    tracing::debug!(at = %outcome.at, "reverse geocode produced no label");
                } else {
                    self.search_text.clone_from(&label);
                    self.host.patch_form(FormPatch::place_name(label));
                }
            }
            Err(GeoError::NotLoaded) => {
                tracing::error!(at = %outcome.at, "geocoder not loaded, skipping address lookup");
                self.host
                    .diagnostic(&Diagnostic::GeocoderUnavailable { at: outcome.at });
            }
            Err(err) => {
                tracing::warn!(at = %outcome.at, error = %err, "reverse geocode failed");
                self.host.diagnostic(&Diagnostic::ReverseGeocodeFailed {
                    at: outcome.at,
                    error: err.to_string(),
                });
            }
        }
        true
    }

    /// The full commit sequence: local state, form, map, then place label.
    pub async fn commit_position(&mut self, at: Coordinate, zoom: Option<u8>) {
        if let Some(ticket) = self.begin_commit(at, zoom) {
            let outcome = ticket.resolve(&self.provider).await;
            self.apply_geocode(outcome);
        }
    }

    // -----------------------------------------------------------------------
    // radius
    // -----------------------------------------------------------------------

    /// Slider change. The normalized value is pushed on every call and
    /// returned. While the type is `point` the slider is inert.
    pub fn set_radius(&mut self, radius_km: f64) -> f64 {
        if !self.radius.controls_visible() {
            tracing::debug!(radius_km, "radius ignored for point locations");
            return self.radius.radius_km();
        }
        self.radius = self.radius.with_radius(radius_km);
        self.host.patch_form(FormPatch::radius(self.radius.radius_km()));
        self.render_radius();
        self.radius.radius_km()
    }

    /// Reacts to the host's `location_type`. Switching to `point` always
    /// pushes `radius_km = 0`, even when it already was zero.
    pub fn set_location_type(&mut self, location_type: LocationType) {
        self.radius = self.radius.with_location_type(location_type);
        if location_type == LocationType::Point {
            self.host.patch_form(FormPatch::radius(0.0));
        }
        self.render_radius();
    }

    fn render_radius(&mut self) {
        let overlay = self.radius_overlay();
        self.host.render_radius(overlay);
    }
}

fn geolocation_message(err: &GeoError) -> &'static str {
    match err {
        GeoError::PermissionDenied => {
            "Location permission denied. Allow location access and try again."
        }
        GeoError::Unsupported => "Geolocation is not supported on this device.",
        _ => "Unable to fetch your current location.",
    }
}
