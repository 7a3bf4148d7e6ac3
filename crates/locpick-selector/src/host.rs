//! The seam between the selector and the page embedding it.

use locpick_core::{Coordinate, FormPatch};

use crate::radius::RadiusOverlay;

/// A dismissible, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Soft failures and discarded responses, reported for observability only.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    AutocompleteFailed { query: String, error: String },
    PlaceDetailsFailed { place_id: String, error: String },
    ReverseGeocodeFailed { at: Coordinate, error: String },
    /// The geocoding primitive was not initialized; the lookup was skipped.
    GeocoderUnavailable { at: Coordinate },
    StaleAutocomplete { seq: u64, latest: u64 },
    StaleReverseGeocode { seq: u64, latest: u64 },
}

/// Everything the selector needs from the page that embeds it.
///
/// Calls happen synchronously from the selector's methods; none of them can
/// fail from the selector's point of view.
pub trait SelectorHost {
    /// Merges a partial update into the page's form state.
    fn patch_form(&mut self, patch: FormPatch);

    /// Re-centers the map. `zoom` is `None` when the current zoom should be kept.
    fn recenter_map(&mut self, center: Coordinate, zoom: Option<u8>);

    /// Draws the coverage circle, or removes it when `overlay` is `None`.
    fn render_radius(&mut self, overlay: Option<RadiusOverlay>);

    fn show_notice(&mut self, notice: Notice);

    /// Optional diagnostic sink. Ignored by default.
    fn diagnostic(&mut self, _event: &Diagnostic) {}
}
