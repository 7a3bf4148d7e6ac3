//! Headless location selector for the marketplace admin forms.
//!
//! [`LocationSelector`] owns the search box, autocomplete suggestions, marker
//! and radius slider, and writes the chosen place into the host page's form
//! through [`SelectorHost`]. All mapping and geocoding goes through an
//! injected [`locpick_core::GeoProvider`].

pub mod host;
pub mod label;
pub mod radius;
pub mod selector;

pub use host::{Diagnostic, Notice, SelectorHost};
pub use label::place_label;
pub use radius::{normalize_radius, RadiusOverlay, RadiusState, MAX_RADIUS_KM, RADIUS_STEP_KM};
pub use selector::{
    GeocodeOutcome, GeocodeTicket, LocationSelector, SearchOutcome, SearchTicket, SelectorConfig,
};
