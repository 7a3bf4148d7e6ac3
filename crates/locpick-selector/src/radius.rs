//! Coverage radius slider state.
//!
//! The radius only means something for [`LocationType::Radius`] and
//! [`LocationType::District`]. Switching to [`LocationType::Point`] zeroes it
//! immediately, whatever it was before.

use locpick_core::{Coordinate, LocationType};

pub const MAX_RADIUS_KM: f64 = 50.0;
pub const RADIUS_STEP_KM: f64 = 0.5;

/// Clamps `km` to `[0, MAX_RADIUS_KM]` and snaps it to the nearest
/// `RADIUS_STEP_KM`. Non-finite input becomes `0`.
#[must_use]
pub fn normalize_radius(km: f64) -> f64 {
    if !km.is_finite() {
        return 0.0;
    }
    let clamped = km.clamp(0.0, MAX_RADIUS_KM);
    let snapped = (clamped / RADIUS_STEP_KM).round() * RADIUS_STEP_KM;
    // Avoid handing -0.0 to the form.
    if snapped <= 0.0 {
        0.0
    } else {
        snapped
    }
}

/// Circle drawn around the marker when a radius applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusOverlay {
    pub center: Coordinate,
    pub radius_m: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusState {
    location_type: LocationType,
    radius_km: f64,
}

impl RadiusState {
    #[must_use]
    pub fn new(location_type: LocationType, radius_km: f64) -> Self {
        Self {
            location_type,
            radius_km: normalize_radius(radius_km),
        }
        .with_location_type(location_type)
    }

    #[must_use]
    pub fn location_type(&self) -> LocationType {
        self.location_type
    }

    #[must_use]
    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Transition for a change of the host's location type.
    #[must_use]
    pub fn with_location_type(self, location_type: LocationType) -> Self {
        let radius_km = if location_type.uses_radius() {
            self.radius_km
        } else {
            0.0
        };
        Self {
            location_type,
            radius_km,
        }
    }

    /// Transition for a slider change. Ignored while the type is `Point`.
    #[must_use]
    pub fn with_radius(self, radius_km: f64) -> Self {
        if !self.location_type.uses_radius() {
            return self;
        }
        Self {
            radius_km: normalize_radius(radius_km),
            ..self
        }
    }

    /// Whether the slider is shown at all.
    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.location_type.uses_radius()
    }

    /// The circle to draw around `center`, if any.
    #[must_use]
    pub fn overlay(&self, center: Option<Coordinate>) -> Option<RadiusOverlay> {
        if !self.controls_visible() || self.radius_km <= 0.0 {
            return None;
        }
        center.map(|center| RadiusOverlay {
            center,
            radius_m: self.radius_km * 1000.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_step_multiple(km: f64) -> bool {
        (km / RADIUS_STEP_KM).fract() == 0.0
    }

    #[test]
    fn normalize_clamps_and_snaps() {
        assert_eq!(normalize_radius(12.5), 12.5);
        assert_eq!(normalize_radius(12.3), 12.5);
        assert_eq!(normalize_radius(12.2), 12.0);
        assert_eq!(normalize_radius(-3.0), 0.0);
        assert_eq!(normalize_radius(75.0), 50.0);
        assert_eq!(normalize_radius(f64::NAN), 0.0);
        assert_eq!(normalize_radius(f64::INFINITY), 0.0);
        assert!(normalize_radius(-0.0).is_sign_positive());
    }

    #[test]
    fn every_slider_value_lands_on_a_step_within_bounds() {
        let mut km = -5.0;
        while km <= 60.0 {
            let committed = RadiusState::new(LocationType::Radius, 0.0)
                .with_radius(km)
                .radius_km();
            assert!(
                (0.0..=MAX_RADIUS_KM).contains(&committed),
                "{km} -> {committed} out of range"
            );
            assert!(is_step_multiple(committed), "{km} -> {committed} off-step");
            km += 0.13;
        }
    }

    #[test]
    fn switching_to_point_zeroes_radius() {
        let state = RadiusState::new(LocationType::District, 30.0);
        assert_eq!(state.radius_km(), 30.0);
        let state = state.with_location_type(LocationType::Point);
        assert_eq!(state.radius_km(), 0.0);
        assert!(!state.controls_visible());
    }

    #[test]
    fn point_state_starts_at_zero_and_ignores_slider() {
        let state = RadiusState::new(LocationType::Point, 8.0);
        assert_eq!(state.radius_km(), 0.0);
        assert_eq!(state.with_radius(10.0).radius_km(), 0.0);
    }

    #[test]
    fn switching_between_radius_types_keeps_value() {
        let state = RadiusState::new(LocationType::Radius, 7.5)
            .with_location_type(LocationType::District);
        assert_eq!(state.radius_km(), 7.5);
    }

    #[test]
    fn overlay_needs_visible_type_positive_radius_and_center() {
        let at = Coordinate::new(11.0, 75.0);
        let state = RadiusState::new(LocationType::Radius, 2.5);
        assert_eq!(
            state.overlay(Some(at)),
            Some(RadiusOverlay {
                center: at,
                radius_m: 2500.0
            })
        );
        assert_eq!(state.overlay(None), None);
        assert_eq!(state.with_radius(0.0).overlay(Some(at)), None);
        assert_eq!(
            state.with_location_type(LocationType::Point).overlay(Some(at)),
            None
        );
    }
}
