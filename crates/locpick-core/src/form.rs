//! The parent page's shared form record and the partial updates the
//! selector writes into it.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::geo::Coordinate;

/// Whether a coverage radius is meaningful for the location being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    #[default]
    Point,
    Radius,
    District,
}

impl LocationType {
    /// `true` for the types that carry a coverage radius.
    #[must_use]
    pub fn uses_radius(self) -> bool {
        matches!(self, Self::Radius | Self::District)
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationType::Point => write!(f, "point"),
            LocationType::Radius => write!(f, "radius"),
            LocationType::District => write!(f, "district"),
        }
    }
}

impl std::str::FromStr for LocationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "point" => Ok(Self::Point),
            "radius" => Ok(Self::Radius),
            "district" => Ok(Self::District),
            other => Err(format!("unknown location type '{other}'")),
        }
    }
}

/// Form state owned by the host page.
///
/// Numeric fields accept numbers, numeric strings, empty strings or `null`
/// on input, since the admin forms post whatever the inputs hold. A blank or
/// `null` `location_type` reads as [`LocationType::Point`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationForm {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub radius_km: Option<f64>,
    #[serde(default, deserialize_with = "lenient_location_type")]
    pub location_type: LocationType,
    #[serde(default)]
    pub place_name: String,
}

impl LocationForm {
    /// The committed coordinate, if both halves are present.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Merges a partial update; `None` fields are left untouched.
    pub fn apply(&mut self, patch: &FormPatch) {
        if let Some(latitude) = patch.latitude {
            self.latitude = Some(latitude);
        }
        if let Some(longitude) = patch.longitude {
            self.longitude = Some(longitude);
        }
        if let Some(radius_km) = patch.radius_km {
            self.radius_km = Some(radius_km);
        }
        if let Some(place_name) = &patch.place_name {
            self.place_name.clone_from(place_name);
        }
    }
}

/// A partial update to [`LocationForm`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FormPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_name: Option<String>,
}

impl FormPatch {
    #[must_use]
    pub fn position(at: Coordinate) -> Self {
        Self {
            latitude: Some(at.latitude),
            longitude: Some(at.longitude),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn radius(radius_km: f64) -> Self {
        Self {
            radius_km: Some(radius_km),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn place_name(name: impl Into<String>) -> Self {
        Self {
            place_name: Some(name.into()),
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid number '{trimmed}': {e}")))
        }
    }
}

fn lenient_location_type<'de, D>(deserializer: D) -> Result<LocationType, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(LocationType::default()),
        Some(s) if s.trim().is_empty() => Ok(LocationType::default()),
        Some(s) => s.parse().map_err(de::Error::custom),
    }
}
