use locpick_core::{AddressKind, GeocodeResult};

/// Builds the human-readable place label for a reverse-geocoding result.
///
/// The label is `"<area>, <state>, <country>"`, where `<area>` is the
/// locality or, failing that, the second-level administrative area. Missing
/// parts are skipped. With no usable component at all the provider's
/// formatted address is returned as-is.
#[must_use]
pub fn place_label(result: &GeocodeResult) -> String {
    let area = result
        .component(&AddressKind::Locality)
        .or_else(|| result.component(&AddressKind::AdministrativeAreaLevel2));
    let parts: Vec<&str> = [
        area,
        result.component(&AddressKind::AdministrativeAreaLevel1),
        result.component(&AddressKind::Country),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        result.formatted_address.trim().to_owned()
    } else {
        parts.join(", ")
    }
}
