//! Integration tests for `GoogleMapsClient` using wiremock HTTP mocks.

use locpick_core::{AddressKind, Coordinate, GeoError, GeoProvider};
use locpick_google::{GoogleMapsClient, GoogleMapsError};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GoogleMapsClient {
    GoogleMapsClient::with_base_urls("test-key", Some(5), base_url, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn autocomplete_returns_suggestions_in_provider_order() {
    let server = MockServer::start().await;

    let body = json!({
        "status": "OK",
        "predictions": [
            {
                "place_id": "ChIJ-kozhikode",
                "description": "Kozhikode, Kerala, India",
                "structured_formatting": {
                    "main_text": "Kozhikode",
                    "secondary_text": "Kerala, India"
                }
            },
            {
                "place_id": "ChIJ-beach",
                "description": "Kozhikode Beach, Kozhikode, Kerala, India"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/maps/api/place/autocomplete/json"))
        .and(query_param("input", "Kozhikode"))
        .and(query_param("components", "country:in"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let suggestions = client
        .autocomplete_places("Kozhikode", "in")
        .await
        .expect("should parse predictions");

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].place_id, "ChIJ-kozhikode");
    assert_eq!(suggestions[0].primary_text, "Kozhikode");
    assert_eq!(suggestions[0].secondary_text, "Kerala, India");
    assert_eq!(
        suggestions[1].primary_text,
        "Kozhikode Beach, Kozhikode, Kerala, India"
    );
    assert_eq!(suggestions[1].secondary_text, "");
}

#[tokio::test]
async fn autocomplete_zero_results_is_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/autocomplete/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&json!({"status": "ZERO_RESULTS", "predictions": []})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let suggestions = client.autocomplete_places("zzzz", "in").await.unwrap();
    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn request_denied_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/autocomplete/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "status": "REQUEST_DENIED",
            "error_message": "This API project is not authorized to use this API."
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.autocomplete_places("Calicut", "in").await.unwrap_err();
    assert!(
        matches!(err, GoogleMapsError::Api { ref status, .. } if status == "REQUEST_DENIED"),
        "expected Api(REQUEST_DENIED), got: {err:?}"
    );
}

#[tokio::test]
async fn place_details_returns_geometry_location() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/details/json"))
        .and(query_param("place_id", "ChIJ-beach"))
        .and(query_param("fields", "geometry"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "status": "OK",
            "result": { "geometry": { "location": { "lat": 11.2588, "lng": 75.7804 } } }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let at = client.place_location("ChIJ-beach").await.unwrap();
    assert_eq!(at, Coordinate::new(11.2588, 75.7804));
}

#[tokio::test]
async fn place_details_not_found_status_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"status": "NOT_FOUND"})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.place_location("gone").await.unwrap_err();
    assert!(matches!(err, GoogleMapsError::Api { ref status, .. } if status == "NOT_FOUND"));
}

#[tokio::test]
async fn reverse_geocode_uses_first_result() {
    let server = MockServer::start().await;

    let body = json!({
        "status": "OK",
        "results": [
            {
                "formatted_address": "5/3, Beach Rd, Kozhikode, Kerala 673032, India",
                "address_components": [
                    { "long_name": "Kozhikode", "short_name": "Kozhikode", "types": ["locality", "political"] },
                    { "long_name": "Kerala", "short_name": "KL", "types": ["administrative_area_level_1", "political"] },
                    { "long_name": "India", "short_name": "IN", "types": ["country", "political"] },
                    { "long_name": "673032", "short_name": "673032", "types": ["postal_code"] }
                ]
            },
            {
                "formatted_address": "Kerala, India",
                "address_components": []
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .and(query_param("latlng", "11.2588,75.7804"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .reverse_geocode_latlng(Coordinate::new(11.2588, 75.7804))
        .await
        .unwrap();

    assert_eq!(
        result.formatted_address,
        "5/3, Beach Rd, Kozhikode, Kerala 673032, India"
    );
    assert_eq!(result.component(&AddressKind::Locality), Some("Kozhikode"));
    assert_eq!(
        result.component(&AddressKind::AdministrativeAreaLevel1),
        Some("Kerala")
    );
    assert_eq!(result.component(&AddressKind::PostalCode), Some("673032"));
}

#[tokio::test]
async fn reverse_geocode_zero_results_maps_to_no_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&json!({"status": "ZERO_RESULTS", "results": []})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = GeoProvider::reverse_geocode(&client, Coordinate::new(0.0, 0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, GeoError::NoResults), "got: {err:?}");
}

#[tokio::test]
async fn geolocate_posts_consider_ip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/geolocation/v1/geolocate"))
        .and(query_param("key", "test-key"))
        .and(body_json(json!({"considerIp": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "location": { "lat": 11.25, "lng": 75.77 },
            "accuracy": 1200.0
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let at = client.geolocate().await.unwrap();
    assert_eq!(at, Coordinate::new(11.25, 75.77));
}

#[tokio::test]
async fn geolocate_not_found_maps_to_location_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/geolocation/v1/geolocate"))
        .respond_with(ResponseTemplate::new(404).set_body_json(&json!({
            "error": { "code": 404, "message": "Not Found", "errors": [{ "reason": "notFound" }] }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.geolocate().await.unwrap_err();
    assert!(matches!(err, GoogleMapsError::LocationNotFound));
}

#[tokio::test]
async fn server_error_maps_to_transport_at_provider_boundary() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/autocomplete/json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = GeoProvider::autocomplete(&client, "Kozhikode", "in")
        .await
        .unwrap_err();
    assert!(matches!(err, GeoError::Transport(_)), "got: {err:?}");
}

#[tokio::test]
async fn transport_errors_do_not_leak_the_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/autocomplete/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.autocomplete_places("Koz", "in").await.unwrap_err();
    assert!(matches!(err, GoogleMapsError::Http(_)), "got: {err:?}");
    assert!(!err.to_string().contains("test-key"), "key leaked: {err}");
    assert!(!format!("{err:?}").contains("test-key"), "key leaked: {err:?}");

    let err = GeoProvider::autocomplete(&client, "Koz", "in")
        .await
        .unwrap_err();
    assert!(matches!(err, GeoError::Transport(_)), "got: {err:?}");
    assert!(!err.to_string().contains("test-key"), "key leaked: {err}");
}

#[tokio::test]
async fn malformed_body_maps_to_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.place_location("x").await.unwrap_err();
    match err {
        GoogleMapsError::Deserialize { context, .. } => {
            assert!(!context.contains("test-key"), "key leaked: {context}");
        }
        other => panic!("expected Deserialize, got: {other:?}"),
    }
}
