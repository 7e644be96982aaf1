//! Integration tests for `PumpFetcher` and `IpLocation` over real HTTP.
//!
//! Uses `wiremock` to stand up a local server per test so no external
//! network traffic is made.

use std::time::Duration;

use pumpfinder_client::{
    ClientError, FixedLocation, IpLocation, LocationError, LocationProvider, PumpFetcher,
    ReqwestHttpClient,
};
use pumpfinder_core::{Coordinate, PumpResult, Variant};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http() -> ReqwestHttpClient {
    ReqwestHttpClient::new(5, "pumpfinder-test/0.1").expect("failed to build test http client")
}

fn fetcher(base_url: &str) -> PumpFetcher<ReqwestHttpClient> {
    PumpFetcher::new(http(), base_url).expect("fetcher construction should not fail")
}

// ---------------------------------------------------------------------------
// Nearest variant
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_nearest_returns_pump_and_distance() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearest"))
        .and(query_param("lat", "10.5"))
        .and(query_param("lon", "20.25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pump": {"id": 1, "name": "Station A", "lat": 10.0, "lon": 20.0},
            "distance": 42.5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = fetcher(&server.uri())
        .fetch(Variant::Nearest, Coordinate::new(10.5, 20.25))
        .await
        .expect("should decode nearest result");

    let PumpResult::Nearest(nearest) = result else {
        panic!("expected nearest result");
    };
    assert_eq!(nearest.pump.id, 1);
    assert_eq!(nearest.pump.name, "Station A");
    assert!((nearest.distance - 42.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn fetch_nearest_rejects_list_shaped_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pumps": []})))
        .mount(&server)
        .await;

    let result = fetcher(&server.uri())
        .fetch(Variant::Nearest, Coordinate::new(0.0, 0.0))
        .await;

    assert!(
        matches!(result, Err(ClientError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// List variant
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_list_returns_pumps_in_server_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pumps"))
        .and(query_param("lat", "-33.8688"))
        .and(query_param("lon", "151.2093"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pumps": [
                {"id": 1, "name": "A", "lat": 0, "lon": 0, "distance": 5},
                {"id": 2, "name": "B", "lat": 1, "lon": 1}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = fetcher(&server.uri())
        .fetch(Variant::List, Coordinate::new(-33.8688, 151.2093))
        .await
        .expect("should decode list result");

    let PumpResult::List(list) = result else {
        panic!("expected list result");
    };
    assert_eq!(list.pumps.len(), 2);
    assert_eq!(list.pumps[0].name, "A");
    assert_eq!(list.pumps[0].distance, Some(5.0));
    assert_eq!(list.pumps[1].name, "B");
    assert_eq!(list.pumps[1].distance, None);
}

#[tokio::test]
async fn fetch_list_accepts_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pumps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pumps": []})))
        .mount(&server)
        .await;

    let result = fetcher(&server.uri())
        .fetch(Variant::List, Coordinate::new(1.0, 1.0))
        .await
        .expect("empty list is a valid response");

    assert!(matches!(result, PumpResult::List(ref l) if l.pumps.is_empty()));
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_fails_on_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearest"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = fetcher(&server.uri())
        .fetch(Variant::Nearest, Coordinate::new(1.0, 2.0))
        .await;

    assert!(
        matches!(result, Err(ClientError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_fails_on_server_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pumps"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"pumps": []})))
        .mount(&server)
        .await;

    let result = fetcher(&server.uri())
        .fetch(Variant::List, Coordinate::new(1.0, 2.0))
        .await;

    assert!(
        matches!(result, Err(ClientError::Http(_))),
        "expected Http, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_fails_on_validation_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearest"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{"loc": ["query", "lat"], "msg": "field required"}]
        })))
        .mount(&server)
        .await;

    let result = fetcher(&server.uri())
        .fetch(Variant::Nearest, Coordinate::new(1.0, 2.0))
        .await;

    assert!(result.is_err(), "expected error, got: {result:?}");
}

#[tokio::test]
async fn fetch_fails_when_server_is_unreachable() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let result = fetcher(&uri)
        .fetch(Variant::Nearest, Coordinate::new(1.0, 2.0))
        .await;

    assert!(
        matches!(result, Err(ClientError::Http(_))),
        "expected Http, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_fails_on_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearest"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "pump": {"id": 1, "name": "Station A", "lat": 10.0, "lon": 20.0},
                    "distance": 42.5
                }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let http = ReqwestHttpClient::new(1, "pumpfinder-test/0.1").expect("failed to build client");
    let result = PumpFetcher::new(http, &server.uri())
        .expect("fetcher construction should not fail")
        .fetch(Variant::Nearest, Coordinate::new(1.0, 2.0))
        .await;

    assert!(
        matches!(result, Err(ClientError::Http(ref e)) if e.is_timeout()),
        "expected timeout, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Location providers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fixed_location_yields_its_coordinate() {
    let provider = FixedLocation::new(Coordinate::new(48.8566, 2.3522));
    let coord = provider.current_position().await.expect("fixed position");
    assert_eq!(coord, Coordinate::new(48.8566, 2.3522));
}

#[tokio::test]
async fn unset_location_is_unavailable() {
    let result = FixedLocation::unset().current_position().await;
    assert!(matches!(result, Err(LocationError::Unavailable)));
}

#[tokio::test]
async fn ip_location_reads_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "lat": 51.5074,
            "lon": -0.1278
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = IpLocation::new(http(), &format!("{}/json", server.uri()))
        .expect("valid locator url");
    let coord = provider.current_position().await.expect("should resolve");
    assert_eq!(coord, Coordinate::new(51.5074, -0.1278));
}

#[tokio::test]
async fn ip_location_fails_on_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let provider = IpLocation::new(http(), &format!("{}/json", server.uri()))
        .expect("valid locator url");
    let result = provider.current_position().await;
    assert!(
        matches!(result, Err(LocationError::Lookup(_))),
        "expected Lookup, got: {result:?}"
    );
}
