//! Integration tests for `RoutingClient` using wiremock HTTP mocks.

use danamap_core::Coordinate;
use danamap_routing::{RoutingClient, RoutingError};
use wiremock::matchers::{method, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn waypoints() -> Vec<Coordinate> {
    vec![
        Coordinate::new(16.054, 108.247).unwrap(),
        Coordinate::new(16.1004, 108.2772).unwrap(),
    ]
}

#[tokio::test]
async fn route_parses_geometry_and_steps() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "code": "Ok",
        "routes": [
            {
                "distance": 9300.5,
                "duration": 1080.0,
                "geometry": {
                    "type": "LineString",
                    "coordinates": [
                        [108.247, 16.054],
                        [108.26, 16.07],
                        [108.2772, 16.1004]
                    ]
                },
                "legs": [
                    {
                        "steps": [
                            {
                                "name": "Võ Nguyên Giáp",
                                "distance": 5000.0,
                                "duration": 600.0,
                                "maneuver": { "type": "depart" }
                            },
                            {
                                "name": "Hoàng Sa",
                                "distance": 4300.5,
                                "duration": 480.0,
                                "maneuver": { "type": "turn", "modifier": "left" }
                            }
                        ]
                    }
                ]
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/.+$"))
        .and(query_param("overview", "full"))
        .and(query_param("geometries", "geojson"))
        .and(query_param("steps", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = RoutingClient::with_base_url(&server.uri()).unwrap();
    let route = client.route(&waypoints()).await.expect("should parse route");

    assert_eq!(route.points.len(), 3);
    // Coordinates arrive lng,lat and must be flipped.
    assert!((route.points[0].lat - 16.054).abs() < 1e-9);
    assert!((route.points[0].lng - 108.247).abs() < 1e-9);
    assert_eq!(route.turns.len(), 2);
    assert_eq!(route.turns[1].road, "Hoàng Sa");
    assert_eq!(route.turns[1].modifier.as_deref(), Some("left"));
    assert!((route.distance_meters - 9300.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn route_no_route_code_is_typed_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "code": "NoRoute", "message": "Impossible route." });

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = RoutingClient::with_base_url(&server.uri()).unwrap();
    let err = client.route(&waypoints()).await.unwrap_err();
    assert!(matches!(err, RoutingError::NoRoute), "got: {err:?}");
}

#[tokio::test]
async fn route_other_error_code_carries_message() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "code": "InvalidQuery", "message": "Query string malformed." });

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = RoutingClient::with_base_url(&server.uri()).unwrap();
    let err = client.route(&waypoints()).await.unwrap_err();
    assert!(
        matches!(err, RoutingError::Api { ref code, .. } if code == "InvalidQuery"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn route_requires_two_waypoints() {
    let client = RoutingClient::with_base_url("http://localhost:5000").unwrap();
    let one = waypoints()[..1].to_vec();
    let err = client.route(&one).await.unwrap_err();
    assert!(matches!(err, RoutingError::NotEnoughWaypoints { got: 1 }));
}

#[tokio::test]
async fn route_server_error_is_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/.+$"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = RoutingClient::with_base_url(&server.uri()).unwrap();
    let err = client.route(&waypoints()).await.unwrap_err();
    assert!(matches!(err, RoutingError::Http(_)), "got: {err:?}");
}
