//! Integration tests for CitySearchClient and Geolocator using wiremock.

use skycast::api::{ApiError, CitySearchClient, Geolocator};
use skycast_core::Coordinates;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_search_keeps_service_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Lon"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {
                    "name": "London",
                    "latitude": 51.50853,
                    "longitude": -0.12574,
                    "country_code": "GB",
                    "country": "United Kingdom"
                },
                {
                    "name": "London",
                    "latitude": 42.98339,
                    "longitude": -81.23304,
                    "country_code": "CA",
                    "country": "Canada"
                },
                {
                    "name": "Long Beach",
                    "latitude": 33.76696,
                    "longitude": -118.18923,
                    "country_code": "US"
                }
            ],
            "generationtime_ms": 0.9
        })))
        .mount(&mock_server)
        .await;

    let client = CitySearchClient::new(&mock_server.uri()).unwrap();
    let candidates = client.search("Lon").await.unwrap();

    let labels: Vec<String> = candidates.iter().map(|c| c.label()).collect();
    assert_eq!(labels, vec!["London, GB", "London, CA", "Long Beach, US"]);
    assert_eq!(candidates[0].coordinates, Coordinates::new(51.50853, -0.12574));
}

#[tokio::test]
async fn test_search_without_results_field_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "generationtime_ms": 0.4
        })))
        .mount(&mock_server)
        .await;

    let client = CitySearchClient::new(&mock_server.uri()).unwrap();
    assert!(client.search("Qxz").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_skips_entries_without_country() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {"name": "Antarctic Station", "latitude": -75.0, "longitude": 0.0},
                {"name": "Anta", "latitude": -13.47, "longitude": -72.15, "country_code": "PE"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = CitySearchClient::new(&mock_server.uri()).unwrap();
    let candidates = client.search("Ant").await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].label(), "Anta, PE");
}

#[tokio::test]
async fn test_blank_prefix_skips_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = CitySearchClient::new(&mock_server.uri()).unwrap();
    assert!(client.search("   ").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_count_is_configurable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("count", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CitySearchClient::new(&mock_server.uri()).unwrap().with_count(3);
    client.search("Rio").await.unwrap();
}

#[tokio::test]
async fn test_ip_geolocation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "lat": 52.2297,
            "lon": 21.0122
        })))
        .mount(&mock_server)
        .await;

    let geolocator = Geolocator::ip_api(&mock_server.uri()).unwrap();
    let position = geolocator.locate().await.unwrap();
    assert_eq!(position, Coordinates::new(52.2297, 21.0122));
}

#[tokio::test]
async fn test_ip_geolocation_failure_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "private range"
        })))
        .mount(&mock_server)
        .await;

    let geolocator = Geolocator::ip_api(&mock_server.uri()).unwrap();
    let err = geolocator.locate().await.unwrap_err();
    assert!(matches!(err, ApiError::Unavailable(ref m) if m == "private range"));
}

#[tokio::test]
async fn test_fixed_geolocation_needs_no_server() {
    let here = Coordinates::new(-33.87, 151.21);
    let position = Geolocator::fixed(here).locate().await.unwrap();
    assert_eq!(position, here);
}
