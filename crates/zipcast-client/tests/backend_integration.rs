//! Integration tests for BackendClient using wiremock.
//!
//! These tests verify the client behavior against a mock prediction backend.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zipcast_client::{load_directory, BackendClient, ClientError, ForecastBackend};

#[tokio::test]
async fn test_countries_and_towns() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "countries": ["france", "germany"]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/towns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "towns": ["berlin", "paris"]
        })))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&mock_server.uri()).unwrap();

    assert_eq!(client.countries().await.unwrap(), ["france", "germany"]);
    assert_eq!(client.towns().await.unwrap(), ["berlin", "paris"]);
}

#[tokio::test]
async fn test_load_directory_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "countries": ["france"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/towns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "towns": ["paris", "lyon"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&mock_server.uri()).unwrap();
    let directory = load_directory(&client).await.unwrap();

    assert_eq!(directory.countries.len(), 1);
    assert_eq!(directory.countries[0].label, "France");
    assert_eq!(directory.towns[1].value, "lyon");
    assert_eq!(directory.towns[1].label, "Lyon");
}

#[tokio::test]
async fn test_load_directory_fails_when_one_list_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "countries": ["france"]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/towns"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": "Internal server error while fetching towns"
        })))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&mock_server.uri()).unwrap();
    let result = load_directory(&client).await;

    assert!(matches!(result, Err(ClientError::Status { status: 500, .. })));
}

#[tokio::test]
async fn test_resolve_zip_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resolve_zip"))
        .and(query_param("zip", "75001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "country": "france",
            "town": "paris"
        })))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&mock_server.uri()).unwrap();
    let resolution = client.resolve_zip("75001").await.unwrap();

    assert_eq!(resolution.country.as_deref(), Some("france"));
    assert_eq!(resolution.town.as_deref(), Some("paris"));
}

#[tokio::test]
async fn test_resolve_zip_missing_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resolve_zip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "country": "france"
        })))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&mock_server.uri()).unwrap();
    let resolution = client.resolve_zip("75001").await.unwrap();

    assert_eq!(resolution.country.as_deref(), Some("france"));
    assert!(resolution.town.is_none());
}

#[tokio::test]
async fn test_resolve_zip_error_message_passthrough() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resolve_zip"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "Location not found for the provided ZIP code"
        })))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&mock_server.uri()).unwrap();
    let err = client.resolve_zip("00000").await.unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 404, .. }));
    assert_eq!(
        err.backend_message(),
        Some("Location not found for the provided ZIP code")
    );
}

#[tokio::test]
async fn test_error_without_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resolve_zip"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&mock_server.uri()).unwrap();
    let err = client.resolve_zip("75001").await.unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 502, .. }));
    assert_eq!(err.backend_message(), None);
}

#[tokio::test]
async fn test_predict_encodes_query_params() {
    let mock_server = MockServer::start().await;

    // query_param matches on decoded values
    Mock::given(method("GET"))
        .and(path("/predict"))
        .and(query_param("country", "united states"))
        .and(query_param("town", "st. louis & co"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "summary": { "average": 15, "max": 20, "min": 10 }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&mock_server.uri()).unwrap();
    let summary = client
        .predict("united states", "st. louis & co")
        .await
        .unwrap();

    assert_eq!(summary.max.to_string(), "20");
    assert_eq!(summary.average.to_string(), "15");
    assert_eq!(summary.min.to_string(), "10");
}

#[tokio::test]
async fn test_predict_with_empty_town() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/predict"))
        .and(query_param("country", "france"))
        .and(query_param("town", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "summary": {
                "average": "14.2 °C",
                "max": "31.0 °C",
                "min": "-3.5 °C",
                "data_points": 120
            }
        })))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&mock_server.uri()).unwrap();
    let summary = client.predict("france", "").await.unwrap();

    assert_eq!(summary.average.to_string(), "14.2 °C");
    assert_eq!(summary.data_points, Some(120));
}

#[tokio::test]
async fn test_predict_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "No weather data available for the specified location"
        })))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&mock_server.uri()).unwrap();
    let err = client.predict("atlantis", "").await.unwrap_err();

    assert_eq!(
        err.backend_message(),
        Some("No weather data available for the specified location")
    );
}

#[tokio::test]
async fn test_base_url_query_is_dropped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "countries": ["france"]
        })))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&format!("{}/?v=1", mock_server.uri())).unwrap();
    let countries = client.countries().await.unwrap();

    assert_eq!(client.base_url(), mock_server.uri());
    assert_eq!(countries, vec!["france".to_string()]);
}

#[tokio::test]
async fn test_malformed_success_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "unexpected": true
        })))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&mock_server.uri()).unwrap();
    let err = client.countries().await.unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_connection_refused() {
    // Nothing listens on port 9 on a test host
    let client = BackendClient::new("http://127.0.0.1:9").unwrap();
    let err = client.countries().await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
}
