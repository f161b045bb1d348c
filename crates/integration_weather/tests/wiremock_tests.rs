//! Integration tests for the Tomorrow.io client using wiremock
//!
//! These tests verify the client's behavior against a mock HTTP server,
//! ensuring proper handling of various response scenarios.

use chrono::NaiveDate;
use integration_weather::{
    TomorrowClient, WeatherClient, WeatherCondition, WeatherConfig, WeatherError,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Sample Tomorrow.io timeline response for testing
fn sample_timeline_response(days: usize, with_hourly: bool) -> serde_json::Value {
    let daily: Vec<serde_json::Value> = (0..days)
        .map(|i| {
            serde_json::json!({
                "time": format!("2024-01-{:02}T06:00:00Z", i + 10),
                "values": {
                    "temperatureAvg": 2.5 + i as f64,
                    "temperatureMin": -1.0,
                    "temperatureMax": 6.0,
                    "humidityAvg": 81.0,
                    "windSpeedAvg": 3.4,
                    "precipitationSum": 0.0,
                    "weatherCodeMax": 1001
                }
            })
        })
        .collect();

    let mut timelines = serde_json::json!({ "daily": daily });
    if with_hourly {
        timelines["hourly"] = serde_json::json!([
            { "time": "2024-01-10T00:00:00Z", "values": { "temperature": 1.0 } }
        ]);
    }

    serde_json::json!({
        "timelines": timelines,
        "location": { "lat": 52.52, "lon": 13.40, "name": "Berlin, Germany", "type": "administrative" }
    })
}

/// Create a test client configured to use the mock server
///
/// # Panics
///
/// Panics if the client cannot be created (should not happen in tests).
fn create_test_client(mock_server: &MockServer) -> TomorrowClient {
    let config = WeatherConfig {
        base_url: mock_server.uri(),
        api_key: Some("test-key".to_string()),
        timeout_secs: 5,
        ..Default::default()
    };
    #[allow(clippy::expect_used)]
    TomorrowClient::new(config).expect("Failed to create client")
}

/// Setup a mock for the given endpoint with the given response
async fn setup_mock(mock_server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_forecast_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather/forecast"))
        .and(query_param("location", "Berlin"))
        .and(query_param("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_timeline_response(6, true)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.forecast("Berlin", 5).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");

    let timeline = result.unwrap();
    assert_eq!(timeline.daily.len(), 5);
    assert_eq!(timeline.location_name.as_deref(), Some("Berlin, Germany"));
    assert_eq!(
        timeline.daily[0].date,
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    );
    assert_eq!(timeline.daily[0].condition, WeatherCondition::Cloudy);
    assert!((timeline.daily[0].temperature_avg.unwrap() - 2.5).abs() < 0.01);
}

#[tokio::test]
async fn test_recent_history_sends_timesteps() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather/history/recent"))
        .and(query_param("location", "Berlin"))
        .and(query_param("timesteps", "1h,1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_timeline_response(2, true)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let timeline = client
        .recent_history("Berlin", &["1h", "1d"])
        .await
        .unwrap();

    assert!(timeline.hourly_available);
    assert!(timeline.daily_available);
    assert_eq!(timeline.daily.len(), 2);
    assert_eq!(
        timeline.daily[1].date,
        NaiveDate::from_ymd_opt(2024, 1, 11).unwrap()
    );
}

#[tokio::test]
async fn test_recent_history_daily_only() {
    let mock_server = MockServer::start().await;

    setup_mock(
        &mock_server,
        "/weather/history/recent",
        ResponseTemplate::new(200).set_body_json(sample_timeline_response(1, false)),
    )
    .await;

    let client = create_test_client(&mock_server);
    let timeline = client.recent_history("Berlin", &["1d"]).await.unwrap();

    assert!(!timeline.hourly_available);
    assert!(timeline.daily_available);
}

#[tokio::test]
async fn test_empty_timelines_yield_no_days() {
    let mock_server = MockServer::start().await;

    setup_mock(
        &mock_server,
        "/weather/history/recent",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "timelines": {} })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let timeline = client.recent_history("Nowhere", &["1d"]).await.unwrap();

    assert!(timeline.daily.is_empty());
    assert!(!timeline.daily_available);
}

// ============================================================================
// Error handling scenarios
// ============================================================================

#[tokio::test]
async fn test_unknown_location_returns_not_found() {
    let mock_server = MockServer::start().await;

    setup_mock(
        &mock_server,
        "/weather/forecast",
        ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": 400001,
            "type": "Invalid Query Parameters",
            "message": "failed to query by the term 'Atlantis'"
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.forecast("Atlantis", 5).await;

    assert!(
        matches!(result, Err(WeatherError::LocationNotFound(ref l)) if l == "Atlantis"),
        "Expected LocationNotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn test_server_error_returns_service_unavailable() {
    let mock_server = MockServer::start().await;

    setup_mock(
        &mock_server,
        "/weather/history/recent",
        ResponseTemplate::new(503).set_body_string("Service Unavailable"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.recent_history("Berlin", &["1d"]).await;

    assert!(
        matches!(result, Err(WeatherError::ServiceUnavailable(_))),
        "Expected ServiceUnavailable, got: {result:?}"
    );
}

#[tokio::test]
async fn test_rate_limit_error() {
    let mock_server = MockServer::start().await;

    setup_mock(
        &mock_server,
        "/weather/forecast",
        ResponseTemplate::new(429).set_body_string("Too Many Requests"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.forecast("Berlin", 5).await;

    assert!(
        matches!(result, Err(WeatherError::RateLimitExceeded)),
        "Expected RateLimitExceeded, got: {result:?}"
    );
}

#[tokio::test]
async fn test_unauthorized_returns_request_failed() {
    let mock_server = MockServer::start().await;

    setup_mock(
        &mock_server,
        "/weather/forecast",
        ResponseTemplate::new(401).set_body_string("Unauthorized"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.forecast("Berlin", 5).await;

    assert!(matches!(result, Err(WeatherError::RequestFailed(_))));
}

#[tokio::test]
async fn test_malformed_json_returns_parse_error() {
    let mock_server = MockServer::start().await;

    setup_mock(
        &mock_server,
        "/weather/forecast",
        ResponseTemplate::new(200).set_body_string("not json"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.forecast("Berlin", 5).await;

    assert!(
        matches!(result, Err(WeatherError::ParseError(_))),
        "Expected ParseError, got: {result:?}"
    );
}

#[tokio::test]
async fn test_bad_timestamp_returns_parse_error() {
    let mock_server = MockServer::start().await;

    setup_mock(
        &mock_server,
        "/weather/history/recent",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "timelines": { "daily": [ { "time": "yesterday", "values": {} } ] }
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.recent_history("Berlin", &["1d"]).await;

    assert!(matches!(result, Err(WeatherError::ParseError(_))));
}

#[tokio::test]
async fn test_timeout_returns_connection_failed() {
    let mock_server = MockServer::start().await;

    setup_mock(
        &mock_server,
        "/weather/forecast",
        ResponseTemplate::new(200)
            .set_body_json(sample_timeline_response(1, false))
            .set_delay(std::time::Duration::from_secs(3)),
    )
    .await;

    let config = WeatherConfig {
        base_url: mock_server.uri(),
        api_key: Some("test-key".to_string()),
        timeout_secs: 1,
        ..Default::default()
    };
    let client = TomorrowClient::new(config).unwrap();
    let result = client.forecast("Berlin", 5).await;

    assert!(
        matches!(result, Err(WeatherError::ConnectionFailed(_))),
        "Expected ConnectionFailed, got: {result:?}"
    );
}
