use httpmock::{Method::GET, MockServer};
use stockpulse_rs::{PulseClient, PulseError, SearchRequest, news};

use crate::common::{API_KEY, mock_client, news_base};

#[tokio::test]
async fn error_envelope_maps_to_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/everything");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#);
    });

    let client = mock_client(&server);
    let err = news::search(&client, &SearchRequest::new("infosys", 5))
        .await
        .unwrap_err();

    match err {
        PulseError::Api { code, message } => {
            assert_eq!(code, "apiKeyInvalid");
            assert_eq!(message, "Your API key is invalid.");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_key_maps_to_api_error_without_leaking_the_key() {
    let server = MockServer::start();
    let rejected = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/everything")
            .header("x-api-key", API_KEY)
            .query_param_missing("apiKey");
        then.status(401)
            .header("content-type", "application/json")
            .body(r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid or incorrect."}"#);
    });

    let client = mock_client(&server);
    let err = news::search(&client, &SearchRequest::new("infosys", 5))
        .await
        .unwrap_err();

    rejected.assert_calls(1);
    match &err {
        PulseError::Api { code, .. } => assert_eq!(code, "apiKeyInvalid"),
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(!err.to_string().contains(API_KEY));
    assert!(!format!("{err:?}").contains(API_KEY));
}

#[tokio::test]
async fn status_error_urls_never_carry_the_key() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/everything");
        then.status(403).body("<html>forbidden</html>");
    });

    let client = mock_client(&server);
    let err = news::search(&client, &SearchRequest::new("infosys", 5))
        .await
        .unwrap_err();

    match &err {
        PulseError::Status { status: 403, url } => {
            assert!(url.contains("/v2/everything"));
            assert!(!url.contains(API_KEY));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn status_codes_map_to_typed_errors() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/everything").query_param("q", "throttled");
        then.status(429).body("slow down");
    });
    server.mock(|when, then| {
        when.method(GET).path("/v2/everything").query_param("q", "broken");
        then.status(503).body("maintenance");
    });
    server.mock(|when, then| {
        when.method(GET).path("/v2/everything").query_param("q", "forbidden");
        then.status(403).body("nope");
    });

    let client = mock_client(&server);

    let err = news::search(&client, &SearchRequest::new("throttled", 5))
        .await
        .unwrap_err();
    assert!(matches!(err, PulseError::RateLimited { .. }), "got {err:?}");

    let err = news::search(&client, &SearchRequest::new("broken", 5))
        .await
        .unwrap_err();
    assert!(
        matches!(err, PulseError::ServerError { status: 503, .. }),
        "got {err:?}"
    );

    let err = news::search(&client, &SearchRequest::new("forbidden", 5))
        .await
        .unwrap_err();
    assert!(
        matches!(err, PulseError::Status { status: 403, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn retryable_status_is_retried_before_failing() {
    let server = MockServer::start();

    let flaky = server.mock(|when, then| {
        when.method(GET).path("/v2/everything");
        then.status(503).body("try again");
    });

    let client = PulseClient::builder()
        .base_news(news_base(&server))
        .api_key(API_KEY)
        .retry_config(stockpulse_rs::RetryConfig {
            max_retries: 2,
            backoff: stockpulse_rs::core::client::Backoff::Fixed(std::time::Duration::ZERO),
            ..Default::default()
        })
        .build()
        .unwrap();

    let err = news::search(&client, &SearchRequest::new("infosys", 5))
        .await
        .unwrap_err();

    // One initial attempt plus two retries.
    flaky.assert_calls(3);
    assert!(matches!(err, PulseError::ServerError { status: 503, .. }));
}

#[tokio::test]
async fn search_without_key_is_an_error() {
    let client = PulseClient::builder().build().unwrap();
    let err = news::search(&client, &SearchRequest::new("infosys", 5))
        .await
        .unwrap_err();
    assert!(matches!(err, PulseError::MissingApiKey));
}
