use httpmock::{Method::GET, MockServer};
use stockpulse_rs::{PulseError, shareholding};

use crate::common::{fixture, mock_client};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn mock_landing(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html><body>NSE</body></html>");
    })
}

#[tokio::test]
async fn offline_nse_breakdown_buckets_fixture_rows() {
    let server = MockServer::start();
    let landing = mock_landing(&server);
    let api = server.mock(|when, then| {
        when.method(GET)
            .path("/api/corporates-share-holdings")
            .query_param("index", "equities")
            .query_param("symbol", "INFY")
            .header("accept", "application/json, text/plain, */*");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("nse_shareholding", "INFY", "json"));
    });

    let client = mock_client(&server);
    let b = shareholding::nse_breakdown(&client, "infy.ns")
        .await
        .unwrap()
        .unwrap();

    landing.assert();
    api.assert();

    assert!(close(b.promoters, 14.43));
    assert!(close(b.foreign_institutions, 33.10));
    assert!(close(b.domestic_institutions, 31.7));
    assert!(close(b.retail, 20.77));
    assert!(close(b.institutions_total, 64.80));
    assert!(close(b.total(), 100.0));
}

#[tokio::test]
async fn offline_nse_unauthorized_is_a_status_error() {
    let server = MockServer::start();
    mock_landing(&server);
    server.mock(|when, then| {
        when.method(GET).path("/api/corporates-share-holdings");
        then.status(401).body("Unauthorized");
    });

    let client = mock_client(&server);
    let err = shareholding::nse_breakdown(&client, "TCS").await.unwrap_err();
    assert!(
        matches!(err, PulseError::Status { status: 401, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn offline_nse_landing_failure_is_not_fatal() {
    let server = MockServer::start();
    let landing = server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(503);
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/corporates-share-holdings")
            .query_param("symbol", "TCS");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"data":[{"category":"Promoter & Promoter Group","percentage":"71.77"}]}"#);
    });

    let client = mock_client(&server);
    let b = shareholding::nse_breakdown(&client, "TCS")
        .await
        .unwrap()
        .unwrap();

    landing.assert();
    assert!(close(b.promoters, 71.77));
    assert!(close(b.retail, 28.23));
}

#[tokio::test]
async fn offline_nse_empty_payload_is_none() {
    let server = MockServer::start();
    mock_landing(&server);
    server.mock(|when, then| {
        when.method(GET).path("/api/corporates-share-holdings");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"data":[]}"#);
    });

    let client = mock_client(&server);
    assert_eq!(shareholding::nse_breakdown(&client, "TCS").await.unwrap(), None);
}

#[tokio::test]
async fn offline_nse_unrecognized_object_is_a_data_error() {
    let server = MockServer::start();
    mock_landing(&server);
    server.mock(|when, then| {
        when.method(GET).path("/api/corporates-share-holdings");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"error":"blocked"}"#);
    });

    let client = mock_client(&server);
    let err = shareholding::nse_breakdown(&client, "TCS").await.unwrap_err();
    assert!(matches!(err, PulseError::Data(_)), "got {err:?}");
}
