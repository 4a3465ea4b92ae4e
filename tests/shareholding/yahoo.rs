use httpmock::{Method::GET, MockServer};
use stockpulse_rs::{PromoterSplit, Ticker, shareholding};

use crate::common::{fixture, mock_client, mock_cookie_crumb, mock_quote_summary};

const HOLDER_MODULES: &str =
    "defaultKeyStatistics,majorHoldersBreakdown,institutionOwnership,fundOwnership";

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn mock_nse(server: &MockServer, status: u16) {
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200).body("<html>NSE</html>");
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/corporates-share-holdings");
        if status == 200 {
            then.status(200)
                .header("content-type", "application/json")
                .body(fixture("nse_shareholding", "INFY", "json"));
        } else {
            then.status(status).body("Unauthorized");
        }
    });
}

#[tokio::test]
async fn offline_yahoo_holders_fill_gaps_from_major_holders() {
    let server = MockServer::start();
    mock_cookie_crumb(&server);
    let mock = mock_quote_summary(&server, "INFY.NS", HOLDER_MODULES, "holders_INFY");

    let client = mock_client(&server);
    let b = shareholding::yahoo_breakdown(&client, "INFY").await.unwrap();

    mock.assert();
    // Insiders come from the major-holders row, institutions from the direct field.
    assert!(close(b.promoters.unwrap(), 14.43));
    assert!(close(b.institutions.unwrap(), 65.12));
    assert!(close(b.public.unwrap(), 20.45));
}

#[tokio::test]
async fn promoter_split_prefers_nse() {
    let server = MockServer::start();
    mock_nse(&server, 200);
    mock_cookie_crumb(&server);
    let yahoo = mock_quote_summary(&server, "INFY.NS", HOLDER_MODULES, "holders_INFY");

    let client = mock_client(&server);
    let split = Ticker::new(&client, "INFY").promoter_split().await;

    yahoo.assert_calls(0);
    assert!(close(split.promoters, 14.43));
    assert!(close(split.public, 85.57));
    assert!(split.live);
}

#[tokio::test]
async fn promoter_split_falls_back_to_yahoo() {
    let server = MockServer::start();
    mock_nse(&server, 401);
    mock_cookie_crumb(&server);
    let yahoo = mock_quote_summary(&server, "INFY.NS", HOLDER_MODULES, "holders_INFY");

    let client = mock_client(&server);
    let split = shareholding::promoter_split(&client, "INFY").await;

    yahoo.assert_calls(1);
    assert!(close(split.promoters, 14.43));
    assert!(split.live);
}

#[tokio::test]
async fn promoter_split_without_any_source_is_a_placeholder() {
    let server = MockServer::start();
    mock_nse(&server, 401);
    server.mock(|when, then| {
        when.method(GET).path("/consent");
        then.status(404);
    });

    let client = mock_client(&server);
    let split = Ticker::new(&client, "INFY").promoter_split().await;

    assert_eq!(split, PromoterSplit::from_promoters(None));
    assert_eq!((split.promoters, split.public, split.live), (0.0, 100.0, false));
}
