use httpmock::{Method::GET, MockServer};
use stockpulse_rs::{PulseError, Ticker, fundamentals};

use crate::common::{CRUMB, mock_client, mock_cookie_crumb, mock_quote_summary};

const KEY_FIGURES: &str = "price,summaryDetail,defaultKeyStatistics,financialData";
const STATEMENTS: &str = "incomeStatementHistory,balanceSheetHistory";

fn close(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < 1e-6)
}

#[tokio::test]
async fn offline_fundamentals_scale_fractions_to_percent() {
    let server = MockServer::start();
    mock_cookie_crumb(&server);
    let mock = mock_quote_summary(&server, "INFY.NS", KEY_FIGURES, "fundamentals_INFY");

    let client = mock_client(&server);
    let f = fundamentals::fundamentals(&client, "infy").await.unwrap();

    mock.assert();
    assert!(close(f.market_cap, 7.68e12));
    assert!(close(f.pe, 27.4));
    assert!(close(f.pb, 8.1));
    assert!(close(f.eps, 63.4));
    assert!(close(f.roe, 31.25));
    assert!(close(f.dividend_yield, 2.31));
    assert!(!f.is_empty());
}

#[tokio::test]
async fn offline_market_cap_falls_back_to_price_times_shares() {
    let server = MockServer::start();
    mock_cookie_crumb(&server);
    server.mock(|when, then| {
        when.method(GET)
            .path("/v10/finance/quoteSummary/ACME.NS")
            .query_param("modules", KEY_FIGURES)
            .query_param("crumb", CRUMB);
        then.status(200)
            .header("content-type", "application/json")
            .body(
                r#"{"quoteSummary":{"result":[{
                    "summaryDetail":{"trailingPE":{}},
                    "defaultKeyStatistics":{"sharesOutstanding":{"raw":2000000000}},
                    "financialData":{"currentPrice":{"raw":125.0}}
                }],"error":null}}"#,
            );
    });

    let client = mock_client(&server);
    let f = Ticker::new(&client, "ACME").fundamentals().await.unwrap();

    assert!(close(f.market_cap, 2.5e11));
    assert_eq!(f.pe, None);
    assert_eq!(f.roe, None);
}

#[tokio::test]
async fn offline_financials_convert_to_crores_and_keep_five_years() {
    let server = MockServer::start();
    mock_cookie_crumb(&server);
    let mock = mock_quote_summary(&server, "INFY.NS", STATEMENTS, "financials_INFY");

    let client = mock_client(&server);
    let h = fundamentals::financials(&client, "INFY").await.unwrap().unwrap();

    mock.assert_calls(1);
    assert_eq!(h.symbol, "INFY.NS");
    assert_eq!(
        h.revenue.keys().copied().collect::<Vec<_>>(),
        vec![2020, 2021, 2022, 2023, 2024]
    );
    assert_eq!(h.revenue[&2024], 153670.0);
    assert_eq!(h.revenue[&2020], 90791.0);
    assert_eq!(h.profit.len(), 5);
    assert_eq!(h.profit[&2024], 26233.0);
    assert_eq!(
        h.net_worth.keys().copied().collect::<Vec<_>>(),
        vec![2023, 2024]
    );
    assert_eq!(h.net_worth[&2024], 88140.0);

    assert_eq!(h.years(), vec![2020, 2021, 2022, 2023, 2024]);
    let growth = (153670.0 - 146767.0) / 146767.0 * 100.0;
    assert!(close(h.revenue_growth(), growth));
    assert!(close(h.profit_margin(), 26233.0 / 153670.0 * 100.0));
}

#[tokio::test]
async fn offline_financials_try_the_bare_symbol_after_nse() {
    let server = MockServer::start();
    mock_cookie_crumb(&server);
    let nse = server.mock(|when, then| {
        when.method(GET)
            .path("/v10/finance/quoteSummary/INFY.NS")
            .query_param("modules", STATEMENTS);
        then.status(404).body("Not Found");
    });
    let bare = mock_quote_summary(&server, "INFY", STATEMENTS, "financials_INFY");

    let client = mock_client(&server);
    let h = fundamentals::financials(&client, "infy").await.unwrap().unwrap();

    nse.assert_calls(1);
    bare.assert_calls(1);
    assert_eq!(h.symbol, "INFY");
}

#[tokio::test]
async fn offline_financials_without_figures_is_none() {
    let server = MockServer::start();
    mock_cookie_crumb(&server);
    server.mock(|when, then| {
        when.method(GET).path_prefix("/v10/finance/quoteSummary/");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"quoteSummary":{"result":[{}],"error":null}}"#);
    });

    let client = mock_client(&server);
    assert_eq!(fundamentals::financials(&client, "ACME").await.unwrap(), None);
}

#[tokio::test]
async fn offline_stale_crumb_is_refreshed_once() {
    let server = MockServer::start();
    mock_cookie_crumb(&server);
    let rejected = server.mock(|when, then| {
        when.method(GET).path("/v10/finance/quoteSummary/INFY.NS");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"quoteSummary":{"result":null,"error":{"code":"Unauthorized","description":"Invalid Crumb"}}}"#);
    });

    let client = mock_client(&server);
    let err = fundamentals::fundamentals(&client, "INFY").await.unwrap_err();

    rejected.assert_calls(2);
    assert!(matches!(err, PulseError::Data(ref m) if m.contains("Invalid Crumb")), "got {err:?}");
}

#[tokio::test]
async fn offline_empty_result_is_a_data_error() {
    let server = MockServer::start();
    mock_cookie_crumb(&server);
    server.mock(|when, then| {
        when.method(GET).path("/v10/finance/quoteSummary/INFY.NS");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"quoteSummary":{"result":[],"error":null}}"#);
    });

    let client = mock_client(&server);
    let err = fundamentals::fundamentals(&client, "INFY").await.unwrap_err();
    assert!(matches!(err, PulseError::Data(_)), "got {err:?}");
}

#[tokio::test]
async fn offline_missing_cookie_is_an_auth_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/consent");
        then.status(200).body("no cookie here");
    });

    let client = mock_client(&server);
    let err = fundamentals::fundamentals(&client, "INFY").await.unwrap_err();
    assert!(matches!(err, PulseError::Auth(_)), "got {err:?}");
}
