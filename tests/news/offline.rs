use std::time::Duration;

use chrono::{TimeZone, Utc};
use httpmock::{Method::GET, MockServer};
use stockpulse_rs::{FeedStatus, NewsBuilder, PulseClient};

use crate::common::{API_KEY, fixture, mock_client, news_base};

#[tokio::test]
async fn offline_news_filters_dedups_and_keeps_order() {
    let server = MockServer::start();

    // Defined first so the first planned query lands here.
    let first_query = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/everything")
            .query_param("q", "\"infosys\" India stock market")
            .query_param("language", "en")
            .query_param("sortBy", "relevancy")
            .query_param("pageSize", "5")
            .header("x-api-key", API_KEY);
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("news_everything", "INFY", "json"));
    });
    let rest = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/everything")
            .query_param("sortBy", "relevancy");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("news_everything", "INFY", "json"));
    });

    let client = mock_client(&server);
    let feed = NewsBuilder::new(&client, "infy.ns").fetch().await;

    first_query.assert_calls(1);
    rest.assert_calls(7);

    assert_eq!(feed.symbol, "INFY");
    assert_eq!(feed.status, FeedStatus::Relevant);
    let titles: Vec<&str> = feed.articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Infosys share price surges amid strong results",
            "Infosys Q2 profit rises 5% on deal wins",
        ]
    );

    let first = &feed.articles[0];
    assert_eq!(first.source_name, "Economic Times");
    assert_eq!(
        first.description,
        "The IT major beat street estimates for the September quarter."
    );
    assert_eq!(
        first.url.as_deref(),
        Some("https://example.com/markets/infosys-share-price-surges")
    );
    assert_eq!(
        first.published_at,
        Some(Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap())
    );

    let second = &feed.articles[1];
    assert_eq!(second.source_name, "Unknown");
    assert_eq!(second.url, None);
    assert_eq!(second.published_at, None);
}

#[tokio::test]
async fn offline_news_falls_back_to_broad_search_when_nothing_relevant() {
    let server = MockServer::start();

    let fallback = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/everything")
            .query_param("q", "INFY stock India NSE BSE")
            .query_param("sortBy", "publishedAt")
            .query_param("pageSize", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("news_everything", "fallback", "json"));
    });
    let targeted = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/everything")
            .query_param("sortBy", "relevancy")
            .query_param("pageSize", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("news_everything", "offtopic", "json"));
    });

    let client = mock_client(&server);
    let feed = NewsBuilder::new(&client, "INFY")
        .count(2)
        .max_queries(3)
        .fetch()
        .await;

    targeted.assert_calls(3);
    fallback.assert_calls(1);

    assert_eq!(feed.status, FeedStatus::Fallback);
    assert_eq!(feed.len(), 2);
    assert_eq!(feed.articles[0].title, "Stocks to watch: INFY, TCS, WIPRO");
    assert_eq!(feed.articles[1].title, "NSE closing bell: Nifty ends higher");
}

#[tokio::test]
async fn offline_news_upstream_failures_yield_empty_feed() {
    let server = MockServer::start();

    let failing = server.mock(|when, then| {
        when.method(GET).path("/v2/everything");
        then.status(500).body("upstream unavailable");
    });

    let client = mock_client(&server);
    let feed = NewsBuilder::new(&client, "TCS").fetch().await;

    // Eight targeted queries plus the fallback, none of them fatal.
    failing.assert_calls(9);
    assert_eq!(feed.status, FeedStatus::Empty);
    assert!(feed.is_empty());
}

#[tokio::test]
async fn offline_news_without_api_key_makes_no_requests() {
    let server = MockServer::start();

    let any = server.mock(|when, then| {
        when.method(GET).path("/v2/everything");
        then.status(200).body(r#"{"status":"ok","articles":[]}"#);
    });

    let client = PulseClient::builder()
        .base_news(news_base(&server))
        .api_key("your_newsapi_key_here")
        .query_delay(Duration::ZERO)
        .build()
        .unwrap();
    assert!(!client.has_news_key());

    let feed = NewsBuilder::new(&client, "INFY").fetch().await;

    any.assert_calls(0);
    assert_eq!(feed.status, FeedStatus::Empty);
}

#[tokio::test]
async fn offline_search_is_served_from_cache_on_second_call() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/everything")
            .query_param("q", "wipro results");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("news_everything", "fallback", "json"));
    });

    let client = PulseClient::builder()
        .base_news(news_base(&server))
        .api_key(API_KEY)
        .cache_ttl(Duration::from_secs(30))
        .build()
        .unwrap();
    assert!(client.cache_enabled());

    let req = stockpulse_rs::SearchRequest::new("wipro results", 5);
    let first = stockpulse_rs::news::search(&client, &req).await.unwrap();
    let second = stockpulse_rs::news::search(&client, &req).await.unwrap();

    mock.assert_calls(1);
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    assert_eq!(first[2].description, "");
}
