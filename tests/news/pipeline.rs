use std::{collections::HashMap, future::Future, pin::Pin, sync::Mutex, time::Duration};

use stockpulse_rs::{
    CompanyAliasSet, FeedStatus, NewsBuilder, NewsRecord, NewsSearch, PulseClient, PulseError,
    RelevanceFilter, SearchRequest, SortBy,
    news::{fallback_query, plan_queries},
};

use crate::common::record;

/// Canned search backend keyed by exact query text.
#[derive(Default)]
struct StubSearch {
    answers: HashMap<String, Vec<NewsRecord>>,
    failing: Vec<String>,
    log: Mutex<Vec<SearchRequest>>,
}

impl StubSearch {
    fn answer(mut self, query: &str, records: Vec<NewsRecord>) -> Self {
        self.answers.insert(query.to_string(), records);
        self
    }

    fn fail(mut self, query: &str) -> Self {
        self.failing.push(query.to_string());
        self
    }

    fn requests(&self) -> Vec<SearchRequest> {
        self.log.lock().unwrap().clone()
    }
}

impl NewsSearch for StubSearch {
    fn search<'a>(
        &'a self,
        req: &'a SearchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<NewsRecord>, PulseError>> + Send + 'a>> {
        Box::pin(async move {
            self.log.lock().unwrap().push(req.clone());
            if self.failing.contains(&req.query) {
                return Err(PulseError::ServerError {
                    status: 502,
                    url: "stub".into(),
                });
            }
            Ok(self.answers.get(&req.query).cloned().unwrap_or_default())
        })
    }
}

fn acme_filter() -> RelevanceFilter {
    RelevanceFilter::with_aliases(CompanyAliasSet::from_entries([(
        "ACME",
        ["acme corp", "acme"],
    )]))
}

fn builder(symbol: &str) -> NewsBuilder {
    NewsBuilder::new(&PulseClient::default(), symbol)
        .filter(acme_filter())
        .query_delay(Duration::ZERO)
}

#[test]
fn plan_quotes_each_alias_with_every_market_phrase() {
    let aliases = vec!["acme corp".to_string(), "acme".to_string()];
    let queries = plan_queries("ACME", &aliases);

    assert_eq!(queries.len(), 10);
    assert_eq!(queries[0], "\"acme corp\" India stock market");
    assert_eq!(queries[4], "\"acme corp\" sensex nifty");
    assert_eq!(queries[5], "\"acme\" India stock market");
}

#[test]
fn flagship_symbols_get_symbol_queries_last() {
    let queries = plan_queries("TCS", &["tcs".to_string()]);
    assert_eq!(queries.len(), 9);
    assert_eq!(queries[5], "\"TCS\" stock analysis");
    assert_eq!(queries[8], "\"TCS\" earnings");
    assert_eq!(fallback_query("TCS"), "TCS stock India NSE BSE");
}

#[tokio::test]
async fn failing_query_does_not_abort_the_rest() {
    let stub = StubSearch::default()
        .fail("\"acme corp\" India stock market")
        .answer(
            "\"acme corp\" NSE BSE",
            vec![record("Acme Corp share price jumps", "Strong demand.")],
        );

    let feed = builder("ACME").max_queries(3).fetch_with(&stub).await;

    assert_eq!(stub.requests().len(), 3);
    assert_eq!(feed.status, FeedStatus::Relevant);
    assert_eq!(feed.articles[0].title, "Acme Corp share price jumps");
}

#[tokio::test]
async fn page_size_is_capped_at_five_and_queries_at_the_limit() {
    let stub = StubSearch::default();

    let _ = builder("ACME").count(12).max_queries(4).fetch_with(&stub).await;
    let reqs = stub.requests();

    // Four targeted queries plus the fallback.
    assert_eq!(reqs.len(), 5);
    assert!(reqs[..4].iter().all(|r| r.page_size == 5));
    assert!(reqs[..4].iter().all(|r| r.sort == SortBy::Relevancy));

    let fallback = &reqs[4];
    assert_eq!(fallback.query, "ACME stock India NSE BSE");
    assert_eq!(fallback.sort, SortBy::PublishedAt);
    assert_eq!(fallback.page_size, 12);

    let stub = StubSearch::default();
    let _ = builder("ACME").count(3).max_queries(1).fetch_with(&stub).await;
    assert_eq!(stub.requests()[0].page_size, 3);
}

#[tokio::test]
async fn relevant_results_are_truncated_to_count() {
    let batch: Vec<NewsRecord> = (1..=5)
        .map(|i| record(&format!("Acme profit climbs {i}%"), "Quarterly results beat."))
        .collect();
    let stub = StubSearch::default()
        .answer("\"acme corp\" India stock market", batch.clone())
        .answer("\"acme corp\" NSE BSE", batch);

    let feed = builder("ACME").count(3).max_queries(2).fetch_with(&stub).await;

    assert_eq!(feed.status, FeedStatus::Relevant);
    let titles: Vec<&str> = feed.articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Acme profit climbs 1%", "Acme profit climbs 2%", "Acme profit climbs 3%"]
    );
    // No fallback once something relevant was found.
    assert_eq!(stub.requests().len(), 2);
}

#[tokio::test]
async fn fallback_is_unfiltered_and_truncated() {
    let stub = StubSearch::default()
        .answer(
            "\"acme corp\" India stock market",
            vec![record("Acme Corp hiring spree", "Stock steady.")],
        )
        .answer(
            "ACME stock India NSE BSE",
            vec![
                record("Markets open flat", ""),
                record("Rupee firms against dollar", ""),
                record("Markets open flat", ""),
            ],
        );

    let feed = builder("ACME").count(2).max_queries(1).fetch_with(&stub).await;

    assert_eq!(feed.status, FeedStatus::Fallback);
    assert_eq!(feed.len(), 2);
    assert_eq!(feed.articles[0].title, "Markets open flat");
    assert_eq!(feed.articles[1].title, "Rupee firms against dollar");
}

#[tokio::test]
async fn zero_count_or_blank_symbol_issues_no_queries() {
    let stub = StubSearch::default();

    let feed = builder("ACME").count(0).fetch_with(&stub).await;
    assert_eq!(feed.status, FeedStatus::Empty);

    let feed = builder("  ").fetch_with(&stub).await;
    assert_eq!(feed.status, FeedStatus::Empty);
    assert_eq!(feed.symbol, "");

    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn unknown_symbol_searches_by_lowercased_symbol() {
    let stub = StubSearch::default().answer(
        "\"zenith\" India stock market",
        vec![record("Zenith stock hits record high", "")],
    );

    let feed = builder("zenith.ns").max_queries(1).fetch_with(&stub).await;

    assert_eq!(feed.symbol, "ZENITH");
    assert_eq!(feed.status, FeedStatus::Relevant);
    assert_eq!(stub.requests()[0].query, "\"zenith\" India stock market");
}
