mod api;
mod model;
mod query;
mod wire;

pub use model::{FeedStatus, NewsFeed, NewsRecord};
pub use query::{fallback_query, plan_queries};

use std::time::Duration;

use crate::{
    PulseClient, PulseError,
    core::{
        NewsSearch, SearchRequest, normalize_symbol,
        client::{CacheMode, RetryConfig},
    },
    relevance::RelevanceFilter,
};

/// Default number of articles kept per feed.
pub const DEFAULT_ARTICLE_COUNT: usize = 15;

/// Runs a single news search with the client's default cache and retry policy.
///
/// # Errors
///
/// Returns `PulseError::MissingApiKey` when no key is configured, or a transport,
/// status or provider error for the query.
pub async fn search(client: &PulseClient, req: &SearchRequest) -> Result<Vec<NewsRecord>, PulseError> {
    api::search_everything(client, req, CacheMode::Use, None).await
}

/// A builder for fetching relevance-filtered news for a specific symbol.
pub struct NewsBuilder {
    client: PulseClient,
    symbol: String,
    count: usize,
    max_queries: usize,
    query_delay: Duration,
    filter: RelevanceFilter,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl NewsBuilder {
    /// Creates a new `NewsBuilder` for a given symbol.
    ///
    /// Exchange suffixes such as `.NS` are stripped.
    pub fn new(client: &PulseClient, symbol: impl AsRef<str>) -> Self {
        Self {
            client: client.clone(),
            symbol: normalize_symbol(symbol.as_ref()),
            count: DEFAULT_ARTICLE_COUNT,
            max_queries: client.query_cap(),
            query_delay: client.query_delay(),
            filter: RelevanceFilter::default(),
            cache_mode: CacheMode::Use,
            retry_override: None,
        }
    }

    /// Sets the cache mode for this specific API call.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Sets the maximum number of news articles to return.
    #[must_use]
    pub const fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Caps how many search queries are issued before filtering.
    #[must_use]
    pub const fn max_queries(mut self, n: usize) -> Self {
        self.max_queries = n;
        self
    }

    /// Sets the pause after each search query.
    #[must_use]
    pub const fn query_delay(mut self, delay: Duration) -> Self {
        self.query_delay = delay;
        self
    }

    /// Replaces the relevance filter (alias and keyword tables).
    #[must_use]
    pub fn filter(mut self, filter: RelevanceFilter) -> Self {
        self.filter = filter;
        self
    }

    /// The normalized symbol this builder fetches for.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Executes the queries and returns the filtered feed.
    ///
    /// Upstream failures never surface here; they yield fewer (possibly zero) articles,
    /// reported through [`NewsFeed::status`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(symbol = %self.symbol)))]
    pub async fn fetch(self) -> NewsFeed {
        if !self.client.has_news_key() {
            #[cfg(feature = "tracing")]
            tracing::warn!("no news API key configured; returning empty feed");
            return NewsFeed::empty(self.symbol);
        }

        let search = api::ConfiguredSearch {
            client: &self.client,
            cache_mode: self.cache_mode,
            retry_override: self.retry_override.as_ref(),
        };
        self.run(&search).await
    }

    /// Executes the pipeline against an arbitrary search backend.
    pub async fn fetch_with<S: NewsSearch + ?Sized>(self, search: &S) -> NewsFeed {
        self.run(search).await
    }

    async fn run<S: NewsSearch + ?Sized>(&self, search: &S) -> NewsFeed {
        let opts = api::PipelineOptions {
            count: self.count,
            max_queries: self.max_queries,
            query_delay: self.query_delay,
        };
        api::collect_feed(search, &self.filter, &self.symbol, &opts).await
    }
}
