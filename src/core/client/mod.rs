//! Public client surface + builder.
//! Internals are split into `auth` (cookie/crumb), `retry` (policy + send loop)
//! and `constants` (UA + defaults).

mod auth;
mod constants;
mod retry;

pub use retry::{Backoff, CacheMode, RetryConfig};

use crate::core::PulseError;
use constants::{
    DEFAULT_BASE_NEWS, DEFAULT_BASE_NSE, DEFAULT_BASE_QUOTE_API, DEFAULT_BASE_SOCIAL,
    DEFAULT_COOKIE_URL, DEFAULT_CRUMB_URL, DEFAULT_QUERY_CAP, DEFAULT_QUERY_DELAY,
    DEFAULT_TIMEOUT, ENV_API_KEY, ENV_BEARER_TOKENS, ENV_QUERY_CAP, ENV_QUERY_DELAY_MS,
    PLACEHOLDER_API_KEY, USER_AGENT,
};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use url::Url;

#[derive(Debug)]
struct CacheEntry {
    body: String,
    expires_at: Instant,
}

#[derive(Debug)]
struct CacheStore {
    map: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

#[derive(Debug, Default)]
struct CredentialState {
    cookie: Option<String>,
    crumb: Option<String>,
}

/// Shared HTTP client for the news, social search, Yahoo and NSE endpoints.
///
/// Cloning is cheap; clones share the connection pool, cookie jar, Yahoo
/// credentials and cache.
#[derive(Debug, Clone)]
pub struct PulseClient {
    http: Client,
    base_news: Url,
    base_nse: Url,
    base_quote_api: Url,
    cookie_url: Url,
    crumb_url: Url,
    base_social: Url,
    api_key: Option<String>,
    bearer_tokens: Arc<[String]>,
    token_cursor: Arc<AtomicUsize>,
    retry: RetryConfig,
    query_cap: usize,
    query_delay: Duration,

    state: Arc<RwLock<CredentialState>>,
    credential_fetch_lock: Arc<Mutex<()>>,

    cache: Option<Arc<CacheStore>>,
}

impl Default for PulseClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl PulseClient {
    /// Create a new builder.
    pub fn builder() -> PulseClientBuilder {
        PulseClientBuilder::default()
    }

    /// Create a builder pre-populated from the environment (see [`PulseClientBuilder::from_env`]).
    ///
    /// # Errors
    ///
    /// Returns `PulseError::Config` if an environment value is malformed.
    pub fn builder_from_env() -> Result<PulseClientBuilder, PulseError> {
        PulseClientBuilder::from_env()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_news(&self) -> &Url {
        &self.base_news
    }
    pub(crate) fn base_nse(&self) -> &Url {
        &self.base_nse
    }
    pub(crate) fn base_quote_api(&self) -> &Url {
        &self.base_quote_api
    }
    pub(crate) fn base_social(&self) -> &Url {
        &self.base_social
    }
    pub(crate) fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
    pub(crate) fn bearer_tokens(&self) -> &[String] {
        &self.bearer_tokens
    }
    pub(crate) fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Whether a usable news API key is configured.
    pub fn has_news_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Number of configured social search bearer tokens.
    ///
    /// Each token buys one search per cooldown window, so this is the natural
    /// size of a [`RequestQuota`](crate::RequestQuota).
    pub fn bearer_token_count(&self) -> usize {
        self.bearer_tokens.len()
    }

    /// Index of the bearer token the next social search starts from.
    pub(crate) fn token_cursor(&self) -> usize {
        self.token_cursor.load(Ordering::Relaxed)
    }

    /// Makes the token at `idx` the first one tried by later searches.
    pub(crate) fn set_token_cursor(&self, idx: usize) {
        self.token_cursor.store(idx, Ordering::Relaxed);
    }

    /// Default number of search queries per news fetch.
    pub fn query_cap(&self) -> usize {
        self.query_cap
    }

    /// Default pause after each search query.
    pub fn query_delay(&self) -> Duration {
        self.query_delay
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    pub(crate) async fn cache_get(&self, url: &Url) -> Option<String> {
        let store = self.cache.as_ref()?;
        let key = url.as_str().to_string();
        let guard = store.map.read().await;
        if let Some(entry) = guard.get(&key)
            && Instant::now() <= entry.expires_at
        {
            return Some(entry.body.clone());
        }
        None
    }

    pub(crate) async fn cache_put(&self, url: &Url, body: &str, ttl_override: Option<Duration>) {
        let store = match &self.cache {
            Some(s) => s.clone(),
            None => return,
        };
        let key = url.as_str().to_string();
        let ttl = ttl_override.unwrap_or(store.default_ttl);
        let expires_at = Instant::now() + ttl;
        let entry = CacheEntry {
            body: body.to_string(),
            expires_at,
        };
        let mut guard = store.map.write().await;
        guard.retain(|_, e| Instant::now() <= e.expires_at);
        guard.insert(key, entry);
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct PulseClientBuilder {
    user_agent: Option<String>,
    base_news: Option<Url>,
    base_nse: Option<Url>,
    base_quote_api: Option<Url>,
    cookie_url: Option<Url>,
    crumb_url: Option<Url>,
    base_social: Option<Url>,
    api_key: Option<String>,
    bearer_tokens: Vec<String>,
    retry: Option<RetryConfig>,
    query_cap: Option<usize>,
    query_delay: Option<Duration>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    cache_ttl: Option<Duration>,
}

impl PulseClientBuilder {
    /// Start from the process environment.
    ///
    /// Loads a `.env` file if present, then reads `NEWS_API_KEY`,
    /// `TWITTER_BEARER_TOKENS` (comma separated), `STOCKPULSE_QUERY_CAP`
    /// and `STOCKPULSE_QUERY_DELAY_MS`.
    ///
    /// # Errors
    ///
    /// Returns `PulseError::Config` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, PulseError> {
        dotenvy::dotenv().ok();

        let mut b = Self::default();
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            b = b.api_key(key);
        }
        if let Ok(raw) = std::env::var(ENV_BEARER_TOKENS) {
            b = b.bearer_tokens(raw.split(','));
        }
        if let Ok(raw) = std::env::var(ENV_QUERY_CAP) {
            let cap = raw
                .trim()
                .parse::<usize>()
                .map_err(|e| PulseError::Config(format!("{ENV_QUERY_CAP}={raw}: {e}")))?;
            b = b.query_cap(cap);
        }
        if let Ok(raw) = std::env::var(ENV_QUERY_DELAY_MS) {
            let ms = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| PulseError::Config(format!("{ENV_QUERY_DELAY_MS}={raw}: {e}")))?;
            b = b.query_delay(Duration::from_millis(ms));
        }
        Ok(b)
    }

    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the news search endpoint (e.g., `https://newsapi.org/v2/everything`).
    pub fn base_news(mut self, url: Url) -> Self {
        self.base_news = Some(url);
        self
    }

    /// Override the NSE site root (e.g., `https://www.nseindia.com/`).
    pub fn base_nse(mut self, url: Url) -> Self {
        self.base_nse = Some(url);
        self
    }

    /// Override the Yahoo quoteSummary base (symbol is appended).
    pub fn base_quote_api(mut self, url: Url) -> Self {
        self.base_quote_api = Some(url);
        self
    }

    /// Override the URL that hands out Yahoo session cookies.
    pub fn cookie_url(mut self, url: Url) -> Self {
        self.cookie_url = Some(url);
        self
    }

    /// Override the Yahoo crumb URL.
    pub fn crumb_url(mut self, url: Url) -> Self {
        self.crumb_url = Some(url);
        self
    }

    /// Override the social recent-search endpoint.
    pub fn base_social(mut self, url: Url) -> Self {
        self.base_social = Some(url);
        self
    }

    /// Bearer tokens for the social search endpoint, tried in order. Blank entries are dropped.
    pub fn bearer_tokens<I, T>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.bearer_tokens = tokens
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    /// Set the news provider API key. Blank keys and the sample placeholder are ignored.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        let trimmed = key.trim();
        self.api_key = if trimmed.is_empty() || trimmed == PLACEHOLDER_API_KEY {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Set the default retry policy.
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Maximum number of search queries issued per news fetch. Default: 8.
    pub fn query_cap(mut self, cap: usize) -> Self {
        self.query_cap = Some(cap);
        self
    }

    /// Pause after each search query. Default: 300ms.
    pub fn query_delay(mut self, delay: Duration) -> Self {
        self.query_delay = Some(delay);
        self
    }

    /// Set a global request timeout (overall). Default: 15s.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Enable in-memory caching with a default TTL.
    /// If not set, caching is disabled.
    pub fn cache_ttl(mut self, dur: Duration) -> Self {
        self.cache_ttl = Some(dur);
        self
    }

    pub fn build(self) -> Result<PulseClient, PulseError> {
        let base_news = match self.base_news {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_NEWS)?,
        };
        let base_nse = match self.base_nse {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_NSE)?,
        };
        let base_quote_api = match self.base_quote_api {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_QUOTE_API)?,
        };
        let cookie_url = match self.cookie_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_COOKIE_URL)?,
        };
        let crumb_url = match self.crumb_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_CRUMB_URL)?,
        };
        let base_social = match self.base_social {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_SOCIAL)?,
        };

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .cookie_store(true)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT));

        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(PulseClient {
            http,
            base_news,
            base_nse,
            base_quote_api,
            cookie_url,
            crumb_url,
            base_social,
            api_key: self.api_key,
            bearer_tokens: self.bearer_tokens.into(),
            token_cursor: Arc::new(AtomicUsize::new(0)),
            retry: self.retry.unwrap_or_default(),
            query_cap: self.query_cap.unwrap_or(DEFAULT_QUERY_CAP),
            query_delay: self.query_delay.unwrap_or(DEFAULT_QUERY_DELAY),
            state: Arc::new(RwLock::new(CredentialState::default())),
            credential_fetch_lock: Arc::new(Mutex::new(())),
            cache: self.cache_ttl.map(|ttl| {
                Arc::new(CacheStore {
                    map: RwLock::new(HashMap::new()),
                    default_ttl: ttl,
                })
            }),
        })
    }
}
