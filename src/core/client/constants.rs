//! Centralized constants for default endpoints, UA and news pipeline knobs.

use std::time::Duration;

/// Default desktop UA; NSE rejects requests without a browser-like agent.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/123.0.0.0 Safari/537.36"
);

/// NewsAPI "everything" search endpoint.
pub(crate) const DEFAULT_BASE_NEWS: &str = "https://newsapi.org/v2/everything";

/// NSE site root. Visiting it first seeds the session cookies the API requires.
pub(crate) const DEFAULT_BASE_NSE: &str = "https://www.nseindia.com/";

/// Yahoo quoteSummary API base (symbol is appended).
pub(crate) const DEFAULT_BASE_QUOTE_API: &str =
    "https://query2.finance.yahoo.com/v10/finance/quoteSummary/";

/// A URL that returns a Set-Cookie header for Yahoo domains.
pub(crate) const DEFAULT_COOKIE_URL: &str = "https://fc.yahoo.com/consent";

/// URL to fetch a crumb (requires cookie from `DEFAULT_COOKIE_URL`).
pub(crate) const DEFAULT_CRUMB_URL: &str = "https://query2.finance.yahoo.com/v1/test/getcrumb";

/// Twitter v2 recent search endpoint.
pub(crate) const DEFAULT_BASE_SOCIAL: &str = "https://api.twitter.com/2/tweets/search/recent";

/// Value shipped in sample `.env` files; treated as "no key".
pub(crate) const PLACEHOLDER_API_KEY: &str = "your_newsapi_key_here";

/// Per-call network timeout.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Upper bound on search queries issued per news fetch (free-tier accommodation).
pub(crate) const DEFAULT_QUERY_CAP: usize = 8;

/// Pause after each search query.
pub(crate) const DEFAULT_QUERY_DELAY: Duration = Duration::from_millis(300);

/// Environment variable names read by `PulseClientBuilder::from_env`.
pub(crate) const ENV_API_KEY: &str = "NEWS_API_KEY";
pub(crate) const ENV_QUERY_CAP: &str = "STOCKPULSE_QUERY_CAP";
pub(crate) const ENV_QUERY_DELAY_MS: &str = "STOCKPULSE_QUERY_DELAY_MS";
pub(crate) const ENV_BEARER_TOKENS: &str = "TWITTER_BEARER_TOKENS";
