use serde::Serialize;

use crate::{
    core::{CacheMode, PulseClient, PulseError, client::RetryConfig, normalize_symbol},
    fundamentals::{self, FinancialHistory, Fundamentals},
    news::{NewsBuilder, NewsFeed},
    profile::{self, CompanyProfile},
    quota::RequestQuota,
    sentiment::{PolarityScorer, SentimentClassifier, SentimentTally},
    shareholding::{self, CategoryBreakdown, HolderBreakdown, PromoterSplit},
    social::{SocialBuilder, SocialOutcome},
};

/// A feed together with its sentiment tally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsSentiment {
    pub feed: NewsFeed,
    /// Zero when the feed is empty.
    pub tally: SentimentTally,
}

/// A high-level interface for a single symbol, providing convenient access to its news,
/// news and social sentiment, fundamentals, profile and ownership data.
///
/// Yahoo lookups use the NSE listing of the normalized symbol (`INFY` becomes `INFY.NS`).
///
/// # Example
///
/// ```no_run
/// # use stockpulse_rs::{PulseClient, Ticker};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PulseClient::builder().api_key("my-key").build()?;
/// let ticker = Ticker::new(&client, "INFY.NS");
///
/// let report = ticker.news_sentiment().await;
/// println!("{} articles ({:?})", report.feed.len(), report.feed.status);
/// if let Some(overall) = report.tally.overall() {
///     println!("overall: {:.1}% {}", overall.score, overall.label);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Ticker {
    #[doc(hidden)]
    pub(crate) client: PulseClient,
    #[doc(hidden)]
    pub(crate) symbol: String,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl Ticker {
    /// Creates a new `Ticker`; exchange suffixes such as `.NS` are stripped.
    pub fn new(client: &PulseClient, symbol: impl AsRef<str>) -> Self {
        Self {
            client: client.clone(),
            symbol: normalize_symbol(symbol.as_ref()),
            cache_mode: CacheMode::Use,
            retry_override: None,
        }
    }

    /// Sets the cache mode for all subsequent API calls made by this `Ticker` instance.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the client's default retry policy for all subsequent API calls made by this `Ticker` instance.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /* ---------------- News ---------------- */

    /// Returns a `NewsBuilder` to customize the news request.
    pub fn news_builder(&self) -> NewsBuilder {
        NewsBuilder::new(&self.client, &self.symbol)
            .cache_mode(self.cache_mode)
            .retry_policy(self.retry_override.clone())
    }

    /// Fetches up to 15 relevant articles with default settings.
    pub async fn news(&self) -> NewsFeed {
        self.news_builder().fetch().await
    }

    /// Fetches the news feed and tallies its sentiment with the default VADER classifier.
    pub async fn news_sentiment(&self) -> NewsSentiment {
        self.news_sentiment_with(&SentimentClassifier::default())
            .await
    }

    /// Like [`Ticker::news_sentiment`], with a caller-supplied classifier.
    pub async fn news_sentiment_with<S: PolarityScorer>(
        &self,
        classifier: &SentimentClassifier<S>,
    ) -> NewsSentiment {
        let feed = self.news().await;
        let tally = if feed.is_empty() {
            SentimentTally::default()
        } else {
            classifier.aggregate(&feed.articles)
        };
        NewsSentiment { feed, tally }
    }

    /* ---------------- Social ---------------- */

    /// Returns a `SocialBuilder` searching recent posts for this symbol.
    pub fn social_builder(&self) -> SocialBuilder {
        SocialBuilder::new(&self.client, &self.symbol).retry_policy(self.retry_override.clone())
    }

    /// Quota-gated social sentiment for this symbol with the default VADER classifier.
    ///
    /// # Errors
    ///
    /// Returns the search error; failed searches never count against `quota`.
    pub async fn social_sentiment(
        &self,
        quota: &mut RequestQuota,
    ) -> Result<SocialOutcome, PulseError> {
        self.social_builder().sentiment(quota).await
    }

    /* ---------------- Fundamentals & profile ---------------- */

    /// Market cap, P/E, P/B, EPS, ROE and dividend yield.
    ///
    /// # Errors
    ///
    /// Returns an error if the Yahoo handshake or request fails or the payload is malformed.
    pub async fn fundamentals(&self) -> Result<Fundamentals, PulseError> {
        fundamentals::fetch_fundamentals(
            &self.client,
            &self.symbol,
            self.cache_mode,
            self.retry_override.as_ref(),
        )
        .await
    }

    /// Annual revenue, profit and net worth in crores, latest five years.
    ///
    /// # Errors
    ///
    /// Returns the last error when no listing could be fetched at all.
    pub async fn financials(&self) -> Result<Option<FinancialHistory>, PulseError> {
        fundamentals::fetch_financials(
            &self.client,
            &self.symbol,
            self.cache_mode,
            self.retry_override.as_ref(),
        )
        .await
    }

    /// Company name, sector, industry, website, headcount and summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the Yahoo handshake or request fails or the payload is malformed.
    pub async fn profile(&self) -> Result<CompanyProfile, PulseError> {
        profile::fetch_profile(
            &self.client,
            &self.symbol,
            self.cache_mode,
            self.retry_override.as_ref(),
        )
        .await
    }

    /* ---------------- Ownership ---------------- */

    /// Coarse insiders / institutions / public split from Yahoo's holder figures.
    ///
    /// # Errors
    ///
    /// Returns an error if the Yahoo handshake or request fails or the payload is malformed.
    pub async fn holders(&self) -> Result<HolderBreakdown, PulseError> {
        shareholding::fetch_yahoo_breakdown(
            &self.client,
            &self.symbol,
            self.cache_mode,
            self.retry_override.as_ref(),
        )
        .await
    }

    /// Promoters versus public: NSE first, then Yahoo, then a `0 / 100` placeholder.
    pub async fn promoter_split(&self) -> PromoterSplit {
        shareholding::fetch_promoter_split(
            &self.client,
            &self.symbol,
            self.cache_mode,
            self.retry_override.as_ref(),
        )
        .await
    }

    /// Fetches the NSE shareholding disclosure, bucketed and reconciled.
    ///
    /// `Ok(None)` means NSE answered but reported no usable categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be parsed.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(symbol = %self.symbol)))]
    pub async fn shareholding(&self) -> Result<Option<CategoryBreakdown>, PulseError> {
        shareholding::fetch_nse_breakdown(&self.client, &self.symbol, self.retry_override.as_ref())
            .await
    }
}
