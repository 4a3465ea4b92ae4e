//! Social media sentiment: recent posts for a keyword, tallied under a request quota.
//!
//! Each bearer token buys one search per cooldown window, so callers usually size
//! the [`RequestQuota`] from [`PulseClient::bearer_token_count`].

mod api;
mod model;
mod wire;

pub use model::{SocialOutcome, SocialSentiment};

use std::time::Instant;

use crate::{
    PulseClient, PulseError,
    core::{PostQuery, SocialSearch, client::RetryConfig},
    quota::{QuotaStatus, RequestQuota},
    sentiment::{PolarityScorer, SentimentClassifier},
};

/// Default number of posts requested per search.
pub const DEFAULT_POST_COUNT: u32 = 50;

/// Runs a single recent-posts search with the client's default retry policy.
///
/// # Errors
///
/// Returns `PulseError::MissingBearerToken` when no token is configured,
/// `PulseError::RateLimited` when every token is throttled, or a transport,
/// status or payload error.
pub async fn recent_posts(client: &PulseClient, req: &PostQuery) -> Result<Vec<String>, PulseError> {
    api::search_recent(client, req, None).await
}

/// A builder for a quota-gated social sentiment run.
///
/// # Example
///
/// ```no_run
/// # use stockpulse_rs::{PulseClient, RequestQuota, social::{SocialBuilder, SocialOutcome}};
/// # #[tokio::main]
/// # async fn main() -> Result<(), stockpulse_rs::PulseError> {
/// let client = PulseClient::builder_from_env()?.build()?;
/// let mut quota = RequestQuota::new(client.bearer_token_count() as u32);
///
/// match SocialBuilder::new(&client, "Infosys").sentiment(&mut quota).await? {
///     SocialOutcome::Tallied(s) => println!("{} posts, {:?}", s.posts.len(), s.tally.overall()),
///     SocialOutcome::NoPosts => println!("nothing found"),
///     SocialOutcome::CoolingDown { minutes_left } => println!("wait ~{minutes_left} min"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct SocialBuilder {
    client: PulseClient,
    query: String,
    max_results: u32,
    retry_override: Option<RetryConfig>,
}

impl SocialBuilder {
    pub fn new(client: &PulseClient, query: impl AsRef<str>) -> Self {
        Self {
            client: client.clone(),
            query: query.as_ref().trim().to_string(),
            max_results: DEFAULT_POST_COUNT,
            retry_override: None,
        }
    }

    /// Posts requested per search, clamped by the endpoint to 10..=100.
    #[must_use]
    pub const fn max_results(mut self, n: u32) -> Self {
        self.max_results = n;
        self
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Fetches the posts without touching any quota.
    ///
    /// # Errors
    ///
    /// See [`recent_posts`].
    pub async fn fetch(&self) -> Result<Vec<String>, PulseError> {
        api::search_recent(&self.client, &self.request(), self.retry_override.as_ref()).await
    }

    /// Quota check, search, tally with the default VADER classifier, then record.
    ///
    /// # Errors
    ///
    /// Search failures are returned as-is and never count against the quota.
    pub async fn sentiment(&self, quota: &mut RequestQuota) -> Result<SocialOutcome, PulseError> {
        self.sentiment_with(quota, &SentimentClassifier::default())
            .await
    }

    /// Like [`SocialBuilder::sentiment`], with a caller-supplied classifier.
    ///
    /// # Errors
    ///
    /// Search failures are returned as-is and never count against the quota.
    pub async fn sentiment_with<S: PolarityScorer>(
        &self,
        quota: &mut RequestQuota,
        classifier: &SentimentClassifier<S>,
    ) -> Result<SocialOutcome, PulseError> {
        let search = api::ConfiguredSocial {
            client: &self.client,
            retry_override: self.retry_override.as_ref(),
        };
        self.sentiment_using(&search, quota, classifier).await
    }

    /// Runs the quota-gated tally against an arbitrary search backend.
    ///
    /// # Errors
    ///
    /// Search failures are returned as-is and never count against the quota.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err, fields(query = %self.query)))]
    pub async fn sentiment_using<P, S>(
        &self,
        search: &P,
        quota: &mut RequestQuota,
        classifier: &SentimentClassifier<S>,
    ) -> Result<SocialOutcome, PulseError>
    where
        P: SocialSearch + ?Sized,
        S: PolarityScorer,
    {
        if self.query.is_empty() {
            return Ok(SocialOutcome::NoPosts);
        }

        if let QuotaStatus::CoolingDown { minutes_left } = quota.refresh(Instant::now()) {
            #[cfg(feature = "tracing")]
            tracing::info!(minutes_left, "social search allowance spent");
            return Ok(SocialOutcome::CoolingDown { minutes_left });
        }

        let posts = search.recent_posts(&self.request()).await?;
        if posts.is_empty() {
            return Ok(SocialOutcome::NoPosts);
        }

        quota.record(Instant::now());
        let tally = classifier.tally_texts(&posts);
        Ok(SocialOutcome::Tallied(SocialSentiment {
            query: self.query.clone(),
            posts,
            tally,
        }))
    }

    fn request(&self) -> PostQuery {
        PostQuery::new(self.query.clone(), self.max_results)
    }
}
