//! stockpulse-rs: relevance-filtered stock news with sentiment tallies.
//!
//! The crate fetches news for a listed company, keeps only the articles that
//! are about the company's stock, labels each one Positive / Negative / Neutral
//! with a lexicon scorer, and counts the labels. Recent social media posts can be
//! tallied the same way under a per-session request allowance. Company
//! fundamentals, statement history and profile come from Yahoo, and ownership
//! percentages are reconciled from NSE disclosures and Yahoo holder figures.
//!
//! ```no_run
//! use stockpulse_rs::{PulseClient, Ticker};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), stockpulse_rs::PulseError> {
//! let client = PulseClient::builder_from_env()?.build()?;
//! let report = Ticker::new(&client, "TCS").news_sentiment().await;
//! for article in &report.feed.articles {
//!     println!("{} ({})", article.title, article.source_name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod fundamentals;
pub mod news;
pub mod profile;
pub mod quota;
pub mod relevance;
pub mod sentiment;
pub mod shareholding;
pub mod social;
pub mod ticker;

pub use crate::core::{
    CacheMode, NewsSearch, PostQuery, PulseClient, PulseClientBuilder, PulseError, RetryConfig,
    SearchRequest, SocialSearch, SortBy,
};
pub use fundamentals::{FinancialHistory, Fundamentals};
pub use news::{FeedStatus, NewsBuilder, NewsFeed, NewsRecord};
pub use profile::CompanyProfile;
pub use quota::{QuotaStatus, RequestQuota};
pub use relevance::{CompanyAliasSet, KeywordTables, RelevanceFilter};
pub use sentiment::{
    OverallSentiment, PolarityScorer, SentimentClassifier, SentimentLabel, SentimentTally,
    VaderScorer,
};
pub use shareholding::{CategoryBreakdown, HolderBreakdown, PromoterSplit};
pub use social::{SocialBuilder, SocialOutcome, SocialSentiment};
pub use ticker::{NewsSentiment, Ticker};
