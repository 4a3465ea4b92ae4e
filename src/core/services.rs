use crate::core::PulseError;
use crate::news::NewsRecord;

/// Ordering requested from the news provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Best match for the query first.
    #[default]
    Relevancy,
    /// Newest first.
    PublishedAt,
}

impl SortBy {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Relevancy => "relevancy",
            Self::PublishedAt => "publishedAt",
        }
    }
}

/// Encapsulates all parameters for a single news search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free-text query, quoted phrases allowed.
    pub query: String,
    /// Maximum number of articles to return for this query.
    pub page_size: u32,
    /// Result ordering.
    pub sort: SortBy,
    /// ISO-639-1 language filter.
    pub language: String,
}

impl SearchRequest {
    /// An English-language, relevancy-sorted query.
    pub fn new(query: impl Into<String>, page_size: u32) -> Self {
        Self {
            query: query.into(),
            page_size,
            sort: SortBy::Relevancy,
            language: "en".to_string(),
        }
    }

    /// Sets the result ordering.
    #[must_use]
    pub const fn sort(mut self, sort: SortBy) -> Self {
        self.sort = sort;
        self
    }
}

/// A trait for services that can run a news search.
///
/// This is the seam between the fetch pipeline and the transport. It is implemented
/// by [`PulseClient`](crate::PulseClient); tests substitute canned implementations.
/// Authentication, paging and HTTP concerns belong to the implementor.
pub trait NewsSearch: Send + Sync {
    /// Runs one query and returns the articles it produced.
    fn search<'a>(
        &'a self,
        req: &'a SearchRequest,
    ) -> core::pin::Pin<
        Box<dyn core::future::Future<Output = Result<Vec<NewsRecord>, PulseError>> + Send + 'a>,
    >;
}

/// Parameters for one recent-posts search on the social endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    /// Free-text query, usually the company name or symbol.
    pub query: String,
    /// Posts requested; the endpoint accepts 10 to 100.
    pub max_results: u32,
}

impl PostQuery {
    pub fn new(query: impl Into<String>, max_results: u32) -> Self {
        Self {
            query: query.into(),
            max_results,
        }
    }
}

/// A trait for services that return recent social media posts for a query.
///
/// Implemented by [`PulseClient`](crate::PulseClient) against the Twitter v2 recent
/// search endpoint; tests substitute canned implementations.
pub trait SocialSearch: Send + Sync {
    /// Runs one query and returns the text of each post found.
    fn recent_posts<'a>(
        &'a self,
        req: &'a PostQuery,
    ) -> core::pin::Pin<
        Box<dyn core::future::Future<Output = Result<Vec<String>, PulseError>> + Send + 'a>,
    >;
}
