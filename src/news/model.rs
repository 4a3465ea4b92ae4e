use chrono::{DateTime, Utc};
use serde::Serialize;

/// One fetched news article.
///
/// Missing upstream fields are normalized on the way in: absent text becomes an
/// empty string and an absent or placeholder link becomes `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsRecord {
    /// The headline. Also the deduplication key.
    pub title: String,
    /// Short summary; may be empty.
    pub description: String,
    /// Publisher display name (e.g., "Reuters").
    pub source_name: String,
    /// A direct link to the article, when the provider supplied a usable one.
    pub url: Option<String>,
    /// Publication time.
    pub published_at: Option<DateTime<Utc>>,
}

impl NewsRecord {
    /// A record with a title and description and no other metadata.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            source_name: "Unknown".to_string(),
            url: None,
            published_at: None,
        }
    }

    /// `title + " " + description`, lower-cased, as used for keyword matching.
    pub fn match_text(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }

    /// `title + ". " + description`, as fed to the sentiment classifier.
    pub fn sentiment_text(&self) -> String {
        format!("{}. {}", self.title, self.description)
    }

    /// Compact relative age such as `3d ago`, `5h ago` or `12m ago`.
    ///
    /// Records without a timestamp, or dated in the future relative to `now`, read `Recent`.
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let Some(published) = self.published_at else {
            return "Recent".to_string();
        };
        let diff = now - published;
        if diff < chrono::Duration::zero() {
            return "Recent".to_string();
        }
        if diff.num_days() > 0 {
            format!("{}d ago", diff.num_days())
        } else if diff.num_hours() > 0 {
            format!("{}h ago", diff.num_hours())
        } else {
            format!("{}m ago", diff.num_minutes())
        }
    }
}

/// How a [`NewsFeed`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeedStatus {
    /// Articles passed the relevance filter.
    Relevant,
    /// Nothing was relevant; articles come from the broad, unfiltered search.
    Fallback,
    /// No articles at all, or no provider configured.
    Empty,
}

/// The outcome of a news fetch for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsFeed {
    /// Normalized symbol the feed was built for.
    pub symbol: String,
    /// Articles in display order.
    pub articles: Vec<NewsRecord>,
    /// Which path produced `articles`.
    pub status: FeedStatus,
}

impl NewsFeed {
    pub(crate) fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            articles: Vec::new(),
            status: FeedStatus::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }
}
