use std::time::Duration;

use chrono::{DateTime, Utc};
use url::Url;

use crate::{
    core::{
        NewsSearch, PulseClient, PulseError, SearchRequest, SortBy,
        client::{CacheMode, RetryConfig},
    },
    news::{
        model::{FeedStatus, NewsFeed, NewsRecord},
        query, wire,
    },
    relevance::RelevanceFilter,
};

/// Knobs for one run of the fetch pipeline.
#[derive(Debug, Clone)]
pub(crate) struct PipelineOptions {
    pub(crate) count: usize,
    pub(crate) max_queries: usize,
    pub(crate) query_delay: Duration,
}

pub(super) fn parse_everything(body: &str) -> Result<Vec<NewsRecord>, PulseError> {
    let envelope: wire::EverythingEnvelope = serde_json::from_str(body)?;

    if envelope.status.as_deref() == Some("error") {
        return Err(PulseError::Api {
            code: envelope.code.unwrap_or_else(|| "unknown".to_string()),
            message: envelope.message.unwrap_or_default(),
        });
    }

    Ok(envelope.articles.into_iter().map(into_record).collect())
}

fn into_record(raw: wire::RawArticle) -> NewsRecord {
    let published_at = raw
        .published_at
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    let url = raw
        .url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty() && u != "#");

    NewsRecord {
        title: raw.title.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        source_name: raw
            .source
            .and_then(|s| s.name)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Unknown".to_string()),
        url,
        published_at,
    }
}

/// Header carrying the news provider key; keeps it out of URLs that end up in errors and logs.
const API_KEY_HEADER: &str = "x-api-key";

/// Maps a failed news response, preferring the provider's own error envelope.
pub(super) fn failure(status: u16, url: &Url, body: &str) -> PulseError {
    match serde_json::from_str::<wire::EverythingEnvelope>(body) {
        Ok(env) if env.status.as_deref() == Some("error") => PulseError::Api {
            code: env.code.unwrap_or_else(|| "unknown".to_string()),
            message: env.message.unwrap_or_default(),
        },
        _ => PulseError::from_status(status, url.as_str()),
    }
}

/// Runs one search against the configured news endpoint.
pub(crate) async fn search_everything(
    client: &PulseClient,
    req: &SearchRequest,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<NewsRecord>, PulseError> {
    let api_key = client.api_key().ok_or(PulseError::MissingApiKey)?;

    let mut url = client.base_news().clone();
    url.query_pairs_mut()
        .append_pair("q", &req.query)
        .append_pair("language", &req.language)
        .append_pair("sortBy", req.sort.as_str())
        .append_pair("pageSize", &req.page_size.to_string());

    if cache_mode == CacheMode::Use
        && let Some(body) = client.cache_get(&url).await
    {
        return parse_everything(&body);
    }

    let http_req = client
        .http()
        .get(url.clone())
        .header("accept", "application/json")
        .header(API_KEY_HEADER, api_key);
    let resp = client.send_with_retry(http_req, retry_override).await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        #[cfg(feature = "tracing")]
        tracing::debug!(status = status.as_u16(), %url, "news search failed");
        return Err(failure(status.as_u16(), &url, &body));
    }

    let body = resp.text().await?;
    let records = parse_everything(&body)?;
    if cache_mode != CacheMode::Bypass {
        client.cache_put(&url, &body, None).await;
    }
    Ok(records)
}

impl NewsSearch for PulseClient {
    fn search<'a>(
        &'a self,
        req: &'a SearchRequest,
    ) -> core::pin::Pin<
        Box<dyn core::future::Future<Output = Result<Vec<NewsRecord>, PulseError>> + Send + 'a>,
    > {
        Box::pin(search_everything(self, req, CacheMode::Use, None))
    }
}

/// A client view carrying per-call cache and retry overrides.
pub(crate) struct ConfiguredSearch<'a> {
    pub(crate) client: &'a PulseClient,
    pub(crate) cache_mode: CacheMode,
    pub(crate) retry_override: Option<&'a RetryConfig>,
}

impl NewsSearch for ConfiguredSearch<'_> {
    fn search<'a>(
        &'a self,
        req: &'a SearchRequest,
    ) -> core::pin::Pin<
        Box<dyn core::future::Future<Output = Result<Vec<NewsRecord>, PulseError>> + Send + 'a>,
    > {
        Box::pin(search_everything(
            self.client,
            req,
            self.cache_mode,
            self.retry_override,
        ))
    }
}

/// Collects relevant articles for `symbol`, falling back to a broad search when none qualify.
///
/// Individual query failures are logged and contribute nothing; this never fails.
pub(crate) async fn collect_feed<S: NewsSearch + ?Sized>(
    search: &S,
    filter: &RelevanceFilter,
    symbol: &str,
    opts: &PipelineOptions,
) -> NewsFeed {
    let aliases = filter.aliases_for(symbol);
    if aliases.is_empty() || opts.count == 0 {
        return NewsFeed::empty(symbol);
    }

    let page_size = u32::try_from(opts.count.min(5)).unwrap_or(5);
    let mut collected: Vec<NewsRecord> = Vec::new();

    for q in query::plan_queries(symbol, &aliases)
        .into_iter()
        .take(opts.max_queries)
    {
        let req = SearchRequest::new(q, page_size);
        match search.search(&req).await {
            Ok(mut batch) => collected.append(&mut batch),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(query = %req.query, error = %_e, "news query failed; skipping");
            }
        }
        if !opts.query_delay.is_zero() {
            tokio::time::sleep(opts.query_delay).await;
        }
    }

    let mut relevant = filter.filter_relevant(collected, symbol);
    if !relevant.is_empty() {
        relevant.truncate(opts.count);
        return NewsFeed {
            symbol: symbol.to_string(),
            articles: relevant,
            status: FeedStatus::Relevant,
        };
    }

    let fallback = fallback_search(search, symbol, opts.count).await;
    if fallback.is_empty() {
        NewsFeed::empty(symbol)
    } else {
        NewsFeed {
            symbol: symbol.to_string(),
            articles: fallback,
            status: FeedStatus::Fallback,
        }
    }
}

async fn fallback_search<S: NewsSearch + ?Sized>(
    search: &S,
    symbol: &str,
    count: usize,
) -> Vec<NewsRecord> {
    let page_size = u32::try_from(count).unwrap_or(u32::MAX);
    let req = SearchRequest::new(query::fallback_query(symbol), page_size).sort(SortBy::PublishedAt);
    match search.search(&req).await {
        Ok(mut articles) => {
            articles.truncate(count);
            articles
        }
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(%symbol, error = %_e, "fallback news search failed");
            Vec::new()
        }
    }
}
