use crate::core::{
    PostQuery, PulseClient, PulseError, SocialSearch,
    client::RetryConfig,
    net,
};

use super::wire::RecentSearchEnvelope;

/// Bounds the recent search endpoint accepts for `max_results`.
const MIN_RESULTS: u32 = 10;
const MAX_RESULTS: u32 = 100;

pub(super) fn parse_recent(body: &str) -> Result<Vec<String>, PulseError> {
    let envelope: RecentSearchEnvelope = serde_json::from_str(body)?;

    match envelope.data {
        Some(posts) => Ok(posts
            .into_iter()
            .filter_map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .collect()),
        None => match envelope.errors.and_then(|e| e.into_iter().next()) {
            Some(err) => Err(PulseError::Data(format!(
                "social search error: {}",
                err.detail.or(err.title).unwrap_or_default()
            ))),
            // No `data` and no errors: the query matched nothing.
            None => Ok(Vec::new()),
        },
    }
}

/// Runs one recent search, rotating to the next bearer token whenever one is throttled.
pub(crate) async fn search_recent(
    client: &PulseClient,
    req: &PostQuery,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<String>, PulseError> {
    let tokens = client.bearer_tokens();
    if tokens.is_empty() {
        return Err(PulseError::MissingBearerToken);
    }

    let mut url = client.base_social().clone();
    url.query_pairs_mut()
        .append_pair("query", &req.query)
        .append_pair(
            "max_results",
            &req.max_results.clamp(MIN_RESULTS, MAX_RESULTS).to_string(),
        );

    // A throttled token is rotated away from instead of being retried.
    let mut retry = retry_override.unwrap_or(client.retry_config()).clone();
    retry.retry_on_status.retain(|code| *code != 429);

    let start = client.token_cursor() % tokens.len();
    for step in 0..tokens.len() {
        let idx = (start + step) % tokens.len();
        let http_req = client
            .http()
            .get(url.clone())
            .bearer_auth(&tokens[idx])
            .header("accept", "application/json");
        let resp = client.send_with_retry(http_req, Some(&retry)).await?;

        if resp.status().as_u16() == 429 {
            #[cfg(feature = "tracing")]
            tracing::warn!(token = idx, "social search token throttled; rotating");
            client.set_token_cursor((idx + 1) % tokens.len());
            continue;
        }

        let body = net::get_text(resp, "social_recent").await?;
        client.set_token_cursor(idx);
        return parse_recent(&body);
    }

    Err(PulseError::RateLimited {
        url: url.to_string(),
    })
}

impl SocialSearch for PulseClient {
    fn recent_posts<'a>(
        &'a self,
        req: &'a PostQuery,
    ) -> core::pin::Pin<
        Box<dyn core::future::Future<Output = Result<Vec<String>, PulseError>> + Send + 'a>,
    > {
        Box::pin(search_recent(self, req, None))
    }
}

/// A client view carrying a per-call retry override.
pub(crate) struct ConfiguredSocial<'a> {
    pub(crate) client: &'a PulseClient,
    pub(crate) retry_override: Option<&'a RetryConfig>,
}

impl SocialSearch for ConfiguredSocial<'_> {
    fn recent_posts<'a>(
        &'a self,
        req: &'a PostQuery,
    ) -> core::pin::Pin<
        Box<dyn core::future::Future<Output = Result<Vec<String>, PulseError>> + Send + 'a>,
    > {
        Box::pin(search_recent(self.client, req, self.retry_override))
    }
}
