use serde::Deserialize;

use crate::core::{
    PulseClient, PulseError,
    client::{CacheMode, RetryConfig},
    net,
};

#[derive(Deserialize)]
pub(crate) struct V10Envelope {
    #[serde(rename = "quoteSummary")]
    pub(crate) quote_summary: Option<V10QuoteSummary>,
}

#[derive(Deserialize)]
pub(crate) struct V10QuoteSummary {
    pub(crate) result: Option<Vec<serde_json::Value>>,
    pub(crate) error: Option<V10Error>,
}

#[derive(Deserialize)]
pub(crate) struct V10Error {
    pub(crate) description: String,
}

/// Fetches the quoteSummary `modules` for a Yahoo `symbol`.
///
/// A stale crumb is refreshed and the call retried once.
pub(crate) async fn fetch(
    client: &PulseClient,
    symbol: &str,
    modules: &str,
    caller: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<V10Envelope, PulseError> {
    async fn attempt_fetch(
        client: &PulseClient,
        symbol: &str,
        modules: &str,
        caller: &str,
        cache_mode: CacheMode,
        retry_override: Option<&RetryConfig>,
    ) -> Result<V10Envelope, PulseError> {
        client.ensure_credentials().await?;

        let crumb = client
            .crumb()
            .await
            .ok_or_else(|| PulseError::Auth("crumb is not set".into()))?;

        let mut url = client.base_quote_api().join(symbol)?;
        url.query_pairs_mut()
            .append_pair("modules", modules)
            .append_pair("crumb", &crumb);

        let body = net::get_cached(
            client,
            &url,
            &format!("{caller}_quotesummary"),
            cache_mode,
            retry_override,
        )
        .await?;

        serde_json::from_str(&body)
            .map_err(|e| PulseError::Data(format!("quoteSummary json parse: {e}")))
    }

    for attempt in 0..=1 {
        let env =
            attempt_fetch(client, symbol, modules, caller, cache_mode, retry_override).await?;

        if let Some(error) = env.quote_summary.as_ref().and_then(|qs| qs.error.as_ref()) {
            let desc = error.description.to_ascii_lowercase();
            if desc.contains("invalid crumb") && attempt == 0 {
                #[cfg(feature = "tracing")]
                tracing::debug!(caller, %symbol, "invalid crumb; refreshing and retrying");
                client.clear_crumb().await;
                continue;
            }
            return Err(PulseError::Data(format!("yahoo error: {}", error.description)));
        }

        return Ok(env);
    }

    Err(PulseError::Data(format!("{caller} API call failed after retry")))
}

/// Fetches `modules` and deserializes the single result object into `T`.
pub(crate) async fn fetch_module_result<T>(
    client: &PulseClient,
    symbol: &str,
    modules: &str,
    caller: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<T, PulseError>
where
    T: for<'de> Deserialize<'de>,
{
    let env = fetch(client, symbol, modules, caller, cache_mode, retry_override).await?;

    let result_val = env
        .quote_summary
        .and_then(|qs| qs.result)
        .and_then(|mut v| v.pop())
        .ok_or_else(|| PulseError::Data("empty quoteSummary result".into()))?;

    serde_json::from_value(result_val)
        .map_err(|e| PulseError::Data(format!("quoteSummary result parse: {e}")))
}
