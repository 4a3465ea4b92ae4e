use reqwest::Response;
use url::Url;

use crate::core::{PulseError, client::CacheMode};
use crate::PulseClient;

/// Read the response body as text, mapping non-success statuses to typed errors.
pub(crate) async fn get_text(resp: Response, endpoint: &str) -> Result<String, PulseError> {
    let status = resp.status();
    if !status.is_success() {
        let url = resp.url().to_string();
        #[cfg(feature = "tracing")]
        tracing::debug!(endpoint, status = status.as_u16(), %url, "non-success response");
        #[cfg(not(feature = "tracing"))]
        let _ = endpoint;
        return Err(PulseError::from_status(status.as_u16(), url));
    }
    Ok(resp.text().await?)
}

/// GET `url` through the client's cache and retry policy and return the body.
pub(crate) async fn get_cached(
    client: &PulseClient,
    url: &Url,
    endpoint: &str,
    cache_mode: CacheMode,
    retry_override: Option<&crate::core::client::RetryConfig>,
) -> Result<String, PulseError> {
    if cache_mode == CacheMode::Use
        && let Some(body) = client.cache_get(url).await
    {
        return Ok(body);
    }

    let req = client
        .http()
        .get(url.clone())
        .header("accept", "application/json");
    let resp = client.send_with_retry(req, retry_override).await?;
    let body = get_text(resp, endpoint).await?;

    if cache_mode != CacheMode::Bypass {
        client.cache_put(url, &body, None).await;
    }
    Ok(body)
}
