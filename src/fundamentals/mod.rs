//! Valuation figures and annual statement history from Yahoo quoteSummary.

mod api;
mod model;
mod wire;

pub use model::{FinancialHistory, Fundamentals};

use crate::core::{
    PulseClient, PulseError,
    client::{CacheMode, RetryConfig},
    yahoo_symbol,
};

/// Fetches market cap, P/E, P/B, EPS, ROE and dividend yield for `symbol`.
///
/// Bare symbols are looked up on NSE (`INFY` becomes `INFY.NS`). When Yahoo omits the
/// market cap it is derived from the last price and shares outstanding.
///
/// # Errors
///
/// Returns an error if the Yahoo handshake or request fails, or the payload is malformed.
pub async fn fundamentals(client: &PulseClient, symbol: &str) -> Result<Fundamentals, PulseError> {
    fetch_fundamentals(client, symbol, CacheMode::Use, None).await
}

#[cfg_attr(feature = "tracing", tracing::instrument(skip(client, retry_override), err))]
pub(crate) async fn fetch_fundamentals(
    client: &PulseClient,
    symbol: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Fundamentals, PulseError> {
    api::key_figures(client, &yahoo_symbol(symbol), cache_mode, retry_override).await
}

/// Fetches annual revenue, net income and stockholder equity for `symbol`, in crores.
///
/// The NSE listing (`SYM.NS`) is tried first, then the bare symbol. `Ok(None)` means
/// every candidate answered without usable figures.
///
/// # Errors
///
/// Returns the last error when no candidate could be fetched at all.
pub async fn financials(
    client: &PulseClient,
    symbol: &str,
) -> Result<Option<FinancialHistory>, PulseError> {
    fetch_financials(client, symbol, CacheMode::Use, None).await
}

#[cfg_attr(feature = "tracing", tracing::instrument(skip(client, retry_override), err))]
pub(crate) async fn fetch_financials(
    client: &PulseClient,
    symbol: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Option<FinancialHistory>, PulseError> {
    let mut last_err = None;
    let mut answered = false;

    for candidate in listing_candidates(symbol) {
        match api::statements(client, &candidate, cache_mode, retry_override).await {
            Ok(history) if !history.is_empty() => return Ok(Some(history)),
            Ok(_) => answered = true,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(%candidate, error = %e, "statement fetch failed; trying next listing");
                last_err = Some(e);
            }
        }
    }

    match last_err {
        Some(e) if !answered => Err(e),
        _ => Ok(None),
    }
}

fn listing_candidates(symbol: &str) -> Vec<String> {
    let upper = symbol.trim().to_uppercase();
    if upper.is_empty() {
        return Vec::new();
    }
    if upper.ends_with(".NS") {
        vec![upper]
    } else {
        vec![format!("{upper}.NS"), upper]
    }
}
