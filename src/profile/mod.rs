//! Company profile (name, sector, industry, website, headcount, summary).

mod api;
mod model;

pub use model::CompanyProfile;

use crate::core::{
    PulseClient, PulseError,
    client::{CacheMode, RetryConfig},
    yahoo_symbol,
};

/// Loads the company profile for `symbol` from Yahoo quoteSummary.
///
/// Bare symbols are looked up on NSE. When Yahoo has no name for the listing, the
/// symbol as given is used instead.
///
/// # Errors
///
/// Returns `PulseError` if the handshake or request fails or the payload is malformed.
pub async fn load_profile(client: &PulseClient, symbol: &str) -> Result<CompanyProfile, PulseError> {
    fetch_profile(client, symbol, CacheMode::Use, None).await
}

pub(crate) async fn fetch_profile(
    client: &PulseClient,
    symbol: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<CompanyProfile, PulseError> {
    api::load_from_quote_summary_api(
        client,
        &yahoo_symbol(symbol),
        symbol.trim(),
        cache_mode,
        retry_override,
    )
    .await
}
