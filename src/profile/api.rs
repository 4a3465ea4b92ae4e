//! quoteSummary v10 API path for company profiles.

use serde::Deserialize;

use crate::core::{
    PulseClient, PulseError,
    client::{CacheMode, RetryConfig},
    quotesummary,
};

use super::CompanyProfile;

pub(super) async fn load_from_quote_summary_api(
    client: &PulseClient,
    yahoo_symbol: &str,
    display_symbol: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<CompanyProfile, PulseError> {
    let first: V10Result = quotesummary::fetch_module_result(
        client,
        yahoo_symbol,
        "assetProfile,quoteType",
        "profile",
        cache_mode,
        retry_override,
    )
    .await?;

    let name = first
        .quote_type
        .and_then(|q| non_blank(q.long_name).or_else(|| non_blank(q.short_name)))
        .unwrap_or_else(|| display_symbol.to_string());

    let Some(ap) = first.asset_profile else {
        return Ok(CompanyProfile::placeholder(name));
    };

    Ok(CompanyProfile {
        name,
        sector: non_blank(ap.sector),
        industry: non_blank(ap.industry),
        website: non_blank(ap.website),
        employees: ap.full_time_employees,
        summary: non_blank(ap.long_business_summary),
    })
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

/* --------- Minimal serde mapping for the API JSON --------- */

#[derive(Deserialize)]
struct V10Result {
    #[serde(rename = "assetProfile")]
    asset_profile: Option<AssetProfileNode>,
    #[serde(rename = "quoteType")]
    quote_type: Option<QuoteTypeNode>,
}

#[derive(Deserialize)]
struct AssetProfileNode {
    sector: Option<String>,
    industry: Option<String>,
    website: Option<String>,
    #[serde(rename = "fullTimeEmployees")]
    full_time_employees: Option<u64>,
    #[serde(rename = "longBusinessSummary")]
    long_business_summary: Option<String>,
}

#[derive(Deserialize)]
struct QuoteTypeNode {
    #[serde(rename = "longName")]
    long_name: Option<String>,
    #[serde(rename = "shortName")]
    short_name: Option<String>,
}
