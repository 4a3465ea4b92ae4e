//! Ownership breakdowns: percentage normalization and bucket reconciliation.
//!
//! Two shapes are supported. [`HolderBreakdown`] is the coarse
//! insiders / institutions / public split assembled from whichever holder
//! figures are available. [`CategoryBreakdown`] classifies the category rows of
//! an NSE shareholding disclosure into promoters, foreign and domestic
//! institutions and retail, then reconciles them to sum to 100.
//!
//! [`promoter_split`] chains the two: the NSE promoter figure when available,
//! else the Yahoo insiders figure, else zero.

mod holders;
mod model;
mod wire;

pub use model::{
    CategoryBreakdown, HolderBreakdown, HolderInputs, PromoterSplit, ShareholdingRow,
};

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    PulseClient, PulseError,
    core::{
        client::{CacheMode, RetryConfig},
        net, normalize_symbol, yahoo_symbol,
    },
};

static TOTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"total|summary").expect("valid regex"));
static PROMOTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"promoter").expect("valid regex"));
static FOREIGN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"foreign\s*(institution|portfolio|fii|fpi)|qfi").expect("valid regex")
});
static DOMESTIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"mutual\s*fund|insurance|bank|financial\s*institution|nbfc|\buti\b|alternate\s*investment|\baif\b|pension|development\s*financial|venture\s*capital",
    )
    .expect("valid regex")
});

/// Interprets `v` as a percentage in [0, 100].
///
/// Values in `(0, 1]` are read as fractions and scaled by 100; values in
/// `[0, 100]` pass through; anything else (including NaN) is rejected.
pub fn normalize_pct(v: f64) -> Option<f64> {
    if !v.is_finite() {
        return None;
    }
    if v > 0.0 && v <= 1.0 {
        return Some(v * 100.0);
    }
    if (0.0..=100.0).contains(&v) {
        return Some(v);
    }
    None
}

/// Parses `"52.3%"` or `"52.3"` into a number, without fraction scaling.
pub(crate) fn parse_pct_str(s: &str) -> Option<f64> {
    s.replace('%', "").trim().parse::<f64>().ok()
}

/// Like [`normalize_pct`], but a value written with a `%` sign is never treated as a fraction.
fn normalize_pct_str(s: &str) -> Option<f64> {
    let v = parse_pct_str(s)?;
    if s.contains('%') {
        (v.is_finite() && (0.0..=100.0).contains(&v)).then_some(v)
    } else {
        normalize_pct(v)
    }
}

fn clamp_pct(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

impl HolderBreakdown {
    /// Fills insiders and institutions from the most direct source available.
    ///
    /// Priority: the direct fields, then the major-holders table, then the sum of
    /// institutional and mutual fund holder percentages (institutions only).
    pub fn reconcile(inputs: &HolderInputs) -> Self {
        let mut insiders = inputs.held_pct_insiders.and_then(normalize_pct);
        let mut institutions = inputs.held_pct_institutions.and_then(normalize_pct);

        if insiders.is_none() || institutions.is_none() {
            for (value, label) in &inputs.major_holders {
                let Some(pct) = normalize_pct_str(value) else {
                    continue;
                };
                let label = label.to_lowercase();
                if (label.contains("insider") || label.contains("promoter")) && insiders.is_none() {
                    insiders = Some(pct);
                }
                if label.contains("institution") && institutions.is_none() {
                    institutions = Some(pct);
                }
            }
        }

        if institutions.is_none() {
            let held: Vec<f64> = inputs
                .institutional_pcts
                .iter()
                .chain(&inputs.fund_pcts)
                .filter_map(|v| normalize_pct(*v))
                .collect();
            if !held.is_empty() {
                institutions = Some(held.iter().sum());
            }
        }

        let promoters = insiders.map(clamp_pct);
        let institutions = institutions.map(clamp_pct);
        let public = match (promoters, institutions) {
            (Some(p), Some(i)) => Some((100.0 - p - i).max(0.0)),
            _ => None,
        };

        Self {
            promoters,
            institutions,
            public,
        }
    }
}

impl CategoryBreakdown {
    /// Buckets disclosure rows and reconciles them to 100.
    ///
    /// Rows without a percentage are ignored. Total/summary rows are skipped, though an
    /// institutional total among them is kept for display. Returns `None` when no row
    /// contributed anything.
    pub fn from_rows(rows: &[ShareholdingRow]) -> Option<Self> {
        let (mut prom, mut fii, mut dii, mut retail) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
        let mut reported_inst = 0.0_f64;

        for row in rows {
            let Some(pct) = row.percentage.filter(|p| p.is_finite()) else {
                continue;
            };
            let cat = row.category.to_lowercase();
            if TOTAL_RE.is_match(&cat) {
                if cat.contains("institution") {
                    reported_inst += pct;
                }
            } else if PROMOTER_RE.is_match(&cat) {
                prom += pct;
            } else if FOREIGN_RE.is_match(&cat) {
                fii += pct;
            } else if DOMESTIC_RE.is_match(&cat) {
                dii += pct;
            } else {
                retail += pct;
            }
        }

        if prom == 0.0 && fii == 0.0 && dii == 0.0 && retail == 0.0 {
            return None;
        }

        let mut prom = clamp_pct(prom);
        let mut fii = clamp_pct(fii);
        let mut dii = clamp_pct(dii);
        let mut retail = (100.0 - (prom + fii + dii)).max(0.0);

        let total = prom + fii + dii + retail;
        if (99.0..=101.0).contains(&total) && total != 100.0 {
            let scale = 100.0 / total;
            prom *= scale;
            fii *= scale;
            dii *= scale;
            retail *= scale;
        }

        let institutions_total = if reported_inst > 0.0 {
            reported_inst
        } else {
            fii + dii
        };

        Some(Self {
            promoters: prom,
            domestic_institutions: dii,
            foreign_institutions: fii,
            institutions_total,
            retail,
        })
    }

    /// Parses an NSE `corporates-share-holdings` payload.
    ///
    /// # Errors
    ///
    /// Returns `PulseError::Json` when the body is not JSON, and `PulseError::Data` when an
    /// object carries neither a `data` nor a `shareHolding` array.
    pub fn from_nse_json(body: &str) -> Result<Option<Self>, PulseError> {
        let envelope: wire::HoldingsEnvelope = serde_json::from_str(body)?;
        Ok(Self::from_rows(&envelope.into_rows()?))
    }
}

impl PromoterSplit {
    /// Promoters clamped to [0, 100], public as the remainder. A missing figure counts as 0.
    pub fn from_promoters(promoters: Option<f64>) -> Self {
        let known = promoters.filter(|p| p.is_finite());
        let promoters = clamp_pct(known.unwrap_or(0.0));
        Self {
            promoters,
            public: (100.0 - promoters).max(0.0),
            live: known.is_some(),
        }
    }
}

/// Fetches and reconciles the NSE shareholding disclosure for `symbol`.
///
/// # Errors
///
/// Returns an error if the disclosure request fails or its body cannot be parsed.
pub async fn nse_breakdown(
    client: &PulseClient,
    symbol: &str,
) -> Result<Option<CategoryBreakdown>, PulseError> {
    fetch_nse_breakdown(client, symbol, None).await
}

pub(crate) async fn fetch_nse_breakdown(
    client: &PulseClient,
    symbol: &str,
    retry_override: Option<&RetryConfig>,
) -> Result<Option<CategoryBreakdown>, PulseError> {
    let sym = normalize_symbol(symbol);
    let base = client.base_nse().clone();

    // The API answers 401 without the cookies set by the landing page.
    let prime = client
        .http()
        .get(base.clone())
        .header("accept", "text/html,application/xhtml+xml");
    if let Err(_e) = client.send_with_retry(prime, retry_override).await {
        #[cfg(feature = "tracing")]
        tracing::warn!(symbol = %sym, error = %_e, "NSE cookie priming failed; trying API anyway");
    }

    let mut url = base.join("api/corporates-share-holdings")?;
    url.query_pairs_mut()
        .append_pair("index", "equities")
        .append_pair("symbol", &sym);

    let req = client
        .http()
        .get(url)
        .header("accept", "application/json, text/plain, */*")
        .header("referer", base.as_str());
    let resp = client.send_with_retry(req, retry_override).await?;
    let body = net::get_text(resp, "nse_shareholding").await?;
    CategoryBreakdown::from_nse_json(&body)
}

/// Fetches Yahoo's holder figures for `symbol` and reconciles them into the coarse split.
///
/// Bare symbols are looked up on NSE (`SYM.NS`).
///
/// # Errors
///
/// Returns an error if the Yahoo handshake or request fails or the payload is malformed.
pub async fn yahoo_breakdown(
    client: &PulseClient,
    symbol: &str,
) -> Result<HolderBreakdown, PulseError> {
    fetch_yahoo_breakdown(client, symbol, CacheMode::Use, None).await
}

pub(crate) async fn fetch_yahoo_breakdown(
    client: &PulseClient,
    symbol: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<HolderBreakdown, PulseError> {
    holders::yahoo_holders(client, &yahoo_symbol(symbol), cache_mode, retry_override).await
}

/// Promoters versus public for `symbol`: NSE first, then Yahoo, then zero.
///
/// Never fails; upstream errors only move the lookup to the next source. When no
/// source has a promoter figure the split is `0 / 100` with `live == false`.
pub async fn promoter_split(client: &PulseClient, symbol: &str) -> PromoterSplit {
    fetch_promoter_split(client, symbol, CacheMode::Use, None).await
}

pub(crate) async fn fetch_promoter_split(
    client: &PulseClient,
    symbol: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> PromoterSplit {
    let from_nse = match fetch_nse_breakdown(client, symbol, retry_override).await {
        Ok(b) => b.map(|b| b.promoters),
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(%symbol, error = %_e, "NSE shareholding unavailable; trying Yahoo");
            None
        }
    };
    if from_nse.is_some() {
        return PromoterSplit::from_promoters(from_nse);
    }

    let from_yahoo = match fetch_yahoo_breakdown(client, symbol, cache_mode, retry_override).await {
        Ok(b) => b.promoters,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(%symbol, error = %_e, "Yahoo holders unavailable");
            None
        }
    };
    PromoterSplit::from_promoters(from_yahoo)
}
