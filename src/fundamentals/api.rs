use std::collections::BTreeMap;

use chrono::{DateTime, Datelike};

use crate::core::{
    PulseClient, PulseError,
    client::{CacheMode, RetryConfig},
    quotesummary,
    wire::{RawDate, RawNum, from_raw, from_raw_date},
};

use super::model::{FinancialHistory, Fundamentals};
use super::wire::{KeyFiguresResult, StatementsResult};

const KEY_FIGURE_MODULES: &str = "price,summaryDetail,defaultKeyStatistics,financialData";
const STATEMENT_MODULES: &str = "incomeStatementHistory,balanceSheetHistory";

const CRORE: f64 = 1e7;
const HISTORY_YEARS: usize = 5;

pub(super) async fn key_figures(
    client: &PulseClient,
    symbol: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Fundamentals, PulseError> {
    let root: KeyFiguresResult = quotesummary::fetch_module_result(
        client,
        symbol,
        KEY_FIGURE_MODULES,
        "fundamentals",
        cache_mode,
        retry_override,
    )
    .await?;
    Ok(map_key_figures(root))
}

fn map_key_figures(root: KeyFiguresResult) -> Fundamentals {
    let price = root.price.as_ref();
    let summary = root.summary_detail.as_ref();
    let stats = root.key_statistics.as_ref();
    let financial = root.financial_data.as_ref();

    let last_price = price
        .and_then(|p| from_raw(p.regular_market_price))
        .or_else(|| financial.and_then(|f| from_raw(f.current_price)));
    let shares = stats.and_then(|s| from_raw(s.shares_outstanding));

    let market_cap = price
        .and_then(|p| from_raw(p.market_cap))
        .or_else(|| summary.and_then(|s| from_raw(s.market_cap)))
        .or_else(|| match (last_price, shares) {
            (Some(p), Some(n)) if p > 0.0 && n > 0.0 => Some(p * n),
            _ => None,
        });

    Fundamentals {
        market_cap: finite(market_cap),
        pe: finite(summary.and_then(|s| from_raw(s.trailing_pe))),
        pb: finite(stats.and_then(|s| from_raw(s.price_to_book))),
        eps: finite(stats.and_then(|s| from_raw(s.trailing_eps))),
        roe: finite(financial.and_then(|f| from_raw(f.return_on_equity))).map(|v| v * 100.0),
        dividend_yield: finite(summary.and_then(|s| from_raw(s.dividend_yield))).map(|v| v * 100.0),
    }
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

pub(super) async fn statements(
    client: &PulseClient,
    symbol: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<FinancialHistory, PulseError> {
    let root: StatementsResult = quotesummary::fetch_module_result(
        client,
        symbol,
        STATEMENT_MODULES,
        "financials",
        cache_mode,
        retry_override,
    )
    .await?;
    Ok(map_statements(symbol, root))
}

fn map_statements(symbol: &str, root: StatementsResult) -> FinancialHistory {
    let income = root
        .income_statement_history
        .and_then(|h| h.income_statement_history)
        .unwrap_or_default();
    let balance = root
        .balance_sheet_history
        .and_then(|h| h.balance_sheet_statements)
        .unwrap_or_default();

    FinancialHistory {
        symbol: symbol.to_string(),
        revenue: by_year(income.iter().map(|r| (r.end_date, r.total_revenue))),
        profit: by_year(income.iter().map(|r| (r.end_date, r.net_income))),
        net_worth: by_year(balance.iter().map(|r| (r.end_date, r.total_stockholder_equity))),
    }
}

/// Converts to crores (two decimals) keyed by fiscal year, keeping the latest five years.
fn by_year<I>(rows: I) -> BTreeMap<i32, f64>
where
    I: Iterator<Item = (Option<RawDate>, Option<RawNum<f64>>)>,
{
    let mut out = BTreeMap::new();
    for (date, value) in rows {
        let (Some(ts), Some(v)) = (from_raw_date(date), from_raw(value)) else {
            continue;
        };
        if !v.is_finite() {
            continue;
        }
        let Some(year) = DateTime::from_timestamp(ts, 0).map(|dt| dt.year()) else {
            continue;
        };
        out.insert(year, (v / CRORE * 100.0).round() / 100.0);
    }
    while out.len() > HISTORY_YEARS {
        out.pop_first();
    }
    out
}
