use serde::Deserialize;

use crate::core::wire::{RawDate, RawNum};

/* ---------------- key figures ---------------- */

#[derive(Deserialize)]
pub(crate) struct KeyFiguresResult {
    pub(crate) price: Option<PriceNode>,
    #[serde(rename = "summaryDetail")]
    pub(crate) summary_detail: Option<SummaryDetailNode>,
    #[serde(rename = "defaultKeyStatistics")]
    pub(crate) key_statistics: Option<KeyStatisticsNode>,
    #[serde(rename = "financialData")]
    pub(crate) financial_data: Option<FinancialDataNode>,
}

#[derive(Deserialize)]
pub(crate) struct PriceNode {
    #[serde(rename = "regularMarketPrice")]
    pub(crate) regular_market_price: Option<RawNum<f64>>,
    #[serde(rename = "marketCap")]
    pub(crate) market_cap: Option<RawNum<f64>>,
}

#[derive(Deserialize)]
pub(crate) struct SummaryDetailNode {
    #[serde(rename = "marketCap")]
    pub(crate) market_cap: Option<RawNum<f64>>,
    #[serde(rename = "trailingPE")]
    pub(crate) trailing_pe: Option<RawNum<f64>>,
    #[serde(rename = "dividendYield")]
    pub(crate) dividend_yield: Option<RawNum<f64>>,
}

#[derive(Deserialize)]
pub(crate) struct KeyStatisticsNode {
    #[serde(rename = "sharesOutstanding")]
    pub(crate) shares_outstanding: Option<RawNum<f64>>,
    #[serde(rename = "priceToBook")]
    pub(crate) price_to_book: Option<RawNum<f64>>,
    #[serde(rename = "trailingEps")]
    pub(crate) trailing_eps: Option<RawNum<f64>>,
}

#[derive(Deserialize)]
pub(crate) struct FinancialDataNode {
    #[serde(rename = "currentPrice")]
    pub(crate) current_price: Option<RawNum<f64>>,
    #[serde(rename = "returnOnEquity")]
    pub(crate) return_on_equity: Option<RawNum<f64>>,
}

/* ---------------- annual statements ---------------- */

#[derive(Deserialize)]
pub(crate) struct StatementsResult {
    #[serde(rename = "incomeStatementHistory")]
    pub(crate) income_statement_history: Option<IncomeHistoryNode>,
    #[serde(rename = "balanceSheetHistory")]
    pub(crate) balance_sheet_history: Option<BalanceHistoryNode>,
}

#[derive(Deserialize)]
pub(crate) struct IncomeHistoryNode {
    #[serde(rename = "incomeStatementHistory")]
    pub(crate) income_statement_history: Option<Vec<IncomeRowNode>>,
}

#[derive(Deserialize)]
pub(crate) struct IncomeRowNode {
    #[serde(rename = "endDate")]
    pub(crate) end_date: Option<RawDate>,
    #[serde(rename = "totalRevenue")]
    pub(crate) total_revenue: Option<RawNum<f64>>,
    #[serde(rename = "netIncome")]
    pub(crate) net_income: Option<RawNum<f64>>,
}

#[derive(Deserialize)]
pub(crate) struct BalanceHistoryNode {
    #[serde(rename = "balanceSheetStatements")]
    pub(crate) balance_sheet_statements: Option<Vec<BalanceRowNode>>,
}

#[derive(Deserialize)]
pub(crate) struct BalanceRowNode {
    #[serde(rename = "endDate")]
    pub(crate) end_date: Option<RawDate>,
    #[serde(rename = "totalStockholderEquity")]
    pub(crate) total_stockholder_equity: Option<RawNum<f64>>,
}
