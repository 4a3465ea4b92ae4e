use std::collections::BTreeMap;

use serde::Serialize;

/// Headline valuation figures for one listing.
///
/// `roe` and `dividend_yield` are percentages (Yahoo reports fractions).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Fundamentals {
    /// Market capitalisation in the listing currency.
    pub market_cap: Option<f64>,
    /// Trailing price / earnings.
    pub pe: Option<f64>,
    /// Price / book.
    pub pb: Option<f64>,
    /// Trailing earnings per share.
    pub eps: Option<f64>,
    pub roe: Option<f64>,
    pub dividend_yield: Option<f64>,
}

impl Fundamentals {
    /// True when no figure at all was available.
    pub fn is_empty(&self) -> bool {
        self.market_cap.is_none()
            && self.pe.is_none()
            && self.pb.is_none()
            && self.eps.is_none()
            && self.roe.is_none()
            && self.dividend_yield.is_none()
    }
}

/// Annual revenue, profit and net worth in crores (1 crore = 10^7), keyed by fiscal year.
///
/// Each series holds at most the latest five years.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinancialHistory {
    /// The Yahoo listing the figures came from, e.g. `INFY.NS`.
    pub symbol: String,
    pub revenue: BTreeMap<i32, f64>,
    pub profit: BTreeMap<i32, f64>,
    pub net_worth: BTreeMap<i32, f64>,
}

impl FinancialHistory {
    pub fn is_empty(&self) -> bool {
        self.revenue.is_empty() && self.profit.is_empty() && self.net_worth.is_empty()
    }

    /// Union of the years across all three series, ascending, latest five only.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self
            .revenue
            .keys()
            .chain(self.profit.keys())
            .chain(self.net_worth.keys())
            .copied()
            .collect();
        years.sort_unstable();
        years.dedup();
        let skip = years.len().saturating_sub(5);
        years.split_off(skip)
    }

    /// Year-on-year revenue change of the latest year, in percent.
    pub fn revenue_growth(&self) -> Option<f64> {
        growth(&self.revenue)
    }

    /// Year-on-year profit change of the latest year, in percent.
    pub fn profit_growth(&self) -> Option<f64> {
        growth(&self.profit)
    }

    /// Latest profit over latest revenue, in percent.
    pub fn profit_margin(&self) -> Option<f64> {
        let (_, revenue) = self.revenue.last_key_value()?;
        let (_, profit) = self.profit.last_key_value()?;
        (*revenue != 0.0).then(|| profit / revenue * 100.0)
    }
}

fn growth(series: &BTreeMap<i32, f64>) -> Option<f64> {
    let mut rev = series.values().rev();
    let latest = rev.next()?;
    let prev = rev.next()?;
    (*prev != 0.0).then(|| (latest - prev) / prev * 100.0)
}
