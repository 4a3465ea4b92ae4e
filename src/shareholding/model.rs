use serde::Serialize;

/// Inputs for the coarse insiders / institutions / public split.
///
/// Each source is optional; later sources only fill gaps left by earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HolderInputs {
    /// Direct insider holding, as a fraction or a percentage.
    pub held_pct_insiders: Option<f64>,
    /// Direct institutional holding, as a fraction or a percentage.
    pub held_pct_institutions: Option<f64>,
    /// `(value, label)` rows of a major-holders table, e.g. `("52.3%", "% of Shares Held by All Insider")`.
    pub major_holders: Vec<(String, String)>,
    /// Per-holder percentages of the institutional holders table.
    pub institutional_pcts: Vec<f64>,
    /// Per-holder percentages of the mutual fund holders table.
    pub fund_pcts: Vec<f64>,
}

/// Coarse ownership split, each value in [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HolderBreakdown {
    pub promoters: Option<f64>,
    pub institutions: Option<f64>,
    /// Only known when both of the above are.
    pub public: Option<f64>,
}

/// One category row of a detailed shareholding disclosure.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareholdingRow {
    /// All category labels of the row joined with spaces.
    pub category: String,
    pub percentage: Option<f64>,
}

impl ShareholdingRow {
    pub fn new(category: impl Into<String>, percentage: Option<f64>) -> Self {
        Self {
            category: category.into(),
            percentage,
        }
    }
}

/// Detailed ownership buckets, reconciled to sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub promoters: f64,
    pub domestic_institutions: f64,
    pub foreign_institutions: f64,
    /// Reported institutional total when the disclosure has one, else FII + DII.
    pub institutions_total: f64,
    /// Everything not held by promoters or institutions.
    pub retail: f64,
}

impl CategoryBreakdown {
    pub fn total(&self) -> f64 {
        self.promoters + self.domestic_institutions + self.foreign_institutions + self.retail
    }
}

/// Two-bucket view: promoters and everyone else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PromoterSplit {
    pub promoters: f64,
    pub public: f64,
    /// False when the promoter figure was unavailable and zero was substituted.
    pub live: bool,
}
