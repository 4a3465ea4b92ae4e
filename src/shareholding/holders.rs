//! Yahoo holder figures, fed into [`HolderBreakdown::reconcile`].

use crate::core::{
    PulseClient, PulseError,
    client::{CacheMode, RetryConfig},
    quotesummary,
    wire::from_raw,
};

use super::model::{HolderBreakdown, HolderInputs};
use super::wire::{HoldersResult, OwnershipNode};

const MODULES: &str = "defaultKeyStatistics,majorHoldersBreakdown,institutionOwnership,fundOwnership";

pub(super) async fn yahoo_holders(
    client: &PulseClient,
    yahoo_symbol: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<HolderBreakdown, PulseError> {
    let root: HoldersResult = quotesummary::fetch_module_result(
        client,
        yahoo_symbol,
        MODULES,
        "holders",
        cache_mode,
        retry_override,
    )
    .await?;
    Ok(HolderBreakdown::reconcile(&holder_inputs(root)))
}

fn holder_inputs(root: HoldersResult) -> HolderInputs {
    let stats = root.key_statistics.as_ref();
    let mut major_holders = Vec::new();

    if let Some(b) = root.major_holders_breakdown {
        // Same rows and labels as the rendered major-holders table.
        let rows = [
            (b.insiders_percent_held, "% of Shares Held by All Insider"),
            (b.institutions_percent_held, "% of Shares Held by Institutions"),
            (b.institutions_float_percent_held, "% of Float Held by Institutions"),
        ];
        for (value, label) in rows {
            if let Some(v) = from_raw(value).filter(|v| v.is_finite()) {
                major_holders.push((format!("{:.2}%", v * 100.0), label.to_string()));
            }
        }
    }

    HolderInputs {
        held_pct_insiders: stats.and_then(|s| from_raw(s.held_percent_insiders)),
        held_pct_institutions: stats.and_then(|s| from_raw(s.held_percent_institutions)),
        major_holders,
        institutional_pcts: pct_list(root.institution_ownership),
        fund_pcts: pct_list(root.fund_ownership),
    }
}

fn pct_list(node: Option<OwnershipNode>) -> Vec<f64> {
    node.and_then(|n| n.ownership_list)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|h| from_raw(h.pct_held))
        .collect()
}
