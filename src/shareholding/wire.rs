use serde::Deserialize;
use serde_json::Value;

use super::model::ShareholdingRow;
use crate::core::{PulseError, wire::RawNum};
use super::parse_pct_str;

const CATEGORY_KEYS: &[&str] = &["category", "categoryName", "cat", "subCategory", "subCategoryDesc"];
const PERCENT_KEYS: &[&str] = &["percentage", "percent", "percShare", "pct"];

/// The NSE payload is either a bare array or an object wrapping one.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum HoldingsEnvelope {
    Rows(Vec<Value>),
    Wrapped {
        data: Option<Vec<Value>>,
        #[serde(rename = "shareHolding")]
        share_holding: Option<Vec<Value>>,
    },
}

impl HoldingsEnvelope {
    pub(crate) fn into_rows(self) -> Result<Vec<ShareholdingRow>, PulseError> {
        let raw = match self {
            Self::Rows(rows) => rows,
            Self::Wrapped {
                data,
                share_holding,
            } => data.or(share_holding).ok_or_else(|| {
                PulseError::Data("shareholding payload has neither `data` nor `shareHolding`".into())
            })?,
        };
        Ok(raw.iter().filter_map(row_from_value).collect())
    }
}

fn row_from_value(v: &Value) -> Option<ShareholdingRow> {
    let obj = v.as_object()?;
    let category = CATEGORY_KEYS
        .iter()
        .map(|k| obj.get(*k).map(text_of).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ");
    let percentage = PERCENT_KEYS
        .iter()
        .filter_map(|k| obj.get(*k))
        .find_map(pct_of);
    Some(ShareholdingRow {
        category,
        percentage,
    })
}

fn text_of(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn pct_of(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_pct_str(s),
        _ => None,
    }
}

/* ---------------- Yahoo holders modules ---------------- */

#[derive(Deserialize)]
pub(crate) struct HoldersResult {
    #[serde(rename = "defaultKeyStatistics")]
    pub(crate) key_statistics: Option<HeldPercentNode>,
    #[serde(rename = "majorHoldersBreakdown")]
    pub(crate) major_holders_breakdown: Option<MajorHoldersBreakdownNode>,
    #[serde(rename = "institutionOwnership")]
    pub(crate) institution_ownership: Option<OwnershipNode>,
    #[serde(rename = "fundOwnership")]
    pub(crate) fund_ownership: Option<OwnershipNode>,
}

#[derive(Deserialize)]
pub(crate) struct HeldPercentNode {
    #[serde(rename = "heldPercentInsiders")]
    pub(crate) held_percent_insiders: Option<RawNum<f64>>,
    #[serde(rename = "heldPercentInstitutions")]
    pub(crate) held_percent_institutions: Option<RawNum<f64>>,
}

#[derive(Deserialize)]
pub(crate) struct MajorHoldersBreakdownNode {
    #[serde(rename = "insidersPercentHeld")]
    pub(crate) insiders_percent_held: Option<RawNum<f64>>,
    #[serde(rename = "institutionsPercentHeld")]
    pub(crate) institutions_percent_held: Option<RawNum<f64>>,
    #[serde(rename = "institutionsFloatPercentHeld")]
    pub(crate) institutions_float_percent_held: Option<RawNum<f64>>,
}

#[derive(Deserialize)]
pub(crate) struct OwnershipNode {
    #[serde(rename = "ownershipList")]
    pub(crate) ownership_list: Option<Vec<OwnerNode>>,
}

#[derive(Deserialize)]
pub(crate) struct OwnerNode {
    #[serde(rename = "pctHeld")]
    pub(crate) pct_held: Option<RawNum<f64>>,
}
