//! Search query planning for a symbol.

/// Heavily covered symbols that also get symbol-based queries.
const FLAGSHIP_SYMBOLS: &[&str] = &["RELIANCE", "INFY", "TCS", "HDFCBANK", "HINDUNILVR", "ICICIBANK"];

const ALIAS_TEMPLATES: &[&str] = &[
    "India stock market",
    "NSE BSE",
    "share price India",
    "quarterly results",
    "sensex nifty",
];

const FLAGSHIP_TEMPLATES: &[&str] = &["stock analysis", "investors", "financial results", "earnings"];

/// Builds the ordered list of search queries for `symbol`.
///
/// Each alias is quoted and paired with every market phrase; flagship symbols
/// append symbol-based queries at the end. Callers cap how many are issued.
pub fn plan_queries(symbol: &str, aliases: &[String]) -> Vec<String> {
    let mut queries: Vec<String> = aliases
        .iter()
        .flat_map(|alias| {
            ALIAS_TEMPLATES
                .iter()
                .map(move |tail| format!("\"{alias}\" {tail}"))
        })
        .collect();

    if FLAGSHIP_SYMBOLS.contains(&symbol) {
        queries.extend(
            FLAGSHIP_TEMPLATES
                .iter()
                .map(|tail| format!("\"{symbol}\" {tail}")),
        );
    }
    queries
}

/// The broad query used when nothing relevant turned up.
pub fn fallback_query(symbol: &str) -> String {
    format!("{symbol} stock India NSE BSE")
}
