//! Ticker symbol normalization.

const EXCHANGE_SUFFIXES: &[&str] = &[".NS", ".BO", ".BSE"];

/// Strips a trailing exchange suffix and upper-cases the rest.
///
/// ```
/// use stockpulse_rs::core::normalize_symbol;
/// assert_eq!(normalize_symbol(" infy.ns "), "INFY");
/// assert_eq!(normalize_symbol("BAJAJ-AUTO.BO"), "BAJAJ-AUTO");
/// assert_eq!(normalize_symbol("M&M"), "M&M");
/// ```
pub fn normalize_symbol(symbol: &str) -> String {
    let upper = symbol.trim().to_uppercase();
    EXCHANGE_SUFFIXES
        .iter()
        .find_map(|sfx| upper.strip_suffix(sfx))
        .map_or_else(|| upper.clone(), str::to_string)
}

/// The Yahoo listing for `symbol`: an explicit exchange suffix is kept, bare symbols
/// default to NSE.
///
/// ```
/// use stockpulse_rs::core::yahoo_symbol;
/// assert_eq!(yahoo_symbol("infy"), "INFY.NS");
/// assert_eq!(yahoo_symbol("TATAMOTORS.BO"), "TATAMOTORS.BO");
/// ```
pub fn yahoo_symbol(symbol: &str) -> String {
    let upper = symbol.trim().to_uppercase();
    if upper.contains('.') {
        upper
    } else {
        format!("{upper}.NS")
    }
}
