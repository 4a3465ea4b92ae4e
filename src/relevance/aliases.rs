use std::collections::HashMap;

use crate::core::{PulseError, normalize_symbol};

/// Read-only mapping from a canonical symbol to the lower-case phrases that identify
/// the company in free text (name variants, promoters, brands).
///
/// Lookup falls back to the lower-cased symbol itself when no aliases are registered.
/// Blank aliases are discarded on construction so a substring test can never match
/// vacuously.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyAliasSet {
    map: HashMap<String, Vec<String>>,
}

impl CompanyAliasSet {
    /// An empty table; every lookup uses the symbol fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(symbol, aliases)` pairs.
    pub fn from_entries<I, S, A, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, A)>,
        S: AsRef<str>,
        A: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let mut set = Self::new();
        for (symbol, aliases) in entries {
            set.insert(symbol.as_ref(), aliases);
        }
        set
    }

    /// Parses a JSON object of the form `{"INFY": ["infosys", "narayana murthy"]}`.
    ///
    /// # Errors
    ///
    /// Returns `PulseError::Config` when the document is not such an object.
    pub fn from_json(json: &str) -> Result<Self, PulseError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)
            .map_err(|e| PulseError::Config(format!("alias table: {e}")))?;
        Ok(Self::from_entries(raw))
    }

    /// Registers (or extends) the aliases for `symbol`, keeping first-seen order.
    pub fn insert<A, P>(&mut self, symbol: &str, aliases: A)
    where
        A: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let key = normalize_symbol(symbol);
        if key.is_empty() {
            return;
        }
        let slot = self.map.entry(key).or_default();
        for alias in aliases {
            let alias = alias.as_ref().trim().to_lowercase();
            if !alias.is_empty() && !slot.contains(&alias) {
                slot.push(alias);
            }
        }
    }

    /// The aliases registered for `symbol`, or `[lowercase(symbol)]`.
    ///
    /// Returns an empty list for a blank symbol.
    pub fn lookup(&self, symbol: &str) -> Vec<String> {
        let key = normalize_symbol(symbol);
        match self.map.get(&key) {
            Some(aliases) if !aliases.is_empty() => aliases.clone(),
            _ if key.is_empty() => Vec::new(),
            _ => vec![key.to_lowercase()],
        }
    }

    /// Whether `symbol` has registered aliases.
    pub fn contains(&self, symbol: &str) -> bool {
        self.map.contains_key(&normalize_symbol(symbol))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Aliases for widely covered NSE listings.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN.iter().map(|(s, a)| (*s, a.iter())))
    }
}

const BUILTIN: &[(&str, &[&str])] = &[
    // Nifty 50
    ("RELIANCE", &["reliance industries", "mukesh ambani", "ril", "jio", "reliance"]),
    ("TCS", &["tata consultancy", "tcs", "tata sons"]),
    ("HDFCBANK", &["hdfc bank", "hdfc", "banking stock"]),
    ("INFY", &["infosys", "narayana murthy", "it major"]),
    ("HINDUNILVR", &["hindustan unilever", "hul", "unilever"]),
    ("ICICIBANK", &["icici bank", "icici", "private bank"]),
    ("KOTAKBANK", &["kotak mahindra bank", "kotak bank"]),
    ("SBIN", &["state bank of india", "sbi", "public sector bank"]),
    ("BHARTIARTL", &["bharti airtel", "airtel", "telecom"]),
    ("ITC", &["itc limited", "itc", "cigarette", "fmcg"]),
    ("LT", &["larsen & toubro", "l&t", "engineering"]),
    ("HCLTECH", &["hcl technologies", "hcl tech"]),
    ("AXISBANK", &["axis bank", "banking"]),
    ("MARUTI", &["maruti suzuki", "maruti", "auto"]),
    ("ASIANPAINT", &["asian paints", "paints"]),
    ("DMART", &["avenue supermarts", "dmart", "retail"]),
    ("SUNPHARMA", &["sun pharmaceutical", "sun pharma"]),
    ("TITAN", &["titan company", "titan", "watches"]),
    ("ULTRACEMCO", &["ultratech cement", "ultratech"]),
    ("WIPRO", &["wipro limited", "wipro"]),
    ("NESTLEIND", &["nestle india", "nestle"]),
    ("POWERGRID", &["power grid corporation", "powergrid"]),
    ("NTPC", &["ntpc limited", "ntpc", "power"]),
    ("ONGC", &["oil and natural gas corporation", "ongc"]),
    ("COALINDIA", &["coal india", "coalindia"]),
    ("BAJFINANCE", &["bajaj finance", "bajaj fin"]),
    ("TECHM", &["tech mahindra", "techm"]),
    ("ADANIPORTS", &["adani ports", "adani ports & sez"]),
    ("TATAMOTORS", &["tata motors", "tatamotors", "auto"]),
    ("BAJAJFINSV", &["bajaj finserv"]),
    ("GRASIM", &["grasim industries", "grasim"]),
    ("JSWSTEEL", &["jsw steel", "jsw"]),
    ("HDFCLIFE", &["hdfc life insurance", "hdfc life"]),
    ("DRREDDY", &["dr reddys laboratories", "dr reddy"]),
    ("CIPLA", &["cipla limited", "cipla"]),
    ("TATASTEEL", &["tata steel", "tatasteel"]),
    ("SBILIFE", &["sbi life insurance", "sbi life"]),
    ("HINDALCO", &["hindalco industries", "hindalco"]),
    ("BRITANNIA", &["britannia industries", "britannia"]),
    ("DIVISLAB", &["divis laboratories", "divis"]),
    ("EICHERMOT", &["eicher motors", "eicher", "royal enfield"]),
    ("UPL", &["upl limited", "upl", "agrochemicals"]),
    ("BAJAJ-AUTO", &["bajaj auto"]),
    ("SHREECEM", &["shree cement", "shreecem"]),
    ("HEROMOTOCO", &["hero motocorp", "hero", "motocorp"]),
    ("INDUSINDBK", &["indusind bank", "indusind"]),
    ("APOLLOHOSP", &["apollo hospitals", "apollo"]),
    ("BPCL", &["bharat petroleum", "bpcl"]),
    ("HDFCAMC", &["hdfc asset management", "hdfc amc"]),
    // Other large caps
    ("VEDL", &["vedanta limited", "vedanta"]),
    ("ZOMATO", &["zomato limited", "zomato"]),
    ("PAYTM", &["one97 communications", "paytm"]),
    ("IRCTC", &["irctc limited", "irctc"]),
    ("TATAPOWER", &["tata power", "tatapower"]),
    ("M&M", &["mahindra & mahindra", "mahindra"]),
    ("PIDILITIND", &["pidilite industries", "pidilite"]),
    // Mid caps
    ("BERGEPAINT", &["berger paints", "berger"]),
    ("DABUR", &["dabur india", "dabur"]),
    ("GODREJCP", &["godrej consumer", "godrej"]),
    ("HAVELLS", &["havells india", "havells"]),
    ("MOTHERSON", &["motherson sumi", "motherson"]),
    // Banks & financials
    ("BANDHANBNK", &["bandhan bank", "bandhan"]),
    ("FEDERALBNK", &["federal bank", "federal"]),
    ("IDFCFIRSTB", &["idfc first bank", "idfc"]),
    // Pharma
    ("BIOCON", &["biocon limited", "biocon"]),
    ("LUPIN", &["lupin limited", "lupin"]),
    ("TORNTPHARM", &["torrent pharmaceuticals", "torrent pharma"]),
    // IT
    ("MINDTREE", &["mindtree limited", "mindtree"]),
    ("MPHASIS", &["mphasis limited", "mphasis"]),
    ("PERSISTENT", &["persistent systems", "persistent"]),
    // Consumer
    ("DIXON", &["dixon technologies", "dixon"]),
    ("VBL", &["varun beverages", "varun"]),
    // Infrastructure & energy
    ("ADANIENSOL", &["adani energy solutions", "adani energy"]),
    ("ADANIGREEN", &["adani green energy", "adani green"]),
    ("BOSCHLTD", &["bosch limited", "bosch"]),
    // Telecom
    ("IDEA", &["vodafone idea", "vi", "vodafone"]),
];
