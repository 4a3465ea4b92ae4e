/// Terms that mark an article as being about the stock rather than the company at large.
pub const FINANCIAL_KEYWORDS: &[&str] = &[
    "stock", "share", "market", "price", "invest", "financial", "results", "profit", "revenue",
    "earning", "dividend", "sensex", "nifty",
];

/// Terms that mark an article as off-topic even when it mentions the company and money.
pub const EXCLUSION_KEYWORDS: &[&str] = &[
    "job",
    "career",
    "recruitment",
    "hiring",
    "event",
    "conference",
    "seminar",
    "sports",
    "entertainment",
];

/// The inclusion and exclusion vocabularies used by the relevance filter.
///
/// Both lists are stored lower-cased with blanks removed and are matched as substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTables {
    financial: Vec<String>,
    exclusion: Vec<String>,
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self::new(FINANCIAL_KEYWORDS, EXCLUSION_KEYWORDS)
    }
}

impl KeywordTables {
    pub fn new<F, E, S, T>(financial: F, exclusion: E) -> Self
    where
        F: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            financial: clean(financial),
            exclusion: clean(exclusion),
        }
    }

    pub fn financial(&self) -> &[String] {
        &self.financial
    }

    pub fn exclusion(&self) -> &[String] {
        &self.exclusion
    }

    /// `text` must already be lower-cased.
    pub(crate) fn has_financial(&self, text: &str) -> bool {
        contains_any(text, &self.financial)
    }

    /// `text` must already be lower-cased.
    pub(crate) fn has_exclusion(&self, text: &str) -> bool {
        contains_any(text, &self.exclusion)
    }
}

fn clean<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

pub(crate) fn contains_any(text: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|n| !n.is_empty() && text.contains(n.as_str()))
}
