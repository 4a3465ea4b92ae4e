//! Topical relevance filtering for fetched news.
//!
//! A record is kept when its lower-cased `title + " " + description`
//! contains one of the company's aliases, at least one financial keyword and
//! no exclusion keyword. Survivors are deduplicated by title.

mod aliases;
mod dedup;
mod keywords;

pub use aliases::CompanyAliasSet;
pub use dedup::dedup_by_title;
pub use keywords::{EXCLUSION_KEYWORDS, FINANCIAL_KEYWORDS, KeywordTables};

use std::sync::Arc;

use crate::news::NewsRecord;
use keywords::contains_any;

/// Stateless predicate over news records, parameterized by alias and keyword tables.
///
/// Cloning shares the alias table.
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    aliases: Arc<CompanyAliasSet>,
    keywords: KeywordTables,
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(Arc::new(CompanyAliasSet::builtin()), KeywordTables::default())
    }
}

impl RelevanceFilter {
    pub fn new(aliases: Arc<CompanyAliasSet>, keywords: KeywordTables) -> Self {
        Self { aliases, keywords }
    }

    /// Same keyword tables as the default, different aliases.
    pub fn with_aliases(aliases: CompanyAliasSet) -> Self {
        Self::new(Arc::new(aliases), KeywordTables::default())
    }

    pub fn aliases(&self) -> &CompanyAliasSet {
        &self.aliases
    }

    pub fn keywords(&self) -> &KeywordTables {
        &self.keywords
    }

    /// Resolves the alias phrases for `symbol`.
    pub fn aliases_for(&self, symbol: &str) -> Vec<String> {
        self.aliases.lookup(symbol)
    }

    /// Whether the record mentions any of `aliases`.
    pub fn is_company_match(record: &NewsRecord, aliases: &[String]) -> bool {
        contains_any(&record.match_text(), aliases)
    }

    /// Company match, at least one financial keyword, no exclusion keyword.
    pub fn is_relevant(&self, record: &NewsRecord, aliases: &[String]) -> bool {
        let text = record.match_text();
        contains_any(&text, aliases)
            && self.keywords.has_financial(&text)
            && !self.keywords.has_exclusion(&text)
    }

    /// Keeps relevant records for `symbol` in input order, then deduplicates by title.
    pub fn filter_relevant(&self, records: Vec<NewsRecord>, symbol: &str) -> Vec<NewsRecord> {
        let aliases = self.aliases_for(symbol);
        if aliases.is_empty() {
            return Vec::new();
        }
        let kept: Vec<NewsRecord> = records
            .into_iter()
            .filter(|r| self.is_relevant(r, &aliases))
            .collect();
        dedup_by_title(kept)
    }
}
