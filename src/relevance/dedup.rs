use std::collections::HashSet;

use crate::news::NewsRecord;

/// Keeps the first record for each exact title, preserving order.
///
/// Records with an empty title have no headline to show and are dropped.
/// Applying this twice gives the same result as applying it once.
pub fn dedup_by_title(records: Vec<NewsRecord>) -> Vec<NewsRecord> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| !r.title.is_empty() && seen.insert(r.title.clone()))
        .collect()
}
