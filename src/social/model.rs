use serde::Serialize;

use crate::sentiment::SentimentTally;

/// Posts found for a query together with their sentiment tally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialSentiment {
    pub query: String,
    pub posts: Vec<String>,
    pub tally: SentimentTally,
}

/// Result of a quota-gated social sentiment run.
#[derive(Debug, Clone, PartialEq)]
pub enum SocialOutcome {
    /// Posts were found and tallied; the request counted against the quota.
    Tallied(SocialSentiment),
    /// The search ran but found nothing. The quota is untouched.
    NoPosts,
    /// The allowance is spent; nothing was requested.
    CoolingDown { minutes_left: u64 },
}
