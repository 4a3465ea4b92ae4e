//! Lexicon-based sentiment labels and batch tallies.
//!
//! Polarity scoring sits behind [`PolarityScorer`] so the thresholds and
//! aggregation are independent of the lexicon. The default scorer is VADER.

mod model;
mod vader;

pub use model::{OverallSentiment, SentimentLabel, SentimentShares, SentimentTally};
pub use vader::VaderScorer;

use crate::core::PulseError;
use crate::news::NewsRecord;

/// Default positive threshold; scores must be strictly above it.
pub const POSITIVE_THRESHOLD: f64 = 0.15;
/// Default negative threshold; scores must be strictly below it.
pub const NEGATIVE_THRESHOLD: f64 = -0.15;

/// Produces a polarity in [-1, 1] for a piece of text.
pub trait PolarityScorer: Send + Sync {
    /// # Errors
    ///
    /// Implementations return an error when the text cannot be scored.
    fn polarity(&self, text: &str) -> Result<f64, PulseError>;
}

impl<F> PolarityScorer for F
where
    F: Fn(&str) -> Result<f64, PulseError> + Send + Sync,
{
    fn polarity(&self, text: &str) -> Result<f64, PulseError> {
        self(text)
    }
}

/// Maps polarity to a [`SentimentLabel`] with thresholds tuned for financial text.
///
/// Never fails: a scorer error or a non-finite score classifies as `Neutral`.
#[derive(Debug, Clone)]
pub struct SentimentClassifier<S = VaderScorer> {
    scorer: S,
    positive_above: f64,
    negative_below: f64,
}

impl Default for SentimentClassifier<VaderScorer> {
    fn default() -> Self {
        Self::new(VaderScorer::new())
    }
}

impl<S: PolarityScorer> SentimentClassifier<S> {
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            positive_above: POSITIVE_THRESHOLD,
            negative_below: NEGATIVE_THRESHOLD,
        }
    }

    /// Overrides the exclusive thresholds.
    #[must_use]
    pub fn thresholds(mut self, positive_above: f64, negative_below: f64) -> Self {
        self.positive_above = positive_above;
        self.negative_below = negative_below;
        self
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn classify(&self, text: &str) -> SentimentLabel {
        match self.scorer.polarity(text) {
            Ok(p) if p.is_finite() => self.label_for(p),
            Ok(_p) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(polarity = _p, "non-finite polarity; treating as neutral");
                SentimentLabel::Neutral
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %_e, "polarity scoring failed; treating as neutral");
                SentimentLabel::Neutral
            }
        }
    }

    /// Applies the thresholds to an already computed polarity.
    pub fn label_for(&self, polarity: f64) -> SentimentLabel {
        if polarity > self.positive_above {
            SentimentLabel::Positive
        } else if polarity < self.negative_below {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Classifies `title + ". " + description` of each record and counts the labels.
    pub fn aggregate(&self, records: &[NewsRecord]) -> SentimentTally {
        records
            .iter()
            .map(|r| self.classify(&r.sentiment_text()))
            .collect()
    }

    /// Tallies free-standing texts such as social media posts.
    pub fn tally_texts<I, T>(&self, texts: I) -> SentimentTally
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        texts
            .into_iter()
            .map(|t| self.classify(t.as_ref()))
            .collect()
    }
}
