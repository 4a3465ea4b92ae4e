use vader_sentiment::SentimentIntensityAnalyzer;

use super::PolarityScorer;
use crate::core::PulseError;

/// Polarity from VADER's compound score.
///
/// VADER is a rule-based lexicon tuned for short social and news text; the
/// compound score is already normalized to [-1, 1].
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VaderScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaderScorer").finish_non_exhaustive()
    }
}

impl PolarityScorer for VaderScorer {
    fn polarity(&self, text: &str) -> Result<f64, PulseError> {
        if text.trim().is_empty() {
            return Ok(0.0);
        }
        let scores = self.analyzer.polarity_scores(text);
        scores
            .get("compound")
            .copied()
            .ok_or_else(|| PulseError::Scorer("missing compound score".into()))
    }
}
