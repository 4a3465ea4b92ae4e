use serde::Serialize;

/// Discrete sentiment of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-label counts over a batch. `positive + negative + neutral == total`.
///
/// The all-zero value is the canonical "no data" tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentTally {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub total: usize,
}

impl SentimentTally {
    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
        self.total += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Net score `(positive - negative) / total * 100` with its sign label.
    ///
    /// `None` for an empty tally.
    pub fn overall(&self) -> Option<OverallSentiment> {
        if self.total == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let score = (self.positive as f64 - self.negative as f64) / self.total as f64 * 100.0;
        let label = if score > 0.0 {
            SentimentLabel::Positive
        } else if score < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        Some(OverallSentiment { score, label })
    }

    /// Percentage of the batch in each label; all zero for an empty tally.
    pub fn shares(&self) -> SentimentShares {
        if self.total == 0 {
            return SentimentShares::default();
        }
        #[allow(clippy::cast_precision_loss)]
        let pct = |n: usize| n as f64 / self.total as f64 * 100.0;
        SentimentShares {
            positive_pct: pct(self.positive),
            negative_pct: pct(self.negative),
            neutral_pct: pct(self.neutral),
        }
    }
}

impl FromIterator<SentimentLabel> for SentimentTally {
    fn from_iter<I: IntoIterator<Item = SentimentLabel>>(iter: I) -> Self {
        let mut tally = Self::default();
        for label in iter {
            tally.record(label);
        }
        tally
    }
}

/// Net sentiment of a non-empty batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverallSentiment {
    /// In [-100, 100].
    pub score: f64,
    pub label: SentimentLabel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SentimentShares {
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
}
