use stockpulse_rs::{PulseError, SentimentClassifier, SentimentLabel};

fn fixed(p: f64) -> impl Fn(&str) -> Result<f64, PulseError> + Send + Sync {
    move |_| Ok(p)
}

fn classify_at(p: f64) -> SentimentLabel {
    SentimentClassifier::new(fixed(p)).classify("anything")
}

#[test]
fn thresholds_are_exclusive() {
    assert_eq!(classify_at(0.15), SentimentLabel::Neutral);
    assert_eq!(classify_at(-0.15), SentimentLabel::Neutral);
    assert_eq!(classify_at(0.0), SentimentLabel::Neutral);
    assert_eq!(classify_at(0.16), SentimentLabel::Positive);
    assert_eq!(classify_at(-0.16), SentimentLabel::Negative);
    assert_eq!(classify_at(1.0), SentimentLabel::Positive);
    assert_eq!(classify_at(-1.0), SentimentLabel::Negative);
}

#[test]
fn scorer_failure_is_neutral() {
    let failing = |_: &str| -> Result<f64, PulseError> { Err(PulseError::Scorer("boom".into())) };
    let classifier = SentimentClassifier::new(failing);
    assert_eq!(classifier.classify("Great quarter"), SentimentLabel::Neutral);
}

#[test]
fn non_finite_polarity_is_neutral() {
    assert_eq!(classify_at(f64::NAN), SentimentLabel::Neutral);
    assert_eq!(classify_at(f64::INFINITY), SentimentLabel::Neutral);
}

#[test]
fn custom_thresholds_apply() {
    let classifier = SentimentClassifier::new(fixed(0.3)).thresholds(0.5, -0.5);
    assert_eq!(classifier.classify("x"), SentimentLabel::Neutral);
    assert_eq!(classifier.label_for(0.51), SentimentLabel::Positive);
    assert_eq!(classifier.label_for(-0.51), SentimentLabel::Negative);
}

#[test]
fn scorer_receives_the_text_verbatim() {
    let classifier = SentimentClassifier::new(|t: &str| -> Result<f64, PulseError> {
        Ok(if t.contains("beats") { 0.9 } else { -0.9 })
    });
    assert_eq!(classifier.classify("Infosys beats estimates"), SentimentLabel::Positive);
    assert_eq!(classifier.classify("Infosys misses estimates"), SentimentLabel::Negative);
}

#[test]
fn labels_display_as_words() {
    assert_eq!(SentimentLabel::Positive.to_string(), "Positive");
    assert_eq!(SentimentLabel::Negative.as_str(), "Negative");
    assert_eq!(format!("{}", SentimentLabel::Neutral), "Neutral");
}
