use rivalscan_core::{SentimentLabel, SentimentLexicon, SentimentResult};

// Label cutoffs on the raw positive share.
const POSITIVE_CUTOFF: f64 = 0.6;
const NEGATIVE_CUTOFF: f64 = 0.4;

/// Lexicon-based sentiment heuristic.
///
/// Counts which positive/negative keywords appear in the text (substring
/// containment, case-insensitive, each keyword at most once) and labels by
/// the positive share. This is a heuristic, not a classifier: no stemming,
/// no negation handling, no weighting by keyword salience.
pub struct SentimentScorer {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl SentimentScorer {
    pub fn new(lexicon: &SentimentLexicon) -> Self {
        Self {
            positive: lexicon.positive.iter().map(|w| w.to_lowercase()).collect(),
            negative: lexicon.negative.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    pub fn score(&self, text: &str) -> SentimentResult {
        let text = text.to_lowercase();
        let positive_hits = self
            .positive
            .iter()
            .filter(|word| text.contains(word.as_str()))
            .count();
        let negative_hits = self
            .negative
            .iter()
            .filter(|word| text.contains(word.as_str()))
            .count();

        if positive_hits + negative_hits == 0 {
            return SentimentResult {
                label: SentimentLabel::Neutral,
                score: 0.5,
            };
        }

        let raw = positive_hits as f64 / (positive_hits + negative_hits) as f64;
        let label = if raw > POSITIVE_CUTOFF {
            SentimentLabel::Positive
        } else if raw < NEGATIVE_CUTOFF {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        SentimentResult { label, score: raw }
    }
}
