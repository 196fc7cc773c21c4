//! VADER sentiment analyzer

use crate::SentimentScorer;
use crate::scores::PolarityScores;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Scorer backed by the full VADER lexicon and rule set
///
/// Proportions are rounded to three places and the compound score to four,
/// matching the reference VADER output.
pub struct VaderAnalyzer {
    inner: SentimentIntensityAnalyzer<'static>,
}

impl VaderAnalyzer {
    pub fn new() -> Self {
        Self {
            inner: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Score a piece of text
    pub fn score(&self, text: &str) -> PolarityScores {
        let raw = self.inner.polarity_scores(text);
        let scores = PolarityScores {
            neg: round_to(field(&raw, "neg"), 3),
            neu: round_to(field(&raw, "neu"), 3),
            pos: round_to(field(&raw, "pos"), 3),
            compound: round_to(field(&raw, "compound"), 4),
        };
        debug!(?scores, "scored text");
        scores
    }
}

impl Default for VaderAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VaderAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaderAnalyzer").finish_non_exhaustive()
    }
}

impl SentimentScorer for VaderAnalyzer {
    fn polarity_scores(&self, text: &str) -> PolarityScores {
        self.score(text)
    }
}

fn field(raw: &HashMap<&str, f64>, key: &str) -> f64 {
    raw.get(key).copied().unwrap_or_default()
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> PolarityScores {
        VaderAnalyzer::new().polarity_scores(text)
    }

    #[test]
    fn test_reference_sentence() {
        let scores = score("VADER is smart, handsome, and funny.");
        assert_eq!(scores.compound, 0.8316);
        assert_eq!(scores.pos, 0.746);
        assert_eq!(scores.neu, 0.254);
        assert_eq!(scores.neg, 0.0);
    }

    #[test]
    fn test_caps_raise_intensity() {
        let plain = score("VADER is smart, handsome, and funny.");
        let shouted = score("VADER is VERY SMART, handsome, and FUNNY.");
        assert_eq!(shouted.compound, 0.9227);
        assert!(shouted.compound > plain.compound);
    }

    #[test]
    fn test_exclamation_raises_intensity() {
        let plain = score("VADER is smart, handsome, and funny.");
        let excited = score("VADER is smart, handsome, and funny!");
        assert!(excited.compound > plain.compound);
    }

    #[test]
    fn test_negation_flips_polarity() {
        assert!(score("VADER is smart").compound > 0.0);
        assert!(score("VADER is not smart").compound < 0.0);
    }

    #[test]
    fn test_neutral_text() {
        let scores = score("The meeting is at noon");
        assert_eq!(scores.compound, 0.0);
        assert_eq!(scores.neu, 1.0);
        assert!(scores.is_neutral_only());
    }

    #[test]
    fn test_empty_text() {
        let scores = score("");
        assert_eq!(scores.compound, 0.0);
        assert!(scores.is_neutral_only());
    }

    #[test]
    fn test_full_lexicon_vocabulary() {
        // Words outside a small hand-picked list still carry valence
        let texts = [
            "The earthquake victims deserve our prayers",
            "Kindness and generosity bring inner peace",
            "Corruption and greed destroy communities",
        ];
        for text in texts {
            assert!(!score(text).is_neutral_only(), "{text:?} scored as neutral");
        }
        assert!(score("The earthquake victims deserve our prayers").compound < 0.0);
        assert!(score("Corruption and greed destroy communities").compound < -0.7);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_to(0.831_632_035, 4), 0.8316);
        assert_eq!(round_to(0.745_762_711, 3), 0.746);
    }
}
