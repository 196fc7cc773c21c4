//! Sentiment scoring for short social media posts
//!
//! Wraps the VADER (Valence Aware Dictionary and sEntiment Reasoner) lexicon
//! and rules behind the [`SentimentScorer`] trait. Every text gets a
//! [`PolarityScores`] with a normalized compound score in `[-1, 1]` and the
//! positive/negative/neutral proportions of the text.
//!
//! # Example
//!
//! ```
//! use plotbot_sentiment::{SentimentScorer, VaderAnalyzer};
//!
//! let analyzer = VaderAnalyzer::new();
//! let scores = analyzer.polarity_scores("VADER is smart, handsome, and funny.");
//!
//! assert!(scores.compound > 0.8);
//! assert_eq!(scores.neg, 0.0);
//! ```

pub mod analyzer;
pub mod scores;

pub use analyzer::VaderAnalyzer;
pub use scores::PolarityScores;

/// Anything able to score the sentiment of a piece of text
pub trait SentimentScorer: Send + Sync {
    /// Score `text`
    fn polarity_scores(&self, text: &str) -> PolarityScores;
}
