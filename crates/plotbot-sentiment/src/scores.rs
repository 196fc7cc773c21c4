//! Sentiment score record

use serde::{Deserialize, Serialize};

/// Result of scoring a single text
///
/// `neg`, `neu` and `pos` are proportions in `[0, 1]` that sum to roughly 1
/// (they are rounded to three places). `compound` is the normalized overall
/// polarity in `[-1, 1]`, rounded to four places.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

impl PolarityScores {
    /// True when the scorer found nothing but neutral content
    ///
    /// Either signal is enough: a zero compound or a text that is entirely
    /// neutral.
    pub fn is_neutral_only(&self) -> bool {
        self.compound == 0.0 || self.neu == 1.0
    }
}
