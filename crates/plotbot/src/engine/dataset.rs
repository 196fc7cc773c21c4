//! Scored posts in chronological order

use crate::api::PostId;
use chrono::{DateTime, Utc};
use plotbot_sentiment::PolarityScores;
use serde::{Deserialize, Serialize};

/// Sentiment of a single post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSentiment {
    pub post_id: PostId,
    pub author_display_name: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub compound: f64,
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
}

impl PostSentiment {
    pub fn new(
        post_id: PostId,
        author_display_name: impl Into<String>,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
        scores: PolarityScores,
    ) -> Self {
        Self {
            post_id,
            author_display_name: author_display_name.into(),
            text: text.into(),
            timestamp,
            compound: scores.compound,
            negative: scores.neg,
            neutral: scores.neu,
            positive: scores.pos,
        }
    }
}

/// Posts ordered by ascending timestamp
///
/// Entries sharing a timestamp keep the order they were supplied in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    entries: Vec<PostSentiment>,
}

impl Dataset {
    pub fn new(mut entries: Vec<PostSentiment>) -> Self {
        entries.sort_by_key(|entry| entry.timestamp);
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[PostSentiment] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &PostSentiment> {
        self.entries.iter()
    }

    /// Arithmetic mean of the compound scores, `None` when empty
    pub fn mean_compound(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let sum: f64 = self.entries.iter().map(|e| e.compound).sum();
        Some(sum / self.entries.len() as f64)
    }

    /// Lowest compound score; the earliest entry wins a tie
    pub fn most_negative(&self) -> Option<&PostSentiment> {
        self.first_by(|candidate, best| candidate < best)
    }

    /// Highest compound score; the earliest entry wins a tie
    pub fn most_positive(&self) -> Option<&PostSentiment> {
        self.first_by(|candidate, best| candidate > best)
    }

    /// First and last timestamps
    pub fn time_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.entries.first()?;
        let last = self.entries.last()?;
        Some((first.timestamp, last.timestamp))
    }

    fn first_by(&self, better: impl Fn(f64, f64) -> bool) -> Option<&PostSentiment> {
        let mut iter = self.entries.iter();
        let first = iter.next()?;
        Some(iter.fold(first, |best, entry| {
            if better(entry.compound, best.compound) {
                entry
            } else {
                best
            }
        }))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a PostSentiment;
    type IntoIter = std::slice::Iter<'a, PostSentiment>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn entry(id: PostId, minute: u32, compound: f64) -> PostSentiment {
        PostSentiment {
            post_id: id,
            author_display_name: "Dalai Lama".to_string(),
            text: format!("post {id}"),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap(),
            compound,
            negative: 0.2,
            neutral: 0.5,
            positive: 0.3,
        }
    }

    #[test]
    fn test_sorted_by_timestamp() {
        let dataset = Dataset::new(vec![entry(3, 30, 0.1), entry(1, 10, -0.8), entry(2, 20, 0.6)]);
        let ids: Vec<PostId> = dataset.iter().map(|e| e.post_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_equal_timestamps_keep_fetch_order() {
        let dataset = Dataset::new(vec![entry(9, 5, 0.1), entry(4, 5, 0.2), entry(7, 1, 0.3)]);
        let ids: Vec<PostId> = dataset.iter().map(|e| e.post_id).collect();
        assert_eq!(ids, vec![7, 9, 4]);
    }

    #[test]
    fn test_extremes_and_mean() {
        let dataset = Dataset::new(vec![entry(1, 10, -0.8), entry(2, 20, 0.6), entry(3, 30, 0.1)]);

        assert_eq!(dataset.most_negative().unwrap().post_id, 1);
        assert_eq!(dataset.most_positive().unwrap().post_id, 2);
        let mean = dataset.mean_compound().unwrap();
        assert!((mean - (-0.8 + 0.6 + 0.1) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_ties_pick_earliest() {
        let dataset = Dataset::new(vec![
            entry(1, 10, 0.5),
            entry(2, 20, -0.5),
            entry(3, 30, 0.5),
            entry(4, 40, -0.5),
        ]);
        assert_eq!(dataset.most_positive().unwrap().post_id, 1);
        assert_eq!(dataset.most_negative().unwrap().post_id, 2);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::empty();
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
        assert!(dataset.mean_compound().is_none());
        assert!(dataset.most_negative().is_none());
        assert!(dataset.most_positive().is_none());
        assert!(dataset.time_range().is_none());
    }

    #[test]
    fn test_time_range() {
        let dataset = Dataset::new(vec![entry(2, 45, 0.4), entry(1, 15, -0.4)]);
        let (start, end) = dataset.time_range().unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 5, 1, 12, 15, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 5, 1, 12, 45, 0).unwrap());
    }

    #[test]
    fn test_from_polarity_scores() {
        let scores = PolarityScores {
            neg: 0.1,
            neu: 0.6,
            pos: 0.3,
            compound: 0.42,
        };
        let post = PostSentiment::new(5, "Someone", "text", Utc::now(), scores);
        assert_eq!(post.compound, 0.42);
        assert_eq!(post.negative, 0.1);
        assert_eq!(post.neutral, 0.6);
        assert_eq!(post.positive, 0.3);
    }
}
