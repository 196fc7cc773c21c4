//! Sentiment analysis pipeline
//!
//! Fetch and score a user's posts, then chart them

pub mod aggregator;
pub mod dataset;
pub mod report;

pub use aggregator::SentimentAggregator;
pub use dataset::{Dataset, PostSentiment};
pub use report::{Report, ReportRenderer};
