//! Sentiment plot bot
//!
//! Polls Twitter for posts of the form `@<bot> analyze: @someone`, scores
//! the last few hundred posts of the named account, charts their polarity
//! over time and replies to the requester with the chart and links to the
//! most negative and most positive post.
//!
//! # Architecture
//!
//! - [`api`]: the [`SocialPlatform`] trait and its OAuth-signed Twitter
//!   implementation
//! - [`engine`]: timeline aggregation, the [`Dataset`] and chart rendering
//! - [`bot`]: mention extraction, replies and the [`PlotBot`] poll loop
//! - [`config`]: credentials and tunables read from the environment
//!
//! Sentiment scoring lives in the `plotbot-sentiment` crate.

pub mod api;
pub mod bot;
pub mod config;
pub mod engine;
pub mod error;

pub use api::{SocialPlatform, TwitterClient};
pub use bot::{
    MentionExtractor, MentionRequest, PlotBot, Responder, SeenSet, ShutdownSignal, TickSummary,
};
pub use config::{BotConfig, Credentials};
pub use engine::{Dataset, PostSentiment, Report, ReportRenderer, SentimentAggregator};
pub use error::{PlotbotError, Result};
