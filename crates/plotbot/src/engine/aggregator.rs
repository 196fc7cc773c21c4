//! Fetch, score and filter a user's recent posts

use crate::api::{SocialPlatform, TimelinePost};
use crate::engine::dataset::{Dataset, PostSentiment};
use crate::error::Result;
use plotbot_sentiment::SentimentScorer;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Builds a [`Dataset`] for a target account
pub struct SentimentAggregator {
    platform: Arc<dyn SocialPlatform>,
    scorer: Arc<dyn SentimentScorer>,
    pages: u32,
    page_size: u32,
}

impl SentimentAggregator {
    pub fn new(
        platform: Arc<dyn SocialPlatform>,
        scorer: Arc<dyn SentimentScorer>,
        pages: u32,
        page_size: u32,
    ) -> Self {
        Self {
            platform,
            scorer,
            pages,
            page_size,
        }
    }

    /// Score up to `pages * page_size` recent posts by `screen_name`
    ///
    /// An unknown account, an empty timeline and a timeline with only
    /// neutral posts all give an empty dataset.
    #[instrument(skip(self))]
    pub async fn aggregate(&self, screen_name: &str) -> Result<Dataset> {
        let name = screen_name.trim_start_matches('@');
        let posts = self.fetch_timeline(name).await?;
        let fetched = posts.len();

        let entries: Vec<PostSentiment> = posts
            .into_iter()
            .filter_map(|post| self.score(post))
            .collect();

        info!(
            "{}: {} posts fetched, {} kept after filtering",
            name,
            fetched,
            entries.len()
        );
        Ok(Dataset::new(entries))
    }

    async fn fetch_timeline(&self, name: &str) -> Result<Vec<TimelinePost>> {
        let mut posts = Vec::new();

        for page in 1..=self.pages {
            match self.platform.user_timeline(name, page, self.page_size).await {
                Ok(batch) if batch.is_empty() => {
                    debug!("timeline page {} empty, stopping", page);
                    break;
                }
                Ok(batch) => posts.extend(batch),
                Err(e) if e.is_not_found() => {
                    warn!("timeline for {} not found: {}", name, e);
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(posts)
    }

    fn score(&self, post: TimelinePost) -> Option<PostSentiment> {
        let scores = self.scorer.polarity_scores(&post.text);
        if scores.is_neutral_only() {
            return None;
        }
        Some(PostSentiment::new(
            post.id,
            post.author.name,
            post.text,
            post.created_at,
            scores,
        ))
    }
}
