//! Mention parsing and deduplication

use crate::api::{MentionPost, PostId};
use crate::error::{PlotbotError, Result};
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

/// A request to analyze a target account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionRequest {
    pub mention_id: PostId,
    /// Screen name as written in the mention, `@` included if present
    pub target_screen_name: String,
    pub requester_screen_name: String,
}

/// Mention ids already handled during this process
#[derive(Debug, Clone, Default)]
pub struct SeenSet {
    ids: HashSet<PostId>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: PostId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns `false` if the id was already present
    pub fn insert(&mut self, id: PostId) -> bool {
        self.ids.insert(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Turns `@<bot> analyze: @user` mentions into requests
#[derive(Debug)]
pub struct MentionExtractor {
    bot_name: String,
    pattern: Regex,
    seen: SeenSet,
}

impl MentionExtractor {
    pub fn new(bot_name: &str) -> Result<Self> {
        let bot_name = bot_name.trim().trim_start_matches('@');
        if bot_name.is_empty() {
            return Err(PlotbotError::Configuration(
                "bot screen name must not be empty".to_string(),
            ));
        }

        let pattern = Regex::new(&format!(
            r"(?i)^@{} analyze:\s*(@?[A-Za-z][A-Za-z0-9_-]+)",
            regex::escape(bot_name)
        ))
        .map_err(|e| PlotbotError::Configuration(format!("invalid mention pattern: {e}")))?;

        Ok(Self {
            bot_name: bot_name.to_string(),
            pattern,
            seen: SeenSet::new(),
        })
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    /// Query that finds mentions addressed to the bot
    pub fn search_query(&self) -> String {
        format!("@{} analyze:", self.bot_name)
    }

    /// Target screen name named by `text`, if it is an analyze request
    pub fn parse<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// New requests in `posts`, in batch order
    ///
    /// Matched posts are recorded as seen. Posts that do not match are left
    /// out of the seen set so a corrected attempt is not lost.
    pub fn extract(&mut self, posts: &[MentionPost]) -> Vec<MentionRequest> {
        let mut requests = Vec::new();

        for post in posts {
            if self.seen.contains(post.id) {
                continue;
            }

            let Some(target) = self.parse(&post.text) else {
                debug!("ignoring mention {}: no analyze request", post.id);
                continue;
            };

            self.seen.insert(post.id);
            requests.push(MentionRequest {
                mention_id: post.id,
                target_screen_name: target.to_string(),
                requester_screen_name: post.author.screen_name.clone(),
            });
        }

        requests
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }
}
