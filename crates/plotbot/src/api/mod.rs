//! Social platform access
//!
//! The bot talks to the platform only through [`SocialPlatform`]; the
//! production implementation is [`TwitterClient`].

pub mod models;
pub mod oauth;
pub mod twitter;

pub use models::{
    Account, MediaUpload, MentionAuthor, MentionPost, PostId, PostedStatus, TimelineAuthor,
    TimelinePost,
};
pub use oauth::OAuthSigner;
pub use twitter::TwitterClient;

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Operations the bot needs from the platform
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialPlatform: Send + Sync {
    /// The account the credentials belong to
    async fn verify_credentials(&self) -> Result<Account>;

    /// Recent posts matching a search query
    async fn search_mentions(&self, query: &str) -> Result<Vec<MentionPost>>;

    /// One page of a user's timeline, newest first. Pages start at 1.
    async fn user_timeline(
        &self,
        screen_name: &str,
        page: u32,
        count: u32,
    ) -> Result<Vec<TimelinePost>>;

    /// Publish a text post
    async fn post_status(&self, text: &str) -> Result<PostedStatus>;

    /// Upload an image and publish a post carrying it
    async fn post_status_with_media(&self, text: &str, media_path: &Path) -> Result<PostedStatus>;
}

/// Public link to a post
pub fn status_url(base: &str, id: PostId) -> String {
    format!("{}/{}", base.trim_end_matches('/'), id)
}
