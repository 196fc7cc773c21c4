//! Replies to analysis requests

use crate::api::{PostedStatus, SocialPlatform, status_url};
use crate::engine::Report;
use crate::error::Result;
use std::sync::Arc;
use tracing::{info, instrument};

/// Posts exactly one reply per request
pub struct Responder {
    platform: Arc<dyn SocialPlatform>,
    status_url_base: String,
}

impl Responder {
    pub fn new(platform: Arc<dyn SocialPlatform>, status_url_base: impl Into<String>) -> Self {
        Self {
            platform,
            status_url_base: status_url_base.into(),
        }
    }

    /// Reply with the chart, or with an apology when there is no report
    #[instrument(skip(self, report))]
    pub async fn respond(&self, requester: &str, report: Option<&Report>) -> Result<PostedStatus> {
        let requester = requester.trim_start_matches('@');

        let posted = match report {
            Some(report) => {
                let text = self.report_text(requester, report);
                self.platform
                    .post_status_with_media(&text, &report.image_path)
                    .await?
            }
            None => self.platform.post_status(&apology_text(requester)).await?,
        };

        info!("replied to @{} with post {}", requester, posted.id);
        Ok(posted)
    }

    fn report_text(&self, requester: &str, report: &Report) -> String {
        format!(
            "@{requester}! Here's the analysis you requested\n\
             Most negative tweet: {}\n\
             Most positive tweet: {}\n",
            status_url(&self.status_url_base, report.most_negative_id),
            status_url(&self.status_url_base, report.most_positive_id),
        )
    }
}

fn apology_text(requester: &str) -> String {
    format!("Sorry @{requester}, there was no data associated with that user name.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockSocialPlatform;
    use crate::error::PlotbotError;
    use std::path::PathBuf;

    const STATUS_BASE: &str = "https://twitter.com/statuses";

    fn report() -> Report {
        Report {
            image_path: PathBuf::from("tweet_polarity.png"),
            most_negative_id: 111,
            most_positive_id: 222,
            mean_compound: 0.12,
            post_count: 3,
        }
    }

    #[tokio::test]
    async fn test_apology_without_media() {
        let mut platform = MockSocialPlatform::new();
        platform
            .expect_post_status()
            .withf(|text| text == "Sorry @alice, there was no data associated with that user name.")
            .times(1)
            .returning(|_| Ok(PostedStatus { id: 1 }));
        platform.expect_post_status_with_media().never();

        let responder = Responder::new(Arc::new(platform), STATUS_BASE);
        let posted = responder.respond("alice", None).await.unwrap();
        assert_eq!(posted.id, 1);
    }

    #[tokio::test]
    async fn test_report_with_chart() {
        let mut platform = MockSocialPlatform::new();
        platform
            .expect_post_status_with_media()
            .withf(|text, path| {
                text == "@alice! Here's the analysis you requested\n\
                         Most negative tweet: https://twitter.com/statuses/111\n\
                         Most positive tweet: https://twitter.com/statuses/222\n"
                    && path == std::path::Path::new("tweet_polarity.png")
            })
            .times(1)
            .returning(|_, _| Ok(PostedStatus { id: 2 }));
        platform.expect_post_status().never();

        let responder = Responder::new(Arc::new(platform), STATUS_BASE);
        let report = report();
        let posted = responder.respond("alice", Some(&report)).await.unwrap();
        assert_eq!(posted.id, 2);
    }

    #[tokio::test]
    async fn test_at_sign_not_doubled() {
        let mut platform = MockSocialPlatform::new();
        platform
            .expect_post_status()
            .withf(|text| text.starts_with("Sorry @bob,"))
            .times(1)
            .returning(|_| Ok(PostedStatus { id: 3 }));

        let responder = Responder::new(Arc::new(platform), STATUS_BASE);
        responder.respond("@bob", None).await.unwrap();
    }

    #[tokio::test]
    async fn test_post_failure_propagates() {
        let mut platform = MockSocialPlatform::new();
        platform
            .expect_post_status()
            .times(1)
            .returning(|_| Err(PlotbotError::from_status(403, "duplicate".to_string())));

        let responder = Responder::new(Arc::new(platform), STATUS_BASE);
        let err = responder.respond("carol", None).await.unwrap_err();
        assert!(matches!(err, PlotbotError::Api { status: 403, .. }));
    }
}
