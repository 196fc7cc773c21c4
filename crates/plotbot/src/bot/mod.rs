//! Mention polling bot
//!
//! [`PlotBot`] owns everything a session needs: the platform client, the
//! scorer, the mention extractor with its seen set, the chart renderer and
//! the responder. Each call to [`PlotBot::tick`] runs one polling round;
//! [`PlotBot::run_until`] repeats rounds until a shutdown future resolves.
//!
//! # Example
//!
//! ```rust,ignore
//! use plotbot::{BotConfig, PlotBot, ShutdownSignal, TwitterClient};
//! use plotbot_sentiment::VaderAnalyzer;
//! use std::sync::Arc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let shutdown = ShutdownSignal::install()?;
//!     let config = BotConfig::from_env()?;
//!     let platform = Arc::new(TwitterClient::new(&config)?);
//!     let scorer = Arc::new(VaderAnalyzer::new());
//!     let mut bot = PlotBot::connect(platform, scorer, &config).await?;
//!     bot.run_until(shutdown.wait()).await?;
//!     Ok(())
//! }
//! ```

pub mod mentions;
pub mod responder;
pub mod shutdown;

use crate::api::SocialPlatform;
use crate::config::BotConfig;
use crate::engine::{ReportRenderer, SentimentAggregator};
use crate::error::Result;
use plotbot_sentiment::SentimentScorer;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

pub use mentions::{MentionExtractor, MentionRequest, SeenSet};
pub use responder::Responder;
pub use shutdown::ShutdownSignal;

/// Outcome of one polling round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// New analyze requests found
    pub mentions: usize,
    /// Replies posted
    pub replies: usize,
    /// Replies that were apologies for missing data
    pub empty_reports: usize,
}

/// A running bot session
pub struct PlotBot {
    platform: Arc<dyn SocialPlatform>,
    extractor: MentionExtractor,
    aggregator: SentimentAggregator,
    renderer: ReportRenderer,
    responder: Responder,
    poll_interval: Duration,
}

impl PlotBot {
    /// Resolve the bot's own screen name and assemble the session
    pub async fn connect(
        platform: Arc<dyn SocialPlatform>,
        scorer: Arc<dyn SentimentScorer>,
        config: &BotConfig,
    ) -> Result<Self> {
        let account = platform.verify_credentials().await?;
        info!("Authenticated as @{}", account.screen_name);

        Ok(Self {
            extractor: MentionExtractor::new(&account.screen_name)?,
            aggregator: SentimentAggregator::new(
                Arc::clone(&platform),
                scorer,
                config.timeline_pages,
                config.page_size,
            ),
            renderer: ReportRenderer::new(&config.chart_path, config.status_url_base.clone())?,
            responder: Responder::new(Arc::clone(&platform), config.status_url_base.clone()),
            platform,
            poll_interval: config.poll_interval,
        })
    }

    pub fn bot_name(&self) -> &str {
        self.extractor.bot_name()
    }

    pub fn seen(&self) -> &SeenSet {
        self.extractor.seen()
    }

    /// Run one polling round
    ///
    /// Requests are handled strictly in order; the first error ends the
    /// round.
    #[instrument(skip(self))]
    pub async fn tick(&mut self) -> Result<TickSummary> {
        let posts = self
            .platform
            .search_mentions(&self.extractor.search_query())
            .await?;
        let requests = self.extractor.extract(&posts);

        let mut summary = TickSummary {
            mentions: requests.len(),
            ..TickSummary::default()
        };
        info!("Found {} new mention(s)", summary.mentions);

        for request in requests {
            info!(
                "Analyzing {} for @{}",
                request.target_screen_name, request.requester_screen_name
            );
            let dataset = self
                .aggregator
                .aggregate(&request.target_screen_name)
                .await?;
            let report = self
                .renderer
                .render(&request.target_screen_name, &dataset)?;
            if report.is_none() {
                summary.empty_reports += 1;
            }

            self.responder
                .respond(&request.requester_screen_name, report.as_ref())
                .await?;
            summary.replies += 1;
        }

        info!("Sent {} reply(ies)", summary.replies);
        Ok(summary)
    }

    /// Poll until `shutdown` resolves
    ///
    /// Shutdown is only observed between rounds.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            self.tick().await?;

            tokio::select! {
                biased;
                () = &mut shutdown => {
                    info!("Shutdown requested, stopping");
                    return Ok(());
                }
                () = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }
}
