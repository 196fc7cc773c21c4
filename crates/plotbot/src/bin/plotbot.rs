//! Sentiment plot bot
//!
//! # Usage
//!
//! ```bash
//! export TWITTER_SENTIMENT_KEY=...
//! export TWITTER_SENTIMENT_KEY_SECRET=...
//! export TWITTER_SENTIMENT_TOKEN=...
//! export TWITTER_SENTIMENT_TOKEN_SECRET=...
//!
//! cargo run --bin plotbot -p plotbot
//! ```

use anyhow::Context as _;
use plotbot::{BotConfig, PlotBot, ShutdownSignal, TwitterClient};
use plotbot_sentiment::VaderAnalyzer;
use plotbot_utils::{DEFAULT_LOG_FILTER, init_tracing};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

async fn run() -> anyhow::Result<()> {
    let shutdown = ShutdownSignal::install().context("failed to install signal handlers")?;
    let config = BotConfig::from_env().context("failed to load configuration")?;
    info!(
        "Polling every {}s, chart at {}",
        config.poll_interval.as_secs(),
        config.chart_path.display()
    );

    let platform = Arc::new(TwitterClient::new(&config).context("failed to build HTTP client")?);
    let scorer = Arc::new(VaderAnalyzer::new());

    let mut bot = PlotBot::connect(platform, scorer, &config)
        .await
        .context("failed to verify credentials")?;

    bot.run_until(shutdown.wait()).await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing(DEFAULT_LOG_FILTER);

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
