//! Process shutdown signals

use crate::error::Result;
use tracing::info;

#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind, signal};

/// Ctrl-C / SIGTERM listener
///
/// Handlers are registered by [`ShutdownSignal::install`], so a signal that
/// arrives before [`ShutdownSignal::wait`] is first polled is still seen.
pub struct ShutdownSignal {
    #[cfg(unix)]
    interrupt: Signal,
    #[cfg(unix)]
    terminate: Signal,
    #[cfg(not(unix))]
    ctrl_c: tokio::task::JoinHandle<()>,
}

impl ShutdownSignal {
    /// Register the handlers. Must be called inside a tokio runtime.
    pub fn install() -> Result<Self> {
        #[cfg(unix)]
        {
            Ok(Self {
                interrupt: signal(SignalKind::interrupt())?,
                terminate: signal(SignalKind::terminate())?,
            })
        }

        #[cfg(not(unix))]
        {
            let ctrl_c = tokio::spawn(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!("Ctrl-C handler unavailable: {}", e);
                    std::future::pending::<()>().await;
                }
            });
            Ok(Self { ctrl_c })
        }
    }

    /// Resolve once a shutdown signal has been received
    pub async fn wait(self) {
        #[cfg(unix)]
        {
            let Self {
                mut interrupt,
                mut terminate,
            } = self;
            tokio::select! {
                _ = interrupt.recv() => info!("Received SIGINT"),
                _ = terminate.recv() => info!("Received SIGTERM"),
            }
        }

        #[cfg(not(unix))]
        {
            let _ = self.ctrl_c.await;
            info!("Received Ctrl-C");
        }
    }
}
