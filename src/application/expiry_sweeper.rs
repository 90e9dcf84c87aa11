//! ExpirySweeper - Background task that expires lapsed quote offers.
//!
//! Expiry is also applied lazily whenever a quote is read or written, so
//! the sweeper is optional. It keeps listings and metrics honest for
//! quotes nobody has looked at since their window closed.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 5 min | Time between sweeps |
//! | `batch_size` | 200 | Max quotes expired per sweep |
//!
//! ## Graceful Shutdown
//!
//! Listens on a watch channel and returns after the sweep in progress.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{debug, error, info, warn};

use crate::application::handlers::quote::{MarkExpiredCommand, MarkExpiredHandler, QuoteAccess};
use crate::domain::foundation::Timestamp;
use crate::domain::quote::QuoteError;

#[derive(Debug, Clone)]
pub struct ExpirySweeperConfig {
    pub interval: Duration,
    pub batch_size: u32,
}

impl Default for ExpirySweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300),
            batch_size: 200,
        }
    }
}

impl ExpirySweeperConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_batch_size(mut self, size: u32) -> Self {
        self.batch_size = size;
        self
    }
}

pub struct ExpirySweeper {
    access: QuoteAccess,
    expire: MarkExpiredHandler,
    config: ExpirySweeperConfig,
}

impl ExpirySweeper {
    pub fn new(access: QuoteAccess, config: ExpirySweeperConfig) -> Self {
        Self {
            expire: MarkExpiredHandler::new(access.clone()),
            access,
            config,
        }
    }

    /// Sweeps until the shutdown flag flips to true.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.interval);
        info!(interval_secs = self.config.interval.as_secs(), "Expiry sweeper started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        info!("Shutdown sender dropped, expiry sweeper stopped");
                        return;
                    }
                    if *shutdown.borrow() {
                        info!("Expiry sweeper stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    if let Err(e) = self.run_once(Timestamp::now()).await {
                        error!(error = %e, "Expiry sweep failed");
                    }
                }
            }
        }
    }

    /// One sweep at `now`. Returns how many quotes were expired.
    pub async fn run_once(&self, now: Timestamp) -> Result<usize, QuoteError> {
        let cutoff = self.access.expiry().cutoff(now);
        let due = self
            .access
            .quotes()
            .find_quoted_before(cutoff, self.config.batch_size)
            .await?;
        if due.is_empty() {
            debug!("No quotes due for expiry");
            return Ok(0);
        }

        let mut expired = 0;
        for quote_id in due {
            let cmd = MarkExpiredCommand {
                quote_id,
                now,
                requested_by: None,
            };
            match self.expire.handle(cmd).await {
                Ok(result) if result.expired => expired += 1,
                Ok(_) => {}
                Err(e) => warn!(%quote_id, error = %e, "Could not expire quote"),
            }
        }

        info!(expired, "Expiry sweep finished");
        Ok(expired)
    }
}
