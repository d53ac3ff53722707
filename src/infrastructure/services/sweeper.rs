//! Periodic removal of expired cache entries

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::QueryCacheService;

/// Handle to the background sweep task
#[derive(Debug)]
pub struct ExpirySweeper {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ExpirySweeper {
    /// Spawn the sweep loop on the current runtime
    pub fn spawn(service: Arc<QueryCacheService>, every: Duration) -> Self {
        let (shutdown, mut stop) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // The first tick completes immediately; nothing can be stale yet
            ticker.tick().await;

            info!(interval_secs = every.as_secs(), "Expiry sweeper started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match service.purge_expired().await {
                            Ok(purged) => debug!(purged, "Expiry sweep finished"),
                            Err(e) => warn!(error = %e, "Expiry sweep failed"),
                        }
                    }
                    _ = stop.changed() => break,
                }
            }

            debug!("Expiry sweeper stopped");
        });

        Self { shutdown, handle }
    }

    /// Signal the loop to exit and wait for it
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);

        if let Err(e) = self.handle.await {
            warn!(error = %e, "Expiry sweeper task ended abnormally");
        }
    }
}
