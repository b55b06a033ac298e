//! Background task that reclaims expired sessions.
//!
//! Reads already treat expired sessions as empty; the sweeper only bounds
//! memory held by sessions that are never read again.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use piopio_core::session::store::SessionStore;

pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Spawn a task that calls [`SessionStore::purge_expired`] every `every`
/// until `shutdown` is cancelled.
pub fn spawn_session_sweeper<S>(
    store: Arc<S>,
    every: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()>
where
    S: SessionStore + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // First tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    debug!("session sweeper stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let purged = store.purge_expired();
                    if purged > 0 {
                        debug!(purged, "expired sessions purged");
                    }
                }
            }
        }
    })
}
