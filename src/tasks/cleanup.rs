//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries, so keys
//! that are written once and never read again do not hold capacity slots.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::BoundedCache;

/// Handle to a running cleanup task.
///
/// The task stops when [`CleanupTask::shutdown`] is called, when the handle is
/// dropped, or when the cache it sweeps has been dropped.
#[derive(Debug)]
pub struct CleanupTask {
    name: &'static str,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl CleanupTask {
    /// Signals the task to stop and waits for it to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            // Err means the task already exited on its own
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                warn!("Cleanup task '{}' ended abnormally: {}", self.name, err);
            }
        }
        debug!("Cleanup task '{}' shut down", self.name);
    }

    /// Returns true once the task has stopped running.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for CleanupTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Spawns a background task that purges expired entries from `cache` every
/// `interval`.
///
/// The task only holds a weak reference to the cache, so it never extends the
/// cache's lifetime. `name` is used in log lines.
///
/// # Example
/// ```ignore
/// let cache = BoundedCache::new(1000, Duration::from_secs(900))?;
/// let cleanup = spawn_cleanup_task("items", &cache, Duration::from_secs(300));
/// // Later, during shutdown:
/// cleanup.shutdown().await;
/// ```
pub fn spawn_cleanup_task<V>(
    name: &'static str,
    cache: &BoundedCache<V>,
    interval: Duration,
) -> CleanupTask
where
    V: Clone + Send + Sync + 'static,
{
    let store = cache.downgrade();
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task '{}' with interval of {:?}",
            name, interval
        );

        let Some(first_tick) = Instant::now().checked_add(interval) else {
            warn!(
                "Cleanup interval {:?} for '{}' is out of range, sweeping disabled",
                interval, name
            );
            let _ = shutdown_rx.await;
            return;
        };

        let mut ticker = interval_at(first_tick, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => break,
                _ = ticker.tick() => {}
            }

            let Some(store) = store.upgrade() else {
                debug!("Cache '{}' dropped, stopping cleanup task", name);
                break;
            };

            let removed = store.write().await.purge_expired();

            if removed > 0 {
                info!("TTL cleanup '{}': removed {} expired entries", name, removed);
            } else {
                debug!("TTL cleanup '{}': no expired entries found", name);
            }
        }
    });

    CleanupTask {
        name,
        shutdown_tx: Some(shutdown_tx),
        handle: Some(handle),
    }
}
