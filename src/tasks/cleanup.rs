//! Stale Entry Cleanup Task
//!
//! Periodically prunes entries that outlived their TTL without being read.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheManager;

/// Spawns a background task that periodically prunes stale entries from
/// every store the manager owns.
///
/// Expiry-on-read already guarantees no stale value is ever served; pruning
/// only bounds the memory held by keys nothing reads anymore. Spawning it
/// is the host process's choice.
///
/// # Arguments
/// * `manager` - Shared cache manager to prune
/// * `interval_secs` - Seconds between pruning runs
///
/// # Returns
/// A JoinHandle for the spawned task; abort it during graceful shutdown.
pub fn spawn_cleanup_task(manager: Arc<CacheManager>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = manager.prune_expired();

            if removed > 0 {
                info!("Cache cleanup: removed {} stale entries", removed);
            } else {
                debug!("Cache cleanup: no stale entries found");
            }
        }
    })
}
