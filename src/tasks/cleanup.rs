//! TTL Cleanup Task
//!
//! Reads already refuse expired PDFs. This sweep only releases the memory of
//! entries nobody asks for again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ArtifactCache;

/// Spawns a background task that periodically purges expired cache entries.
///
/// # Arguments
/// * `cache` - shared server cache
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<ArtifactCache>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting PDF cache sweep with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.cleanup_expired();

            if removed > 0 {
                info!("Cache sweep: removed {} expired PDFs", removed);
            } else {
                debug!("Cache sweep: no expired PDFs found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache = Arc::new(RwLock::new(ArtifactCache::new(10, Duration::from_secs(60))));
        cache
            .write()
            .await
            .put_at("stale".to_string(), Bytes::from_static(b"%PDF"), 0);

        let handle = spawn_cleanup_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let guard = cache.read().await;
            assert!(!guard.contains("stale"), "Expired entry should have been purged");
            assert_eq!(guard.stats().expirations, 1);
        }

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_task_preserves_valid_entries() {
        let cache = Arc::new(RwLock::new(ArtifactCache::server_default()));
        cache
            .write()
            .await
            .put("fresh".to_string(), Bytes::from_static(b"%PDF"));

        let handle = spawn_cleanup_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(
            cache.write().await.get("fresh"),
            Some(Bytes::from_static(b"%PDF"))
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = Arc::new(RwLock::new(ArtifactCache::server_default()));

        let handle = spawn_cleanup_task(cache, 1);
        handle.abort();

        let result = handle.await;
        assert!(result.unwrap_err().is_cancelled());
    }
}
