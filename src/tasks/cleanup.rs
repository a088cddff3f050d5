//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries and
//! records an audit row describing each pass.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{with_deadline, CacheManager, Clock, EntryStore, Metadata, CLEANUP_LOG_KEY};
use crate::error::{CacheError, Result};

/// Audit record stored under [`CLEANUP_LOG_KEY`] after every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupRecord {
    /// Rows removed by the pass
    pub removed: usize,
    /// Time the pass evaluated expiry against
    pub ran_at: DateTime<Utc>,
}

/// Purges expired rows through the store's public operations only.
///
/// Holds no state shared with request handlers besides the store handle.
pub struct CleanupScheduler {
    store: Arc<dyn EntryStore>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
    log_ttl: u64,
}

impl CleanupScheduler {
    /// Creates a scheduler.
    ///
    /// # Arguments
    /// * `log_ttl` - Seconds the audit row stays fresh
    pub fn new(
        store: Arc<dyn EntryStore>,
        clock: Arc<dyn Clock>,
        timeout: Duration,
        log_ttl: u64,
    ) -> Self {
        Self {
            store,
            clock,
            timeout,
            log_ttl,
        }
    }

    /// Shares the manager's store, clock and deadline.
    pub fn for_manager(manager: &CacheManager, log_ttl: u64) -> Self {
        Self::new(manager.store(), manager.clock(), manager.timeout(), log_ttl)
    }

    /// Runs one cleanup pass and writes the audit row.
    pub async fn run_once(&self) -> Result<CleanupRecord> {
        let now = self.clock.now();
        let removed = with_deadline(
            self.timeout,
            "delete_expired",
            self.store.delete_expired(now),
        )
        .await?;

        let record = CleanupRecord {
            removed,
            ran_at: now,
        };
        let value = serde_json::to_string(&record)
            .map_err(|e| CacheError::Internal(format!("failed to encode cleanup record: {}", e)))?;

        let mut metadata = Metadata::new();
        metadata.insert("type".to_string(), json!("cleanup_log"));

        with_deadline(
            self.timeout,
            "upsert",
            self.store
                .upsert(CLEANUP_LOG_KEY, &value, self.log_ttl.max(1), metadata, now),
        )
        .await?;

        Ok(record)
    }
}

/// Spawns a background task that runs a cleanup pass every interval.
///
/// A failed pass is logged and retried on the next tick; it never reaches
/// request-path callers.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let scheduler = CleanupScheduler::for_manager(&manager, 86_400);
/// let cleanup_handle = spawn_cleanup_task(Arc::new(scheduler), 300);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(
    scheduler: Arc<CleanupScheduler>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            match scheduler.run_once().await {
                Ok(record) if record.removed > 0 => {
                    info!("TTL cleanup: removed {} expired entries", record.removed);
                }
                Ok(_) => debug!("TTL cleanup: no expired entries found"),
                Err(e) => warn!("TTL cleanup failed, retrying next tick: {}", e),
            }
        }
    })
}
