//! Entry Store Module
//!
//! Durable CRUD over cache entry rows. Every mutation is a single atomic
//! per-row primitive, so concurrent callers never lose an update and never
//! observe a half-written entry.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, info};

use crate::cache::entry::{is_expired, CacheEntry, Metadata};
use crate::error::{CacheError, Result};

// == Entry Store Trait ==
/// Storage engine contract used by the cache manager, stats reporter and
/// cleanup task.
///
/// Implementations must make `upsert`, `record_hit` and each row removal of
/// `delete_expired` atomic. I/O failures are reported as
/// [`CacheError::StoreUnavailable`].
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Inserts the row, or replaces value, ttl and metadata of an existing one.
    ///
    /// An overwrite resets `created_at`, `accessed_at` and `last_hit` to `now`
    /// and `hit_count` to 0.
    async fn upsert(
        &self,
        key: &str,
        value: &str,
        ttl: u64,
        metadata: Metadata,
        now: DateTime<Utc>,
    ) -> Result<()>;

    /// Point lookup. Returns [`CacheError::NotFound`] if absent.
    async fn find(&self, key: &str) -> Result<CacheEntry>;

    /// Increments `hit_count` and stamps `accessed_at`/`last_hit` with `now`.
    ///
    /// A no-op when the row has been removed in the meantime.
    async fn record_hit(&self, key: &str, now: DateTime<Utc>) -> Result<()>;

    /// Removes a row regardless of TTL. Returns whether a row existed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Removes every row expired at `now` and returns how many were removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize>;

    /// Point-in-time copy of all rows.
    async fn all(&self) -> Result<Vec<CacheEntry>>;

    /// Engine-reported storage footprint in bytes.
    async fn approximate_size_bytes(&self) -> Result<u64>;
}

// == Deadlines ==
/// Runs a store operation under `limit`, mapping an elapsed deadline to
/// [`CacheError::Timeout`].
///
/// Dropping the future on timeout is safe: each store primitive applies
/// atomically or not at all.
pub(crate) async fn with_deadline<T, F>(limit: Duration, op: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(CacheError::Timeout(format!(
            "{} exceeded {}ms",
            op,
            limit.as_millis()
        ))),
    }
}

// == Memory Entry Store ==
/// Sharded in-memory store with optional JSON snapshots for durability.
///
/// Locks are taken per shard for the duration of a single row operation,
/// there is no store-wide lock.
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryEntryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of physically present rows, fresh or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Snapshots ==
    /// Restores a store from a snapshot file. A missing file yields an empty store.
    pub async fn load_snapshot(path: &Path) -> Result<Self> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No snapshot at {}, starting empty", path.display());
                return Ok(Self::new());
            }
            Err(e) => {
                return Err(CacheError::StoreUnavailable(format!(
                    "failed to read snapshot {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let rows: Vec<CacheEntry> = serde_json::from_slice(&bytes).map_err(|e| {
            CacheError::StoreUnavailable(format!(
                "corrupt snapshot {}: {}",
                path.display(),
                e
            ))
        })?;

        let store = Self::new();
        for row in rows {
            store.entries.insert(row.key.clone(), row);
        }
        info!("Loaded {} entries from {}", store.len(), path.display());
        Ok(store)
    }

    /// Writes all rows to `path` via a temp file and rename.
    pub async fn save_snapshot(&self, path: &Path) -> Result<usize> {
        let rows: Vec<CacheEntry> = self.entries.iter().map(|r| r.value().clone()).collect();
        let bytes = serde_json::to_vec(&rows)
            .map_err(|e| CacheError::Internal(format!("failed to encode snapshot: {}", e)))?;

        let tmp = temp_path(path);
        let io_err = |e: std::io::Error| {
            CacheError::StoreUnavailable(format!(
                "failed to write snapshot {}: {}",
                path.display(),
                e
            ))
        };
        tokio::fs::write(&tmp, &bytes).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, path).await.map_err(io_err)?;

        info!("Saved {} entries to {}", rows.len(), path.display());
        Ok(rows.len())
    }
}

/// Sibling of `path` with ".tmp" appended to the full file name.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn upsert(
        &self,
        key: &str,
        value: &str,
        ttl: u64,
        metadata: Metadata,
        now: DateTime<Utc>,
    ) -> Result<()> {
        // Whole-row replacement under the shard lock
        let entry = CacheEntry::new(key, value, ttl, metadata, now);
        self.entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn find(&self, key: &str) -> Result<CacheEntry> {
        self.entries
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    async fn record_hit(&self, key: &str, now: DateTime<Utc>) -> Result<()> {
        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.hit_count += 1;
            entry.accessed_at = now;
            entry.last_hit = now;
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let candidates: Vec<String> = self
            .entries
            .iter()
            .filter(|r| is_expired(r.value(), now))
            .map(|r| r.key().clone())
            .collect();

        // Re-check under the row lock so a concurrent overwrite survives
        let removed = candidates
            .iter()
            .filter(|key| {
                self.entries
                    .remove_if(key.as_str(), |_, entry| is_expired(entry, now))
                    .is_some()
            })
            .count();

        Ok(removed)
    }

    async fn all(&self) -> Result<Vec<CacheEntry>> {
        Ok(self.entries.iter().map(|r| r.value().clone()).collect())
    }

    async fn approximate_size_bytes(&self) -> Result<u64> {
        Ok(self.entries.iter().map(|r| r.value().approximate_size()).sum())
    }
}
