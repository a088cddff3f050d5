//! Cache Manager Module
//!
//! Public get/put/invalidate contract used by the compute service. Orchestrates
//! the entry store and the expiration evaluator.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::{
    is_expired, is_reserved_key, with_deadline, AnalyticsReport, CacheEntry, CacheStatsReport,
    Clock, EntryStore, Metadata, PerformanceReport, StatsReporter, SystemClock, MAX_KEY_LENGTH,
    MAX_SEARCH_LIMIT, MAX_TTL_SECONDS, MAX_VALUE_SIZE, STATUS_PROBE_PREFIX,
};
use crate::config::Config;
use crate::error::{CacheError, Result};

/// Sequence for probe row keys, process-wide so managers sharing a store never collide.
static PROBE_SEQ: AtomicU64 = AtomicU64::new(0);

// == Lookup ==
/// Outcome of a cache read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Fresh entry found; carries the cached value
    Hit(String),
    /// Absent or expired
    Miss,
}

impl Lookup {
    /// Returns true for [`Lookup::Hit`].
    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit(_))
    }

    /// Cached value, if any.
    pub fn into_value(self) -> Option<String> {
        match self {
            Lookup::Hit(value) => Some(value),
            Lookup::Miss => None,
        }
    }
}

/// Side-effect free view of a single entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDetails {
    pub key: String,
    pub created_at: DateTime<Utc>,
    pub accessed_at: DateTime<Utc>,
    pub last_hit: DateTime<Utc>,
    pub hit_count: u64,
    pub ttl: u64,
    pub ttl_remaining: u64,
    pub age_seconds: f64,
    pub expired: bool,
    pub metadata: Metadata,
}

impl EntryDetails {
    fn from_entry(entry: CacheEntry, now: DateTime<Utc>) -> Self {
        Self {
            ttl_remaining: entry.ttl_remaining(now),
            age_seconds: entry.age_seconds(now),
            expired: is_expired(&entry, now),
            key: entry.key,
            created_at: entry.created_at,
            accessed_at: entry.accessed_at,
            last_hit: entry.last_hit,
            hit_count: entry.hit_count,
            ttl: entry.ttl,
            metadata: entry.metadata,
        }
    }
}

/// A row matched by [`CacheManager::search`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub key: String,
    pub value: String,
    pub hit_count: u64,
    pub created_at: DateTime<Utc>,
    pub last_hit: DateTime<Utc>,
}

/// Result of the read/write probe behind the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// "working" or "error"
    pub status: String,
    pub message: String,
    pub available: bool,
}

impl StatusReport {
    fn working() -> Self {
        Self {
            status: "working".to_string(),
            message: "Cache is working properly".to_string(),
            available: true,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            available: false,
        }
    }
}

// == Cache Manager ==
/// Caller-facing cache contract.
///
/// Expiration is lazy: an expired row reads as a miss but is left in place for
/// the cleanup task. Storage failures and timeouts are returned as errors and
/// never disguised as misses.
pub struct CacheManager {
    store: Arc<dyn EntryStore>,
    clock: Arc<dyn Clock>,
    default_ttl: u64,
    timeout: Duration,
}

impl CacheManager {
    // == Constructor ==
    /// Creates a manager over `store`.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL in seconds applied when `put` is called without one
    /// * `timeout` - Deadline for every store round trip
    pub fn new(
        store: Arc<dyn EntryStore>,
        clock: Arc<dyn Clock>,
        default_ttl: u64,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            clock,
            default_ttl,
            timeout,
        }
    }

    /// Creates a manager from configuration using the system clock.
    pub fn from_config(config: &Config, store: Arc<dyn EntryStore>) -> Self {
        Self::new(
            store,
            Arc::new(SystemClock),
            config.default_ttl,
            config.operation_timeout(),
        )
    }

    /// Shared store handle.
    pub fn store(&self) -> Arc<dyn EntryStore> {
        Arc::clone(&self.store)
    }

    /// Shared clock handle.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Per-operation deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Manager over the same store and clock with a different per-operation deadline.
    ///
    /// ```ignore
    /// let lookup = manager.with_timeout(Duration::from_millis(50)).get("k").await?;
    /// ```
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self::new(self.store(), self.clock(), self.default_ttl, timeout)
    }

    /// TTL applied when none is supplied.
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    // == Get ==
    /// Returns the cached value if the entry is fresh, recording the hit.
    pub async fn get(&self, key: &str) -> Result<Lookup> {
        match self.fresh_entry(key).await {
            Ok((entry, now)) => {
                with_deadline(self.timeout, "record_hit", self.store.record_hit(key, now))
                    .await?;
                debug!(key, "cache hit");
                Ok(Lookup::Hit(entry.value))
            }
            Err(CacheError::NotFound(_)) | Err(CacheError::Expired(_)) => {
                debug!(key, "cache miss");
                Ok(Lookup::Miss)
            }
            Err(e) => Err(e),
        }
    }

    async fn fresh_entry(&self, key: &str) -> Result<(CacheEntry, DateTime<Utc>)> {
        let entry = with_deadline(self.timeout, "find", self.store.find(key)).await?;
        let now = self.clock.now();
        if is_expired(&entry, now) {
            return Err(CacheError::Expired(key.to_string()));
        }
        Ok((entry, now))
    }

    // == Put ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// # Arguments
    /// * `ttl` - Seconds of freshness, defaults to the configured TTL
    /// * `metadata` - Observability tags, defaults to empty
    pub async fn put(
        &self,
        key: &str,
        value: &str,
        ttl: Option<u64>,
        metadata: Option<Metadata>,
    ) -> Result<()> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        validate_put(key, value, ttl)?;

        let now = self.clock.now();
        with_deadline(
            self.timeout,
            "upsert",
            self.store
                .upsert(key, value, ttl, metadata.unwrap_or_default(), now),
        )
        .await
    }

    // == Invalidate ==
    /// Deletes `key` regardless of TTL. Returns whether a row was removed.
    pub async fn invalidate(&self, key: &str) -> Result<bool> {
        let removed = with_deadline(self.timeout, "delete", self.store.delete(key)).await?;
        debug!(key, removed, "invalidated");
        Ok(removed)
    }

    // == Details ==
    /// Age, remaining TTL and usage of a single entry, fresh or expired.
    pub async fn details(&self, key: &str) -> Result<EntryDetails> {
        let entry = with_deadline(self.timeout, "find", self.store.find(key)).await?;
        Ok(EntryDetails::from_entry(entry, self.clock.now()))
    }

    // == Search ==
    /// Case-insensitive substring search over values and metadata, most used first.
    pub async fn search(&self, term: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let needle = term.to_lowercase();
        let mut matches: Vec<CacheEntry> = with_deadline(self.timeout, "all", self.store.all())
            .await?
            .into_iter()
            .filter(|entry| {
                entry.value.to_lowercase().contains(&needle)
                    || serde_json::to_string(&entry.metadata)
                        .map(|m| m.to_lowercase().contains(&needle))
                        .unwrap_or(false)
            })
            .collect();

        matches.sort_by(|a, b| {
            b.hit_count
                .cmp(&a.hit_count)
                .then_with(|| b.last_hit.cmp(&a.last_hit))
        });
        matches.truncate(limit.min(MAX_SEARCH_LIMIT));

        Ok(matches
            .into_iter()
            .map(|entry| SearchHit {
                key: entry.key,
                value: entry.value,
                hit_count: entry.hit_count,
                created_at: entry.created_at,
                last_hit: entry.last_hit,
            })
            .collect())
    }

    // == Stats ==
    /// Counts, hit totals and size over the whole store.
    pub async fn stats(&self) -> Result<CacheStatsReport> {
        self.reporter().report().await
    }

    /// Stats plus hit rate, efficiency and top/recent entries.
    pub async fn performance(&self) -> Result<PerformanceReport> {
        self.reporter().performance().await
    }

    /// Hourly activity over the last day and the fastest-accumulating entries.
    pub async fn analytics(&self) -> Result<AnalyticsReport> {
        self.reporter().analytics().await
    }

    fn reporter(&self) -> StatsReporter {
        StatsReporter::new(self.store(), self.clock(), self.timeout)
    }

    // == Status Probe ==
    /// Writes, reads back and deletes a probe row private to this call.
    pub async fn check_status(&self) -> StatusReport {
        const PROBE_VALUE: &str = "status-probe";

        let key = format!(
            "{}{}",
            STATUS_PROBE_PREFIX,
            PROBE_SEQ.fetch_add(1, Ordering::Relaxed)
        );
        let probe = async {
            let now = self.clock.now();
            with_deadline(
                self.timeout,
                "upsert",
                self.store
                    .upsert(&key, PROBE_VALUE, 60, Metadata::new(), now),
            )
            .await?;
            let entry = with_deadline(self.timeout, "find", self.store.find(&key)).await?;
            with_deadline(self.timeout, "delete", self.store.delete(&key)).await?;
            Ok::<_, CacheError>(entry.value == PROBE_VALUE)
        };

        match probe.await {
            Ok(true) => StatusReport::working(),
            Ok(false) => StatusReport::error("Cache read/write test failed"),
            Err(e) => {
                warn!("Cache status probe failed: {}", e);
                StatusReport::error(format!("Cache operation failed: {}", e))
            }
        }
    }
}

fn validate_put(key: &str, value: &str, ttl: u64) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidArgument("Key cannot be empty".to_string()));
    }
    if is_reserved_key(key) {
        return Err(CacheError::InvalidArgument(format!(
            "Key '{}' is reserved for internal use",
            key
        )));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidArgument(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    if value.len() > MAX_VALUE_SIZE {
        return Err(CacheError::InvalidArgument(format!(
            "Value exceeds maximum size of {} bytes",
            MAX_VALUE_SIZE
        )));
    }
    if ttl == 0 || ttl > MAX_TTL_SECONDS {
        return Err(CacheError::InvalidArgument(format!(
            "TTL must be between 1 and {} seconds",
            MAX_TTL_SECONDS
        )));
    }
    Ok(())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, MemoryEntryStore, CLEANUP_LOG_KEY};
    use async_trait::async_trait;
    use chrono::TimeDelta;
    use serde_json::json;

    const TIMEOUT: Duration = Duration::from_secs(1);

    fn manager_with_clock() -> (CacheManager, Arc<MemoryEntryStore>, Arc<ManualClock>) {
        let store = Arc::new(MemoryEntryStore::new());
        let clock = Arc::new(ManualClock::default());
        let manager = CacheManager::new(store.clone(), clock.clone(), 3600, TIMEOUT);
        (manager, store, clock)
    }

    /// Store whose every call fails as if the database were down.
    struct DownStore;

    #[async_trait]
    impl EntryStore for DownStore {
        async fn upsert(&self, _: &str, _: &str, _: u64, _: Metadata, _: DateTime<Utc>) -> Result<()> {
            Err(CacheError::StoreUnavailable("connection refused".to_string()))
        }
        async fn find(&self, _: &str) -> Result<CacheEntry> {
            Err(CacheError::StoreUnavailable("connection refused".to_string()))
        }
        async fn record_hit(&self, _: &str, _: DateTime<Utc>) -> Result<()> {
            Err(CacheError::StoreUnavailable("connection refused".to_string()))
        }
        async fn delete(&self, _: &str) -> Result<bool> {
            Err(CacheError::StoreUnavailable("connection refused".to_string()))
        }
        async fn delete_expired(&self, _: DateTime<Utc>) -> Result<usize> {
            Err(CacheError::StoreUnavailable("connection refused".to_string()))
        }
        async fn all(&self) -> Result<Vec<CacheEntry>> {
            Err(CacheError::StoreUnavailable("connection refused".to_string()))
        }
        async fn approximate_size_bytes(&self) -> Result<u64> {
            Err(CacheError::StoreUnavailable("connection refused".to_string()))
        }
    }

    /// Store that answers lookups only after a long delay.
    struct SlowStore {
        inner: MemoryEntryStore,
        delay: Duration,
    }

    #[async_trait]
    impl EntryStore for SlowStore {
        async fn upsert(&self, k: &str, v: &str, t: u64, m: Metadata, n: DateTime<Utc>) -> Result<()> {
            self.inner.upsert(k, v, t, m, n).await
        }
        async fn find(&self, key: &str) -> Result<CacheEntry> {
            tokio::time::sleep(self.delay).await;
            self.inner.find(key).await
        }
        async fn record_hit(&self, key: &str, now: DateTime<Utc>) -> Result<()> {
            self.inner.record_hit(key, now).await
        }
        async fn delete(&self, key: &str) -> Result<bool> {
            self.inner.delete(key).await
        }
        async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize> {
            self.inner.delete_expired(now).await
        }
        async fn all(&self) -> Result<Vec<CacheEntry>> {
            self.inner.all().await
        }
        async fn approximate_size_bytes(&self) -> Result<u64> {
            self.inner.approximate_size_bytes().await
        }
    }

    #[tokio::test]
    async fn test_put_then_get_hits() {
        let (manager, store, _) = manager_with_clock();

        manager.put("q1", "answer-A", Some(2), None).await.unwrap();
        let lookup = manager.get("q1").await.unwrap();

        assert_eq!(lookup, Lookup::Hit("answer-A".to_string()));
        assert_eq!(store.find("q1").await.unwrap().hit_count, 1);
    }

    #[tokio::test]
    async fn test_get_absent_is_miss() {
        let (manager, _, _) = manager_with_clock();
        assert_eq!(manager.get("nope").await.unwrap(), Lookup::Miss);
    }

    #[tokio::test]
    async fn test_expired_entry_is_miss_and_not_deleted() {
        let (manager, store, clock) = manager_with_clock();

        manager.put("q1", "answer-A", Some(2), None).await.unwrap();
        assert!(manager.get("q1").await.unwrap().is_hit());

        clock.advance(TimeDelta::seconds(3));
        assert_eq!(manager.get("q1").await.unwrap(), Lookup::Miss);

        // Lazy expiration: row stays, hit bookkeeping untouched
        let row = store.find("q1").await.unwrap();
        assert_eq!(row.hit_count, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_expiry_scenario_with_stats() {
        let (manager, store, clock) = manager_with_clock();

        manager.put("q1", "answer-A", Some(2), None).await.unwrap();
        assert_eq!(
            manager.get("q1").await.unwrap(),
            Lookup::Hit("answer-A".to_string())
        );

        clock.advance(TimeDelta::seconds(3));
        assert_eq!(manager.get("q1").await.unwrap(), Lookup::Miss);

        let stats = manager.stats().await.unwrap();
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.expired_entries, 1);
        assert_eq!(stats.active_entries, 0);

        store.delete_expired(clock.now()).await.unwrap();
        assert_eq!(manager.stats().await.unwrap().total_entries, 0);
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value() {
        let (manager, store, _) = manager_with_clock();

        manager.put("q2", "v1", None, None).await.unwrap();
        manager.get("q2").await.unwrap();
        manager.put("q2", "v2", None, None).await.unwrap();

        assert_eq!(manager.get("q2").await.unwrap(), Lookup::Hit("v2".to_string()));
        // Overwrite resets the usage history
        assert_eq!(store.find("q2").await.unwrap().hit_count, 1);
    }

    #[tokio::test]
    async fn test_put_after_expiry_refreshes() {
        let (manager, _, clock) = manager_with_clock();

        manager.put("k", "old", Some(1), None).await.unwrap();
        clock.advance(TimeDelta::seconds(5));
        assert_eq!(manager.get("k").await.unwrap(), Lookup::Miss);

        manager.put("k", "new", Some(1), None).await.unwrap();
        assert_eq!(manager.get("k").await.unwrap(), Lookup::Hit("new".to_string()));
    }

    #[tokio::test]
    async fn test_put_uses_default_ttl_and_metadata() {
        let (manager, store, _) = manager_with_clock();
        let mut metadata = Metadata::new();
        metadata.insert("service".to_string(), json!("chat"));

        manager.put("k", "v", None, Some(metadata)).await.unwrap();
        let row = store.find("k").await.unwrap();

        assert_eq!(row.ttl, 3600);
        assert_eq!(row.metadata["service"], json!("chat"));
    }

    #[tokio::test]
    async fn test_put_rejects_invalid_arguments() {
        let (manager, store, _) = manager_with_clock();

        let cases = vec![
            ("", "v".to_string(), Some(10)),
            ("k", "v".to_string(), Some(0)),
            ("k", "v".to_string(), Some(MAX_TTL_SECONDS + 1)),
            ("k", "x".repeat(MAX_VALUE_SIZE + 1), Some(10)),
        ];
        for (key, value, ttl) in cases {
            let result = manager.put(key, &value, ttl, None).await;
            assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
        }

        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);
        let result = manager.put(&long_key, "v", None, None).await;
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_invalidate() {
        let (manager, _, _) = manager_with_clock();

        manager.put("k", "v", None, None).await.unwrap();
        assert!(manager.invalidate("k").await.unwrap());
        assert!(!manager.invalidate("k").await.unwrap());
        assert_eq!(manager.get("k").await.unwrap(), Lookup::Miss);
    }

    #[tokio::test]
    async fn test_store_failure_is_not_a_miss() {
        let manager = CacheManager::new(
            Arc::new(DownStore),
            Arc::new(ManualClock::default()),
            3600,
            TIMEOUT,
        );

        assert!(matches!(
            manager.get("k").await,
            Err(CacheError::StoreUnavailable(_))
        ));
        assert!(matches!(
            manager.put("k", "v", None, None).await,
            Err(CacheError::StoreUnavailable(_))
        ));
        assert!(matches!(
            manager.stats().await,
            Err(CacheError::StoreUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_slow_store_times_out() {
        let store = Arc::new(SlowStore {
            inner: MemoryEntryStore::new(),
            delay: Duration::from_secs(30),
        });
        let manager = CacheManager::new(
            store.clone(),
            Arc::new(ManualClock::default()),
            3600,
            Duration::from_millis(100),
        );

        manager.put("k", "v", None, None).await.unwrap();
        let result = manager.get("k").await;

        assert!(matches!(result, Err(CacheError::Timeout(_))));
        // Timed-out read leaves the row untouched
        assert_eq!(store.inner.find("k").await.unwrap().hit_count, 0);
    }

    #[tokio::test]
    async fn test_details() {
        let (manager, _, clock) = manager_with_clock();

        manager.put("k", "v", Some(10), None).await.unwrap();
        manager.get("k").await.unwrap();
        clock.advance(TimeDelta::seconds(4));

        let details = manager.details("k").await.unwrap();
        assert_eq!(details.hit_count, 1);
        assert_eq!(details.ttl_remaining, 6);
        assert!(!details.expired);
        assert!((details.age_seconds - 4.0).abs() < 0.01);

        assert!(matches!(
            manager.details("missing").await,
            Err(CacheError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_search_orders_by_hits() {
        let (manager, _, _) = manager_with_clock();
        let mut tagged = Metadata::new();
        tagged.insert("topic".to_string(), json!("Neuroscience"));

        manager.put("a", "about neurons", None, None).await.unwrap();
        manager.put("b", "NEURON anatomy", None, None).await.unwrap();
        manager.put("c", "unrelated", None, Some(tagged)).await.unwrap();
        manager.put("d", "weather", None, None).await.unwrap();
        manager.get("b").await.unwrap();
        manager.get("b").await.unwrap();
        manager.get("c").await.unwrap();

        let hits = manager.search("neur", 10).await.unwrap();
        let keys: Vec<&str> = hits.iter().map(|h| h.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "c", "a"]);

        assert_eq!(manager.search("neur", 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_does_not_bump_hits() {
        let (manager, store, _) = manager_with_clock();

        manager.put("a", "value", None, None).await.unwrap();
        manager.search("value", 10).await.unwrap();
        manager.stats().await.unwrap();

        assert_eq!(store.find("a").await.unwrap().hit_count, 0);
    }

    #[tokio::test]
    async fn test_check_status() {
        let (manager, store, _) = manager_with_clock();

        let report = manager.check_status().await;
        assert!(report.available);
        assert_eq!(report.status, "working");
        assert!(store.is_empty(), "Probe row should be cleaned up");

        let down = CacheManager::new(
            Arc::new(DownStore),
            Arc::new(ManualClock::default()),
            3600,
            TIMEOUT,
        );
        let report = down.check_status().await;
        assert!(!report.available);
        assert_eq!(report.status, "error");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_status_checks_all_succeed() {
        let (manager, store, _) = manager_with_clock();
        let manager = Arc::new(manager);

        let checks: Vec<_> = (0..500)
            .map(|_| {
                let manager = Arc::clone(&manager);
                tokio::spawn(async move { manager.check_status().await })
            })
            .collect();

        for check in checks {
            let report = check.await.unwrap();
            assert!(report.available, "status check failed: {}", report.message);
        }
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_put_rejects_reserved_keys() {
        let (manager, store, _) = manager_with_clock();

        for key in [CLEANUP_LOG_KEY, STATUS_PROBE_PREFIX, "__cache_status_probe__7"] {
            let result = manager.put(key, "v", None, None).await;
            assert!(matches!(result, Err(CacheError::InvalidArgument(_))), "{}", key);
        }
        assert!(store.is_empty());

        // A status check never touches caller rows
        manager.put("__cache_status", "mine", None, None).await.unwrap();
        assert!(manager.check_status().await.available);
        assert_eq!(store.find("__cache_status").await.unwrap().value, "mine");
    }

    #[tokio::test]
    async fn test_with_timeout_overrides_deadline() {
        let store = Arc::new(SlowStore {
            inner: MemoryEntryStore::new(),
            delay: Duration::from_millis(300),
        });
        let manager = CacheManager::new(
            store.clone(),
            Arc::new(ManualClock::default()),
            3600,
            Duration::from_secs(5),
        );
        manager.put("k", "v", None, None).await.unwrap();

        let hurried = manager.with_timeout(Duration::from_millis(20));
        assert_eq!(hurried.timeout(), Duration::from_millis(20));
        assert!(matches!(hurried.get("k").await, Err(CacheError::Timeout(_))));

        // The original deadline is unchanged
        assert_eq!(manager.get("k").await.unwrap(), Lookup::Hit("v".to_string()));
    }
}
