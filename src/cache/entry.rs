//! Cache Entry Module
//!
//! Defines the cache entry row and the expiration evaluator shared by the
//! read path, the stats scan and the cleanup task.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open mapping of tags attached to an entry (entry type, originating service).
pub type Metadata = Map<String, Value>;

// == Cache Entry ==
/// A single cached computation result and its usage bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// Caller-supplied fingerprint, unique across the store
    pub key: String,
    /// Opaque serialized payload
    pub value: String,
    /// Seconds the entry stays fresh from `created_at`
    pub ttl: u64,
    /// Set at insertion (or overwrite), never mutated otherwise
    pub created_at: DateTime<Utc>,
    /// Updated on every successful read
    pub accessed_at: DateTime<Utc>,
    /// Number of successful reads since the last write
    pub hit_count: u64,
    /// Timestamp of the most recent successful read
    pub last_hit: DateTime<Utc>,
    /// Observability tags, never consulted for freshness
    #[serde(default)]
    pub metadata: Metadata,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a fresh entry written at `now` with zeroed hit bookkeeping.
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        ttl: u64,
        metadata: Metadata,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ttl,
            created_at: now,
            accessed_at: now,
            hit_count: 0,
            last_hit: now,
            metadata,
        }
    }

    // == Expires At ==
    /// Instant from which the entry counts as expired.
    ///
    /// Saturates at the maximum representable time for TTLs that overflow.
    pub fn expires_at(&self) -> DateTime<Utc> {
        i64::try_from(self.ttl)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| self.created_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    // == Is Expired ==
    /// Convenience wrapper over [`is_expired`].
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        is_expired(self, now)
    }

    // == Time To Live ==
    /// Whole seconds of freshness left at `now`, floored at zero.
    pub fn ttl_remaining(&self, now: DateTime<Utc>) -> u64 {
        let remaining = (self.expires_at() - now).num_seconds();
        u64::try_from(remaining).unwrap_or(0)
    }

    /// Seconds elapsed since the entry was written.
    pub fn age_seconds(&self, now: DateTime<Utc>) -> f64 {
        (now - self.created_at).num_milliseconds() as f64 / 1000.0
    }

    /// Rough in-memory footprint: key, value and serialized metadata.
    pub fn approximate_size(&self) -> u64 {
        let metadata_len = serde_json::to_string(&self.metadata)
            .map(|s| s.len())
            .unwrap_or(0);
        (self.key.len() + self.value.len() + metadata_len) as u64
    }
}

// == Expiration Evaluator ==
/// The single freshness predicate: an entry is expired iff
/// `now >= created_at + ttl`.
///
/// Every component that needs a freshness verdict calls this function, so the
/// read path and the cleanup task can never disagree about a row.
pub fn is_expired(entry: &CacheEntry, now: DateTime<Utc>) -> bool {
    now >= entry.expires_at()
}
