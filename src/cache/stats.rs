//! Cache Statistics Module
//!
//! Read-only aggregation over the entry store. Never mutates rows.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::cache::{is_expired, with_deadline, CacheEntry, Clock, EntryStore, CLEANUP_LOG_KEY};
use crate::error::Result;
use crate::tasks::CleanupRecord;

/// Entries listed in the top/recent sections of a performance report.
const TOP_ENTRIES: usize = 10;

/// Window covered by the hourly breakdown of an analytics report.
const ANALYTICS_WINDOW_HOURS: i64 = 24;

// == Cache Stats Report ==
/// Counts and hit totals at a single point in time.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsReport {
    /// Physically stored rows, fresh or expired
    pub total_entries: usize,
    /// Rows still fresh
    pub active_entries: usize,
    /// Rows past their TTL awaiting cleanup
    pub expired_entries: usize,
    /// Sum of hit counts
    pub total_hits: u64,
    /// Mean hit count per row
    pub avg_hits: f64,
    /// Storage footprint reported by the store
    pub approximate_size_bytes: u64,
    /// Latest cleanup audit record, if still fresh
    pub last_cleanup: Option<CleanupRecord>,
}

impl CacheStatsReport {
    fn from_rows(rows: &[CacheEntry], size: u64, now: DateTime<Utc>) -> Self {
        let expired_entries = rows.iter().filter(|e| is_expired(e, now)).count();
        let total_hits: u64 = rows.iter().map(|e| e.hit_count).sum();
        let avg_hits = if rows.is_empty() {
            0.0
        } else {
            total_hits as f64 / rows.len() as f64
        };
        let last_cleanup = rows
            .iter()
            .find(|e| e.key == CLEANUP_LOG_KEY && !is_expired(e, now))
            .and_then(|e| serde_json::from_str(&e.value).ok());

        Self {
            total_entries: rows.len(),
            active_entries: rows.len() - expired_entries,
            expired_entries,
            total_hits,
            avg_hits,
            approximate_size_bytes: size,
            last_cleanup,
        }
    }

    // == Hit Rate ==
    /// Hits per stored entry, or 0.0 for an empty store.
    pub fn hit_rate(&self) -> f64 {
        if self.total_entries == 0 {
            0.0
        } else {
            self.total_hits as f64 / self.total_entries as f64
        }
    }
}

/// Coarse label derived from the hit rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Efficiency {
    High,
    Medium,
    Low,
}

impl Efficiency {
    fn from_hit_rate(rate: f64) -> Self {
        if rate > 0.5 {
            Efficiency::High
        } else if rate > 0.2 {
            Efficiency::Medium
        } else {
            Efficiency::Low
        }
    }
}

/// Compact row used in ranking lists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    pub key: String,
    pub hit_count: u64,
    pub created_at: DateTime<Utc>,
    pub last_hit: DateTime<Utc>,
}

impl From<&CacheEntry> for EntrySummary {
    fn from(entry: &CacheEntry) -> Self {
        Self {
            key: entry.key.clone(),
            hit_count: entry.hit_count,
            created_at: entry.created_at,
            last_hit: entry.last_hit,
        }
    }
}

// == Performance Report ==
/// Stats plus derived efficiency figures and most-used / most-recent rows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    #[serde(flatten)]
    pub stats: CacheStatsReport,
    /// Hits per entry, rounded to two decimals
    pub hit_rate: f64,
    pub efficiency: Efficiency,
    pub entries_with_hits: usize,
    pub unused_entries: usize,
    pub max_hits: u64,
    pub top_cached: Vec<EntrySummary>,
    pub recent_activity: Vec<EntrySummary>,
}

// == Analytics Report ==
/// Activity of the rows last hit within one clock hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyStat {
    /// Start of the hour, UTC
    pub hour: DateTime<Utc>,
    pub requests: usize,
    pub avg_hits: f64,
}

/// Entry ranked by how quickly it accumulated hits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    pub key: String,
    pub hit_count: u64,
    /// Hours between creation and the latest hit
    pub hours_active: f64,
    pub hits_per_hour: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    /// Newest hour first
    pub hourly_stats: Vec<HourlyStat>,
    pub top_performance: Vec<TopPerformer>,
}

impl AnalyticsReport {
    fn from_rows(rows: &[CacheEntry], now: DateTime<Utc>) -> Self {
        let window_start = now - TimeDelta::hours(ANALYTICS_WINDOW_HOURS);

        let mut buckets: BTreeMap<DateTime<Utc>, (usize, u64)> = BTreeMap::new();
        for entry in rows.iter().filter(|e| e.last_hit > window_start) {
            let bucket = buckets.entry(hour_start(entry.last_hit)).or_default();
            bucket.0 += 1;
            bucket.1 += entry.hit_count;
        }
        let hourly_stats = buckets
            .into_iter()
            .rev()
            .map(|(hour, (requests, hits))| HourlyStat {
                hour,
                requests,
                avg_hits: hits as f64 / requests as f64,
            })
            .collect();

        let mut top_performance: Vec<TopPerformer> = rows
            .iter()
            .filter(|e| e.created_at < e.last_hit)
            .map(|e| {
                let hours_active =
                    (e.last_hit - e.created_at).num_milliseconds() as f64 / 3_600_000.0;
                TopPerformer {
                    key: e.key.clone(),
                    hit_count: e.hit_count,
                    hours_active,
                    hits_per_hour: e.hit_count as f64 / hours_active,
                }
            })
            .collect();
        top_performance.sort_by(|a, b| b.hits_per_hour.total_cmp(&a.hits_per_hour));
        top_performance.truncate(TOP_ENTRIES);

        Self {
            hourly_stats,
            top_performance,
        }
    }
}

fn hour_start(at: DateTime<Utc>) -> DateTime<Utc> {
    let secs = at.timestamp();
    DateTime::from_timestamp(secs - secs.rem_euclid(3600), 0).unwrap_or(at)
}

// == Stats Reporter ==
/// Scans the store and partitions rows with the expiration evaluator.
pub struct StatsReporter {
    store: Arc<dyn EntryStore>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl StatsReporter {
    /// Creates a reporter over the shared store.
    pub fn new(store: Arc<dyn EntryStore>, clock: Arc<dyn Clock>, timeout: Duration) -> Self {
        Self {
            store,
            clock,
            timeout,
        }
    }

    /// Point-in-time counts.
    pub async fn report(&self) -> Result<CacheStatsReport> {
        let (rows, size, now) = self.scan().await?;
        Ok(CacheStatsReport::from_rows(&rows, size, now))
    }

    /// Counts plus rankings, computed from a single scan.
    pub async fn performance(&self) -> Result<PerformanceReport> {
        let (mut rows, size, now) = self.scan().await?;
        let stats = CacheStatsReport::from_rows(&rows, size, now);

        let hit_rate = (stats.hit_rate() * 100.0).round() / 100.0;
        let entries_with_hits = rows.iter().filter(|e| e.hit_count > 0).count();
        let max_hits = rows.iter().map(|e| e.hit_count).max().unwrap_or(0);

        rows.sort_by(|a, b| b.hit_count.cmp(&a.hit_count));
        let top_cached = rows.iter().take(TOP_ENTRIES).map(EntrySummary::from).collect();

        rows.sort_by(|a, b| b.last_hit.cmp(&a.last_hit));
        let recent_activity = rows.iter().take(TOP_ENTRIES).map(EntrySummary::from).collect();

        Ok(PerformanceReport {
            hit_rate,
            efficiency: Efficiency::from_hit_rate(hit_rate),
            entries_with_hits,
            unused_entries: rows.len() - entries_with_hits,
            max_hits,
            top_cached,
            recent_activity,
            stats,
        })
    }

    /// Hourly activity over the last day plus the top entries by hits per hour.
    pub async fn analytics(&self) -> Result<AnalyticsReport> {
        let rows = with_deadline(self.timeout, "all", self.store.all()).await?;
        Ok(AnalyticsReport::from_rows(&rows, self.clock.now()))
    }

    async fn scan(&self) -> Result<(Vec<CacheEntry>, u64, DateTime<Utc>)> {
        let rows = with_deadline(self.timeout, "all", self.store.all()).await?;
        let size = with_deadline(
            self.timeout,
            "approximate_size_bytes",
            self.store.approximate_size_bytes(),
        )
        .await?;
        Ok((rows, size, self.clock.now()))
    }
}
