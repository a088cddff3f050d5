//! Cache Module
//!
//! TTL-based response cache: entry rows, the expiration evaluator, the entry
//! store, the cache manager and the stats reporter.

mod clock;
mod entry;
mod fingerprint;
mod manager;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{is_expired, CacheEntry, Metadata};
pub use fingerprint::{fingerprint, FINGERPRINT_LENGTH};
pub use manager::{CacheManager, EntryDetails, Lookup, SearchHit, StatusReport};
pub use stats::{
    AnalyticsReport, CacheStatsReport, Efficiency, EntrySummary, HourlyStat, PerformanceReport,
    StatsReporter, TopPerformer,
};
pub use store::{EntryStore, MemoryEntryStore};

pub(crate) use store::with_deadline;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// Largest accepted TTL in seconds
pub const MAX_TTL_SECONDS: u64 = i32::MAX as u64;

/// Reserved key of the cleanup audit row
pub const CLEANUP_LOG_KEY: &str = "__cache_cleanup_log__";

/// Reserved key prefix of the read/write status probe rows
pub const STATUS_PROBE_PREFIX: &str = "__cache_status_probe__";

/// Result cap for search queries
pub const MAX_SEARCH_LIMIT: usize = 100;

/// Returns true for keys owned by the cache itself.
pub fn is_reserved_key(key: &str) -> bool {
    key == CLEANUP_LOG_KEY || key.starts_with(STATUS_PROBE_PREFIX)
}
