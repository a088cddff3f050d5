//! Response Cache - TTL cache in front of expensive compute calls
//!
//! Returns previously computed results while they are fresh, tracks hit
//! counts and recency, and reclaims expired entries in the background.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheManager, Lookup, MemoryEntryStore};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::{spawn_cleanup_task, CleanupScheduler};
