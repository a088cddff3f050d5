//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::MAX_TTL_SECONDS;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default TTL in seconds for entries stored without an explicit TTL
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Deadline applied to every store operation, in milliseconds
    pub operation_timeout_ms: u64,
    /// TTL in seconds of the cleanup audit row
    pub cleanup_log_ttl: u64,
    /// Optional JSON snapshot file used to persist entries across restarts
    pub snapshot_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 3600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 300)
    /// - `OPERATION_TIMEOUT_MS` - Store operation deadline (default: 5000)
    /// - `CLEANUP_LOG_TTL` - Lifetime of the cleanup audit row (default: 86400)
    /// - `SNAPSHOT_PATH` - Snapshot file, unset keeps the cache in memory only
    ///
    /// Durations must be positive and TTLs at most `MAX_TTL_SECONDS`; anything
    /// else falls back to the default like an unparseable value does.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl: parse_ttl("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_positive("CLEANUP_INTERVAL")
                .unwrap_or(defaults.cleanup_interval),
            operation_timeout_ms: parse_positive("OPERATION_TIMEOUT_MS")
                .unwrap_or(defaults.operation_timeout_ms),
            cleanup_log_ttl: parse_ttl("CLEANUP_LOG_TTL").unwrap_or(defaults.cleanup_log_ttl),
            snapshot_path: env::var("SNAPSHOT_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Store operation deadline as a Duration.
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: 3600,
            server_port: 3000,
            cleanup_interval: 300,
            operation_timeout_ms: 5000,
            cleanup_log_ttl: 86_400,
            snapshot_path: None,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_positive(name: &str) -> Option<u64> {
    parse_var(name).filter(|v: &u64| *v > 0)
}

fn parse_ttl(name: &str) -> Option<u64> {
    parse_positive(name).filter(|v| *v <= MAX_TTL_SECONDS)
}
