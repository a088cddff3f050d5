//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::{
    fingerprint, AnalyticsReport, CacheManager, CacheStatsReport, EntryDetails, EntryStore,
    Lookup, PerformanceReport, SearchHit,
};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    FingerprintRequest, FingerprintResponse, GetResponse, HealthResponse, InvalidateResponse,
    PutRequest, PutResponse, SearchQuery,
};
use crate::tasks::{CleanupRecord, CleanupScheduler};

/// Application state shared across all handlers.
///
/// The manager and the cleanup scheduler only share the underlying store.
#[derive(Clone)]
pub struct AppState {
    /// Caller-facing cache contract
    pub cache: Arc<CacheManager>,
    /// Cleanup pass, also driven by the background task
    pub cleanup: Arc<CleanupScheduler>,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(cache: Arc<CacheManager>, cleanup: Arc<CleanupScheduler>) -> Self {
        Self { cache, cleanup }
    }

    /// Creates a new AppState from configuration over the given store.
    pub fn from_config(config: &Config, store: Arc<dyn EntryStore>) -> Self {
        let cache = CacheManager::from_config(config, store);
        let cleanup = CleanupScheduler::for_manager(&cache, config.cleanup_log_ttl);
        Self::new(Arc::new(cache), Arc::new(cleanup))
    }
}

/// Handler for PUT /cache
///
/// Stores a computed value under its fingerprint.
pub async fn put_handler(
    State(state): State<AppState>,
    Json(req): Json<PutRequest>,
) -> Result<Json<PutResponse>> {
    state
        .cache
        .put(&req.key, &req.value, req.ttl, req.metadata)
        .await?;

    Ok(Json(PutResponse::new(req.key)))
}

/// Handler for GET /cache/:key
///
/// Returns the cached value on a hit and 404 on a miss.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get(&key).await? {
        Lookup::Hit(value) => Ok(Json(GetResponse::new(key, value))),
        Lookup::Miss => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /cache/:key
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<InvalidateResponse>> {
    let removed = state.cache.invalidate(&key).await?;
    Ok(Json(InvalidateResponse::new(key, removed)))
}

/// Handler for GET /cache/:key/details
pub async fn details_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<EntryDetails>> {
    Ok(Json(state.cache.details(&key).await?))
}

/// Handler for GET /search
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SearchHit>>> {
    Ok(Json(state.cache.search(&query.q, query.limit).await?))
}

/// Handler for POST /fingerprint
///
/// Derives the cache key a caller should use for a message and context.
pub async fn fingerprint_handler(
    Json(req): Json<FingerprintRequest>,
) -> Result<Json<FingerprintResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidArgument(error_msg));
    }

    let key = fingerprint(&req.message, req.context.as_ref());
    Ok(Json(FingerprintResponse { key }))
}

/// Handler for POST /cleanup
///
/// Runs a cleanup pass immediately, outside the background schedule.
pub async fn cleanup_handler(State(state): State<AppState>) -> Result<Json<CleanupRecord>> {
    Ok(Json(state.cleanup.run_once().await?))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<CacheStatsReport>> {
    Ok(Json(state.cache.stats().await?))
}

/// Handler for GET /stats/performance
pub async fn performance_handler(
    State(state): State<AppState>,
) -> Result<Json<PerformanceReport>> {
    Ok(Json(state.cache.performance().await?))
}

/// Handler for GET /stats/analytics
pub async fn analytics_handler(State(state): State<AppState>) -> Result<Json<AnalyticsReport>> {
    Ok(Json(state.cache.analytics().await?))
}

/// Handler for GET /health
///
/// Reports the outcome of a cache read/write probe.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let probe = state.cache.check_status().await;
    Json(HealthResponse::from_probe(probe))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryEntryStore;

    fn test_state() -> AppState {
        AppState::from_config(&Config::default(), Arc::new(MemoryEntryStore::new()))
    }

    fn put_request(key: &str, value: &str) -> PutRequest {
        PutRequest {
            key: key.to_string(),
            value: value.to_string(),
            ttl: None,
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_put_and_get_handler() {
        let state = test_state();

        let result = put_handler(State(state.clone()), Json(put_request("k", "v"))).await;
        assert!(result.is_ok());

        let response = get_handler(State(state), Path("k".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, "v");
    }

    #[tokio::test]
    async fn test_get_miss_is_not_found() {
        let state = test_state();

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalidate_handler() {
        let state = test_state();
        put_handler(State(state.clone()), Json(put_request("gone", "v")))
            .await
            .unwrap();

        let response = invalidate_handler(State(state.clone()), Path("gone".to_string()))
            .await
            .unwrap();
        assert!(response.removed);

        let result = get_handler(State(state), Path("gone".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_put_invalid_ttl() {
        let state = test_state();
        let mut req = put_request("k", "v");
        req.ttl = Some(0);

        let result = put_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_cleanup_and_stats_handlers() {
        let state = test_state();

        let record = cleanup_handler(State(state.clone())).await.unwrap();
        assert_eq!(record.removed, 0);

        let stats = stats_handler(State(state)).await.unwrap();
        // Only the audit row is stored
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.last_cleanup.as_ref().map(|r| r.removed), Some(0));
    }

    #[tokio::test]
    async fn test_analytics_handler() {
        let state = test_state();
        put_handler(State(state.clone()), Json(put_request("k", "v")))
            .await
            .unwrap();

        let report = analytics_handler(State(state)).await.unwrap();
        assert_eq!(report.hourly_stats.len(), 1);
        assert_eq!(report.hourly_stats[0].requests, 1);
        // Never hit after creation, so not ranked
        assert!(report.top_performance.is_empty());
    }

    #[tokio::test]
    async fn test_put_reserved_key_rejected() {
        let state = test_state();

        let req = put_request("__cache_cleanup_log__", "v");
        let result = put_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_fingerprint_handler() {
        let req = FingerprintRequest {
            message: "What is a synapse?".to_string(),
            context: None,
        };
        let response = fingerprint_handler(Json(req)).await.unwrap();
        assert_eq!(response.key, fingerprint("what is a synapse?", None));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler(State(test_state())).await;
        assert_eq!(response.status, "healthy");
        assert!(response.cache.available);
    }
}
