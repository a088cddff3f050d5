//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::Metadata;

/// Default number of search results.
const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Request body for the PUT operation (PUT /cache)
///
/// # Fields
/// - `key`: Fingerprint to store the value under
/// - `value`: Serialized result of the computation
/// - `ttl`: Optional TTL in seconds (uses default if not specified)
/// - `metadata`: Optional tags such as entry type or originating service
#[derive(Debug, Clone, Deserialize)]
pub struct PutRequest {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub ttl: Option<u64>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

/// Query string for GET /search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

/// Request body for POST /fingerprint
#[derive(Debug, Clone, Deserialize)]
pub struct FingerprintRequest {
    /// Caller's message, normalized before hashing
    pub message: String,
    /// Structured context that changes the answer (model, retrieval settings)
    #[serde(default)]
    pub context: Option<Value>,
}

impl FingerprintRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.message.trim().is_empty() {
            return Some("Message cannot be empty".to_string());
        }
        match &self.context {
            None | Some(Value::Object(_)) => None,
            Some(_) => Some("Context must be a JSON object".to_string()),
        }
    }
}
