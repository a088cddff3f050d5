//! Request fingerprinting.
//!
//! Derives a stable cache key from a chat message and its context. Session
//! identifiers are deliberately left out so answers are shared across users.

use serde_json::{json, Value};
use sha2::{Digest, Sha256};

/// Hex characters kept from the SHA-256 digest.
pub const FINGERPRINT_LENGTH: usize = 32;

/// Builds the cache key for `message` asked under `context`.
///
/// The message is trimmed and lowercased; object keys in `context` are
/// serialized in sorted order, so logically equal requests share a key.
pub fn fingerprint(message: &str, context: Option<&Value>) -> String {
    let payload = json!({
        "message": message.trim().to_lowercase(),
        "context": context.cloned().unwrap_or_else(|| json!({})),
    });

    // serde_json's default map is ordered, giving a canonical encoding
    let canonical = payload.to_string();
    let digest = Sha256::digest(canonical.as_bytes());

    let mut key = hex::encode(digest);
    key.truncate(FINGERPRINT_LENGTH);
    key
}
