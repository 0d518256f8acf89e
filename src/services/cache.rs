//! Short-lived key-value store for OAuth state and credential hand-off
//!
//! Correctness of the OAuth flow relies on TTL expiry and single-use
//! deletion rather than mutual exclusion, so an in-process map guarded by
//! an async RwLock is enough.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Entries are purged opportunistically once the map grows past this size
const PURGE_THRESHOLD: usize = 1000;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct IntegrationCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl IntegrationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value that expires after `ttl_secs` seconds
    pub async fn set(&self, key: &str, value: &str, ttl_secs: i64) {
        let mut entries = self.entries.write().await;

        entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at: Utc::now() + Duration::seconds(ttl_secs),
            },
        );

        if entries.len() > PURGE_THRESHOLD {
            let now = Utc::now();
            entries.retain(|_, entry| now < entry.expires_at);
        }
    }

    /// Returns the value if present and not expired. Expired entries are
    /// removed on the way out.
    pub async fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.write().await;

        match entries.get(key) {
            Some(entry) if Utc::now() < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub async fn delete(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    /// Removes and returns the value in one step (single-use hand-off)
    pub async fn take(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.write().await;

        entries
            .remove(key)
            .filter(|entry| Utc::now() < entry.expires_at)
            .map(|entry| entry.value)
    }
}

/// Cache key for a pending OAuth state entry
pub fn state_cache_key(org_id: &str, user_id: &str) -> String {
    format!("hubspot_state:{}:{}", org_id, user_id)
}

/// Cache key for a parked credential blob
pub fn credentials_cache_key(org_id: &str, user_id: &str) -> String {
    format!("hubspot_credentials:{}:{}", org_id, user_id)
}
