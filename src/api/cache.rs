//! In-process memoization of query results.

use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

use super::types::QueryResult;

/// Memoization map for decoded query results, keyed by the normalized
/// request signature. Shared by every query built from the same client;
/// entries live for the client's lifetime (no eviction).
pub struct QueryResultCache {
    enabled: bool,
    entries: Mutex<HashMap<String, QueryResult>>,
}

impl QueryResultCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Look up a previously stored result. Always misses when disabled.
    pub async fn get(&self, key: &str) -> Option<QueryResult> {
        if !self.enabled {
            return None;
        }
        let entries = self.entries.lock().await;
        let hit = entries.get(key).cloned();
        if hit.is_some() {
            debug!(key = key, "Query result cache hit");
        }
        hit
    }

    /// Store a result. No-op when disabled.
    pub async fn put(&self, key: String, value: QueryResult) {
        if !self.enabled {
            return;
        }
        self.entries.lock().await.insert(key, value);
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}
