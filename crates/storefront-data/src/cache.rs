//! In-memory response cache with TTL and tag invalidation.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct CacheEntry {
    body: Vec<u8>,
    expires_at: Instant,
    tags: Vec<String>,
}

/// Process-local cache of raw response bodies.
///
/// Entries are keyed by a hash of the operation text and variables, expire
/// after their per-entry TTL, and carry tags so that a whole family of
/// cached reads (e.g. everything under "products") can be dropped at once.
#[derive(Default)]
pub struct ResponseCache {
    entries: Mutex<HashMap<u64, CacheEntry>>,
}

impl ResponseCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the cache key for an operation.
    pub fn key(query: &str, variables: &serde_json::Value) -> u64 {
        let mut hasher = DefaultHasher::new();
        query.hash(&mut hasher);
        variables.to_string().hash(&mut hasher);
        hasher.finish()
    }

    /// Fetch a live entry's body; expired entries are dropped on the way.
    pub fn get(&self, key: u64) -> Option<Vec<u8>> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(&key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.body.clone()),
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    /// Store a response body under the given TTL and tags.
    pub fn put(&self, key: u64, body: Vec<u8>, ttl: Duration, tags: &[String]) {
        let entry = CacheEntry {
            body,
            expires_at: Instant::now() + ttl,
            tags: tags.to_vec(),
        };
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, entry);
    }

    /// Drop every entry carrying the given tag.
    pub fn invalidate_tag(&self, tag: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.retain(|_, entry| !entry.tags.iter().any(|t| t == tag));
    }

    /// Number of stored entries, including any not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
