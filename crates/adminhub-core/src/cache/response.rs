use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

/// How long a cached GET response may be served without a new network call.
pub const FRESHNESS_WINDOW: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: Instant,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Instant::now(),
        }
    }

    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.cached_at)
    }

    /// Fresh while strictly younger than `window`.
    pub fn is_fresh(&self, window: Duration) -> bool {
        self.age() < window
    }
}

/// In-memory GET response cache keyed by full request URL.
#[derive(Debug)]
pub struct ResponseCache {
    entries: HashMap<String, CachedData<Value>>,
    window: Duration,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(FRESHNESS_WINDOW)
    }
}

impl ResponseCache {
    pub fn new(window: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            window,
        }
    }

    /// Payload for `url` if an entry exists and is still fresh.
    /// Stale entries are left in place and overwritten on the next store.
    pub fn fresh(&self, url: &str) -> Option<Value> {
        self.entries
            .get(url)
            .filter(|entry| entry.is_fresh(self.window))
            .map(|entry| entry.data.clone())
    }

    pub fn insert(&mut self, url: impl Into<String>, payload: Value) {
        self.entries.insert(url.into(), CachedData::new(payload));
    }

    /// Drop every entry. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

// ============================================================================
// Tests
// ============================================================================
