use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use serde_json::Value;

struct Entry {
    value: Value,
    stored_at: Instant,
}

/// TTL-based cache for idempotent backend reads, keyed by logical operation
/// name (e.g. `"ranking:all"`, `"data_output"`).
///
/// Shared behind an `Arc` and injected into the backend client; writes are
/// overwrite-only, so last-write-wins between concurrent fetchers of the
/// same key.
pub struct ResponseCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached value while it is fresh; an expired entry is
    /// evicted and reported as a miss. A miss never errors.
    pub fn get(&self, key: &str) -> Option<Value> {
        {
            let guard = self.entries.read().ok()?;
            match guard.get(key) {
                Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }
        // Expired: upgrade to a write lock and evict.
        if let Ok(mut guard) = self.entries.write() {
            if let Some(entry) = guard.get(key) {
                if entry.stored_at.elapsed() >= self.ttl {
                    guard.remove(key);
                }
            }
        }
        None
    }

    pub fn set(&self, key: &str, value: Value) {
        if let Ok(mut guard) = self.entries.write() {
            guard.insert(
                key.to_string(),
                Entry {
                    value,
                    stored_at: Instant::now(),
                },
            );
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.entries.write() {
            guard.clear();
        }
    }

    /// Drops the entry matching `pattern` exactly; `"*"` clears everything.
    /// No other pattern semantics are supported.
    pub fn invalidate(&self, pattern: &str) {
        if pattern == "*" {
            self.clear();
            return;
        }
        if let Ok(mut guard) = self.entries.write() {
            guard.remove(pattern);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_then_get_returns_value() {
        let cache = ResponseCache::new(Duration::from_secs(300));
        cache.set("ranking:all", json!({"total": 3}));
        assert_eq!(cache.get("ranking:all"), Some(json!({"total": 3})));
    }

    #[test]
    fn expired_entry_is_evicted() {
        let cache = ResponseCache::new(Duration::from_millis(20));
        cache.set("k", json!(1));
        std::thread::sleep(Duration::from_millis(40));
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty(), "expired entry should be evicted on read");
    }

    #[test]
    fn set_overwrites_unconditionally() {
        let cache = ResponseCache::new(Duration::from_secs(300));
        cache.set("k", json!(1));
        cache.set("k", json!(2));
        assert_eq!(cache.get("k"), Some(json!(2)));
    }

    #[test]
    fn wildcard_invalidation_clears_everything() {
        let cache = ResponseCache::new(Duration::from_secs(300));
        cache.set("ranking:all", json!(1));
        cache.set("data_output", json!(2));
        cache.invalidate("*");
        assert!(cache.is_empty());
    }

    #[test]
    fn exact_invalidation_drops_only_that_key() {
        let cache = ResponseCache::new(Duration::from_secs(300));
        cache.set("ranking:all", json!(1));
        cache.set("data_output", json!(2));
        cache.invalidate("ranking:all");
        assert_eq!(cache.get("ranking:all"), None);
        assert_eq!(cache.get("data_output"), Some(json!(2)));
    }

    #[test]
    fn miss_on_unknown_key() {
        let cache = ResponseCache::new(Duration::from_secs(300));
        assert_eq!(cache.get("nope"), None);
    }
}
