use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value as JsonValue;
use tracing::debug;

use super::key::CacheKey;
use super::transaction::MutationTxn;

/// A cached response. `stale` entries are skipped by reads so the next
/// consumer refetches and reconciles with backend truth.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: JsonValue,
    pub stale: bool,
}

/// Process-wide response cache shared by every consumer. Mutation is
/// last-writer-wins per key; atomicity is only promised within a single
/// [`MutationTxn`] rollback.
#[derive(Clone, Default)]
pub struct QueryCache {
    inner: Arc<Mutex<HashMap<CacheKey, CacheEntry>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fresh entry for `key`, if any. Stale entries read as misses.
    pub fn get(&self, key: &CacheKey) -> Option<JsonValue> {
        let entries = self.lock();
        entries
            .get(key)
            .filter(|e| !e.stale)
            .map(|e| e.value.clone())
    }

    /// Replace the entry verbatim with a fresh fetch result.
    pub fn insert(&self, key: CacheKey, value: JsonValue) {
        self.lock().insert(
            key,
            CacheEntry {
                value,
                stale: false,
            },
        );
    }

    /// Raw entry including staleness, mainly for tests and diagnostics.
    pub fn entry(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.lock().get(key).cloned()
    }

    /// All keys whose path starts with `path_prefix`, list and detail
    /// shapes alike.
    pub fn keys_with_prefix(&self, path_prefix: &str) -> Vec<CacheKey> {
        self.lock()
            .keys()
            .filter(|k| k.path().starts_with(path_prefix))
            .cloned()
            .collect()
    }

    /// Mark every entry under `path_prefix` stale.
    pub fn invalidate_prefix(&self, path_prefix: &str) {
        let mut entries = self.lock();
        for (key, entry) in entries.iter_mut() {
            if key.path().starts_with(path_prefix) {
                entry.stale = true;
            }
        }
    }

    /// Open a mutation transaction: snapshot the current entry for every
    /// affected key in one pass.
    pub fn begin(&self, label: &'static str, keys: &[CacheKey]) -> MutationTxn {
        let entries = self.lock();
        let snapshots = keys
            .iter()
            .map(|k| (k.clone(), entries.get(k).cloned()))
            .collect();
        debug!(label, keys = keys.len(), "cache transaction opened");
        MutationTxn::new(label, snapshots)
    }

    /// Apply an optimistic patch to every existing entry among `keys`,
    /// under a single lock so partially patched states are not observable.
    pub fn patch<F>(&self, keys: &[CacheKey], mut patch: F)
    where
        F: FnMut(&CacheKey, &mut JsonValue),
    {
        let mut entries = self.lock();
        for key in keys {
            if let Some(entry) = entries.get_mut(key) {
                patch(key, &mut entry.value);
            }
        }
    }

    /// The mutation was confirmed: mark the touched entries stale so the
    /// next read reconciles with the backend.
    pub fn commit(&self, txn: MutationTxn) {
        let mut entries = self.lock();
        for (key, _) in txn.snapshots() {
            if let Some(entry) = entries.get_mut(key) {
                entry.stale = true;
            }
        }
        debug!(label = txn.label(), "cache transaction committed");
    }

    /// The mutation failed: restore every snapshot verbatim. All restores
    /// happen under one lock, so no half-rolled-back state is visible.
    pub fn rollback(&self, txn: MutationTxn) {
        let mut entries = self.lock();
        for (key, snapshot) in txn.into_snapshots() {
            match snapshot {
                Some(entry) => {
                    entries.insert(key, entry);
                }
                None => {
                    entries.remove(&key);
                }
            }
        }
        debug!("cache transaction rolled back");
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn key(page: i64) -> CacheKey {
        CacheKey::new(
            "/api/candidates",
            vec![("page".to_string(), page.to_string())],
        )
    }

    #[test]
    fn tracks_entry_count() {
        let cache = QueryCache::new();
        assert!(cache.is_empty());
        cache.insert(key(1), json!({"items": []}));
        cache.insert(key(2), json!({"items": []}));
        assert_eq!(cache.len(), 2);
        // Staleness does not evict; the entry still counts.
        cache.invalidate_prefix("/api/candidates");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn fetch_replaces_entry_verbatim() {
        let cache = QueryCache::new();
        cache.insert(key(1), json!({"items": [1, 2]}));
        cache.insert(key(1), json!({"items": [3]}));
        assert_eq!(cache.get(&key(1)), Some(json!({"items": [3]})));
    }

    #[test]
    fn stale_entries_read_as_misses() {
        let cache = QueryCache::new();
        cache.insert(key(1), json!({"items": []}));
        cache.invalidate_prefix("/api/candidates");
        assert_eq!(cache.get(&key(1)), None);
        // The raw entry is still there for diagnostics.
        assert!(cache.entry(&key(1)).is_some_and(|e| e.stale));
    }

    #[test]
    fn rollback_restores_every_snapshot() {
        let cache = QueryCache::new();
        cache.insert(key(1), json!({"stage": "applied"}));
        cache.insert(key(2), json!({"stage": "applied"}));

        let keys = vec![key(1), key(2)];
        let txn = cache.begin("stage-change", &keys);
        cache.patch(&keys, |_, value| {
            value["stage"] = json!("interview");
        });
        assert_eq!(cache.get(&key(1)), Some(json!({"stage": "interview"})));

        cache.rollback(txn);
        assert_eq!(cache.get(&key(1)), Some(json!({"stage": "applied"})));
        assert_eq!(cache.get(&key(2)), Some(json!({"stage": "applied"})));
    }

    #[test]
    fn rollback_removes_entries_created_mid_flight() {
        let cache = QueryCache::new();
        let keys = vec![key(1)];
        let txn = cache.begin("stage-change", &keys);
        cache.insert(key(1), json!({"stage": "offer"}));
        cache.rollback(txn);
        assert!(cache.entry(&key(1)).is_none());
    }

    #[test]
    fn commit_marks_touched_entries_stale() {
        let cache = QueryCache::new();
        cache.insert(key(1), json!({"items": []}));
        let keys = vec![key(1)];
        let txn = cache.begin("stage-change", &keys);
        cache.commit(txn);
        assert_eq!(cache.get(&key(1)), None);
    }
}
