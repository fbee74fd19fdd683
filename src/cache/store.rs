//! Bounded in-memory response store.

use super::key::CacheKey;
use std::collections::{HashMap, VecDeque};

/// Default number of responses kept per client.
pub const DEFAULT_CAPACITY: usize = 100;

/// Response cache with a fixed entry limit and insertion-order eviction.
///
/// When full, inserting a new key drops the entry that was inserted first.
/// Reads never reorder entries, and overwriting an existing key keeps its
/// original position.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    entries: HashMap<CacheKey, String>,
    order: VecDeque<CacheKey>,
    capacity: usize,
}

impl ResponseCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.min(1024)),
            order: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<&String> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Store `value` under `key`, returning the evicted key if one was dropped.
    pub fn set(&mut self, key: CacheKey, value: String) -> Option<CacheKey> {
        if self.capacity == 0 {
            return None;
        }
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
            return None;
        }

        let mut evicted = None;
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                evicted = Some(oldest);
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, value);
        evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys from oldest to newest insertion.
    pub fn keys(&self) -> impl Iterator<Item = &CacheKey> {
        self.order.iter()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k(s: &str) -> CacheKey {
        CacheKey::from(s)
    }

    #[test]
    fn evicts_oldest_insertion_at_capacity() {
        let mut cache = ResponseCache::new(2);
        assert_eq!(cache.set(k("a"), "A".into()), None);
        assert_eq!(cache.set(k("b"), "B".into()), None);
        assert_eq!(cache.set(k("c"), "C".into()), Some(k("a")));

        assert!(!cache.contains(&k("a")));
        assert_eq!(cache.get(&k("b")).map(String::as_str), Some("B"));
        assert_eq!(cache.get(&k("c")).map(String::as_str), Some("C"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn reads_do_not_refresh_position() {
        let mut cache = ResponseCache::new(2);
        cache.set(k("a"), "A".into());
        cache.set(k("b"), "B".into());
        assert!(cache.get(&k("a")).is_some());

        cache.set(k("c"), "C".into());
        assert!(!cache.contains(&k("a")));
        assert!(cache.contains(&k("b")));
    }

    #[test]
    fn overwrite_keeps_original_position() {
        let mut cache = ResponseCache::new(2);
        cache.set(k("a"), "A".into());
        cache.set(k("b"), "B".into());
        assert_eq!(cache.set(k("a"), "A2".into()), None);
        assert_eq!(cache.get(&k("a")).map(String::as_str), Some("A2"));
        assert_eq!(cache.len(), 2);

        assert_eq!(cache.set(k("c"), "C".into()), Some(k("a")));
        assert_eq!(cache.keys().cloned().collect::<Vec<_>>(), vec![k("b"), k("c")]);
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut cache = ResponseCache::new(3);
        for i in 0..50 {
            cache.set(k(&format!("key-{}", i % 7)), i.to_string());
            assert!(cache.len() <= 3);
        }
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut cache = ResponseCache::new(0);
        cache.set(k("a"), "A".into());
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_removes_everything() {
        let mut cache = ResponseCache::default();
        cache.set(k("a"), "A".into());
        cache.set(k("b"), "B".into());
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.keys().count(), 0);
        assert_eq!(cache.capacity(), DEFAULT_CAPACITY);
    }
}
