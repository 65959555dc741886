//! Bounded least-recently-used cache for resolved rule executors.

/// A small map that evicts its least-recently-used entry beyond capacity.
///
/// Collections are commonly homogeneous or near-homogeneous, so a handful of
/// entries gets a near-perfect hit rate with O(1) memory while a pathological
/// mix of element kinds cannot grow the map without bound. Entries are kept
/// in recency order (most recently used last) and looked up by linear scan;
/// at the capacities used here that beats hashing.
pub(crate) struct LruCache<K, V> {
    capacity: usize,
    entries: Vec<(K, V)>,
}

impl<K: Copy + Eq, V> LruCache<K, V> {
    /// Creates a cache holding at most `capacity` entries (at least one).
    pub(crate) fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Vec::with_capacity(capacity.min(16)),
        }
    }

    /// Looks up `key`, marking the entry most-recently-used on a hit.
    pub(crate) fn get(&mut self, key: K) -> Option<&V> {
        let pos = self.entries.iter().position(|(k, _)| *k == key)?;
        let entry = self.entries.remove(pos);
        self.entries.push(entry);
        self.entries.last().map(|(_, v)| v)
    }

    /// Inserts `key`, evicting the least-recently-used entry beyond
    /// capacity. The new entry is most-recently-used.
    pub(crate) fn insert(&mut self, key: K, value: V) {
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            self.entries.remove(pos);
        }
        self.entries.push((key, value));
        if self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
    }

    /// The most-recently-used value, if any.
    pub(crate) fn most_recent(&self) -> Option<&V> {
        self.entries.last().map(|(_, v)| v)
    }

    /// Keys in recency order, least-recently-used first.
    #[cfg(test)]
    pub(crate) fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn get_refreshes_recency() {
        let mut cache = LruCache::new(2);
        cache.insert('a', 1);
        cache.insert('b', 2);
        assert_eq!(cache.get('a'), Some(&1));

        // 'b' is now the least recently used and gets evicted
        cache.insert('c', 3);
        assert_eq!(cache.get('b'), None);
        assert_eq!(cache.get('a'), Some(&1));
        assert_eq!(cache.get('c'), Some(&3));
    }

    #[test]
    fn insert_evicts_least_recently_used() {
        let mut cache = LruCache::new(2);
        cache.insert('a', 1);
        cache.insert('b', 2);
        cache.insert('c', 3);
        assert_eq!(cache.keys().count(), 2);
        assert_eq!(cache.get('a'), None);
    }

    #[test]
    fn reinsert_replaces_value() {
        let mut cache = LruCache::new(2);
        cache.insert('a', 1);
        cache.insert('a', 2);
        assert_eq!(cache.keys().count(), 1);
        assert_eq!(cache.get('a'), Some(&2));
    }

    #[test]
    fn most_recent_follows_usage() {
        let mut cache = LruCache::new(3);
        assert!(cache.most_recent().is_none());
        cache.insert('a', 1);
        cache.insert('b', 2);
        assert_eq!(cache.most_recent(), Some(&2));
        cache.get('a');
        assert_eq!(cache.most_recent(), Some(&1));
    }

    #[test]
    fn capacity_is_at_least_one() {
        let mut cache = LruCache::new(0);
        cache.insert('a', 1);
        assert_eq!(cache.get('a'), Some(&1));
        cache.insert('b', 2);
        assert_eq!(cache.get('a'), None);
        assert_eq!(cache.get('b'), Some(&2));
    }

    /// Reference model: recency list without a capacity bound, truncated on
    /// demand.
    fn model_retained(ops: &[u8], capacity: usize) -> Vec<u8> {
        let mut recency: Vec<u8> = Vec::new();
        for &key in ops {
            recency.retain(|k| *k != key);
            recency.push(key);
            if recency.len() > capacity {
                recency.remove(0);
            }
        }
        recency
    }

    proptest! {
        #[test]
        fn retains_the_most_recently_used_keys(ops in proptest::collection::vec(0u8..8, 0..64)) {
            let capacity = 3;
            let mut cache = LruCache::new(capacity);
            for &key in &ops {
                if cache.get(key).is_none() {
                    cache.insert(key, ());
                }
            }
            prop_assert!(cache.keys().count() <= capacity);
            let retained: Vec<u8> = cache.keys().copied().collect();
            prop_assert_eq!(retained, model_retained(&ops, capacity));
        }
    }
}
