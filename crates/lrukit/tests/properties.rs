use lrukit::{Error, LruCache};
use proptest::prelude::*;

#[test]
fn construction_guard() {
    assert!(matches!(
        LruCache::<u32, u32>::new(0),
        Err(Error::InvalidCapacity(0))
    ));
    assert!(matches!(
        LruCache::<u32, u32>::new(1),
        Err(Error::InvalidCapacity(1))
    ));
    assert!(LruCache::<u32, u32>::new(2).is_ok());
}

#[test]
fn eviction_drops_oldest_key() {
    let capacity = 5;
    let mut cache = LruCache::new(capacity).unwrap();

    for key in 1..=capacity + 1 {
        cache.put(key, key.to_string());
    }

    assert!(!cache.contains_key(&1));
    for key in 2..=capacity + 1 {
        assert!(cache.contains_key(&key), "key {key} should survive");
    }
    assert_eq!(cache.len(), capacity);
}

#[test]
fn read_refreshes_recency() {
    let mut cache = LruCache::new(2).unwrap();

    cache.put("k1", 1);
    cache.put("k2", 2);
    assert_eq!(cache.get("k1"), Some(&1));
    cache.put("k3", 3);

    assert!(cache.contains_key("k1"));
    assert!(!cache.contains_key("k2"));
    assert!(cache.contains_key("k3"));
}

#[test]
fn update_preserves_size() {
    let mut cache = LruCache::new(4).unwrap();

    cache.put("k", "v1");
    let before = cache.len();
    cache.put("k", "v2");

    assert_eq!(cache.len(), before);
    assert_eq!(cache.get("k"), Some(&"v2"));
}

#[test]
fn removal_shrinks_by_one() {
    let mut cache = LruCache::new(4).unwrap();

    cache.put(1, 'a');
    cache.put(2, 'b');

    assert_eq!(cache.remove(&1), Ok('a'));
    assert!(!cache.contains_key(&1));
    assert_eq!(cache.len(), 1);

    assert_eq!(cache.remove(&1), Err(Error::KeyNotFound));
    assert_eq!(cache.len(), 1);
}

#[test]
fn clear_forgets_everything() {
    let mut cache = LruCache::new(3).unwrap();

    for key in 0..10 {
        cache.put(key, key);
    }
    cache.clear();

    assert_eq!(cache.len(), 0);
    assert_eq!(cache.capacity(), 3);
    for key in 0..10 {
        assert!(!cache.contains_key(&key));
    }
}

proptest! {
    /// Size never exceeds capacity, whatever is inserted.
    #[test]
    fn capacity_bound(
        capacity in 2usize..32,
        keys in proptest::collection::vec(any::<u16>(), 0..256),
    ) {
        let mut cache = LruCache::new(capacity).unwrap();
        for key in keys {
            cache.put(key, key);
            prop_assert!(cache.len() <= cache.capacity());
        }
    }

    /// Anything inserted and still present reads back its latest value.
    #[test]
    fn round_trip(
        entries in proptest::collection::vec((0u8..32, any::<u32>()), 1..128),
    ) {
        let mut cache = LruCache::new(64).unwrap();
        for (key, value) in &entries {
            cache.put(*key, *value);
        }

        for (key, _) in &entries {
            let latest = entries
                .iter()
                .rev()
                .find(|(k, _)| k == key)
                .map(|(_, v)| *v);
            prop_assert_eq!(cache.get(key).copied(), latest);
        }
    }
}
