//! LRU (Least Recently Used) cache implementation
//!
//! Nodes live in a slot arena and are chained by index into a doubly-linked
//! recency list. The head is the least recently used entry and the next
//! eviction victim; the tail is the most recently used.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use ahash::RandomState;
use tracing::trace;

use crate::error::{Error, Result};
use crate::iter::{Iter, Keys, Values};

/// Smallest capacity accepted by [`LruCache::new`]
pub const MIN_CAPACITY: usize = 2;

/// Upper bound on up-front allocation, so huge capacities stay lazy
const MAX_PREALLOC: usize = 4096;

/// Node in the LRU doubly-linked list
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

/// LRU cache with fixed capacity
///
/// `get`, `get_mut` and `put` mark an entry as most recently used. Lookups
/// through `contains_key`, `contains`, `peek` and the iterators leave the
/// recency order alone.
pub struct LruCache<K, V> {
    map: HashMap<K, usize, RandomState>,
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: usize,
}

impl<K, V> LruCache<K, V> {
    /// Get the fixed capacity of the cache
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over `(key, value)` pairs from least to most recently used
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.nodes, self.head, self.tail, self.map.len())
    }

    /// Iterate over keys from least to most recently used
    ///
    /// Each call starts a fresh pass; the iterator itself is one-shot.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Iterate over values from least to most recently used
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Check whether any entry holds a value equal to `value`
    ///
    /// Scans every entry, O(n).
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// The entry that the next insertion into a full cache would evict
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.entry_at(self.head)
    }

    /// The most recently used entry
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.entry_at(self.tail)
    }

    fn entry_at(&self, idx: Option<usize>) -> Option<(&K, &V)> {
        let node = self.nodes[idx?].as_ref()?;
        Some((&node.key, &node.value))
    }

    /// Clear the cache, keeping its capacity
    pub fn clear(&mut self) {
        trace!(len = self.map.len(), "clearing cache");
        self.map.clear();
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    fn link_back(&mut self, idx: usize) {
        let old_tail = self.tail;

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = old_tail;
            node.next = None;
        }

        match old_tail {
            Some(tail_idx) => {
                if let Some(tail) = &mut self.nodes[tail_idx] {
                    tail.next = Some(idx);
                }
            }
            None => {
                self.head = Some(idx);
            }
        }

        self.tail = Some(idx);
    }

    fn move_to_back(&mut self, idx: usize) {
        if self.tail == Some(idx) {
            return;
        }

        self.unlink(idx);
        self.link_back(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &self.nodes[idx] {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn alloc_slot(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` - if `capacity` is less than 2
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity < MIN_CAPACITY {
            return Err(Error::InvalidCapacity(capacity));
        }

        let prealloc = capacity.min(MAX_PREALLOC);

        Ok(Self {
            map: HashMap::with_capacity_and_hasher(prealloc, RandomState::new()),
            nodes: Vec::with_capacity(prealloc),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
        })
    }

    /// Check whether `key` is cached, without touching recency
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Get a value from the cache and mark it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.move_to_back(idx);
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Get a mutable reference to a value and mark it most recently used
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.move_to_back(idx);
        self.nodes[idx].as_mut().map(|node| &mut node.value)
    }

    /// Get a value without touching recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Insert a key-value pair as the most recently used entry
    ///
    /// An existing key has its value replaced in place. A new key arriving
    /// at a full cache evicts the least recently used entry first and takes
    /// over its slot.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(node) = &mut self.nodes[idx] {
                node.value = value;
            }
            self.move_to_back(idx);
            return;
        }

        let recycled = if self.map.len() >= self.capacity {
            self.evict()
        } else {
            None
        };
        let idx = recycled.unwrap_or_else(|| self.alloc_slot());

        self.nodes[idx] = Some(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.link_back(idx);
        self.map.insert(key, idx);
    }

    /// Remove a key from the cache, returning its value
    ///
    /// # Errors
    /// * `Error::KeyNotFound` - if `key` is not cached; the cache is unchanged
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.map.remove(key).ok_or(Error::KeyNotFound)?;
        self.unlink(idx);
        let node = self.nodes[idx].take();
        self.free_list.push(idx);
        node.map(|node| node.value).ok_or(Error::KeyNotFound)
    }

    /// Drop the head entry and hand back its now-empty slot
    fn evict(&mut self) -> Option<usize> {
        let head_idx = self.head?;
        self.unlink(head_idx);
        let node = self.nodes[head_idx].take()?;
        self.map.remove(&node.key);

        trace!(
            slot = head_idx,
            capacity = self.capacity,
            "evicted least recently used entry"
        );

        Some(head_idx)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
