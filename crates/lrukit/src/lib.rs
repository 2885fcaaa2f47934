//! # lrukit
//!
//! Fixed-capacity key-value cache with least-recently-used eviction.
//!
//! ## Architecture
//! - **HashMap**: AHash index from key to arena slot (O(1))
//! - **Recency list**: Doubly-linked list threaded through a slot arena,
//!   least recently used at the head (O(1) relink and eviction)
//! - **Free list**: Vacated slots are reused by later insertions
//!
//! `LruCache` is single-threaded. Wrap it in a lock (see `lrushared`) to
//! share it between threads.
//!
//! ```
//! use lrukit::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get("a");
//! cache.put("c", 3); // evicts "b"
//!
//! assert!(!cache.contains_key("b"));
//! assert_eq!(cache.keys().copied().collect::<Vec<_>>(), ["a", "c"]);
//! # Ok::<(), lrukit::Error>(())
//! ```

#![warn(missing_docs)]

mod error;
mod iter;
mod lru;

pub use error::{Error, Result};
pub use iter::{Iter, Keys, Values};
pub use lru::{LruCache, MIN_CAPACITY};
