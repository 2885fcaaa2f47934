//! # lrushared
//!
//! Thread-safe layer over [`lrukit::LruCache`].
//!
//! ## Architecture
//! - **SharedLru**: `Arc<RwLock<LruCache>>` handle, cheap to clone
//! - **CacheStats**: Lock-free hit/miss/eviction/insert counters
//! - **CacheConfig**: Serde-backed settings (capacity, log label)
//!
//! ```
//! use lrushared::SharedLru;
//!
//! let cache = SharedLru::new(128)?;
//! let area = cache.get_or_insert_with((3, 4), || 3 * 4);
//! assert_eq!(area, 12);
//! assert_eq!(cache.stats().misses(), 1);
//! # Ok::<(), lrushared::Error>(())
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod stats;

pub use cache::SharedLru;
pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use lrukit::{Error, Result};
pub use stats::{CacheStats, StatsSnapshot};
