//! # lrucache
//!
//! Bounded key-value cache with least-recently-used eviction.
//!
//! ## Architecture
//! - **Index**: AHash map from key to arena slot (O(1) lookup)
//! - **Ordering**: doubly-linked list threaded through the arena by slot
//!   index, with explicit head and tail (O(1) promotion and eviction)
//! - **Handle**: [`Cache`] guards index and ordering behind one mutex
//!
//! ## Example
//!
//! ```
//! use lrucache::Cache;
//!
//! let cache = Cache::new(2)?;
//! cache.set("a", 1);
//! cache.set("b", 2);
//! cache.get(&"a"); // "a" is now the most recently used
//! cache.set("c", 3); // evicts "b"
//!
//! assert_eq!(cache.get(&"b"), None);
//! assert_eq!(cache.get(&"a"), Some(1));
//! # Ok::<(), lrucache::Error>(())
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod lru;
mod stats;

pub use cache::Cache;
pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use lru::{Keys, LruCache};
pub use stats::{CacheStats, StatsSnapshot};
