//! Recycle Cache - An in-process key-value cache
//!
//! Provides a thread-safe map with optional per-entry TTL, lazy expiration on
//! read, and a bounded pool that recycles item slots between writes.
//!
//! ```
//! use std::time::Duration;
//! use recycle_cache::{Cache, CacheError};
//!
//! let cache: Cache<&str, &str> = Cache::new();
//! cache.set("key", "value");
//! assert_eq!(cache.get("key"), Ok("value"));
//!
//! cache.set_with_expiration("session", "token", Duration::ZERO);
//! assert_eq!(cache.get("session"), Err(CacheError::NotFound));
//! ```

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{Cache, CacheStats};
pub use config::{CacheConfig, DEFAULT_MAX_POOL_SIZE};
pub use error::{CacheError, Result};
