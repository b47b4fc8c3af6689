//! Configuration Module
//!
//! Construction-time settings for a [`Cache`](crate::Cache).

use serde::Deserialize;

/// Default number of recycled item slots kept by the pool.
pub const DEFAULT_MAX_POOL_SIZE: usize = 32;

/// Cache configuration parameters.
///
/// Fixed once the cache is built. Deserializable so an embedding application
/// can read it from its own configuration file; missing fields take defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of recycled item slots held by the pool.
    ///
    /// Bounds only the recycling buffer, never the number of live entries.
    /// Zero disables recycling.
    pub max_pool_size: usize,
}

impl CacheConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pool capacity.
    pub fn max_pool_size(mut self, max_pool_size: usize) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
        }
    }
}
