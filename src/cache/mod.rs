//! Cache Module
//!
//! Provides the in-memory cache with lazy TTL expiration and a bounded pool
//! of recycled item slots.

mod item;
mod pool;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use stats::CacheStats;
pub use store::Cache;
