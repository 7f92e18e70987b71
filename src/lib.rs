//! Purr Cache - In-process content cache
//!
//! Named pools with per-category TTL, eviction strategy and an optional
//! serialization round trip on write, owned by an explicitly constructed
//! `CacheManager`.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use cache::{CacheManager, CachePool, Category, EvictionStrategy, PoolPolicy, PoolStats};
pub use config::Config;
pub use error::{CacheError, Result};
