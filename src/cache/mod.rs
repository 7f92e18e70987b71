//! Cache Module
//!
//! Provides named, independently configured cache pools with lazy TTL
//! expiration and LRU/FIFO/LFU eviction.

mod access;
mod clock;
mod entry;
mod manager;
mod policy;
mod pool;
mod stats;
mod transform;


// Re-export public types
pub use access::AccessOrder;
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use manager::{memo_key, CacheManager, Category, TESTIMONIALS_KEY};
pub use policy::{EvictionStrategy, PoolPolicy, DEFAULT_MAX_ENTRIES};
pub use pool::CachePool;
pub use stats::{PoolCounters, PoolStats};
pub use transform::{encoded_size, normalize};
