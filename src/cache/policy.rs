//! Pool Policy Module
//!
//! Immutable per-pool configuration and the eviction strategies.

use std::collections::HashMap;

use serde::Serialize;

use crate::cache::{AccessOrder, CacheEntry};

/// Capacity used when a policy does not specify one.
pub const DEFAULT_MAX_ENTRIES: usize = 100;

// == Eviction Strategy ==
/// Strategy used to pick a victim when a pool is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EvictionStrategy {
    /// Least recently used
    #[serde(rename = "lru")]
    Recency,
    /// First in, first out
    #[serde(rename = "fifo")]
    InsertionOrder,
    /// Least frequently used
    #[serde(rename = "lfu")]
    Frequency,
}

impl EvictionStrategy {
    // == Select Victim ==
    /// Picks the key to evict from the current pool state.
    ///
    /// Pure: the caller removes the chosen key. Ties under `InsertionOrder`
    /// and `Frequency` go to the entry with the smallest insertion sequence
    /// number, i.e. the one stored earliest.
    pub fn select_victim<T>(
        &self,
        entries: &HashMap<String, CacheEntry<T>>,
        order: &AccessOrder,
    ) -> Option<String> {
        match self {
            EvictionStrategy::Recency => order.least_recent().map(str::to_string),
            EvictionStrategy::InsertionOrder => entries
                .iter()
                .min_by_key(|(_, entry)| (entry.created_at, entry.seq))
                .map(|(key, _)| key.clone()),
            EvictionStrategy::Frequency => entries
                .iter()
                .min_by_key(|(_, entry)| (entry.hit_count, entry.seq))
                .map(|(key, _)| key.clone()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionStrategy::Recency => "lru",
            EvictionStrategy::InsertionOrder => "fifo",
            EvictionStrategy::Frequency => "lfu",
        }
    }
}

// == Pool Policy ==
/// Configuration fixed at pool creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolPolicy {
    /// Time-to-live in milliseconds
    pub ttl_ms: u64,
    /// Eviction strategy applied under capacity pressure
    pub strategy: EvictionStrategy,
    /// Maximum number of entries
    pub max_entries: usize,
    /// Whether values are normalized through serialization before storage
    pub transform_on_store: bool,
}

impl PoolPolicy {
    /// Creates a policy with the default capacity.
    pub const fn new(ttl_ms: u64, strategy: EvictionStrategy, transform_on_store: bool) -> Self {
        Self {
            ttl_ms,
            strategy,
            max_entries: DEFAULT_MAX_ENTRIES,
            transform_on_store,
        }
    }

    /// Returns the policy with a different capacity.
    pub const fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }
}
