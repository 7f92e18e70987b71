//! Cache Statistics Module
//!
//! Pool snapshots and the lifetime counters behind them.

use serde::Serialize;

use crate::cache::EvictionStrategy;

// == Pool Counters ==
/// Lifetime event counters kept by a pool. Reset by `clear`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolCounters {
    /// Reads that found nothing (absent or expired)
    pub misses: u64,
    /// Live entries removed under capacity pressure
    pub evictions: u64,
    /// Entries removed because their TTL had elapsed
    pub expirations: u64,
}

impl PoolCounters {
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }
}

// == Pool Stats ==
/// Point-in-time statistics for a single pool.
///
/// `size`, `total_size_bytes` and `total_hits` are derived from the entries
/// currently stored, so removals are always reflected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Number of stored entries
    pub size: usize,
    /// Sum of the entries' approximate sizes
    pub total_size_bytes: usize,
    /// Sum of the entries' hit counts
    pub total_hits: u64,
    /// Eviction strategy of the pool
    pub strategy: EvictionStrategy,
    /// Pool TTL in milliseconds
    pub ttl_ms: u64,
    /// Whether the transform step is enabled
    pub transform_enabled: bool,
    /// Pool capacity
    pub max_entries: usize,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}
