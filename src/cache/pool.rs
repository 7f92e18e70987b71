//! Cache Pool Module
//!
//! A bounded, independently configured key-value store: HashMap storage,
//! lazy TTL expiration and a pluggable eviction strategy, all behind one
//! lock per pool.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::transform;
use crate::cache::{
    AccessOrder, CacheEntry, Clock, PoolCounters, PoolPolicy, PoolStats, SystemClock,
};
use crate::error::{CacheError, Result};

// == Pool State ==
/// Everything guarded by the pool lock.
#[derive(Debug)]
struct PoolState<T> {
    entries: HashMap<String, CacheEntry<T>>,
    order: AccessOrder,
    counters: PoolCounters,
    next_seq: u64,
}

impl<T> PoolState<T> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: AccessOrder::new(),
            counters: PoolCounters::default(),
            next_seq: 0,
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        self.order.remove(key);
        self.entries.remove(key).is_some()
    }

    fn purge_expired(&mut self, now: u64) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove(key);
            self.counters.record_expiration();
        }

        expired_keys.len()
    }

    fn check_invariants(&self) {
        debug_assert_eq!(
            self.entries.len(),
            self.order.len(),
            "access order out of sync with entries"
        );
    }
}

// == Cache Pool ==
/// Bounded cache for one content category.
///
/// # Type Parameters
/// - `T`: Stored value type; serde bounds back the transform step and size
///   accounting
/// - `C`: Clock used for TTL decisions (defaults to `SystemClock`)
#[derive(Debug)]
pub struct CachePool<T, C = SystemClock> {
    state: Mutex<PoolState<T>>,
    policy: PoolPolicy,
    clock: C,
}

impl<T> CachePool<T, SystemClock>
where
    T: Serialize + DeserializeOwned + Clone,
{
    // == Constructor ==
    /// Creates an empty pool governed by `policy`, using the system clock.
    pub fn new(policy: PoolPolicy) -> Self {
        Self::with_clock(policy, SystemClock)
    }
}

impl<T, C> CachePool<T, C>
where
    T: Serialize + DeserializeOwned + Clone,
    C: Clock,
{
    /// Creates an empty pool with a custom clock (useful for testing).
    pub fn with_clock(policy: PoolPolicy, clock: C) -> Self {
        Self {
            state: Mutex::new(PoolState::new()),
            policy,
            clock,
        }
    }

    // == Get ==
    /// Retrieves a copy of the value stored under `key`.
    ///
    /// A hit bumps the entry's hit count and makes it the most recently
    /// touched key. Expired entries are removed and reported as misses.
    pub fn get(&self, key: &str) -> Option<T> {
        let now = self.clock.now_ms();
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let expired = match state.entries.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                state.counters.record_miss();
                return None;
            }
        };

        if expired {
            state.remove(key);
            state.counters.record_expiration();
            state.counters.record_miss();
            debug!("Expired entry '{}' removed on read", key);
            return None;
        }

        let entry = state.entries.get_mut(key)?;
        entry.record_hit();
        let value = entry.value.clone();
        state.order.touch(key);
        Some(value)
    }

    // == Set ==
    /// Stores a value, reporting rejection as `false`.
    ///
    /// See [`CachePool::try_set`]; a rejected write leaves the pool unchanged.
    pub fn set(&self, key: &str, value: T) -> bool {
        match self.try_set(key, value) {
            Ok(()) => true,
            Err(err) => {
                warn!("Cache set for '{}' rejected: {}", key, err);
                false
            }
        }
    }

    /// Stores a value under `key`, replacing any previous entry.
    ///
    /// The value is normalized first when the policy enables the transform
    /// step. If the pool is full, expired entries are reclaimed and then
    /// live entries evicted per the strategy until one slot is free.
    ///
    /// # Errors
    /// - `ZeroCapacity` if the policy allows no entries
    /// - `Transform` if the value cannot be serialized or round-tripped
    pub fn try_set(&self, key: &str, value: T) -> Result<()> {
        if self.policy.max_entries == 0 {
            return Err(CacheError::ZeroCapacity);
        }

        let (value, size_bytes, transformed) = if self.policy.transform_on_store {
            let (normalized, size) = transform::normalize(&value)?;
            (normalized, size, true)
        } else {
            let size = transform::encoded_size(&value)?;
            (value, size, false)
        };

        let now = self.clock.now_ms();
        let mut guard = self.state.lock();
        let state = &mut *guard;

        // Replacing a key never evicts a neighbour
        state.remove(key);

        if state.entries.len() >= self.policy.max_entries {
            self.make_room(state, now);
        }

        let seq = state.next_seq;
        state.next_seq += 1;

        let entry = CacheEntry::new(value, now, self.policy.ttl_ms, size_bytes, transformed, seq);
        state.entries.insert(key.to_string(), entry);
        state.order.touch(key);

        state.check_invariants();
        Ok(())
    }

    fn make_room(&self, state: &mut PoolState<T>, now: u64) {
        let reclaimed = state.purge_expired(now);
        if reclaimed > 0 {
            debug!("Reclaimed {} expired entries before eviction", reclaimed);
        }

        while state.entries.len() >= self.policy.max_entries {
            let Some(victim) = self
                .policy
                .strategy
                .select_victim(&state.entries, &state.order)
            else {
                debug_assert!(state.entries.is_empty(), "full pool yielded no victim");
                break;
            };

            state.remove(&victim);
            state.counters.record_eviction();
            debug!(
                "Evicted '{}' ({} strategy)",
                victim,
                self.policy.strategy.as_str()
            );
        }
    }

    // == Get Or Insert ==
    /// Returns the cached value, or computes, stores and returns it.
    ///
    /// The computed value is returned even if the pool rejects it. `f` runs
    /// with the pool unlocked, so it may itself use this pool; the flip side
    /// is that concurrent callers missing the same key may each run `f`, and
    /// the last store wins.
    pub fn get_or_insert_with<F>(&self, key: &str, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        if let Some(value) = self.get(key) {
            return value;
        }

        let value = f();
        self.set(key, value.clone());
        value
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether anything was removed.
    pub fn delete(&self, key: &str) -> bool {
        let mut state = self.state.lock();
        let removed = state.remove(key);
        state.check_invariants();
        removed
    }

    // == Clear ==
    /// Removes all entries and resets the lifetime counters.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.order.clear();
        state.counters = PoolCounters::default();
    }

    // == Purge Expired ==
    /// Removes every expired entry now instead of waiting for reads.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_ms();
        self.state.lock().purge_expired(now)
    }

    // == Stats ==
    /// Returns statistics computed from the current pool state.
    pub fn stats(&self) -> PoolStats {
        let state = self.state.lock();

        PoolStats {
            size: state.entries.len(),
            total_size_bytes: state.entries.values().map(|e| e.size_bytes).sum(),
            total_hits: state.entries.values().map(|e| e.hit_count).sum(),
            strategy: self.policy.strategy,
            ttl_ms: self.policy.ttl_ms,
            transform_enabled: self.policy.transform_on_store,
            max_entries: self.policy.max_entries,
            misses: state.counters.misses,
            evictions: state.counters.evictions,
            expirations: state.counters.expirations,
        }
    }

    /// Checks for a live entry without counting a hit or touching recency.
    pub fn contains_key(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        self.state
            .lock()
            .entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired_at(now))
    }

    // == Length ==
    /// Returns the number of stored entries, including ones not yet
    /// observed as expired.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn policy(&self) -> &PoolPolicy {
        &self.policy
    }
}
