//! Cache Entry Module
//!
//! Defines the stored unit of a pool: the value plus its bookkeeping.

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value (after the optional transform step)
    pub value: T,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Number of successful reads since this entry was stored
    pub hit_count: u64,
    /// Approximate serialized size, used only for statistics
    pub size_bytes: usize,
    /// Whether the value went through the transform step
    pub transformed: bool,
    /// Pool-wide insertion sequence number, breaks eviction ties
    pub seq: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry stored at `now` that lives for `ttl_ms`.
    pub fn new(
        value: T,
        now: u64,
        ttl_ms: u64,
        size_bytes: usize,
        transformed: bool,
        seq: u64,
    ) -> Self {
        Self {
            value,
            created_at: now,
            expires_at: now.saturating_add(ttl_ms),
            hit_count: 0,
            size_bytes,
            transformed,
            seq,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is still readable at exactly `expires_at`; it expires one
    /// millisecond later.
    pub fn is_expired_at(&self, now: u64) -> bool {
        now > self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds at `now`, saturating at zero.
    #[allow(dead_code)]
    pub(crate) fn ttl_remaining_ms(&self, now: u64) -> u64 {
        self.expires_at.saturating_sub(now)
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hit_count += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("value".to_string(), 1_000, 500, 7, false, 3);

        assert_eq!(entry.value, "value");
        assert_eq!(entry.created_at, 1_000);
        assert_eq!(entry.expires_at, 1_500);
        assert_eq!(entry.hit_count, 0);
        assert_eq!(entry.size_bytes, 7);
        assert!(!entry.transformed);
        assert_eq!(entry.seq, 3);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(1u32, 1_000, 500, 1, false, 0);

        assert!(!entry.is_expired_at(1_000));
        assert!(!entry.is_expired_at(1_500), "Entry is live at expires_at");
        assert!(entry.is_expired_at(1_501));
    }

    #[test]
    fn test_expires_at_saturates() {
        let entry = CacheEntry::new(1u32, u64::MAX - 10, 1_000, 1, false, 0);
        assert_eq!(entry.expires_at, u64::MAX);
        assert!(!entry.is_expired_at(u64::MAX));
    }

    #[test]
    fn test_ttl_remaining_ms() {
        let entry = CacheEntry::new(1u32, 1_000, 10_000, 1, false, 0);

        assert_eq!(entry.ttl_remaining_ms(1_000), 10_000);
        assert_eq!(entry.ttl_remaining_ms(6_000), 5_000);
        assert_eq!(entry.ttl_remaining_ms(20_000), 0);
    }

    #[test]
    fn test_record_hit() {
        let mut entry = CacheEntry::new(1u32, 0, 10, 1, false, 0);
        entry.record_hit();
        entry.record_hit();
        assert_eq!(entry.hit_count, 2);
    }
}
