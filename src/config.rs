//! Configuration Module
//!
//! Handles loading cache engine settings from environment variables.
//! The per-category policy table is fixed; only pool capacity is tunable.

use std::env;

use crate::cache::DEFAULT_MAX_ENTRIES;

/// Cache engine configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries each category pool can hold
    pub max_entries: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_ENTRIES` - Per-pool capacity (default: 100). Zero or
    ///   unparsable values fall back to the default.
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(DEFAULT_MAX_ENTRIES),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}
